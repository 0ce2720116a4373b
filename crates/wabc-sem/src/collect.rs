//! Pass one of the top-level walk (§4.3 "Two-pass over top level"):
//! inserts every top-level `func`, `import func`, `var`, and `const` into
//! the global scope before anything is type-checked, so that forward
//! references — including self-recursion and mutual recursion between
//! functions declared in either order — resolve during pass two.

use wabc_util::{DiagnosticBuilder, DiagnosticCode};

use wabc_par::ast::{Program, Stmt, Type, VarKind};

use crate::symtab::{FuncSig, SymbolInfo, SymbolKind};
use crate::Analyzer;

impl<'a> Analyzer<'a> {
    pub(crate) fn collect_top_level(&mut self, program: &Program) {
        for stmt in program {
            match stmt {
                Stmt::FuncDecl { imported, name, params, return_type, span, .. } => {
                    let sig = FuncSig {
                        params: params.iter().map(|(_, ty)| *ty).collect(),
                        return_type: *return_type,
                    };
                    let kind = if *imported { SymbolKind::ImportedFunc } else { SymbolKind::Func };
                    let def_id = self.symtab.declare(SymbolInfo {
                        name: *name,
                        kind,
                        ty: *return_type,
                        sig: Some(sig),
                        span: *span,
                    });
                    if !self.scopes.bind(*name, def_id) {
                        self.report_duplicate(*name, *span);
                    }
                    if *name == wabc_util::symbol::ID_MAIN {
                        self.saw_main = true;
                    }
                }
                Stmt::VarDecl { kind, name, declared_type, span, .. } => {
                    // The declared type may be absent (inferred from the
                    // initializer in pass two); a placeholder `Error` type
                    // is refined once pass two actually checks this
                    // declaration's initializer. A forward reference from
                    // an earlier function body to a type-inferred global
                    // declared later in the program sees this placeholder
                    // until pass two reaches the declaration itself — an
                    // accepted edge case, see DESIGN.md.
                    let symbol_kind = if *kind == VarKind::Const { SymbolKind::Const } else { SymbolKind::Var };
                    let ty = declared_type.unwrap_or(Type::Error);
                    let def_id = self.symtab.declare(SymbolInfo {
                        name: *name,
                        kind: symbol_kind,
                        ty,
                        sig: None,
                        span: *span,
                    });
                    if !self.scopes.bind(*name, def_id) {
                        self.report_duplicate(*name, *span);
                    }
                }
                // Anything else syntactically accepted at the top level
                // (a bare `if`, `print`, assignment, …) declares nothing
                // and is left for pass two, which treats the top level as
                // an implicit block of global-initializer statements.
                _ => {}
            }
        }
    }

    fn report_duplicate(&self, name: wabc_util::Symbol, span: wabc_util::Span) {
        DiagnosticBuilder::error(format!("`{name}` is already declared in this scope"))
            .code(DiagnosticCode::SCOPE_DUPLICATE_DECL)
            .span(span)
            .emit(self.handler);
    }
}
