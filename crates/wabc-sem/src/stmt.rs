//! Statement validation and the second pass over the top level (§4.3
//! "Statement rules"). Function bodies and global initializers are
//! checked here, in textual order, against the bindings pass one (see
//! [`crate::collect`]) already installed in the global scope.

use wabc_util::{DiagnosticBuilder, DiagnosticCode, Span, Symbol};

use wabc_par::ast::{Block, Expr, Location, Stmt, Type, VarKind};

use crate::control::block_terminates;
use crate::fold;
use crate::scope::RibKind;
use crate::symtab::{SymbolInfo, SymbolKind};
use crate::Analyzer;

impl<'a> Analyzer<'a> {
    /// Pass two, one top-level statement at a time, in source order —
    /// global initializers run conceptually in this order before `main`
    /// (§4.3).
    pub(crate) fn check_top_level_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FuncDecl { imported, name, params, return_type, body, span } => {
                self.check_func_decl(*imported, *name, params, *return_type, body.as_ref(), *span);
            }
            Stmt::VarDecl { kind, name, declared_type, init, span } => {
                self.check_global_var_decl(*kind, *name, *declared_type, init.as_ref(), *span);
            }
            other => self.check_stmt(other),
        }
    }

    fn check_func_decl(
        &mut self,
        imported: bool,
        name: Symbol,
        params: &[(Symbol, Type)],
        return_type: Type,
        body: Option<&Block>,
        span: Span,
    ) {
        if imported {
            // No body to check (§4.2: `import func` has none); the
            // signature was already recorded in pass one.
            return;
        }
        let Some(body) = body else { return };

        self.scopes.enter(RibKind::Function);
        for (pname, pty) in params {
            let def_id = self.symtab.declare(SymbolInfo {
                name: *pname,
                kind: SymbolKind::Param,
                ty: *pty,
                sig: None,
                span,
            });
            if !self.scopes.bind(*pname, def_id) {
                self.report_duplicate(*pname, span);
            }
        }

        let prev_return_type = self.current_return_type.replace(return_type);
        self.check_block(body);
        self.current_return_type = prev_return_type;
        self.scopes.exit();

        if !block_terminates(body) {
            self.error(
                span,
                DiagnosticCode::CONTROL_MISSING_RETURN,
                format!("function `{name}` does not return on every path"),
            );
        }
    }

    fn check_global_var_decl(
        &mut self,
        kind: VarKind,
        name: Symbol,
        declared_type: Option<Type>,
        init: Option<&Expr>,
        span: Span,
    ) {
        let ty = self.resolve_var_decl_type(kind, declared_type, init, span);
        let Some(def_id) = self.scopes.resolve(name) else {
            return; // unreachable under correct pass-one collection
        };
        self.symtab.get_mut(def_id).ty = ty;
        if kind == VarKind::Const {
            self.fold_const(def_id, init);
        }
    }

    pub(crate) fn check_block(&mut self, block: &Block) {
        self.scopes.enter(RibKind::Block);
        for stmt in block {
            self.check_stmt(stmt);
        }
        self.scopes.exit();
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { kind, name, declared_type, init, span } => {
                self.check_local_var_decl(*kind, *name, *declared_type, init.as_ref(), *span);
            }
            // A nested `func`/`import func` is already reported by the
            // parser (§4.2 `PARSE_NESTED_FUNCTION`); nothing further to
            // check here.
            Stmt::FuncDecl { .. } => {}
            Stmt::Assign { target, value, span } => self.check_assign(target, value, *span),
            Stmt::If { cond, then_block, else_block, .. } => {
                self.check_condition(cond);
                self.check_block(then_block);
                if let Some(else_block) = else_block {
                    self.check_block(else_block);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.check_condition(cond);
                self.scopes.enter(RibKind::Loop);
                self.check_block(body);
                self.scopes.exit();
            }
            Stmt::Break { span } => self.check_loop_control(*span),
            Stmt::Continue { span } => self.check_loop_control(*span),
            Stmt::Return { value, span } => self.check_return(value.as_ref(), *span),
            // A bare backtick load in print position has no sibling
            // expression to take its context from; §4.3 defaults it to
            // `int` rather than reporting an uninferable load.
            Stmt::Print { value, .. } => {
                self.check_expr(value, Some(Type::Int));
            }
            Stmt::ExpressionStmt { call, .. } => {
                self.check_expr(call, None);
            }
            Stmt::Error { .. } => {}
        }
    }

    fn check_condition(&mut self, cond: &Expr) {
        let ty = self.check_expr(cond, Some(Type::Bool));
        if ty != Type::Bool && ty != Type::Error {
            self.error(
                cond.span,
                DiagnosticCode::TYPE_CONDITION_NOT_BOOL,
                format!("condition must be `bool`, found `{ty}`"),
            );
        }
    }

    fn check_loop_control(&mut self, span: Span) {
        if !self.scopes.in_loop() {
            self.error(
                span,
                DiagnosticCode::SCOPE_LOOP_CONTROL_OUTSIDE_LOOP,
                "`break`/`continue` outside of a loop".to_string(),
            );
        }
    }

    fn check_return(&mut self, value: Option<&Expr>, span: Span) {
        let Some(ret_ty) = self.current_return_type else {
            // `return` outside any function is already flagged by the
            // parser (`PARSE_RETURN_OUTSIDE_FUNCTION`); still type-check
            // the value, if any, so later expressions in the same
            // (malformed) program keep getting types.
            if let Some(value) = value {
                self.check_expr(value, None);
            }
            return;
        };

        match value {
            Some(value) => {
                let ty = self.check_expr(value, Some(ret_ty));
                if ty != ret_ty && ty != Type::Error {
                    self.error(
                        value.span,
                        DiagnosticCode::TYPE_MISMATCH,
                        format!("returned `{ty}`, expected `{ret_ty}`"),
                    );
                }
            }
            None => {
                self.error(
                    span,
                    DiagnosticCode::TYPE_MISMATCH,
                    format!("expected a return value of type `{ret_ty}`"),
                );
            }
        }
    }

    fn check_assign(&mut self, target: &Location, value: &Expr, span: Span) {
        match target {
            Location::Name(name, nspan) => {
                let Some(def_id) = self.scopes.resolve(*name) else {
                    self.error(*nspan, DiagnosticCode::SCOPE_UNDEFINED_NAME, format!("undefined name `{name}`"));
                    self.check_expr(value, None);
                    return;
                };
                let info = self.symtab.get(def_id);
                if info.kind == SymbolKind::Const {
                    self.error(*nspan, DiagnosticCode::SCOPE_ASSIGN_TO_CONST, format!("cannot assign to `const {name}`"));
                } else if info.kind.is_callable() {
                    self.error(
                        *nspan,
                        DiagnosticCode::SCOPE_KIND_MISMATCH,
                        format!("`{name}` is a function, not a variable"),
                    );
                }
                let lhs_ty = info.ty;
                let value_ty = self.check_expr(value, Some(lhs_ty));
                if value_ty != lhs_ty && value_ty != Type::Error && lhs_ty != Type::Error {
                    self.error(
                        span,
                        DiagnosticCode::TYPE_MISMATCH,
                        format!("cannot assign `{value_ty}` to `{name}` of type `{lhs_ty}`"),
                    );
                }
            }
            Location::MemStore(addr, mspan) => {
                let addr_ty = self.check_expr(addr, Some(Type::Int));
                if addr_ty != Type::Error && addr_ty != Type::Int {
                    self.error(
                        *mspan,
                        DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                        format!("`` ` `` requires an `int` address, found `{addr_ty}`"),
                    );
                }
                // The stored width is determined by the value's own type
                // (§4.3); no context flows into it from the address.
                self.check_expr(value, None);
            }
        }
    }

    fn check_local_var_decl(
        &mut self,
        kind: VarKind,
        name: Symbol,
        declared_type: Option<Type>,
        init: Option<&Expr>,
        span: Span,
    ) {
        let ty = self.resolve_var_decl_type(kind, declared_type, init, span);
        let symbol_kind = if kind == VarKind::Const { SymbolKind::Const } else { SymbolKind::Var };
        let def_id = self.symtab.declare(SymbolInfo { name, kind: symbol_kind, ty, sig: None, span });
        if !self.scopes.bind(name, def_id) {
            self.report_duplicate(name, span);
        }
        if kind == VarKind::Const {
            self.fold_const(def_id, init);
        }
    }

    /// Shared by local and global `var`/`const` declarations: validates
    /// that a `const` has an initializer, that an initializer's type
    /// matches a declared type, and infers the type when none is
    /// declared (§4.3 "Statement rules").
    pub(crate) fn resolve_var_decl_type(
        &mut self,
        kind: VarKind,
        declared_type: Option<Type>,
        init: Option<&Expr>,
        span: Span,
    ) -> Type {
        if kind == VarKind::Const && init.is_none() {
            self.error(
                span,
                DiagnosticCode::TYPE_NON_CONSTANT_INITIALIZER,
                "`const` declarations require an initializer".to_string(),
            );
            return Type::Error;
        }

        match (declared_type, init) {
            (Some(declared), Some(init)) => {
                let init_ty = self.check_expr(init, Some(declared));
                if init_ty != declared && init_ty != Type::Error {
                    self.error(
                        init.span,
                        DiagnosticCode::TYPE_MISMATCH,
                        format!("initializer has type `{init_ty}`, expected `{declared}`"),
                    );
                }
                declared
            }
            (Some(declared), None) => declared,
            (None, Some(init)) => self.check_expr(init, None),
            (None, None) => {
                self.error(
                    span,
                    DiagnosticCode::TYPE_MISMATCH,
                    "a variable declaration needs a type annotation or an initializer".to_string(),
                );
                Type::Error
            }
        }
    }

    fn fold_const(&mut self, def_id: wabc_util::DefId, init: Option<&Expr>) {
        let Some(init) = init else { return };
        match fold::eval(init, &self.consts, &self.ctx) {
            Some(value) => {
                self.consts.insert(def_id, value);
            }
            None => {
                self.error(
                    init.span,
                    DiagnosticCode::TYPE_NON_CONSTANT_INITIALIZER,
                    "`const` initializer must be a compile-time constant expression".to_string(),
                );
            }
        }
    }

    fn report_duplicate(&self, name: Symbol, span: Span) {
        DiagnosticBuilder::error(format!("`{name}` is already declared in this scope"))
            .code(DiagnosticCode::SCOPE_DUPLICATE_DECL)
            .span(span)
            .emit(self.handler);
    }
}
