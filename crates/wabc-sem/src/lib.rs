//! wabc-sem — Semantic analyzer for Wabbit (§4.3).
//!
//! A single bottom-up walk over the parsed [`wabc_par::ast::Program`]
//! that resolves every name, assigns a type to every expression, and
//! validates every statement, reporting through the shared [`Handler`]
//! sink. Two passes over the top level: the first inserts every
//! top-level `func`/`import func`/`var`/`const` into the global scope so
//! forward references (recursion, mutual recursion) resolve; the second
//! type-checks function bodies and global initializers in textual order.

mod collect;
pub mod context;
mod control;
mod expr;
pub mod fold;
pub mod scope;
mod stmt;
pub mod symtab;

use wabc_util::{DefId, FxHashMap, Handler};

use wabc_par::ast::{Program, Type};

use context::TypeContext;
use fold::Value;
use scope::ScopeTree;
use symtab::SymbolTable;

/// Output of a completed analysis: a type for every expression and the
/// flat symbol table both it and the IR generator index into.
pub struct AnalysisResult {
    pub types: TypeContext,
    pub symtab: SymbolTable,
}

/// Runs semantic analysis over `program`, reporting diagnostics to
/// `handler`. Per §4.3, a program with no `main` is legal and synthesizes
/// one; that synthesis happens here so the IR generator always sees a
/// `main`.
pub fn analyze(program: &Program, handler: &Handler) -> AnalysisResult {
    let mut analyzer = Analyzer::new(handler);
    analyzer.run(program);
    AnalysisResult { types: analyzer.ctx, symtab: analyzer.symtab }
}

pub(crate) struct Analyzer<'a> {
    pub(crate) handler: &'a Handler,
    pub(crate) scopes: ScopeTree,
    pub(crate) symtab: SymbolTable,
    pub(crate) ctx: TypeContext,
    pub(crate) consts: FxHashMap<DefId, Value>,
    /// Return type of the function body currently being checked; `None`
    /// at global (top-level initializer) scope.
    pub(crate) current_return_type: Option<Type>,
    pub(crate) saw_main: bool,
}

impl<'a> Analyzer<'a> {
    fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            scopes: ScopeTree::new(),
            symtab: SymbolTable::new(),
            ctx: TypeContext::new(),
            consts: FxHashMap::default(),
            current_return_type: None,
            saw_main: false,
        }
    }

    fn run(&mut self, program: &Program) {
        self.collect_top_level(program);
        for stmt in program {
            self.check_top_level_stmt(stmt);
        }
        if !self.saw_main {
            self.synthesize_main();
        }
    }

    /// §4.3: "A program without a `main` function is legal; the analyzer
    /// synthesizes an empty `main` returning `0`." The IR generator's
    /// `__init` prologue still runs before it; nothing else is needed
    /// here beyond registering the symbol so a back-end sees a callable
    /// `main`.
    fn synthesize_main(&mut self) {
        let name = wabc_util::Symbol::intern("main");
        let sig = symtab::FuncSig { params: Vec::new(), return_type: Type::Int };
        let id = self.symtab.declare(symtab::SymbolInfo {
            name,
            kind: symtab::SymbolKind::Func,
            ty: Type::Int,
            sig: Some(sig),
            span: wabc_util::Span::DUMMY,
        });
        self.scopes.bind(name, id);
    }
}
