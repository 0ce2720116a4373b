//! Walks an analyzed AST and emits its structured IR (§4.4).
//!
//! A single cursor over one growing instruction buffer per function,
//! generalized from a CFG-block cursor to a flat, structured-control
//! cursor, since this IR has no basic blocks to thread a `current_block`
//! through.

use wabc_par::ast::{BinOp, Block, Expr, ExprKind, Location, Program as AstProgram, Stmt, Type, UnOp};
use wabc_sem::context::TypeContext;
use wabc_util::symbol::{ID_INIT, ID_MAIN};
use wabc_util::Symbol;

use crate::instr::{Instruction, Width};
use crate::program::{Function, Program};
use crate::scope::LocalNamer;

/// Lowers one analyzed program to IR. Borrowed for the whole build: the
/// `TypeContext` supplies every expression's type (recorded by
/// `wabc-sem`), which the generator needs for width suffixes and for the
/// type of an uninitialized `var`'s `LOCAL_DECL`/`GLOBAL_DECL`, but never
/// needs the symbol table — locality falls out of the AST's own
/// lexical nesting (see [`crate::scope`]), and a `CALL`'s arity comes
/// directly from its argument list.
pub struct Builder<'a> {
    types: &'a TypeContext,
    namer: LocalNamer,
    instructions: Vec<Instruction>,
}

impl<'a> Builder<'a> {
    pub fn new(types: &'a TypeContext) -> Self {
        Self { types, namer: LocalNamer::new(), instructions: Vec::new() }
    }

    /// Lowers a whole program: the flattened globals, `__init`, every
    /// non-imported function in source order, and a synthesized `main`
    /// if the source declared none.
    ///
    /// `import func`s have no body and emit no `Function` of their own —
    /// §6 leaves binding them to the back-end's host runtime.
    pub fn build(program: &AstProgram, types: &'a TypeContext) -> Program {
        let mut builder = Builder::new(types);

        let globals = program
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::VarDecl { name, declared_type, init, .. } => {
                    let ty = declared_type.unwrap_or_else(|| builder.inferred_type(init.as_ref()));
                    Some(Instruction::GlobalDecl(*name, ty))
                }
                _ => None,
            })
            .collect();

        let mut functions = vec![builder.emit_init(program)];

        let mut saw_main = false;
        for stmt in program {
            if let Stmt::FuncDecl { imported: false, name, params, return_type, body: Some(body), .. } = stmt {
                if *name == ID_MAIN {
                    saw_main = true;
                }
                functions.push(builder.emit_function(*name, params, *return_type, body));
            }
        }

        if !saw_main {
            functions.push(Function {
                name: ID_MAIN,
                params: Vec::new(),
                return_type: Type::Int,
                instructions: vec![Instruction::ConstI(0), Instruction::Return],
            });
        }

        Program { globals, functions }
    }

    fn inferred_type(&self, init: Option<&Expr>) -> Type {
        init.map(|e| self.types.type_of(e.id)).unwrap_or(Type::Error)
    }

    /// `__init`: every top-level `var`/`const` initializer, plus any
    /// other top-level statement, in source order — the program's
    /// "implicit block of global-initializer statements" (§4.3). Nested
    /// blocks of non-declaration top-level statements (a bare top-level
    /// `if`/`while`) get their own locals, scoped to `__init` itself,
    /// not promoted to globals.
    fn emit_init(&mut self, program: &AstProgram) -> Function {
        let mut locals = Vec::new();
        let mut scan = LocalNamer::new();
        for stmt in program {
            match stmt {
                Stmt::FuncDecl { .. } | Stmt::VarDecl { .. } => {}
                Stmt::If { then_block, else_block, .. } => {
                    collect_block_locals(then_block, self.types, &mut scan, &mut locals);
                    if let Some(else_block) = else_block {
                        collect_block_locals(else_block, self.types, &mut scan, &mut locals);
                    }
                }
                Stmt::While { body, .. } => collect_block_locals(body, self.types, &mut scan, &mut locals),
                _ => {}
            }
        }

        self.instructions = locals.iter().map(|(n, t)| Instruction::LocalDecl(*n, *t)).collect();
        self.namer = LocalNamer::new();

        for stmt in program {
            match stmt {
                Stmt::FuncDecl { .. } => {}
                Stmt::VarDecl { name, init, .. } => {
                    if let Some(init) = init {
                        self.emit_expr(init);
                        self.push(Instruction::GlobalSet(*name));
                    }
                }
                other => self.emit_stmt(other),
            }
        }
        self.ensure_trailing_return(Type::Int);

        Function {
            name: ID_INIT,
            params: Vec::new(),
            return_type: Type::Int,
            instructions: std::mem::take(&mut self.instructions),
        }
    }

    fn emit_function(&mut self, name: Symbol, params: &[(Symbol, Type)], return_type: Type, body: &Block) -> Function {
        let mut locals = Vec::new();
        let mut scan = LocalNamer::new();
        scan.push();
        for (p, _) in params {
            scan.declare(*p);
        }
        collect_block_locals(body, self.types, &mut scan, &mut locals);
        scan.pop();

        self.instructions = locals.iter().map(|(n, t)| Instruction::LocalDecl(*n, *t)).collect();
        self.namer = LocalNamer::new();
        self.namer.push();
        for (p, _) in params {
            self.namer.declare(*p);
        }
        self.emit_block(body);
        self.namer.pop();
        self.ensure_trailing_return(return_type);

        Function { name, params: params.to_vec(), return_type, instructions: std::mem::take(&mut self.instructions) }
    }

    /// Functions always terminate with `RETURN` under a clean semantic
    /// pass (`CONTROL_MISSING_RETURN` rejects anything else) — this only
    /// actually fires for `__init`, which has no source-level `return`
    /// at all.
    fn ensure_trailing_return(&mut self, return_type: Type) {
        if !matches!(self.instructions.last(), Some(Instruction::Return)) {
            self.push(default_const(return_type));
            self.push(Instruction::Return);
        }
    }

    fn push(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    fn emit_block(&mut self, block: &Block) {
        self.namer.push();
        for stmt in block {
            self.emit_stmt(stmt);
        }
        self.namer.pop();
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, init, .. } => {
                let ir_name = self.namer.declare(*name);
                if let Some(init) = init {
                    self.emit_expr(init);
                    self.push(Instruction::LocalSet(ir_name));
                }
            }
            // A nested `func` is already rejected by the parser
            // (`PARSE_NESTED_FUNCTION`); nothing to lower.
            Stmt::FuncDecl { .. } => {}
            Stmt::Assign { target, value, .. } => self.emit_assign(target, value),
            Stmt::If { cond, then_block, else_block, .. } => {
                self.emit_expr(cond);
                self.push(Instruction::If);
                self.emit_block(then_block);
                self.push(Instruction::Else);
                if let Some(else_block) = else_block {
                    self.emit_block(else_block);
                }
                self.push(Instruction::EndIf);
            }
            Stmt::While { cond, body, .. } => {
                self.push(Instruction::Loop);
                self.emit_expr(cond);
                self.push(Instruction::Not);
                self.push(Instruction::CBreak);
                self.emit_block(body);
                self.push(Instruction::EndLoop);
            }
            Stmt::Break { .. } => {
                self.push(Instruction::ConstB(true));
                self.push(Instruction::CBreak);
            }
            Stmt::Continue { .. } => self.push(Instruction::Continue),
            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.emit_expr(value);
                }
                self.push(Instruction::Return);
            }
            Stmt::Print { value, .. } => {
                self.emit_expr(value);
                self.push(Instruction::Print(Width::of(self.types.type_of(value.id))));
            }
            Stmt::ExpressionStmt { call, .. } => {
                self.emit_expr(call);
                self.push(Instruction::Drop);
            }
            Stmt::Error { .. } => {}
        }
    }

    fn emit_assign(&mut self, target: &Location, value: &Expr) {
        match target {
            Location::Name(name, _) => {
                self.emit_expr(value);
                match self.namer.resolve(*name) {
                    Some(ir_name) => self.push(Instruction::LocalSet(ir_name)),
                    None => self.push(Instruction::GlobalSet(*name)),
                }
            }
            Location::MemStore(addr, _) => {
                self.emit_expr(value);
                self.emit_expr(addr);
                self.push(Instruction::Poke(Width::of(self.types.type_of(value.id))));
            }
        }
    }

    fn emit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Integer(n) => self.push(Instruction::ConstI(*n)),
            ExprKind::Float(x) => self.push(Instruction::ConstF(*x)),
            ExprKind::Char(b) => self.push(Instruction::ConstC(*b)),
            ExprKind::Bool(b) => self.push(Instruction::ConstB(*b)),
            ExprKind::Name(name) => match self.namer.resolve(*name) {
                Some(ir_name) => self.push(Instruction::LocalGet(ir_name)),
                None => self.push(Instruction::GlobalGet(*name)),
            },
            ExprKind::Binary(op, lhs, rhs) => self.emit_binary(*op, lhs, rhs),
            ExprKind::Unary(op, operand) => self.emit_unary(*op, operand, expr),
            ExprKind::Cast(target, inner) => self.emit_cast(*target, inner),
            ExprKind::Call(name, args) => self.emit_call(*name, args),
            ExprKind::Error => unreachable!("irgen only runs on an error-free program"),
        }
    }

    /// `&&`/`||` always lower to the short-circuit `IF`/`ELSE`/`ENDIF`
    /// form (§4.4 emission rules), not to `Instruction::And`/`Or`.
    fn emit_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) {
        match op {
            BinOp::And => {
                self.emit_expr(lhs);
                self.push(Instruction::If);
                self.emit_expr(rhs);
                self.push(Instruction::Else);
                self.push(Instruction::ConstB(false));
                self.push(Instruction::EndIf);
            }
            BinOp::Or => {
                self.emit_expr(lhs);
                self.push(Instruction::If);
                self.push(Instruction::ConstB(true));
                self.push(Instruction::Else);
                self.emit_expr(rhs);
                self.push(Instruction::EndIf);
            }
            _ => {
                self.emit_expr(lhs);
                self.emit_expr(rhs);
                let w = Width::of(self.types.type_of(lhs.id));
                self.push(match op {
                    BinOp::Add => Instruction::Add(w),
                    BinOp::Sub => Instruction::Sub(w),
                    BinOp::Mul => Instruction::Mul(w),
                    BinOp::Div => Instruction::Div(w),
                    BinOp::Lt => Instruction::Lt(w),
                    BinOp::Le => Instruction::Le(w),
                    BinOp::Gt => Instruction::Gt(w),
                    BinOp::Ge => Instruction::Ge(w),
                    BinOp::Eq => Instruction::Eq(w),
                    BinOp::Ne => Instruction::Ne(w),
                    BinOp::And | BinOp::Or => unreachable!("handled above"),
                });
            }
        }
    }

    fn emit_unary(&mut self, op: UnOp, operand: &Expr, expr: &Expr) {
        match op {
            // Unary `+` is a pure type-check assertion in `wabc-sem`;
            // nothing to emit beyond the operand itself.
            UnOp::Plus => self.emit_expr(operand),
            UnOp::Neg => {
                self.emit_expr(operand);
                self.push(Instruction::Neg(Width::of(self.types.type_of(operand.id))));
            }
            UnOp::Not => {
                self.emit_expr(operand);
                self.push(Instruction::Not);
            }
            UnOp::Grow => {
                self.emit_expr(operand);
                self.push(Instruction::Grow);
            }
            UnOp::Load => {
                self.emit_expr(operand);
                self.push(Instruction::Peek(Width::of(self.types.type_of(expr.id))));
            }
        }
    }

    fn emit_cast(&mut self, target: Type, inner: &Expr) {
        let inner_ty = self.types.type_of(inner.id);
        self.emit_expr(inner);
        match (inner_ty, target) {
            (Type::Int, Type::Float) => self.push(Instruction::ItoF),
            (Type::Float, Type::Int) => self.push(Instruction::FtoI),
            (Type::Int, Type::Int) | (Type::Float, Type::Float) => {}
            _ => unreachable!("wabc-sem rejects every other cast before irgen runs"),
        }
    }

    fn emit_call(&mut self, name: Symbol, args: &[Expr]) {
        for arg in args {
            self.emit_expr(arg);
        }
        self.push(Instruction::Call(name, args.len() as u32));
    }
}

/// Walks one `Block`'s statements recursively (into `if`/`while` bodies),
/// declaring every `var`/`const` it finds, in lexical order, into both
/// `namer` (so later declarations in the same run see consistent slot
/// names) and `out` (the flat `LOCAL_DECL` list for the enclosing
/// function's prologue).
fn collect_block_locals(block: &Block, types: &TypeContext, namer: &mut LocalNamer, out: &mut Vec<(Symbol, Type)>) {
    namer.push();
    for stmt in block {
        match stmt {
            Stmt::VarDecl { name, declared_type, init, .. } => {
                let ty = declared_type.unwrap_or_else(|| init.as_ref().map(|e| types.type_of(e.id)).unwrap_or(Type::Error));
                let ir_name = namer.declare(*name);
                out.push((ir_name, ty));
            }
            Stmt::If { then_block, else_block, .. } => {
                collect_block_locals(then_block, types, namer, out);
                if let Some(else_block) = else_block {
                    collect_block_locals(else_block, types, namer, out);
                }
            }
            Stmt::While { body, .. } => collect_block_locals(body, types, namer, out),
            _ => {}
        }
    }
    namer.pop();
}

fn default_const(ty: Type) -> Instruction {
    match ty {
        Type::Int => Instruction::ConstI(0),
        Type::Float => Instruction::ConstF(0.0),
        Type::Char => Instruction::ConstC(0),
        Type::Bool => Instruction::ConstB(false),
        Type::Error => unreachable!("irgen only runs on an error-free program"),
    }
}
