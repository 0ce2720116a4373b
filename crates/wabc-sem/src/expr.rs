//! Expression type-checking (§4.3 "Typing rules").
//!
//! `check_expr` threads an `expected: Option<Type>` context parameter
//! down the tree (§9 "Context-dependent typing of backtick loads"): the
//! LHS type in an assignment, a parameter's declared type in a call, the
//! other operand's type in a binary expression, or the declared/inferred
//! type in a `var`/`const` declaration. A backtick load with no such
//! context reports `TYPE_UNINFERABLE_LOAD` rather than guessing (§9,
//! "canonical rule").

use wabc_util::{DiagnosticBuilder, DiagnosticCode};

use wabc_par::ast::{BinOp, Expr, ExprKind, Type, UnOp};

use crate::Analyzer;

impl<'a> Analyzer<'a> {
    pub(crate) fn check_expr(&mut self, expr: &Expr, expected: Option<Type>) -> Type {
        let ty = self.check_expr_kind(expr, expected);
        self.ctx.record_type(expr.id, ty);
        ty
    }

    fn check_expr_kind(&mut self, expr: &Expr, expected: Option<Type>) -> Type {
        match &expr.kind {
            ExprKind::Integer(_) => Type::Int,
            ExprKind::Float(_) => Type::Float,
            ExprKind::Char(_) => Type::Char,
            ExprKind::Bool(_) => Type::Bool,
            ExprKind::Name(name) => self.check_name(expr, *name),
            ExprKind::Binary(op, lhs, rhs) => self.check_binary(expr, *op, lhs, rhs),
            ExprKind::Unary(op, operand) => self.check_unary(expr, *op, operand, expected),
            ExprKind::Cast(target, inner) => self.check_cast(expr, *target, inner),
            ExprKind::Call(name, args) => self.check_call(expr, *name, args),
            ExprKind::Error => Type::Error,
        }
    }

    fn check_name(&mut self, expr: &Expr, name: wabc_util::Symbol) -> Type {
        let Some(def_id) = self.scopes.resolve(name) else {
            self.error(expr.span, DiagnosticCode::SCOPE_UNDEFINED_NAME, format!("undefined name `{name}`"));
            return Type::Error;
        };
        let info = self.symtab.get(def_id);
        if info.kind.is_callable() {
            self.error(
                expr.span,
                DiagnosticCode::SCOPE_KIND_MISMATCH,
                format!("`{name}` is a function, not a variable"),
            );
            return Type::Error;
        }
        self.ctx.record_resolution(expr.id, def_id);
        info.ty
    }

    fn check_binary(&mut self, expr: &Expr, op: BinOp, lhs: &Expr, rhs: &Expr) -> Type {
        // Thread whichever side is checked first as the expected-type
        // context for the other, so a lone backtick load on either side
        // infers its width from its sibling (§4.3 "other-operand type in
        // a binary expression").
        let (lty, rty) = if is_load(lhs) && !is_load(rhs) {
            let rty = self.check_expr(rhs, None);
            let lty = self.check_expr(lhs, Some(rty));
            (lty, rty)
        } else {
            let lty = self.check_expr(lhs, None);
            let rty = self.check_expr(rhs, Some(lty));
            (lty, rty)
        };

        if lty == Type::Error || rty == Type::Error {
            return Type::Error;
        }

        if op.is_logical() {
            if lty == Type::Bool && rty == Type::Bool {
                return Type::Bool;
            }
            self.error(
                expr.span,
                DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                format!("`{op}` requires `bool` operands, found `{lty}` and `{rty}`"),
            );
            return Type::Error;
        }

        if op.is_relational() {
            if lty != rty {
                self.error(
                    expr.span,
                    DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                    format!("`{op}` requires matching operand types, found `{lty}` and `{rty}`"),
                );
                return Type::Error;
            }
            // Bool supports only `==`/`!=` among the relational set (§4.3).
            if lty == Type::Bool && matches!(op, BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge) {
                self.error(
                    expr.span,
                    DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                    format!("`bool` only supports `==` and `!=`, not `{op}`"),
                );
                return Type::Error;
            }
            return Type::Bool;
        }

        // Arithmetic: both operands the same numeric type, same result type.
        if lty.is_numeric() && lty == rty {
            return lty;
        }
        self.error(
            expr.span,
            DiagnosticCode::TYPE_OPERATOR_MISMATCH,
            format!("`{op}` requires matching numeric operands, found `{lty}` and `{rty}`"),
        );
        Type::Error
    }

    fn check_unary(&mut self, expr: &Expr, op: UnOp, operand: &Expr, expected: Option<Type>) -> Type {
        match op {
            UnOp::Plus | UnOp::Neg => {
                let ty = self.check_expr(operand, expected);
                if ty == Type::Error {
                    return Type::Error;
                }
                if ty.is_numeric() {
                    ty
                } else {
                    self.error(
                        expr.span,
                        DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                        format!("unary `{op}` requires a numeric operand, found `{ty}`"),
                    );
                    Type::Error
                }
            }
            UnOp::Not => {
                let ty = self.check_expr(operand, Some(Type::Bool));
                if ty == Type::Error {
                    return Type::Error;
                }
                if ty == Type::Bool {
                    Type::Bool
                } else {
                    self.error(
                        expr.span,
                        DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                        format!("`!` requires a `bool` operand, found `{ty}`"),
                    );
                    Type::Error
                }
            }
            UnOp::Grow => {
                let ty = self.check_expr(operand, Some(Type::Int));
                if ty == Type::Error {
                    return Type::Error;
                }
                if ty != Type::Int {
                    self.error(
                        expr.span,
                        DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                        format!("`^` requires an `int` operand, found `{ty}`"),
                    );
                }
                Type::Int
            }
            UnOp::Load => {
                let addr_ty = self.check_expr(operand, Some(Type::Int));
                if addr_ty != Type::Error && addr_ty != Type::Int {
                    self.error(
                        expr.span,
                        DiagnosticCode::TYPE_OPERATOR_MISMATCH,
                        format!("`` ` `` requires an `int` address, found `{addr_ty}`"),
                    );
                }
                match expected {
                    Some(ty) => ty,
                    None => {
                        self.error(
                            expr.span,
                            DiagnosticCode::TYPE_UNINFERABLE_LOAD,
                            "memory load has no inferable type from context".to_string(),
                        );
                        Type::Error
                    }
                }
            }
        }
    }

    fn check_cast(&mut self, expr: &Expr, target: Type, inner: &Expr) -> Type {
        // Casts are not a listed context source (§4.3): an inner backtick
        // load still needs its own disambiguating context and reports
        // `TYPE_UNINFERABLE_LOAD` if it lacks one.
        let inner_ty = self.check_expr(inner, None);

        if !matches!(target, Type::Int | Type::Float) {
            self.error(
                expr.span,
                DiagnosticCode::TYPE_INVALID_CAST_TARGET,
                format!("`{target}` is not a valid cast target (only `int`/`float` are)"),
            );
            return Type::Error;
        }

        if inner_ty == Type::Error {
            return Type::Error;
        }

        if !inner_ty.is_numeric() {
            self.error(
                expr.span,
                DiagnosticCode::TYPE_MISMATCH,
                format!("cannot cast `{inner_ty}` to `{target}`: operand must be numeric"),
            );
            return Type::Error;
        }

        target
    }

    fn check_call(&mut self, expr: &Expr, name: wabc_util::Symbol, args: &[Expr]) -> Type {
        let Some(def_id) = self.scopes.resolve(name) else {
            self.error(expr.span, DiagnosticCode::SCOPE_UNDEFINED_NAME, format!("undefined name `{name}`"));
            for arg in args {
                self.check_expr(arg, None);
            }
            return Type::Error;
        };

        let info = self.symtab.get(def_id);
        if !info.kind.is_callable() {
            self.error(
                expr.span,
                DiagnosticCode::SCOPE_KIND_MISMATCH,
                format!("`{name}` is a variable, not a function"),
            );
            for arg in args {
                self.check_expr(arg, None);
            }
            return Type::Error;
        }

        let sig = info.sig.clone().expect("callable symbol always carries a signature");
        self.ctx.record_resolution(expr.id, def_id);

        if args.len() != sig.params.len() {
            self.error(
                expr.span,
                DiagnosticCode::TYPE_ARGUMENT_MISMATCH,
                format!("`{name}` expects {} argument(s), found {}", sig.params.len(), args.len()),
            );
        }

        for (i, arg) in args.iter().enumerate() {
            let expected_param = sig.params.get(i).copied();
            let arg_ty = self.check_expr(arg, expected_param);
            if let Some(param_ty) = expected_param {
                if arg_ty != param_ty && arg_ty != Type::Error {
                    self.error(
                        arg.span,
                        DiagnosticCode::TYPE_ARGUMENT_MISMATCH,
                        format!("argument {} to `{name}` has type `{arg_ty}`, expected `{param_ty}`", i + 1),
                    );
                }
            }
        }

        sig.return_type
    }

    pub(crate) fn error(&self, span: wabc_util::Span, code: DiagnosticCode, message: String) {
        DiagnosticBuilder::error(message).code(code).span(span).emit(self.handler);
    }
}

fn is_load(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Unary(UnOp::Load, _))
}
