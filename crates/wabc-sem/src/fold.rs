//! Compile-time constant folding (§4.3, §9 "Constant folding scope").
//!
//! Required for `const` initializers, which must reduce to a literal
//! value. Folds only total, exception-free operations — division whose
//! divisor folds to zero is left un-folded (and, for a `const`, reported
//! as non-constant rather than silently producing a poison value).

use wabc_util::{DefId, FxHashMap};

use wabc_par::ast::{BinOp, Expr, ExprKind, Type, UnOp};

use crate::context::TypeContext;

/// A folded compile-time value, one variant per Wabbit scalar type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f64),
    Char(u8),
    Bool(bool),
}

impl Value {
    pub fn ty(self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Char(_) => Type::Char,
            Value::Bool(_) => Type::Bool,
        }
    }
}

/// Attempts to reduce `expr` to a [`Value`], given the already-folded
/// `const` values declared earlier in the program (by [`DefId`]) and the
/// name resolutions already recorded by the type checker. Returns `None`
/// for anything not exception-free-total: calls, memory access, grow,
/// casts of non-constant operands, or division by a folded zero.
pub fn eval(expr: &Expr, consts: &FxHashMap<DefId, Value>, ctx: &TypeContext) -> Option<Value> {
    match &expr.kind {
        ExprKind::Integer(n) => Some(Value::Int(*n)),
        ExprKind::Float(x) => Some(Value::Float(*x)),
        ExprKind::Char(b) => Some(Value::Char(*b)),
        ExprKind::Bool(b) => Some(Value::Bool(*b)),
        ExprKind::Name(_) => {
            let def = ctx.resolution_of(expr.id)?;
            consts.get(&def).copied()
        }
        ExprKind::Unary(op, operand) => {
            let v = eval(operand, consts, ctx)?;
            fold_unary(*op, v)
        }
        ExprKind::Binary(op, lhs, rhs) => {
            let l = eval(lhs, consts, ctx)?;
            let r = eval(rhs, consts, ctx)?;
            fold_binary(*op, l, r)
        }
        ExprKind::Cast(target, inner) => {
            let v = eval(inner, consts, ctx)?;
            fold_cast(*target, v)
        }
        ExprKind::Call(..) | ExprKind::Error => None,
    }
}

fn fold_unary(op: UnOp, v: Value) -> Option<Value> {
    match (op, v) {
        (UnOp::Plus, Value::Int(n)) => Some(Value::Int(n)),
        (UnOp::Plus, Value::Float(x)) => Some(Value::Float(x)),
        (UnOp::Neg, Value::Int(n)) => Some(Value::Int(n.wrapping_neg())),
        (UnOp::Neg, Value::Float(x)) => Some(Value::Float(-x)),
        (UnOp::Not, Value::Bool(b)) => Some(Value::Bool(!b)),
        // `^` (grow) and `` ` `` (load) touch memory and are never constant.
        _ => None,
    }
}

fn fold_binary(op: BinOp, l: Value, r: Value) -> Option<Value> {
    use BinOp::*;
    match (op, l, r) {
        (Add, Value::Int(a), Value::Int(b)) => Some(Value::Int(a.wrapping_add(b))),
        (Add, Value::Float(a), Value::Float(b)) => Some(Value::Float(a + b)),
        (Sub, Value::Int(a), Value::Int(b)) => Some(Value::Int(a.wrapping_sub(b))),
        (Sub, Value::Float(a), Value::Float(b)) => Some(Value::Float(a - b)),
        (Mul, Value::Int(a), Value::Int(b)) => Some(Value::Int(a.wrapping_mul(b))),
        (Mul, Value::Float(a), Value::Float(b)) => Some(Value::Float(a * b)),
        (Div, Value::Int(a), Value::Int(b)) if b != 0 => Some(Value::Int(a.wrapping_div(b))),
        (Div, Value::Float(a), Value::Float(b)) if b != 0.0 => Some(Value::Float(a / b)),
        (Div, _, _) => None,

        (Lt, a, b) => cmp(a, b, |o| o == std::cmp::Ordering::Less),
        (Le, a, b) => cmp(a, b, |o| o != std::cmp::Ordering::Greater),
        (Gt, a, b) => cmp(a, b, |o| o == std::cmp::Ordering::Greater),
        (Ge, a, b) => cmp(a, b, |o| o != std::cmp::Ordering::Less),
        (Eq, a, b) => eq(a, b).map(Value::Bool),
        (Ne, a, b) => eq(a, b).map(|e| Value::Bool(!e)),

        (And, Value::Bool(a), Value::Bool(b)) => Some(Value::Bool(a && b)),
        (Or, Value::Bool(a), Value::Bool(b)) => Some(Value::Bool(a || b)),
        _ => None,
    }
}

fn cmp(l: Value, r: Value, f: impl Fn(std::cmp::Ordering) -> bool) -> Option<Value> {
    let ord = match (l, r) {
        (Value::Int(a), Value::Int(b)) => a.cmp(&b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(&b)?,
        (Value::Char(a), Value::Char(b)) => a.cmp(&b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(&b),
        _ => return None,
    };
    Some(Value::Bool(f(ord)))
}

fn eq(l: Value, r: Value) -> Option<bool> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Some(a == b),
        (Value::Float(a), Value::Float(b)) => Some(a == b),
        (Value::Char(a), Value::Char(b)) => Some(a == b),
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        _ => None,
    }
}

fn fold_cast(target: Type, v: Value) -> Option<Value> {
    match (target, v) {
        (Type::Int, Value::Int(n)) => Some(Value::Int(n)),
        (Type::Int, Value::Float(x)) => Some(Value::Int(x as i32)),
        (Type::Float, Value::Float(x)) => Some(Value::Float(x)),
        (Type::Float, Value::Int(n)) => Some(Value::Float(n as f64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabc_util::Span;

    fn lit(kind: ExprKind) -> Expr {
        Expr { id: wabc_par::ast::ExprId(0), span: Span::DUMMY, kind }
    }

    #[test]
    fn folds_integer_arithmetic() {
        let consts = FxHashMap::default();
        let ctx = TypeContext::new();
        let e = Expr {
            id: wabc_par::ast::ExprId(1),
            span: Span::DUMMY,
            kind: ExprKind::Binary(BinOp::Add, Box::new(lit(ExprKind::Integer(2))), Box::new(lit(ExprKind::Integer(3)))),
        };
        assert_eq!(eval(&e, &consts, &ctx), Some(Value::Int(5)));
    }

    #[test]
    fn division_by_folded_zero_is_not_constant() {
        let consts = FxHashMap::default();
        let ctx = TypeContext::new();
        let e = Expr {
            id: wabc_par::ast::ExprId(1),
            span: Span::DUMMY,
            kind: ExprKind::Binary(BinOp::Div, Box::new(lit(ExprKind::Integer(1))), Box::new(lit(ExprKind::Integer(0)))),
        };
        assert_eq!(eval(&e, &consts, &ctx), None);
    }

    #[test]
    fn call_is_never_constant() {
        let consts = FxHashMap::default();
        let ctx = TypeContext::new();
        let e = lit(ExprKind::Call(wabc_util::Symbol::intern("f"), vec![]));
        assert_eq!(eval(&e, &consts, &ctx), None);
    }
}
