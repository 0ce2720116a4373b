//! The conservative "falls off the end" control check (§4.3 "return
//! rules"): the final statement of a function body must be a `return`,
//! or an `if`/`else` whose both arms themselves terminate.

use wabc_par::ast::{Block, Stmt};

pub fn block_terminates(block: &Block) -> bool {
    match block.last() {
        Some(Stmt::Return { .. }) => true,
        Some(Stmt::If { then_block, else_block: Some(else_block), .. }) => {
            block_terminates(then_block) && block_terminates(else_block)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabc_par::ast::ExprKind;
    use wabc_util::Span;

    fn ret() -> Stmt {
        Stmt::Return { value: None, span: Span::DUMMY }
    }

    fn print_stmt() -> Stmt {
        Stmt::Print {
            value: wabc_par::ast::Expr { id: wabc_par::ast::ExprId(0), span: Span::DUMMY, kind: ExprKind::Integer(0) },
            span: Span::DUMMY,
        }
    }

    #[test]
    fn a_trailing_return_terminates() {
        assert!(block_terminates(&vec![print_stmt(), ret()]));
    }

    #[test]
    fn falling_off_without_return_does_not_terminate() {
        assert!(!block_terminates(&vec![print_stmt()]));
    }

    #[test]
    fn if_without_else_does_not_terminate() {
        let block = vec![Stmt::If { cond: lit_bool(), then_block: vec![ret()], else_block: None, span: Span::DUMMY }];
        assert!(!block_terminates(&block));
    }

    #[test]
    fn if_else_terminates_only_when_both_arms_do() {
        let terminating = vec![Stmt::If {
            cond: lit_bool(),
            then_block: vec![ret()],
            else_block: Some(vec![ret()]),
            span: Span::DUMMY,
        }];
        assert!(block_terminates(&terminating));

        let non_terminating = vec![Stmt::If {
            cond: lit_bool(),
            then_block: vec![ret()],
            else_block: Some(vec![print_stmt()]),
            span: Span::DUMMY,
        }];
        assert!(!block_terminates(&non_terminating));
    }

    fn lit_bool() -> wabc_par::ast::Expr {
        wabc_par::ast::Expr { id: wabc_par::ast::ExprId(1), span: Span::DUMMY, kind: ExprKind::Bool(true) }
    }
}
