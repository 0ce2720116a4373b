//! Statement parsing (§4.2).
//!
//! Assignments, var/const declarations, `break`, `continue`, `return`,
//! `print` all require a terminating `;`; a missing one is a recoverable
//! error that reports and resumes at the next statement-starter token.

use wabc_lex::TokenKind;
use wabc_util::DiagnosticCode;

use crate::ast::{Block, ExprKind, Location, Stmt, UnOp, VarKind};
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parse one top-level statement (`func`/`import func` are legal
    /// here without being flagged as nested).
    pub(crate) fn parse_top_level_statement(&mut self) -> Stmt {
        self.parse_statement(true)
    }

    pub(crate) fn parse_statement(&mut self, at_top_level: bool) -> Stmt {
        match self.peek_kind() {
            TokenKind::KwVar | TokenKind::KwConst => self.parse_var_decl(),
            TokenKind::KwFunc | TokenKind::KwImport => self.parse_func_decl(at_top_level),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwBreak => {
                let span = self.advance().span;
                let span = span.merge(self.expect_semi());
                Stmt::Break { span }
            }
            TokenKind::KwContinue => {
                let span = self.advance().span;
                let span = span.merge(self.expect_semi());
                Stmt::Continue { span }
            }
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwPrint => {
                let start = self.advance().span;
                let value = self.parse_expr();
                let span = start.merge(self.expect_semi());
                Stmt::Print { value, span }
            }
            TokenKind::Name | TokenKind::Backtick => self.parse_assign_or_expr_stmt(),
            _ => {
                let span = self.peek().span;
                self.report(
                    DiagnosticCode::PARSE_UNEXPECTED_TOKEN,
                    format!("expected a statement, found {}", self.peek_kind()),
                );
                self.recover_to_statement_boundary();
                Stmt::Error { span }
            }
        }
    }

    pub(crate) fn parse_block(&mut self) -> Block {
        self.expect(TokenKind::LBrace, "`{` to start a block");
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            stmts.push(self.parse_statement(false));
        }
        self.expect(TokenKind::RBrace, "`}` to close a block");
        stmts
    }

    fn parse_var_decl(&mut self) -> Stmt {
        let start = self.peek().span;
        let kind = if self.eat(TokenKind::KwConst) {
            VarKind::Const
        } else {
            self.advance(); // `var`
            VarKind::Var
        };

        let name_tok = self.expect(TokenKind::Name, "a variable name");
        let name = self.prev_lexeme();

        let declared_type = if !self.at(TokenKind::Eq) && !self.at(TokenKind::Semi) {
            Some(self.parse_type())
        } else {
            None
        };

        let init = if self.eat(TokenKind::Eq) { Some(self.parse_expr()) } else { None };

        let end = self.expect_semi();
        Stmt::VarDecl {
            kind,
            name,
            declared_type,
            init,
            span: start.merge(name_tok).merge(end),
        }
    }

    fn parse_return(&mut self) -> Stmt {
        let start = self.advance().span;
        if !self.in_function() {
            self.report(
                DiagnosticCode::PARSE_RETURN_OUTSIDE_FUNCTION,
                "`return` outside of a function".to_string(),
            );
        }
        let value = if self.at(TokenKind::Semi) { None } else { Some(self.parse_expr()) };
        let span = start.merge(self.expect_semi());
        Stmt::Return { value, span }
    }

    fn parse_if(&mut self) -> Stmt {
        let start = self.advance().span;
        let cond = self.parse_expr();
        let then_block = self.parse_block();
        let else_block = if self.eat(TokenKind::KwElse) {
            if self.at(TokenKind::KwIf) {
                Some(vec![self.parse_if()])
            } else {
                Some(self.parse_block())
            }
        } else {
            None
        };
        let span = start.merge(
            else_block
                .as_ref()
                .and_then(|b| b.last())
                .map(|s| s.span())
                .unwrap_or_else(|| then_block.last().map(|s| s.span()).unwrap_or(start)),
        );
        Stmt::If { cond, then_block, else_block, span }
    }

    fn parse_while(&mut self) -> Stmt {
        let start = self.advance().span;
        let cond = self.parse_expr();
        let body = self.parse_block();
        let span = start.merge(body.last().map(|s| s.span()).unwrap_or(start));
        Stmt::While { cond, body, span }
    }

    /// Parses either an `Assign` (when the parsed expression can serve as
    /// a `Location` and `=` follows) or an `ExpressionStmt` (a bare
    /// call — the only standalone-expression statement form in Wabbit).
    fn parse_assign_or_expr_stmt(&mut self) -> Stmt {
        let start = self.peek().span;
        let lhs = self.parse_expr();

        if self.eat(TokenKind::Eq) {
            let target = match lhs.kind {
                ExprKind::Name(name) => Location::Name(name, lhs.span),
                ExprKind::Unary(UnOp::Load, addr) => Location::MemStore(addr, lhs.span),
                _ => {
                    self.report(
                        DiagnosticCode::PARSE_UNEXPECTED_TOKEN,
                        "left side of `=` must be a name or a `` ` `` memory location".to_string(),
                    );
                    Location::Name(wabc_util::Symbol::intern(""), lhs.span)
                }
            };
            let value = self.parse_expr();
            let span = start.merge(self.expect_semi());
            return Stmt::Assign { target, value, span };
        }

        match lhs.kind {
            ExprKind::Call(..) => {
                let span = start.merge(self.expect_semi());
                Stmt::ExpressionStmt { call: lhs, span }
            }
            _ => {
                self.report(
                    DiagnosticCode::PARSE_UNEXPECTED_TOKEN,
                    "standalone expressions are not statements in Wabbit".to_string(),
                );
                self.recover_to_statement_boundary();
                Stmt::Error { span: start }
            }
        }
    }

    pub(crate) fn in_function(&self) -> bool {
        self.in_function
    }
}
