//! Expression parsing (§4.2): the precedence table `||` < `&&` <
//! relational < additive < multiplicative < unary, all left-associative,
//! plus the two documented unary-binding quirks (§9 Design Notes):
//!
//! - `+ - ^` parse a full [`Parser::parse_expr`] as their operand (loose
//!   binding, preserved from the reference grammar as-is).
//! - `!` and backtick `` ` `` parse a unary operand (tight binding).

use wabc_lex::TokenKind;
use wabc_util::{DiagnosticCode, Span, Symbol};

use crate::ast::{BinOp, Expr, ExprKind, Type, UnOp};
use crate::Parser;

impl<'a> Parser<'a> {
    fn mk(&mut self, span: Span, kind: ExprKind) -> Expr {
        Expr { id: self.next_expr_id(), span, kind }
    }

    pub(crate) fn parse_expr(&mut self) -> Expr {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Expr {
        let mut left = self.parse_and();
        while self.at(TokenKind::OrOr) {
            self.advance();
            let right = self.parse_and();
            let span = left.span.merge(right.span);
            left = self.mk(span, ExprKind::Binary(BinOp::Or, Box::new(left), Box::new(right)));
        }
        left
    }

    fn parse_and(&mut self) -> Expr {
        let mut left = self.parse_relational();
        while self.at(TokenKind::AndAnd) {
            self.advance();
            let right = self.parse_relational();
            let span = left.span.merge(right.span);
            left = self.mk(span, ExprKind::Binary(BinOp::And, Box::new(left), Box::new(right)));
        }
        left
    }

    /// No chained relations (§4.2): at most one relational operator per
    /// level. If a second one immediately follows, that is an error
    /// rather than a silently-accepted left-to-right chain.
    fn parse_relational(&mut self) -> Expr {
        let left = self.parse_additive();
        if let Some(op) = relational_op(self.peek_kind()) {
            self.advance();
            let right = self.parse_additive();
            let span = left.span.merge(right.span);
            let combined = self.mk(span, ExprKind::Binary(op, Box::new(left), Box::new(right)));

            if relational_op(self.peek_kind()).is_some() {
                self.report(
                    DiagnosticCode::PARSE_CHAINED_RELATION,
                    "relational operators may not be chained".to_string(),
                );
                // Consume the trailing chain so recovery doesn't re-fire
                // this same error for every subsequent comparison.
                self.advance();
                let _ = self.parse_additive();
            }
            combined
        } else {
            left
        }
    }

    fn parse_additive(&mut self) -> Expr {
        let mut left = self.parse_multiplicative();
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative();
            let span = left.span.merge(right.span);
            left = self.mk(span, ExprKind::Binary(op, Box::new(left), Box::new(right)));
        }
        left
    }

    fn parse_multiplicative(&mut self) -> Expr {
        let mut left = self.parse_unary();
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary();
            let span = left.span.merge(right.span);
            left = self.mk(span, ExprKind::Binary(op, Box::new(left), Box::new(right)));
        }
        left
    }

    fn parse_unary(&mut self) -> Expr {
        match self.peek_kind() {
            // Loose-binding quirk: operand is a full Expression.
            TokenKind::Plus | TokenKind::Minus | TokenKind::Caret => {
                let start = self.peek().span;
                let op = match self.advance().kind {
                    TokenKind::Plus => UnOp::Plus,
                    TokenKind::Minus => UnOp::Neg,
                    TokenKind::Caret => UnOp::Grow,
                    _ => unreachable!(),
                };
                let operand = self.parse_expr();
                let span = start.merge(operand.span);
                self.mk(span, ExprKind::Unary(op, Box::new(operand)))
            }
            // Tight-binding: operand is a Unary.
            TokenKind::Bang | TokenKind::Backtick => {
                let start = self.peek().span;
                let op = match self.advance().kind {
                    TokenKind::Bang => UnOp::Not,
                    TokenKind::Backtick => UnOp::Load,
                    _ => unreachable!(),
                };
                let operand = self.parse_unary();
                let span = start.merge(operand.span);
                self.mk(span, ExprKind::Unary(op, Box::new(operand)))
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Expr {
        let tok = *self.peek();
        match tok.kind {
            TokenKind::Integer(n) => {
                self.advance();
                self.mk(tok.span, ExprKind::Integer(n))
            }
            TokenKind::Float(x) => {
                self.advance();
                self.mk(tok.span, ExprKind::Float(x))
            }
            TokenKind::Char(b) => {
                self.advance();
                self.mk(tok.span, ExprKind::Char(b))
            }
            TokenKind::Bool(b) => {
                self.advance();
                self.mk(tok.span, ExprKind::Bool(b))
            }
            TokenKind::Name => {
                self.advance();
                let name = Symbol::intern(tok.lexeme.as_str());
                if self.at(TokenKind::LParen) {
                    self.parse_call(name, tok.span)
                } else {
                    self.mk(tok.span, ExprKind::Name(name))
                }
            }
            // `Type ( Expression )` is a cast (§4.2: the parser
            // distinguishes cast vs call by peeking the identifier
            // class — a reserved type name can only start a cast).
            TokenKind::TyInt | TokenKind::TyFloat | TokenKind::TyChar | TokenKind::TyBool => {
                let ty = self.parse_type();
                self.expect(TokenKind::LParen, "`(` after cast target type");
                let inner = self.parse_expr();
                let end = self.expect(TokenKind::RParen, "`)` to close cast");
                self.mk(tok.span.merge(end), ExprKind::Cast(ty, Box::new(inner)))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                let end = self.expect(TokenKind::RParen, "`)` to close grouped expression");
                Expr { span: tok.span.merge(end), ..inner }
            }
            other => {
                self.report(
                    DiagnosticCode::PARSE_UNEXPECTED_TOKEN,
                    format!("expected an expression, found {other}"),
                );
                self.mk(tok.span, ExprKind::Error)
            }
        }
    }

    fn parse_call(&mut self, name: Symbol, start: Span) -> Expr {
        self.expect(TokenKind::LParen, "`(` to start call arguments");
        let mut args = Vec::new();
        if !self.at(TokenKind::RParen) {
            args.push(self.parse_expr());
            while self.eat(TokenKind::Comma) {
                args.push(self.parse_expr());
            }
        }
        let end = self.expect(TokenKind::RParen, "`)` to close call arguments");
        self.mk(start.merge(end), ExprKind::Call(name, args))
    }
}

fn relational_op(kind: TokenKind) -> Option<BinOp> {
    Some(match kind {
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Le => BinOp::Le,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::Ge => BinOp::Ge,
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::Ne => BinOp::Ne,
        _ => return None,
    })
}
