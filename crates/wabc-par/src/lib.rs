//! wabc-par — Recursive-descent parser for Wabbit (§4.2).
//!
//! Consumes the token buffer produced by [`wabc_lex::Lexer`] and builds
//! the closed [`ast::Expr`]/[`ast::Stmt`] family. Implements the
//! precedence table (`||` < `&&` < relational < additive < multiplicative
//! < unary, all left-associative), rejects chained relational operators,
//! and recovers from a missing `;` or an unexpected token by skipping to
//! the next statement boundary.

pub mod ast;
mod expr;
mod items;
mod stmt;
mod types;

use wabc_lex::{Lexer, Token, TokenKind};
use wabc_util::{DiagnosticBuilder, DiagnosticCode, FileId, Handler, Span};

use ast::{ExprId, Program};

/// Recursive-descent parser over a pre-lexed token buffer.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    handler: &'a Handler,
    next_expr_id: u32,
    pub(crate) in_function: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self {
            tokens,
            pos: 0,
            handler,
            next_expr_id: 0,
            in_function: false,
        }
    }

    /// Lex and parse `source` in one step.
    pub fn parse_str(source: &str, file_id: FileId, handler: &'a Handler) -> Program {
        let lexer = Lexer::new(source, file_id, handler);
        let tokens = lexer.tokenize();
        Parser::new(tokens, handler).parse_program()
    }

    pub fn parse_program(&mut self) -> Program {
        let mut stmts = Vec::new();
        while !self.at(TokenKind::Eof) {
            stmts.push(self.parse_top_level_statement());
        }
        stmts
    }

    pub(crate) fn next_expr_id(&mut self) -> ExprId {
        let id = ExprId(self.next_expr_id);
        self.next_expr_id += 1;
        id
    }

    // -- token buffer access --

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// One token of lookahead past the current one (§4.1: the token
    /// buffer carries at least two-token lookahead, reserved here for
    /// grammar extensions even though the current grammar only needs one).
    #[allow(dead_code)]
    pub(crate) fn peek2(&self) -> &Token {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        std::mem::discriminant(&self.peek_kind()) == std::mem::discriminant(&kind)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = *self.peek();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn prev_token(&self) -> Token {
        self.tokens[self.pos.saturating_sub(1)]
    }

    pub(crate) fn prev_lexeme(&self) -> wabc_util::Symbol {
        wabc_util::Symbol::intern(self.prev_token().lexeme.as_str())
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, or report a missing-token diagnostic at the
    /// current position and continue without consuming anything (§4.2
    /// error recovery: "report and continue at the next statement-starter
    /// token").
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Span {
        let span = self.peek().span;
        if self.at(kind) {
            self.advance();
            span
        } else {
            self.report(
                DiagnosticCode::PARSE_UNEXPECTED_TOKEN,
                format!("expected {what}, found {}", self.peek_kind()),
            );
            span
        }
    }

    /// `;` specifically reports the dedicated missing-semicolon code
    /// (§4.2, §7) rather than a generic unexpected-token diagnostic.
    pub(crate) fn expect_semi(&mut self) -> Span {
        let span = self.peek().span;
        if self.eat(TokenKind::Semi) {
            span
        } else {
            self.report(DiagnosticCode::PARSE_MISSING_SEMICOLON, "expected `;`".to_string());
            span
        }
    }

    pub(crate) fn report(&self, code: DiagnosticCode, message: String) {
        DiagnosticBuilder::error(message)
            .code(code)
            .span(self.peek().span)
            .emit(self.handler);
    }

    /// Skip tokens until the next `;` (consumed) or `}` (not consumed) or
    /// EOF, so the caller can resume parsing the next statement (§4.2
    /// "Error recovery").
    pub(crate) fn recover_to_statement_boundary(&mut self) {
        loop {
            match self.peek_kind() {
                TokenKind::Semi => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace | TokenKind::Eof => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
