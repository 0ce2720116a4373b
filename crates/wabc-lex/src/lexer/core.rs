//! Core lexer implementation: dispatch, whitespace, and the public API.

use wabc_util::{DiagnosticBuilder, DiagnosticCode, FileId, Handler, Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexical analyzer for Wabbit source text (§4.1).
///
/// Produces tokens lazily via [`Lexer::next_token`], or eagerly via
/// [`Lexer::tokenize`], which the parser consumes as a token buffer with
/// at least two-token lookahead (§4.1 "Exposes").
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) file_id: FileId,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
    pub(crate) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file_id: FileId, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            file_id,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Lex the entire source into a token buffer, terminated by a single
    /// `Eof` token. Errors are reported to the handler; lexing continues
    /// past them (§7: "processing continues within the current stage").
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Produce the next token, skipping whitespace and comments first.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        self.token_start = self.cursor.pos();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.cursor.peek();
        if is_ident_start(c) {
            return self.lex_identifier();
        }
        if c.is_ascii_digit() || (c == b'.' && self.cursor.peek2().is_ascii_digit()) {
            return self.lex_number();
        }
        if c == b'\'' {
            return self.lex_char_literal();
        }
        if let Some(kind) = self.lex_operator_or_delim() {
            return self.make_token(kind);
        }

        // Unknown character: report and skip the byte (§4.1, §7).
        let bad = self.cursor.advance();
        self.report_error(
            DiagnosticCode::LEX_UNKNOWN_CHAR,
            format!("unknown character {:?}", bad as char),
        );
        self.next_token()
    }

    /// Skip whitespace and comments, repeating until neither remains.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor.advance();
                }
                b'/' if self.cursor.peek2() == b'/' => self.skip_line_comment(),
                b'/' if self.cursor.peek2() == b'*' => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    pub(crate) fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme_text = self.cursor.slice(self.token_start, self.cursor.pos());
        let lexeme = Symbol::intern_known(lexeme_text);
        let span = Span::with_file(
            self.token_start,
            self.cursor.pos(),
            self.file_id,
            self.token_start_line,
            self.token_start_column,
        );
        Token::new(kind, lexeme, span)
    }

    pub(crate) fn current_span(&self) -> Span {
        Span::with_file(
            self.token_start,
            self.cursor.pos(),
            self.file_id,
            self.token_start_line,
            self.token_start_column,
        )
    }

    pub(crate) fn report_error(&self, code: DiagnosticCode, message: impl Into<String>) {
        DiagnosticBuilder::error(message)
            .code(code)
            .span(self.current_span())
            .emit(self.handler);
    }
}

#[inline]
pub(crate) fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[inline]
pub(crate) fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> (Vec<TokenKind>, bool) {
        let handler = Handler::new();
        let lexer = Lexer::new(src, FileId::DUMMY, &handler);
        let tokens = lexer.tokenize();
        (tokens.into_iter().map(|t| t.kind).collect(), handler.has_errors())
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (kinds, errs) = lex_all("");
        assert_eq!(kinds, vec![TokenKind::Eof]);
        assert!(!errs);
    }

    #[test]
    fn whitespace_is_discarded() {
        let (kinds, _) = lex_all("  \t\n  var  ");
        assert_eq!(kinds, vec![TokenKind::KwVar, TokenKind::Eof]);
    }

    #[test]
    fn unknown_char_reports_and_skips() {
        let (kinds, errs) = lex_all("1 @ 2");
        assert!(errs);
        assert_eq!(
            kinds,
            vec![TokenKind::Integer(1), TokenKind::Integer(2), TokenKind::Eof]
        );
    }
}
