//! Character literal lexing (§4.1).
//!
//! `'` then either one source byte (not `'` or `\`) or an escape, then `'`.
//! Recognized escapes: `\n \t \r \\ \' \" \0 \xHH`.

use wabc_util::DiagnosticCode;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_char_literal(&mut self) -> Token {
        self.cursor.advance(); // opening '

        let value = if self.cursor.peek() == b'\\' {
            self.cursor.advance();
            match self.lex_escape() {
                Some(byte) => byte,
                None => 0,
            }
        } else if self.cursor.peek() == b'\'' || self.cursor.is_at_end() {
            self.report_error(
                DiagnosticCode::LEX_INVALID_CHAR_LITERAL,
                "empty or unterminated character literal",
            );
            0
        } else {
            self.cursor.advance()
        };

        if self.cursor.peek() == b'\'' {
            self.cursor.advance();
        } else {
            self.report_error(
                DiagnosticCode::LEX_INVALID_CHAR_LITERAL,
                "character literal is missing its closing quote",
            );
        }

        self.make_token(TokenKind::Char(value))
    }

    fn lex_escape(&mut self) -> Option<u8> {
        if self.cursor.is_at_end() {
            self.report_error(
                DiagnosticCode::LEX_INVALID_CHAR_LITERAL,
                "unterminated escape sequence",
            );
            return None;
        }
        let c = self.cursor.advance();
        match c {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'\\' => Some(b'\\'),
            b'\'' => Some(b'\''),
            b'"' => Some(b'"'),
            b'0' => Some(0),
            b'x' => {
                let hi = self.cursor.advance();
                let lo = self.cursor.advance();
                match (hex_digit(hi), hex_digit(lo)) {
                    (Some(hi), Some(lo)) => Some(hi * 16 + lo),
                    _ => {
                        self.report_error(
                            DiagnosticCode::LEX_INVALID_CHAR_LITERAL,
                            "\\x escape requires exactly two hex digits",
                        );
                        None
                    }
                }
            }
            other => {
                self.report_error(
                    DiagnosticCode::LEX_INVALID_CHAR_LITERAL,
                    format!("unknown escape sequence \\{}", other as char),
                );
                None
            }
        }
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
