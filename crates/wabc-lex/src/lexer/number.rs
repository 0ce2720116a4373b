//! Integer and float literal lexing (§4.1).
//!
//! `[0-9]+` not followed by `.` is an integer; `[0-9]+ '.' [0-9]*` or
//! `[0-9]* '.' [0-9]+` is a float. Integers must fit in signed 32 bits;
//! overflow is a lex error (diagnosed, with the token synthesized as `0`
//! so lexing can continue).

use wabc_util::DiagnosticCode;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) -> Token {
        while self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.peek() == b'.' {
            is_float = true;
            self.cursor.advance();
            while self.cursor.peek().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let lexeme = self.cursor.slice(self.token_start, self.cursor.pos());

        if is_float {
            let value: f64 = lexeme.parse().unwrap_or_else(|_| {
                self.report_error(
                    DiagnosticCode::LEX_NUMERIC_OVERFLOW,
                    format!("invalid float literal {lexeme:?}"),
                );
                0.0
            });
            return self.make_token(TokenKind::Float(value));
        }

        match lexeme.parse::<i32>() {
            Ok(value) => self.make_token(TokenKind::Integer(value)),
            Err(_) => {
                self.report_error(
                    DiagnosticCode::LEX_NUMERIC_OVERFLOW,
                    format!("integer literal {lexeme:?} does not fit in a 32-bit signed integer"),
                );
                self.make_token(TokenKind::Integer(0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabc_util::{FileId, Handler};

    fn lex_one(src: &str) -> (TokenKind, bool) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, FileId::DUMMY, &handler);
        let tok = lexer.next_token();
        (tok.kind, handler.has_errors())
    }

    #[test]
    fn integer_literal() {
        assert_eq!(lex_one("42"), (TokenKind::Integer(42), false));
    }

    #[test]
    fn float_with_trailing_digits() {
        assert_eq!(lex_one("3.14"), (TokenKind::Float(3.14), false));
    }

    #[test]
    fn float_with_no_fraction_digits() {
        assert_eq!(lex_one("3."), (TokenKind::Float(3.0), false));
    }

    #[test]
    fn float_with_no_integer_digits() {
        assert_eq!(lex_one(".5"), (TokenKind::Float(0.5), false));
    }

    #[test]
    fn integer_overflow_is_a_lex_error() {
        let (kind, errs) = lex_one("99999999999999999999");
        assert_eq!(kind, TokenKind::Integer(0));
        assert!(errs);
    }
}
