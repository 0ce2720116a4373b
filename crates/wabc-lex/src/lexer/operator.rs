//! Operator and delimiter lexing, with greedy multi-char matching (§4.1:
//! "Multi-char operators matched greedily: `<=`, `>=`, `==`, `!=`, `&&`,
//! `||` before single-char fallbacks.").

use super::core::Lexer;
use crate::token::TokenKind;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_operator_or_delim(&mut self) -> Option<TokenKind> {
        let c = self.cursor.peek();
        let kind = match c {
            b'<' => {
                self.cursor.advance();
                if self.cursor.eat(b'=') { TokenKind::Le } else { TokenKind::Lt }
            }
            b'>' => {
                self.cursor.advance();
                if self.cursor.eat(b'=') { TokenKind::Ge } else { TokenKind::Gt }
            }
            b'=' => {
                self.cursor.advance();
                if self.cursor.eat(b'=') { TokenKind::EqEq } else { TokenKind::Eq }
            }
            b'!' => {
                self.cursor.advance();
                if self.cursor.eat(b'=') { TokenKind::Ne } else { TokenKind::Bang }
            }
            b'&' if self.cursor.peek2() == b'&' => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::AndAnd
            }
            b'|' if self.cursor.peek2() == b'|' => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::OrOr
            }
            b'+' => {
                self.cursor.advance();
                TokenKind::Plus
            }
            b'-' => {
                self.cursor.advance();
                TokenKind::Minus
            }
            b'*' => {
                self.cursor.advance();
                TokenKind::Star
            }
            b'/' => {
                self.cursor.advance();
                TokenKind::Slash
            }
            b'`' => {
                self.cursor.advance();
                TokenKind::Backtick
            }
            b'^' => {
                self.cursor.advance();
                TokenKind::Caret
            }
            b'(' => {
                self.cursor.advance();
                TokenKind::LParen
            }
            b')' => {
                self.cursor.advance();
                TokenKind::RParen
            }
            b',' => {
                self.cursor.advance();
                TokenKind::Comma
            }
            b'{' => {
                self.cursor.advance();
                TokenKind::LBrace
            }
            b'}' => {
                self.cursor.advance();
                TokenKind::RBrace
            }
            b';' => {
                self.cursor.advance();
                TokenKind::Semi
            }
            _ => return None,
        };
        Some(kind)
    }
}
