//! Identifier and keyword/type-name lexing (§4.1).

use super::core::{is_ident_continue, Lexer};
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.peek()) {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice(self.token_start, self.cursor.pos());
        let kind = match lexeme {
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            _ => TokenKind::keyword_from_lexeme(lexeme).unwrap_or(TokenKind::Name),
        };
        self.make_token(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabc_util::{FileId, Handler};

    fn lex_one(src: &str) -> TokenKind {
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, FileId::DUMMY, &handler);
        lexer.next_token().kind
    }

    #[test]
    fn recognizes_keywords() {
        assert_eq!(lex_one("while"), TokenKind::KwWhile);
        assert_eq!(lex_one("func"), TokenKind::KwFunc);
        assert_eq!(lex_one("import"), TokenKind::KwImport);
    }

    #[test]
    fn recognizes_type_names() {
        assert_eq!(lex_one("int"), TokenKind::TyInt);
        assert_eq!(lex_one("bool"), TokenKind::TyBool);
    }

    #[test]
    fn recognizes_bool_literals() {
        assert_eq!(lex_one("true"), TokenKind::Bool(true));
        assert_eq!(lex_one("false"), TokenKind::Bool(false));
    }

    #[test]
    fn falls_back_to_name() {
        assert_eq!(lex_one("total_count"), TokenKind::Name);
        assert_eq!(lex_one("_leading"), TokenKind::Name);
    }
}
