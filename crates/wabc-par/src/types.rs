//! Type-name parsing (§3 "Types"): `int float char bool`.

use wabc_lex::TokenKind;
use wabc_util::DiagnosticCode;

use crate::ast::Type;
use crate::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> Type {
        let ty = match self.peek_kind() {
            TokenKind::TyInt => Type::Int,
            TokenKind::TyFloat => Type::Float,
            TokenKind::TyChar => Type::Char,
            TokenKind::TyBool => Type::Bool,
            other => {
                self.report(
                    DiagnosticCode::PARSE_UNEXPECTED_TOKEN,
                    format!("expected a type name, found {other}"),
                );
                return Type::Error;
            }
        };
        self.advance();
        ty
    }
}
