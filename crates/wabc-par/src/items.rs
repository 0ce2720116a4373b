//! Top-level item parsing (§4.2): `func` and `import func` declarations.

use wabc_lex::TokenKind;
use wabc_util::{DiagnosticCode, Symbol};

use crate::ast::Stmt;
use crate::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_func_decl(&mut self, at_top_level: bool) -> Stmt {
        let start = self.peek().span;

        let imported = self.eat(TokenKind::KwImport);
        self.expect(TokenKind::KwFunc, "`func`");

        if !at_top_level {
            self.report(
                DiagnosticCode::PARSE_NESTED_FUNCTION,
                "functions may only be declared at the top level".to_string(),
            );
        }

        self.expect(TokenKind::Name, "a function name");
        let name = self.prev_lexeme();

        self.expect(TokenKind::LParen, "`(` to start the parameter list");
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            params.push(self.parse_param());
            while self.eat(TokenKind::Comma) {
                params.push(self.parse_param());
            }
        }
        self.expect(TokenKind::RParen, "`)` to close the parameter list");

        let return_type = self.parse_type();

        // `import func` has no body; `func` must have one (§4.2).
        let body = if imported {
            None
        } else {
            let was_in_function = self.in_function;
            self.in_function = true;
            let block = self.parse_block();
            self.in_function = was_in_function;
            Some(block)
        };

        if imported {
            self.expect_semi();
        }

        let end = self.peek().span;
        Stmt::FuncDecl {
            imported,
            name,
            params,
            return_type,
            body,
            span: start.merge(end),
        }
    }

    fn parse_param(&mut self) -> (Symbol, crate::ast::Type) {
        self.expect(TokenKind::Name, "a parameter name");
        let name = self.prev_lexeme();
        let ty = self.parse_type();
        (name, ty)
    }
}
