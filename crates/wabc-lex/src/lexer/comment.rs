//! Comment skipping (§4.1): `// ... EOL` and non-nesting `/* ... */`.

use wabc_util::DiagnosticCode;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.peek() != b'\n' {
            self.cursor.advance();
        }
    }

    pub(crate) fn skip_block_comment(&mut self) {
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'

        loop {
            if self.cursor.is_at_end() {
                self.report_error(
                    DiagnosticCode::LEX_UNTERMINATED_COMMENT,
                    "unterminated block comment",
                );
                return;
            }
            if self.cursor.peek() == b'*' && self.cursor.peek2() == b'/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }
}
