//! Property-based tests for the lexer (§10.6): properties that are
//! awkward to enumerate by hand as individual unit tests.

use proptest::prelude::*;
use wabc_lex::{Lexer, TokenKind};
use wabc_util::{FileId, Handler};

fn tokenize(src: &str) -> (Vec<TokenKind>, bool) {
    let handler = Handler::new();
    let lexer = Lexer::new(src, FileId::DUMMY, &handler);
    let tokens = lexer.tokenize();
    (tokens.into_iter().map(|t| t.kind).collect(), handler.has_errors())
}

proptest! {
    /// No input causes the lexer to panic, regardless of its bytes.
    #[test]
    fn never_panics_on_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
        // Only feed the lexer valid UTF-8; non-UTF-8 byte sequences are
        // outside the §6 "UTF-8 text" input contract.
        if let Ok(s) = String::from_utf8(bytes) {
            let _ = tokenize(&s);
        }
    }

    /// Any sequence of valid integer literals separated by whitespace
    /// re-lexes to that same sequence of `Integer` token kinds.
    #[test]
    fn integer_sequence_round_trips(ints in proptest::collection::vec(0i32..1_000_000, 0..20)) {
        let src = ints.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let (kinds, errs) = tokenize(&src);
        prop_assert!(!errs);
        let expected: Vec<TokenKind> = ints.into_iter().map(TokenKind::Integer).collect();
        prop_assert_eq!(&kinds[..kinds.len() - 1], &expected[..]);
        prop_assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    /// Lexing the same source twice always yields the same token kinds
    /// (determinism, §8).
    #[test]
    fn lexing_is_deterministic(src in "[a-zA-Z0-9_ \t\n+\\-*/<>=!&|();,{}]{0,200}") {
        let (a, _) = tokenize(&src);
        let (b, _) = tokenize(&src);
        prop_assert_eq!(a, b);
    }
}
