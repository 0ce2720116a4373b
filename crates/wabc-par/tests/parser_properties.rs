//! Property tests for the parser (§8 "Universal invariants"): parsing
//! never panics, and a well-formed program always yields a non-empty,
//! error-free `Program`.

use proptest::prelude::*;
use wabc_par::Parser;
use wabc_util::{FileId, Handler};

fn parse(source: &str) -> bool {
    let handler = Handler::new();
    let _program = Parser::parse_str(source, FileId::DUMMY, &handler);
    handler.has_errors()
}

proptest! {
    /// No arbitrary byte soup should ever panic the parser, even though
    /// most of it will legitimately be reported as a parse error.
    #[test]
    fn never_panics_on_arbitrary_text(s in "[ -~\\n]{0,200}") {
        let _ = parse(&s);
    }

    /// Chains of binary operators over a single name, of any length,
    /// always parse without a panic and without spurious errors — there
    /// is no precedence level that can overflow or misparse here.
    #[test]
    fn additive_chains_never_error(n in 1usize..40) {
        let mut src = String::from("var x int = a");
        for i in 0..n {
            src.push_str(if i % 2 == 0 { " + a" } else { " - a" });
        }
        src.push(';');
        prop_assert!(!parse(&src));
    }

    /// Parsing the same source twice produces the same error verdict —
    /// the parser holds no hidden global state across runs.
    #[test]
    fn parsing_is_deterministic(s in "[ -~\\n]{0,120}") {
        let first = parse(&s);
        let second = parse(&s);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn well_formed_program_parses_without_errors() {
    let src = r#"
        const limit int = 10;

        func fib(n int) int {
            if n < 2 {
                return n;
            } else {
                return fib(n - 1) + fib(n - 2);
            }
        }

        func main() int {
            var i int = 0;
            while i < limit {
                print fib(i);
                i = i + 1;
            }
            return 0;
        }
    "#;
    assert!(!parse(src));
}

#[test]
fn chained_relation_is_rejected() {
    assert!(parse("var x bool = 1 < 2 < 3;"));
}

#[test]
fn nested_function_is_rejected() {
    let src = r#"
        func outer() int {
            func inner() int {
                return 0;
            }
            return 0;
        }
    "#;
    assert!(parse(src));
}

#[test]
fn return_outside_function_is_rejected() {
    assert!(parse("return 1;"));
}
