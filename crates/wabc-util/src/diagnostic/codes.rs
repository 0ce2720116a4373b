//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! Codes are grouped by the stage and error kind from which they originate
//! (Lex, Parse, Scope, Type, Control), plus an Internal group for
//! invariant violations that should never surface under correct input.
//!
//! # Examples
//!
//! ```
//! use wabc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::LEX_UNKNOWN_CHAR;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.as_str(), "E1004");
//! ```

/// A unique code identifying a diagnostic message.
///
/// Diagnostic codes follow the format `{prefix}{number}` where `prefix` is
/// "E" for errors or "W" for warnings, and `number` is a 4-digit group
/// identifying the stage and kind: 1xxx Lex, 2xxx Parse, 3xxx Scope,
/// 4xxx Type, 5xxx Control, 9xxx Internal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // -- Lex (§7) --
    /// Unterminated block comment.
    pub const LEX_UNTERMINATED_COMMENT: Self = Self::new("E", 1001);
    /// Invalid character literal.
    pub const LEX_INVALID_CHAR_LITERAL: Self = Self::new("E", 1002);
    /// Numeric literal overflows its type.
    pub const LEX_NUMERIC_OVERFLOW: Self = Self::new("E", 1003);
    /// Unknown character in source.
    pub const LEX_UNKNOWN_CHAR: Self = Self::new("E", 1004);

    // -- Parse (§7) --
    /// Unexpected token.
    pub const PARSE_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    /// Chained relational operators (`a < b < c`).
    pub const PARSE_CHAINED_RELATION: Self = Self::new("E", 2002);
    /// Missing `;` after a statement.
    pub const PARSE_MISSING_SEMICOLON: Self = Self::new("E", 2003);
    /// A `func` nested inside another function body.
    pub const PARSE_NESTED_FUNCTION: Self = Self::new("E", 2004);
    /// `return` appearing outside any function.
    pub const PARSE_RETURN_OUTSIDE_FUNCTION: Self = Self::new("E", 2005);

    // -- Scope (§7) --
    /// Use of an undefined name.
    pub const SCOPE_UNDEFINED_NAME: Self = Self::new("E", 3001);
    /// Duplicate declaration in the same scope.
    pub const SCOPE_DUPLICATE_DECL: Self = Self::new("E", 3002);
    /// Assignment to a `const` binding.
    pub const SCOPE_ASSIGN_TO_CONST: Self = Self::new("E", 3003);
    /// A name is used as a function where a variable was declared, or vice versa.
    pub const SCOPE_KIND_MISMATCH: Self = Self::new("E", 3004);
    /// `break`/`continue` outside any loop.
    pub const SCOPE_LOOP_CONTROL_OUTSIDE_LOOP: Self = Self::new("E", 3005);

    // -- Type (§7) --
    /// An operator's operands are not the same numeric type.
    pub const TYPE_OPERATOR_MISMATCH: Self = Self::new("E", 4001);
    /// An `if`/`while` condition is not `Bool`.
    pub const TYPE_CONDITION_NOT_BOOL: Self = Self::new("E", 4002);
    /// A cast target is not a numeric type.
    pub const TYPE_INVALID_CAST_TARGET: Self = Self::new("E", 4003);
    /// Call argument count or type does not match the callee's signature.
    pub const TYPE_ARGUMENT_MISMATCH: Self = Self::new("E", 4004);
    /// A memory load (backtick expression) has no inferable type context.
    pub const TYPE_UNINFERABLE_LOAD: Self = Self::new("E", 4005);
    /// A `const` initializer is not a compile-time-evaluable expression.
    pub const TYPE_NON_CONSTANT_INITIALIZER: Self = Self::new("E", 4006);
    /// A declared type, assignment target, or return value does not match
    /// the type actually produced.
    pub const TYPE_MISMATCH: Self = Self::new("E", 4007);

    // -- Control (§7) --
    /// A function with a non-unit return type falls off its end without returning.
    pub const CONTROL_MISSING_RETURN: Self = Self::new("E", 5001);

    // -- Internal (§7) --
    /// Invariant violation detected by a later stage; never user-visible under correct input.
    pub const INTERNAL_INVARIANT_VIOLATION: Self = Self::new("E", 9001);

    // -- Warnings --
    /// Declared but never read.
    pub const WARN_UNUSED_VARIABLE: Self = Self::new("W", 1);
    /// Declared but never called.
    pub const WARN_UNUSED_FUNCTION: Self = Self::new("W", 2);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_code_round_trips_prefix_and_number() {
        let code = DiagnosticCode::new("E", 1001);
        assert_eq!(code.prefix(), "E");
        assert_eq!(code.number(), 1001);
        assert_eq!(code.as_str(), "E1001");
    }

    #[test]
    fn display_matches_as_str() {
        let code = DiagnosticCode::LEX_UNKNOWN_CHAR;
        assert_eq!(format!("{code}"), code.as_str());
    }

    #[test]
    fn debug_wraps_as_str() {
        let code = DiagnosticCode::PARSE_UNEXPECTED_TOKEN;
        assert_eq!(format!("{code:?}"), format!("DiagnosticCode({})", code.as_str()));
    }

    #[test]
    fn stage_groups_land_in_the_right_thousand() {
        assert_eq!(DiagnosticCode::LEX_UNKNOWN_CHAR.number() / 1000, 1);
        assert_eq!(DiagnosticCode::PARSE_UNEXPECTED_TOKEN.number() / 1000, 2);
        assert_eq!(DiagnosticCode::SCOPE_UNDEFINED_NAME.number() / 1000, 3);
        assert_eq!(DiagnosticCode::TYPE_OPERATOR_MISMATCH.number() / 1000, 4);
        assert_eq!(DiagnosticCode::CONTROL_MISSING_RETURN.number() / 1000, 5);
        assert_eq!(DiagnosticCode::INTERNAL_INVARIANT_VIOLATION.number() / 1000, 9);
    }

    #[test]
    fn warnings_use_the_w_prefix() {
        assert_eq!(DiagnosticCode::WARN_UNUSED_VARIABLE.prefix(), "W");
        assert_eq!(DiagnosticCode::WARN_UNUSED_FUNCTION.prefix(), "W");
    }

    #[test]
    fn codes_compare_by_value() {
        assert_eq!(DiagnosticCode::new("E", 1001), DiagnosticCode::new("E", 1001));
        assert_ne!(DiagnosticCode::new("E", 1001), DiagnosticCode::new("E", 1002));
    }
}
