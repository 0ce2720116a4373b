//! Token kinds and the `Token` record produced by the lexer (§3 "Tokens").

use wabc_util::{Span, Symbol};

/// The fixed set of token kinds in the Wabbit grammar (§3).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwBreak,
    KwConst,
    KwContinue,
    KwElse,
    KwImport,
    KwFalse,
    KwFunc,
    KwIf,
    KwPrint,
    KwReturn,
    KwTrue,
    KwWhile,
    KwVar,

    // Type names
    TyInt,
    TyFloat,
    TyChar,
    TyBool,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
    Bang,
    AndAnd,
    OrOr,
    Backtick,
    Caret,
    Eq,

    // Delimiters
    LParen,
    RParen,
    Comma,
    LBrace,
    RBrace,
    Semi,

    // Literals
    Integer(i32),
    Float(f64),
    Char(u8),
    Bool(bool),
    Name,

    Eof,
}

impl TokenKind {
    /// Recognize a lexeme as a reserved keyword or type name, per §4.1
    /// ("if the lexeme is in the reserved list, emit the reserved kind,
    /// else NAME").
    pub fn keyword_from_lexeme(lexeme: &str) -> Option<TokenKind> {
        Some(match lexeme {
            "break" => TokenKind::KwBreak,
            "const" => TokenKind::KwConst,
            "continue" => TokenKind::KwContinue,
            "else" => TokenKind::KwElse,
            "import" => TokenKind::KwImport,
            "false" => TokenKind::KwFalse,
            "func" => TokenKind::KwFunc,
            "if" => TokenKind::KwIf,
            "print" => TokenKind::KwPrint,
            "return" => TokenKind::KwReturn,
            "true" => TokenKind::KwTrue,
            "while" => TokenKind::KwWhile,
            "var" => TokenKind::KwVar,
            "int" => TokenKind::TyInt,
            "float" => TokenKind::TyFloat,
            "char" => TokenKind::TyChar,
            "bool" => TokenKind::TyBool,
            _ => return None,
        })
    }

    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::TyInt | TokenKind::TyFloat | TokenKind::TyChar | TokenKind::TyBool
        )
    }

    /// True for relational operators (§4.2 "no chained relations").
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge | TokenKind::EqEq | TokenKind::Ne
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::KwBreak => "break",
            TokenKind::KwConst => "const",
            TokenKind::KwContinue => "continue",
            TokenKind::KwElse => "else",
            TokenKind::KwImport => "import",
            TokenKind::KwFalse => "false",
            TokenKind::KwFunc => "func",
            TokenKind::KwIf => "if",
            TokenKind::KwPrint => "print",
            TokenKind::KwReturn => "return",
            TokenKind::KwTrue => "true",
            TokenKind::KwWhile => "while",
            TokenKind::KwVar => "var",
            TokenKind::TyInt => "int",
            TokenKind::TyFloat => "float",
            TokenKind::TyChar => "char",
            TokenKind::TyBool => "bool",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::EqEq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Bang => "!",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Backtick => "`",
            TokenKind::Caret => "^",
            TokenKind::Eq => "=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semi => ";",
            TokenKind::Integer(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Char(_) => "char literal",
            TokenKind::Bool(_) => "bool literal",
            TokenKind::Name => "identifier",
            TokenKind::Eof => "<eof>",
        };
        write!(f, "{s}")
    }
}

/// A single lexed token: kind, source lexeme, and position (§3).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Symbol,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: Symbol, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    pub fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: Symbol::intern(""),
            span,
        }
    }
}
