use crate::error::Span;
use crate::object::{Object, ObjectType};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Ident,
    Int,
    Float,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    NotEq,
    Inc,
    Dec,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    May,
    True,
    False,
    If,
    Else,
    Return,
    While,
    Null,

    // Type keywords
    Mint,
    Lint,
    Mstr,
    Lstr,
    Marr,
    Larr,
    Mdct,
    Ldct,
    Any,

    // Special
    Illegal,
    Eof,
}

impl TokenKind {
    /// The name the parser knows this kind by.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Bang => "BANG",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Le => "LE",
            TokenKind::Ge => "GE",
            TokenKind::Eq => "EQ",
            TokenKind::NotEq => "NOT_EQ",
            TokenKind::Inc => "INC",
            TokenKind::Dec => "DEC",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::May => "MAY",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::While => "WHILE",
            TokenKind::Null => "NULL",
            TokenKind::Mint => "MINT",
            TokenKind::Lint => "LINT",
            TokenKind::Mstr => "MSTR",
            TokenKind::Lstr => "LSTR",
            TokenKind::Marr => "MARR",
            TokenKind::Larr => "LARR",
            TokenKind::Mdct => "MDCT",
            TokenKind::Ldct => "LDCT",
            TokenKind::Any => "ANY",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
        }
    }

    pub fn is_type_keyword(self) -> bool {
        self.binding_type().is_some()
    }

    /// Decodes a type keyword into the binding it declares.
    pub fn binding_type(self) -> Option<BindingType> {
        let (object_type, mutable) = match self {
            TokenKind::Mint => (ObjectType::Integer, true),
            TokenKind::Lint => (ObjectType::Integer, false),
            TokenKind::Mstr => (ObjectType::String, true),
            TokenKind::Lstr => (ObjectType::String, false),
            TokenKind::Marr => (ObjectType::Array, true),
            TokenKind::Larr => (ObjectType::Array, false),
            TokenKind::Mdct => (ObjectType::Dictionary, true),
            TokenKind::Ldct => (ObjectType::Dictionary, false),
            TokenKind::Any => (ObjectType::Any, true),
            _ => return None,
        };
        Some(BindingType {
            object_type,
            mutable,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn eof(pos: usize) -> Self {
        Self::new(TokenKind::Eof, "", Span::empty(pos))
    }
}

/// Tokens compare by kind and literal; the span is bookkeeping.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.literal == other.literal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.literal)
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("let", TokenKind::Let),
    ("fn", TokenKind::Function),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("return", TokenKind::Return),
    ("while", TokenKind::While),
    ("may", TokenKind::May),
    ("null", TokenKind::Null),
    ("mint", TokenKind::Mint),
    ("lint", TokenKind::Lint),
    ("mstr", TokenKind::Mstr),
    ("lstr", TokenKind::Lstr),
    ("marr", TokenKind::Marr),
    ("larr", TokenKind::Larr),
    ("larry", TokenKind::Larr),
    ("mdct", TokenKind::Mdct),
    ("ldct", TokenKind::Ldct),
    ("any", TokenKind::Any),
];

fn keyword_table() -> &'static HashMap<&'static str, TokenKind> {
    static TABLE: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Classifies an identifier-shaped literal: the reserved kind on an exact
/// match, `Ident` otherwise.
pub fn lookup_ident(ident: &str) -> TokenKind {
    keyword_table()
        .get(ident)
        .copied()
        .unwrap_or(TokenKind::Ident)
}

/// Every reserved spelling, in table order.
pub fn keywords() -> impl Iterator<Item = (&'static str, TokenKind)> {
    KEYWORDS.iter().copied()
}

/// The mutability and element type a type keyword gives a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingType {
    pub object_type: ObjectType,
    pub mutable: bool,
}

impl BindingType {
    /// Whether `value` may be stored under a binding of this type. Only
    /// `any` bindings hold null.
    pub fn accepts(&self, value: &Object) -> bool {
        match value {
            Object::Null => self.object_type == ObjectType::Any,
            other => self.object_type.matches(other.type_of()),
        }
    }

    /// The canonical keyword spelling for this binding.
    pub fn keyword(&self) -> &'static str {
        match (self.object_type, self.mutable) {
            (ObjectType::Integer, true) => "mint",
            (ObjectType::Integer, false) => "lint",
            (ObjectType::String, true) => "mstr",
            (ObjectType::String, false) => "lstr",
            (ObjectType::Array, true) => "marr",
            (ObjectType::Array, false) => "larr",
            (ObjectType::Dictionary, true) => "mdct",
            (ObjectType::Dictionary, false) => "ldct",
            _ => "any",
        }
    }
}

impl fmt::Display for BindingType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
