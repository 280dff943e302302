use crate::error::{GoldError, Span};
use crate::token::{lookup_ident, Token, TokenKind};

/// Pull-based scanner over a complete source string.
///
/// Each call to [`Lexer::next_token`] yields exactly one token. Once the input
/// is exhausted every further call yields `EOF`. Malformed input never stops
/// the scan: it produces an `ILLEGAL` token (or a string running to the end
/// of input) and a diagnostic in [`Lexer::diagnostics`].
pub struct Lexer {
    source: String,
    start: usize,
    current: usize,
    diagnostics: Vec<GoldError>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            start: 0,
            current: 0,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    pub fn diagnostics(&self) -> &[GoldError] {
        &self.diagnostics
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.current;

        let Some(c) = self.advance() else {
            return Token::eof(self.current);
        };

        match c {
            '=' => self.either('=', TokenKind::Eq, TokenKind::Assign),
            '!' => self.either('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.either('=', TokenKind::Le, TokenKind::Lt),
            '>' => self.either('=', TokenKind::Ge, TokenKind::Gt),
            '+' => self.either('+', TokenKind::Inc, TokenKind::Plus),
            '-' => self.either('-', TokenKind::Dec, TokenKind::Minus),
            '*' => self.make_token(TokenKind::Asterisk),
            '/' => self.make_token(TokenKind::Slash),
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            '{' => self.make_token(TokenKind::LBrace),
            '}' => self.make_token(TokenKind::RBrace),
            '[' => self.make_token(TokenKind::LBracket),
            ']' => self.make_token(TokenKind::RBracket),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => self.make_token(TokenKind::Colon),
            '"' => self.string(),
            c if is_letter(c) => self.identifier(),
            c if c.is_ascii_digit() => self.number(),
            c => {
                let span = Span::new(self.start, self.current);
                tracing::debug!(character = %c, start = span.start, "illegal character");
                self.diagnostics.push(GoldError::illegal_character(span, c));
                self.make_token(TokenKind::Illegal)
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Two-character form when `second` follows, single-character otherwise.
    fn either(&mut self, second: char, double: TokenKind, single: TokenKind) -> Token {
        let kind = if self.match_char(second) { double } else { single };
        self.make_token(kind)
    }

    fn identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| is_letter(c) || c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        self.make_token(lookup_ident(text))
    }

    fn number(&mut self) -> Token {
        self.consume_digits();

        // A trailing '.' alone still makes a float: "3." is FLOAT("3.").
        if self.match_char('.') {
            self.consume_digits();
            return self.make_token(TokenKind::Float);
        }

        self.make_token(TokenKind::Int)
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn string(&mut self) -> Token {
        let content_start = self.current;
        while self.peek().is_some_and(|c| c != '"') {
            self.advance();
        }
        let content_end = self.current;

        if !self.match_char('"') {
            let span = Span::new(self.start, self.current);
            tracing::debug!(start = span.start, "unterminated string literal");
            self.diagnostics.push(GoldError::unterminated_string(span));
        }

        let content = self.source[content_start..content_end].to_string();
        Token::new(TokenKind::String, content, Span::new(self.start, self.current))
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let text = &self.source[self.start..self.current];
        Token::new(kind, text, Span::new(self.start, self.current))
    }
}

/// Yields every token up to and including the first `EOF`.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Scans `source` to completion, `EOF` included.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
