//! Token definitions for the lexer
//!
//! Tokens never copy program text. They carry a span into the source
//! buffer; use [`Token::text`] to get the spelling back.

use serde::{Deserialize, Serialize};
use std::fmt;
use xcc_common::{SourceLocation, SourceSpan};

/// Reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Return,
    If,
    Else,
    For,
    While,
    Int,
}

impl Keyword {
    /// Every reserved word with its spelling
    pub const ALL: [(&'static str, Keyword); 6] = [
        ("return", Keyword::Return),
        ("if", Keyword::If),
        ("else", Keyword::Else),
        ("for", Keyword::For),
        ("while", Keyword::While),
        ("int", Keyword::Int),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Int => "int",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Decimal integer literal with its decoded value
    Number(i64),
    Identifier,
    Keyword(Keyword),
    Punctuator,
    EndOfFile,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "number {}", value),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Keyword(kw) => write!(f, "keyword '{}'", kw),
            TokenKind::Punctuator => write!(f, "punctuator"),
            TokenKind::EndOfFile => write!(f, "end of file"),
        }
    }
}

/// A token with its position in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(kind: TokenKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    /// The token's spelling in `source`
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    pub fn location(&self) -> SourceLocation {
        self.span.location()
    }

    /// True if this token is spelled exactly `op`
    pub fn is(&self, source: &str, op: &str) -> bool {
        match self.kind {
            TokenKind::EndOfFile => false,
            _ => self.text(source) == op,
        }
    }

    /// Human-readable description for error messages
    pub fn describe(&self, source: &str) -> String {
        match self.kind {
            TokenKind::EndOfFile => "end of file".to_string(),
            _ => format!("'{}'", self.text(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_text() {
        let source = "return 42;";
        let token = Token::new(TokenKind::Number(42), SourceSpan::new(7, 2));
        assert_eq!(token.text(source), "42");
        assert!(token.is(source, "42"));
        assert_eq!(token.describe(source), "'42'");
    }

    #[test]
    fn test_end_of_file_never_matches() {
        let eof = Token::new(TokenKind::EndOfFile, SourceSpan::new(3, 0));
        assert!(!eof.is("abc", ""));
        assert_eq!(eof.describe("abc"), "end of file");
    }

    #[test]
    fn test_keyword_table_matches_spelling() {
        for (spelling, keyword) in Keyword::ALL {
            assert_eq!(keyword.as_str(), spelling);
        }
    }
}
