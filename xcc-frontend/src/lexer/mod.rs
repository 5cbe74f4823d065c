//! Lexer
//!
//! Splits the program text into numbers, identifiers, keywords and
//! punctuators. Keywords are recognised in a second pass over the finished
//! token list, so the scanner itself only knows about identifiers.

pub mod token;

pub use token::{Keyword, Token, TokenKind};

use log::{debug, trace};
use std::collections::HashMap;
use xcc_common::{CompilerError, SourceLocation, SourceSpan};

/// Punctuators made of two characters; tried before single characters
const TWO_CHAR_PUNCTUATORS: [&str; 4] = ["==", "!=", "<=", ">="];

/// ASCII punctuation outside the C basic source character set
const NON_C_PUNCTUATION: [u8; 3] = [b'@', b'$', b'`'];

/// Lexer over a single program buffer
pub struct Lexer<'src> {
    input: &'src [u8],
    position: usize,
    keywords: HashMap<&'static str, Keyword>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer
    pub fn new(source: &'src str) -> Self {
        Self {
            input: source.as_bytes(),
            position: 0,
            keywords: Keyword::ALL.into_iter().collect(),
        }
    }

    fn current_byte(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.position)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.current_byte() {
            // \x0b is the vertical tab, which is_ascii_whitespace leaves out
            if b.is_ascii_whitespace() || b == b'\x0b' {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    fn is_ident_start(b: u8) -> bool {
        b.is_ascii_alphabetic() || b == b'_'
    }

    fn is_ident_continue(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_'
    }

    /// Decode a run of decimal digits. Values past `u64::MAX` wrap.
    fn tokenize_number(&mut self) -> TokenKind {
        let mut value: u64 = 0;
        while let Some(b) = self.current_byte().filter(u8::is_ascii_digit) {
            value = value.wrapping_mul(10).wrapping_add(u64::from(b - b'0'));
            self.position += 1;
        }
        TokenKind::Number(value as i64)
    }

    fn tokenize_identifier(&mut self) -> TokenKind {
        self.position += 1;
        while self.current_byte().is_some_and(Self::is_ident_continue) {
            self.position += 1;
        }
        TokenKind::Identifier
    }

    /// Length of the punctuator at the current position, if any
    fn punctuator_len(&self) -> Option<usize> {
        let rest = &self.input[self.position..];
        if TWO_CHAR_PUNCTUATORS.iter().any(|op| rest.starts_with(op.as_bytes())) {
            return Some(2);
        }
        match rest.first() {
            Some(b) if b.is_ascii_punctuation() && !NON_C_PUNCTUATION.contains(b) => Some(1),
            _ => None,
        }
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_whitespace();
        let start = self.position;

        let kind = match self.current_byte() {
            None => TokenKind::EndOfFile,
            Some(b) if b.is_ascii_digit() => self.tokenize_number(),
            Some(b) if Self::is_ident_start(b) => self.tokenize_identifier(),
            Some(_) => match self.punctuator_len() {
                Some(len) => {
                    self.position += len;
                    TokenKind::Punctuator
                }
                None => return Err(CompilerError::invalid_token(self.current_location())),
            },
        };

        let token = Token::new(kind, SourceSpan::new(start, self.position - start));
        trace!("token {:?} at {}", token.kind, token.span);
        Ok(token)
    }

    /// Tokenize the whole input. The last token is always end-of-file.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if done {
                break;
            }
        }
        self.convert_keywords(&mut tokens);
        debug!("tokenized {} bytes into {} tokens", self.input.len(), tokens.len());
        Ok(tokens)
    }

    /// Reclassify identifiers spelled like reserved words
    fn convert_keywords(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut().filter(|t| t.kind == TokenKind::Identifier) {
            let spelling = &self.input[token.span.start..token.span.end()];
            let keyword = std::str::from_utf8(spelling)
                .ok()
                .and_then(|s| self.keywords.get(s));
            if let Some(&keyword) = keyword {
                token.kind = TokenKind::Keyword(keyword);
            }
        }
    }
}

/// Convenience wrapper: tokenize `source` in one call
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompilerError> {
    Lexer::new(source).tokenize()
}
