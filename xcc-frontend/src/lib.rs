//! xcc x86-64 C Compiler - Frontend
//!
//! This crate provides the frontend components of the compiler:
//! - Lexer: tokenizes the program text
//! - Parser: builds the AST and per-function locals from tokens
//! - AST: abstract syntax tree definitions
//! - Semantic analysis: type resolution

pub mod lexer;
pub mod parser;
pub mod ast;
pub mod types;
pub mod semantic;

pub use lexer::{Keyword, Lexer, Token, TokenKind};
pub use parser::Parser;
pub use ast::{
    BinaryOp, Expression, ExpressionKind, FunctionDefinition, NodeIdGenerator, Statement,
    StatementKind, TranslationUnit, UnaryOp, VarId, Variable,
};
pub use types::Type;
pub use semantic::{resolve_types, TypeResolver};

use xcc_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Tokenize source code (for debugging)
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        Lexer::new(source).tokenize()
    }

    /// Parse source code into an AST
    pub fn parse_source(source: &str) -> Result<TranslationUnit, CompilerError> {
        let tokens = Self::tokenize_source(source)?;
        let mut parser = Parser::new(tokens, source);
        parser.parse_translation_unit()
    }

    /// Parse source code and resolve the type of every expression
    pub fn analyze_source(source: &str) -> Result<TranslationUnit, CompilerError> {
        let mut ast = Self::parse_source(source)?;
        resolve_types(&mut ast)?;
        Ok(ast)
    }
}
