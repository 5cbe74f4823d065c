//! Expression parsing
//!
//! One method per precedence level, lowest first: assignment, equality,
//! relational, additive, multiplicative, unary, primary.

mod assignment;
mod binary;
mod unary;
mod primary;

use crate::ast::*;
use crate::parser::Parser;
use xcc_common::CompilerError;

impl<'src> Parser<'src> {
    /// Parse expression (top level)
    pub fn parse_expression(&mut self) -> Result<Expression, CompilerError> {
        self.parse_assignment()
    }
}
