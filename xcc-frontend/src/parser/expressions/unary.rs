//! Unary expression parsing

use crate::ast::*;
use crate::parser::Parser;
use xcc_common::CompilerError;

impl<'src> Parser<'src> {
    /// unary = ("+" | "-" | "&" | "*") unary | primary
    pub fn parse_unary(&mut self) -> Result<Expression, CompilerError> {
        if self.match_token("+") {
            return self.parse_unary();
        }

        let op = if self.check("-") {
            UnaryOp::Negate
        } else if self.check("&") {
            UnaryOp::AddressOf
        } else if self.check("*") {
            UnaryOp::Dereference
        } else {
            return self.parse_primary();
        };

        let token = self.advance();
        let operand = self.parse_unary()?;
        Ok(self.new_expr(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            token.span,
        ))
    }
}
