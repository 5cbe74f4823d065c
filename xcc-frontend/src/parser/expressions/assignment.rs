//! Assignment expression parsing

use crate::ast::*;
use crate::parser::Parser;
use xcc_common::CompilerError;

impl<'src> Parser<'src> {
    /// assign = equality ("=" assign)?
    pub fn parse_assignment(&mut self) -> Result<Expression, CompilerError> {
        let target = self.parse_equality()?;

        if self.check("=") {
            let op = self.advance();
            let value = self.parse_assignment()?;
            return Ok(self.new_expr(
                ExpressionKind::Assignment {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                op.span,
            ));
        }

        Ok(target)
    }
}
