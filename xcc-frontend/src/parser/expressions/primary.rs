//! Primary expression parsing

use crate::ast::*;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use xcc_common::CompilerError;

impl<'src> Parser<'src> {
    /// primary = "(" expr ")" | ident call-args? | num
    pub fn parse_primary(&mut self) -> Result<Expression, CompilerError> {
        if self.match_token("(") {
            let expr = self.parse_expression()?;
            self.expect(")")?;
            return Ok(expr);
        }

        let token = *self.peek();
        match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(self.new_expr(ExpressionKind::IntLiteral(value), token.span))
            }

            TokenKind::Identifier if self.peek_nth(1).is(self.source, "(") => {
                self.parse_call()
            }

            TokenKind::Identifier => {
                self.advance();
                let name = self.text(&token);
                match self.find_local(name) {
                    Some(id) => Ok(self.new_expr(ExpressionKind::Variable(id), token.span)),
                    None => Err(CompilerError::UndefinedVariable {
                        name: name.to_string(),
                        location: token.location(),
                    }),
                }
            }

            _ => Err(CompilerError::ExpectedExpression {
                location: self.current_location(),
            }),
        }
    }

    /// funcall = ident "(" (assign ("," assign)*)? ")"
    fn parse_call(&mut self) -> Result<Expression, CompilerError> {
        let name = self.expect_identifier()?;
        self.expect("(")?;

        let mut arguments = Vec::new();
        if !self.check(")") {
            loop {
                arguments.push(self.parse_assignment()?);
                if !self.match_token(",") {
                    break;
                }
            }
        }
        self.expect(")")?;

        let function = self.text(&name).to_string();
        Ok(self.new_expr(ExpressionKind::Call { function, arguments }, name.span))
    }
}
