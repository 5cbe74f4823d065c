//! Statement parsing

use crate::ast::*;
use crate::lexer::Keyword;
use crate::parser::Parser;
use xcc_common::CompilerError;

impl<'src> Parser<'src> {
    /// Parse a statement
    pub fn parse_statement(&mut self) -> Result<Statement, CompilerError> {
        if self.check_keyword(Keyword::Return) {
            return self.parse_return_statement();
        }
        if self.check_keyword(Keyword::If) {
            return self.parse_if_statement();
        }
        if self.check_keyword(Keyword::For) {
            return self.parse_for_statement();
        }
        if self.check_keyword(Keyword::While) {
            return self.parse_while_statement();
        }
        if self.check("{") {
            return self.parse_compound_statement();
        }
        self.parse_expression_statement()
    }

    /// compound = "{" (declaration | stmt)* "}"
    pub fn parse_compound_statement(&mut self) -> Result<Statement, CompilerError> {
        let open = self.expect("{")?;
        let mut statements = Vec::new();

        while !self.check("}") && !self.at_eof() {
            let stmt = if self.check_keyword(Keyword::Int) {
                self.parse_declaration()?
            } else {
                self.parse_statement()?
            };
            statements.push(stmt);
        }
        self.expect("}")?;

        Ok(self.new_stmt(StatementKind::Compound(statements), open.span))
    }

    /// expr-stmt = expr? ";"
    ///
    /// A lone `;` becomes an empty block.
    fn parse_expression_statement(&mut self) -> Result<Statement, CompilerError> {
        let start = self.peek().span;
        if self.match_token(";") {
            return Ok(self.new_stmt(StatementKind::Compound(Vec::new()), start));
        }
        let expr = self.parse_expression()?;
        self.expect(";")?;
        Ok(self.new_stmt(StatementKind::Expression(expr), start))
    }

    fn parse_return_statement(&mut self) -> Result<Statement, CompilerError> {
        let keyword = self.advance();
        let value = self.parse_expression()?;
        self.expect(";")?;
        Ok(self.new_stmt(StatementKind::Return(value), keyword.span))
    }

    /// Dangling `else` binds to the innermost `if`
    fn parse_if_statement(&mut self) -> Result<Statement, CompilerError> {
        let keyword = self.advance();
        self.expect("(")?;
        let condition = self.parse_expression()?;
        self.expect(")")?;
        let then_stmt = Box::new(self.parse_statement()?);

        let else_stmt = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(self.new_stmt(
            StatementKind::If {
                condition,
                then_stmt,
                else_stmt,
            },
            keyword.span,
        ))
    }

    /// "for" "(" expr-stmt expr? ";" expr? ")" stmt
    fn parse_for_statement(&mut self) -> Result<Statement, CompilerError> {
        let keyword = self.advance();
        self.expect("(")?;

        let init = Box::new(self.parse_expression_statement()?);

        let condition = if self.check(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(";")?;

        let update = if self.check(")") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(")")?;

        let body = Box::new(self.parse_statement()?);

        Ok(self.new_stmt(
            StatementKind::For {
                init: Some(init),
                condition,
                update,
                body,
            },
            keyword.span,
        ))
    }

    /// `while (c) s` is `for (; c;) s`
    fn parse_while_statement(&mut self) -> Result<Statement, CompilerError> {
        let keyword = self.advance();
        self.expect("(")?;
        let condition = self.parse_expression()?;
        self.expect(")")?;
        let body = Box::new(self.parse_statement()?);

        Ok(self.new_stmt(
            StatementKind::For {
                init: None,
                condition: Some(condition),
                update: None,
                body,
            },
            keyword.span,
        ))
    }
}
