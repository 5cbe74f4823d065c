//! Binary expression parsing with operator precedence
//!
//! `+` and `-` look at the operand types while parsing and rewrite pointer
//! arithmetic into explicit scaling, so later phases only ever see plain
//! integer arithmetic on addresses.

use crate::ast::*;
use crate::parser::Parser;
use crate::types::Type;
use xcc_common::{CompilerError, SourceSpan};

impl<'src> Parser<'src> {
    pub(crate) fn new_binary(&mut self, op: BinaryOp, left: Expression, right: Expression, span: SourceSpan) -> Expression {
        self.new_expr(
            ExpressionKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    /// equality = relational ("==" relational | "!=" relational)*
    pub fn parse_equality(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = if self.check("==") {
                BinaryOp::Equal
            } else if self.check("!=") {
                BinaryOp::NotEqual
            } else {
                return Ok(left);
            };
            let token = self.advance();
            let right = self.parse_relational()?;
            left = self.new_binary(op, left, right, token.span);
        }
    }

    /// relational = add ("<" add | "<=" add | ">" add | ">=" add)*
    pub fn parse_relational(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_additive()?;

        loop {
            // (operator, operands swapped)
            let (op, swapped) = if self.check("<") {
                (BinaryOp::Less, false)
            } else if self.check("<=") {
                (BinaryOp::LessEqual, false)
            } else if self.check(">") {
                (BinaryOp::Less, true)
            } else if self.check(">=") {
                (BinaryOp::LessEqual, true)
            } else {
                return Ok(left);
            };
            let token = self.advance();
            let right = self.parse_additive()?;
            left = if swapped {
                self.new_binary(op, right, left, token.span)
            } else {
                self.new_binary(op, left, right, token.span)
            };
        }
    }

    /// add = mul ("+" mul | "-" mul)*
    pub fn parse_additive(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            if self.check("+") {
                let token = self.advance();
                let right = self.parse_multiplicative()?;
                left = self.new_add(left, right, token.span)?;
            } else if self.check("-") {
                let token = self.advance();
                let right = self.parse_multiplicative()?;
                left = self.new_sub(left, right, token.span)?;
            } else {
                return Ok(left);
            }
        }
    }

    /// mul = unary ("*" unary | "/" unary)*
    pub fn parse_multiplicative(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = if self.check("*") {
                BinaryOp::Mul
            } else if self.check("/") {
                BinaryOp::Div
            } else {
                return Ok(left);
            };
            let token = self.advance();
            let right = self.parse_unary()?;
            left = self.new_binary(op, left, right, token.span);
        }
    }

    /// `index * sizeof(*pointer)`
    fn scale_index(&mut self, index: Expression, pointee: &Type, span: SourceSpan) -> Expression {
        let size = self
            .new_expr(ExpressionKind::IntLiteral(pointee.size()), span)
            .with_type(Type::Int);
        self.new_binary(BinaryOp::Mul, index, size, span)
    }

    /// Build `left + right`, scaling the integer side of pointer arithmetic
    fn new_add(&mut self, mut left: Expression, mut right: Expression, span: SourceSpan) -> Result<Expression, CompilerError> {
        let left_type = self.resolve(&mut left)?;
        let right_type = self.resolve(&mut right)?;

        match (left_type.base(), right_type.base()) {
            // num + num
            (None, None) => Ok(self.new_binary(BinaryOp::Add, left, right, span)),

            (Some(_), Some(_)) => Err(CompilerError::InvalidOperands {
                location: span.location(),
            }),

            // ptr + num
            (Some(pointee), None) => {
                let offset = self.scale_index(right, pointee, span);
                Ok(self.new_binary(BinaryOp::Add, left, offset, span))
            }

            // num + ptr is normalised to ptr + num
            (None, Some(pointee)) => {
                let offset = self.scale_index(left, pointee, span);
                Ok(self.new_binary(BinaryOp::Add, right, offset, span))
            }
        }
    }

    /// Build `left - right`; the difference of two pointers counts elements
    fn new_sub(&mut self, mut left: Expression, mut right: Expression, span: SourceSpan) -> Result<Expression, CompilerError> {
        let left_type = self.resolve(&mut left)?;
        let right_type = self.resolve(&mut right)?;

        match (left_type.base(), right_type.base()) {
            // num - num
            (None, None) => Ok(self.new_binary(BinaryOp::Sub, left, right, span)),

            // ptr - num
            (Some(pointee), None) => {
                let offset = self.scale_index(right, pointee, span);
                Ok(self.new_binary(BinaryOp::Sub, left, offset, span))
            }

            // ptr - ptr
            (Some(pointee), Some(_)) => {
                let size = pointee.size();
                let bytes = self
                    .new_binary(BinaryOp::Sub, left, right, span)
                    .with_type(Type::Int);
                let divisor = self
                    .new_expr(ExpressionKind::IntLiteral(size), span)
                    .with_type(Type::Int);
                Ok(self.new_binary(BinaryOp::Div, bytes, divisor, span))
            }

            // num - ptr
            (None, Some(_)) => Err(CompilerError::InvalidOperands {
                location: span.location(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::tokenize;
    use crate::parser::Parser;
    use crate::types::Type;
    use pretty_assertions::assert_eq;
    use xcc_common::{CompilerError, SourceLocation};

    /// Parse `source` with `x: int` (local 0) and `p, q: int*` (locals 1, 2) in scope
    fn parse_with_locals(source: &str) -> Result<Expression, CompilerError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser::new(tokens, source);
        parser.declare_local("x", Type::Int);
        parser.declare_local("p", Type::pointer_to(Type::Int));
        parser.declare_local("q", Type::pointer_to(Type::Int));
        parser.parse_expression()
    }

    fn assert_scaled(expr: &Expression, index: &ExpressionKind) {
        match &expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Mul, left, right } => {
                assert_eq!(&left.kind, index);
                assert_eq!(right.kind, ExpressionKind::IntLiteral(8));
            }
            other => panic!("Expected scaled index, got {:?}", other),
        }
    }

    #[test]
    fn test_pointer_plus_integer_is_scaled() {
        let expr = parse_with_locals("p + 3").unwrap();
        match expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Add, left, right } => {
                assert_eq!(left.kind, ExpressionKind::Variable(1));
                assert_scaled(&right, &ExpressionKind::IntLiteral(3));
            }
            other => panic!("Expected addition, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_plus_pointer_is_normalised() {
        let expr = parse_with_locals("x + p").unwrap();
        match expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Add, left, right } => {
                assert_eq!(left.kind, ExpressionKind::Variable(1));
                assert_scaled(&right, &ExpressionKind::Variable(0));
            }
            other => panic!("Expected addition, got {:?}", other),
        }
    }

    #[test]
    fn test_pointer_difference_is_integer() {
        let expr = parse_with_locals("p - q").unwrap();
        assert_eq!(expr.expr_type, None);
        match &expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Div, left, right } => {
                assert_eq!(left.expr_type, Some(Type::Int));
                assert!(matches!(left.kind, ExpressionKind::Binary { op: BinaryOp::Sub, .. }));
                assert_eq!(right.kind, ExpressionKind::IntLiteral(8));
            }
            other => panic!("Expected division, got {:?}", other),
        }
    }

    #[test]
    fn test_pointer_minus_integer_is_scaled() {
        let expr = parse_with_locals("p - 1").unwrap();
        match expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Sub, right, .. } => {
                assert_scaled(&right, &ExpressionKind::IntLiteral(1));
            }
            other => panic!("Expected subtraction, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_pointer_arithmetic() {
        let err = parse_with_locals("p + q").unwrap_err();
        assert_eq!(err, CompilerError::InvalidOperands { location: SourceLocation::new(2) });

        let err = parse_with_locals("1 - p").unwrap_err();
        assert_eq!(err, CompilerError::InvalidOperands { location: SourceLocation::new(2) });
    }

    #[test]
    fn test_integer_arithmetic_is_untouched() {
        let expr = parse_with_locals("x - 2 * 3").unwrap();
        match expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Sub, left, right } => {
                assert_eq!(left.kind, ExpressionKind::Variable(0));
                assert!(matches!(right.kind, ExpressionKind::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("Expected subtraction, got {:?}", other),
        }
    }
}
