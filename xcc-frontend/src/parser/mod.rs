//! Recursive Descent Parser
//!
//! Turns the token list into one [`FunctionDefinition`] per function. Each
//! function collects its own locals while its body is parsed; variable
//! references in the AST are indices into that list.

pub mod declarations;
pub mod statements;
pub mod expressions;

use crate::ast::*;
use crate::lexer::{Keyword, Token, TokenKind};
use crate::semantic::TypeResolver;
use crate::types::Type;
use log::debug;
use std::collections::VecDeque;
use xcc_common::{CompilerError, SourceLocation, SourceSpan};

/// Parser over the tokens of one program
pub struct Parser<'src> {
    pub(crate) source: &'src str,
    pub(crate) tokens: VecDeque<Token>,
    /// Returned by `peek` once the queue is drained
    eof: Token,
    pub(crate) node_id_gen: NodeIdGenerator,
    /// Locals of the function currently being parsed
    pub(crate) locals: Vec<Variable>,
}

impl<'src> Parser<'src> {
    /// Create a new parser. `source` is the text the tokens' spans refer to.
    pub fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        let eof = tokens
            .last()
            .filter(|t| t.kind == TokenKind::EndOfFile)
            .copied()
            .unwrap_or_else(|| Token::new(TokenKind::EndOfFile, SourceSpan::new(source.len(), 0)));

        Self {
            source,
            tokens: tokens.into(),
            eof,
            node_id_gen: NodeIdGenerator::new(),
            locals: Vec::new(),
        }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.eof)
    }

    /// Peek `n` tokens ahead of the current one
    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(n).unwrap_or(&self.eof)
    }

    /// Get current token and advance. End-of-file is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        if self.peek().kind == TokenKind::EndOfFile {
            return *self.peek();
        }
        self.tokens.pop_front().unwrap_or(self.eof)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }

    /// Check if the current token is spelled `op`
    pub(crate) fn check(&self, op: &str) -> bool {
        self.peek().is(self.source, op)
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().kind == TokenKind::Keyword(keyword)
    }

    /// Consume the current token if it is spelled `op`
    pub(crate) fn match_token(&mut self, op: &str) -> bool {
        if self.check(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: String) -> CompilerError {
        let found = self.peek();
        CompilerError::unexpected_token(expected, found.describe(self.source), found.location())
    }

    /// Expect and consume a specific punctuator
    pub(crate) fn expect(&mut self, op: &str) -> Result<Token, CompilerError> {
        if self.check(op) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("'{}'", op)))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, CompilerError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("'{}'", keyword)))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Token, CompilerError> {
        if self.peek().kind == TokenKind::Identifier {
            Ok(self.advance())
        } else {
            Err(self.unexpected("an identifier".to_string()))
        }
    }

    /// Get current location for error reporting
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn text(&self, token: &Token) -> &'src str {
        token.text(self.source)
    }

    pub(crate) fn new_expr(&mut self, kind: ExpressionKind, span: SourceSpan) -> Expression {
        Expression::new(self.node_id_gen.next(), kind, span)
    }

    pub(crate) fn new_stmt(&mut self, kind: StatementKind, span: SourceSpan) -> Statement {
        Statement {
            node_id: self.node_id_gen.next(),
            kind,
            span,
        }
    }

    /// Register a new local in the current function
    pub(crate) fn declare_local(&mut self, name: &str, ty: Type) -> VarId {
        self.locals.push(Variable::new(name, ty));
        self.locals.len() - 1
    }

    /// Most recent local with this name
    pub(crate) fn find_local(&self, name: &str) -> Option<VarId> {
        self.locals.iter().rposition(|var| var.name == name)
    }

    /// Type `expr` in place against the current locals and return its type
    pub(crate) fn resolve(&self, expr: &mut Expression) -> Result<Type, CompilerError> {
        TypeResolver::new(&self.locals).resolve_expression(expr)?;
        expr.expr_type
            .clone()
            .ok_or_else(|| CompilerError::internal("resolver left expression untyped"))
    }

    /// Parse a complete translation unit
    pub fn parse_translation_unit(&mut self) -> Result<TranslationUnit, CompilerError> {
        let mut functions = Vec::new();

        while !self.at_eof() {
            let func = self.parse_function_definition()?;
            debug!(
                "parsed function '{}' ({} params, {} locals)",
                func.name,
                func.parameters.len(),
                func.locals.len()
            );
            functions.push(func);
        }

        Ok(TranslationUnit { functions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<TranslationUnit, CompilerError> {
        let tokens = tokenize(source)?;
        Parser::new(tokens, source).parse_translation_unit()
    }

    fn body(source: &str) -> Vec<Statement> {
        let unit = parse(source).unwrap();
        match unit.functions.into_iter().next().map(|f| f.body.kind) {
            Some(StatementKind::Compound(stmts)) => stmts,
            other => panic!("Expected compound body, got {:?}", other),
        }
    }

    fn returned(source: &str) -> Expression {
        match body(source).pop().map(|s| s.kind) {
            Some(StatementKind::Return(expr)) => expr,
            other => panic!("Expected return, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_function_signature() {
        let unit = parse("int add(int a, int *b) { return a; } int main() { return 0; }").unwrap();
        assert_eq!(unit.functions.len(), 2);

        let add = &unit.functions[0];
        assert_eq!(add.name, "add");
        assert_eq!(add.return_type, Type::Int);
        assert_eq!(add.parameters, vec![0, 1]);
        assert_eq!(add.locals[1].name, "b");
        assert_eq!(add.locals[1].var_type, Type::pointer_to(Type::Int));
        assert_eq!(unit.functions[1].locals.len(), 0);
    }

    #[test]
    fn test_precedence() {
        let expr = returned("int main() { return 1 + 2 * 3; }");
        match expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Add, left, right } => {
                assert_eq!(left.kind, ExpressionKind::IntLiteral(1));
                assert!(matches!(right.kind, ExpressionKind::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("Expected addition, got {:?}", other),
        }
    }

    #[test]
    fn test_greater_than_swaps_operands() {
        let expr = returned("int main() { return 1 > 2; }");
        match expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Less, left, right } => {
                assert_eq!(left.kind, ExpressionKind::IntLiteral(2));
                assert_eq!(right.kind, ExpressionKind::IntLiteral(1));
            }
            other => panic!("Expected swapped less-than, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let stmts = body("int main() { int a; int b; a = b = 3; return a; }");
        match &stmts[2].kind {
            StatementKind::Expression(Expression {
                kind: ExpressionKind::Assignment { target, value },
                ..
            }) => {
                assert_eq!(target.kind, ExpressionKind::Variable(0));
                assert!(matches!(value.kind, ExpressionKind::Assignment { .. }));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int main() { return 1 }").unwrap_err();
        assert_eq!(
            err,
            CompilerError::unexpected_token("';'", "'}'", SourceLocation::new(22))
        );
        assert_eq!(err.to_string(), "expected ';'");
    }

    #[test]
    fn test_expected_expression() {
        let err = parse("int main() { return ; }").unwrap_err();
        assert_eq!(err, CompilerError::ExpectedExpression { location: SourceLocation::new(20) });
    }

    #[test]
    fn test_undefined_variable() {
        let err = parse("int main() { return y; }").unwrap_err();
        assert_eq!(
            err,
            CompilerError::UndefinedVariable {
                name: "y".to_string(),
                location: SourceLocation::new(20),
            }
        );
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("int main() { return 1;").unwrap_err();
        assert!(matches!(err, CompilerError::UnexpectedToken { ref found, .. } if found == "end of file"));
    }
}
