//! Function definitions and local declarations

use crate::ast::*;
use crate::lexer::{Keyword, Token};
use crate::parser::Parser;
use crate::types::Type;
use xcc_common::CompilerError;

impl<'src> Parser<'src> {
    /// declspec = "int"
    pub(crate) fn parse_declspec(&mut self) -> Result<Type, CompilerError> {
        self.expect_keyword(Keyword::Int)?;
        Ok(Type::Int)
    }

    /// declarator = "*"* ident
    pub(crate) fn parse_declarator(&mut self, base: Type) -> Result<(Type, Token), CompilerError> {
        let mut ty = base;
        while self.match_token("*") {
            ty = Type::pointer_to(ty);
        }
        let name = self.expect_identifier()?;
        Ok((ty, name))
    }

    /// Parse `int name(params) { ... }`
    pub fn parse_function_definition(&mut self) -> Result<FunctionDefinition, CompilerError> {
        self.locals.clear();

        let base = self.parse_declspec()?;
        let (return_type, name) = self.parse_declarator(base)?;

        self.expect("(")?;
        let mut parameters = Vec::new();
        if !self.check(")") {
            loop {
                let base = self.parse_declspec()?;
                let (ty, param) = self.parse_declarator(base)?;
                parameters.push(self.declare_local(self.text(&param), ty));
                if !self.match_token(",") {
                    break;
                }
            }
        }
        self.expect(")")?;

        let body = self.parse_compound_statement()?;

        Ok(FunctionDefinition {
            node_id: self.node_id_gen.next(),
            name: self.text(&name).to_string(),
            return_type,
            parameters,
            locals: std::mem::take(&mut self.locals),
            body,
            stack_size: 0,
            span: name.span,
        })
    }

    /// declaration = declspec (declarator ("=" expr)? ("," declarator ("=" expr)?)*)? ";"
    ///
    /// Lowers to a block holding one assignment per initializer.
    pub(crate) fn parse_declaration(&mut self) -> Result<Statement, CompilerError> {
        let start = self.peek().span;
        let base = self.parse_declspec()?;

        let mut initializers = Vec::new();
        let mut first = true;
        while !self.check(";") {
            if !first {
                self.expect(",")?;
            }
            first = false;

            let (ty, name) = self.parse_declarator(base.clone())?;
            let id = self.declare_local(self.text(&name), ty);

            if !self.check("=") {
                continue;
            }
            let eq = self.advance();
            let target = self.new_expr(ExpressionKind::Variable(id), name.span);
            let value = self.parse_assignment()?;
            let assign = self.new_expr(
                ExpressionKind::Assignment {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                eq.span,
            );
            initializers.push(self.new_stmt(StatementKind::Expression(assign), eq.span));
        }
        self.expect(";")?;

        Ok(self.new_stmt(StatementKind::Compound(initializers), start))
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

    fn parse_function(source: &str) -> Result<FunctionDefinition, CompilerError> {
        let tokens = tokenize(source)?;
        Parser::new(tokens, source).parse_function_definition()
    }

    #[test]
    fn test_declaration_with_initializers() {
        let func = parse_function("int main() { int x = 3, *y = &x, z; return z; }").unwrap();
        let names: Vec<_> = func.locals.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(func.locals[1].var_type, Type::pointer_to(Type::Int));

        let StatementKind::Compound(stmts) = &func.body.kind else {
            panic!("Expected compound body");
        };
        let StatementKind::Compound(inits) = &stmts[0].kind else {
            panic!("Expected declaration block");
        };
        assert_eq!(inits.len(), 2);
    }

    #[test]
    fn test_pointer_to_pointer_declarator() {
        let func = parse_function("int main() { int **pp; return 0; }").unwrap();
        assert_eq!(
            func.locals[0].var_type,
            Type::pointer_to(Type::pointer_to(Type::Int))
        );
    }

    #[test]
    fn test_redeclaration_shadows() {
        let func = parse_function("int main() { int a; int a; return a; }").unwrap();
        assert_eq!(func.locals.len(), 2);
        let StatementKind::Compound(stmts) = &func.body.kind else {
            panic!("Expected compound body");
        };
        match &stmts[2].kind {
            StatementKind::Return(expr) => assert_eq!(expr.kind, ExpressionKind::Variable(1)),
            other => panic!("Expected return, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_declspec() {
        let err = parse_function("main() { return 0; }").unwrap_err();
        assert_eq!(
            err,
            CompilerError::unexpected_token("'int'", "'main'", SourceLocation::new(0))
        );
    }

    #[test]
    fn test_parameters_become_first_locals() {
        let func = parse_function("int f(int a, int b) { int c; return c; }").unwrap();
        assert_eq!(func.parameters, vec![0, 1]);
        assert_eq!(func.locals.len(), 3);
        assert_eq!(func.locals[2].name, "c");
    }
}
