//! Type resolution
//!
//! Walks expressions bottom-up and records the type of every node. Nodes
//! that already carry a type are skipped, so running the pass again (or
//! on a subtree the parser already typed) changes nothing.

use crate::ast::*;
use crate::types::Type;
use log::debug;
use xcc_common::CompilerError;

/// Types the expressions of one function against its locals table
pub struct TypeResolver<'a> {
    locals: &'a [Variable],
}

impl<'a> TypeResolver<'a> {
    pub fn new(locals: &'a [Variable]) -> Self {
        Self { locals }
    }

    /// Type of an expression that has already been resolved
    fn type_of(expr: &Expression) -> Result<Type, CompilerError> {
        expr.expr_type
            .clone()
            .ok_or_else(|| CompilerError::internal(format!("expression {} left untyped", expr.node_id)))
    }

    /// Resolve `expr` and all of its children
    pub fn resolve_expression(&self, expr: &mut Expression) -> Result<(), CompilerError> {
        if expr.expr_type.is_some() {
            return Ok(());
        }
        let location = expr.span.location();

        let ty = match &mut expr.kind {
            ExpressionKind::IntLiteral(_) => Type::Int,

            ExpressionKind::Variable(id) => self
                .locals
                .get(*id)
                .map(|var| var.var_type.clone())
                .ok_or_else(|| CompilerError::internal(format!("unknown local #{}", id)))?,

            ExpressionKind::Unary { op, operand } => {
                self.resolve_expression(operand)?;
                let operand_type = Self::type_of(operand)?;
                match op {
                    UnaryOp::Negate => operand_type,
                    UnaryOp::AddressOf => Type::pointer_to(operand_type),
                    UnaryOp::Dereference => match operand_type {
                        Type::Pointer(base) => *base,
                        Type::Int => return Err(CompilerError::NotAPointer { location }),
                    },
                }
            }

            ExpressionKind::Binary { op, left, right } => {
                self.resolve_expression(left)?;
                self.resolve_expression(right)?;
                if op.is_comparison() {
                    Type::Int
                } else {
                    Self::type_of(left)?
                }
            }

            ExpressionKind::Assignment { target, value } => {
                self.resolve_expression(target)?;
                self.resolve_expression(value)?;
                Self::type_of(target)?
            }

            ExpressionKind::Call { arguments, .. } => {
                for arg in arguments.iter_mut() {
                    self.resolve_expression(arg)?;
                }
                Type::Int
            }
        };

        expr.expr_type = Some(ty);
        Ok(())
    }

    /// Resolve every expression nested in `stmt`
    pub fn resolve_statement(&self, stmt: &mut Statement) -> Result<(), CompilerError> {
        match &mut stmt.kind {
            StatementKind::Expression(expr) | StatementKind::Return(expr) => {
                self.resolve_expression(expr)
            }
            StatementKind::Compound(statements) => {
                for s in statements.iter_mut() {
                    self.resolve_statement(s)?;
                }
                Ok(())
            }
            StatementKind::If { condition, then_stmt, else_stmt } => {
                self.resolve_expression(condition)?;
                self.resolve_statement(then_stmt)?;
                if let Some(else_stmt) = else_stmt {
                    self.resolve_statement(else_stmt)?;
                }
                Ok(())
            }
            StatementKind::For { init, condition, update, body } => {
                if let Some(init) = init {
                    self.resolve_statement(init)?;
                }
                if let Some(condition) = condition {
                    self.resolve_expression(condition)?;
                }
                if let Some(update) = update {
                    self.resolve_expression(update)?;
                }
                self.resolve_statement(body)
            }
        }
    }
}

/// Resolve the body of one function
pub fn resolve_function(func: &mut FunctionDefinition) -> Result<(), CompilerError> {
    let resolver = TypeResolver::new(&func.locals);
    resolver.resolve_statement(&mut func.body)
}

/// Resolve every function in the program
pub fn resolve_types(unit: &mut TranslationUnit) -> Result<(), CompilerError> {
    for func in unit.functions.iter_mut() {
        resolve_function(func)?;
        debug!("resolved types in '{}'", func.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xcc_common::{SourceLocation, SourceSpan};

    fn expr(kind: ExpressionKind) -> Expression {
        Expression::new(0, kind, SourceSpan::new(0, 1))
    }

    fn var(id: VarId) -> Expression {
        expr(ExpressionKind::Variable(id))
    }

    fn unary(op: UnaryOp, operand: Expression) -> Expression {
        expr(ExpressionKind::Unary { op, operand: Box::new(operand) })
    }

    fn locals() -> Vec<Variable> {
        vec![
            Variable::new("x", Type::Int),
            Variable::new("p", Type::pointer_to(Type::Int)),
        ]
    }

    #[test]
    fn test_address_and_dereference() {
        let locals = locals();
        let resolver = TypeResolver::new(&locals);

        let mut addr = unary(UnaryOp::AddressOf, var(1));
        resolver.resolve_expression(&mut addr).unwrap();
        assert_eq!(addr.expr_type, Some(Type::pointer_to(Type::pointer_to(Type::Int))));

        let mut deref = unary(UnaryOp::Dereference, var(1));
        resolver.resolve_expression(&mut deref).unwrap();
        assert_eq!(deref.expr_type, Some(Type::Int));
    }

    #[test]
    fn test_dereference_of_integer_fails() {
        let locals = locals();
        let resolver = TypeResolver::new(&locals);
        let mut deref = unary(UnaryOp::Dereference, var(0));
        let err = resolver.resolve_expression(&mut deref).unwrap_err();
        assert_eq!(err, CompilerError::NotAPointer { location: SourceLocation::new(0) });
    }

    #[test]
    fn test_binary_types() {
        let locals = locals();
        let resolver = TypeResolver::new(&locals);

        let mut sum = expr(ExpressionKind::Binary {
            op: BinaryOp::Add,
            left: Box::new(var(1)),
            right: Box::new(expr(ExpressionKind::IntLiteral(8))),
        });
        resolver.resolve_expression(&mut sum).unwrap();
        assert_eq!(sum.expr_type, Some(Type::pointer_to(Type::Int)));

        let mut cmp = expr(ExpressionKind::Binary {
            op: BinaryOp::Less,
            left: Box::new(var(1)),
            right: Box::new(var(1)),
        });
        resolver.resolve_expression(&mut cmp).unwrap();
        assert_eq!(cmp.expr_type, Some(Type::Int));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let locals = locals();
        let resolver = TypeResolver::new(&locals);

        let mut assign = expr(ExpressionKind::Assignment {
            target: Box::new(unary(UnaryOp::Dereference, var(1))),
            value: Box::new(unary(UnaryOp::Negate, var(0))),
        });
        resolver.resolve_expression(&mut assign).unwrap();
        let once = assign.clone();
        resolver.resolve_expression(&mut assign).unwrap();
        assert_eq!(assign, once);
    }

    #[test]
    fn test_pretyped_node_is_kept() {
        let locals = locals();
        let resolver = TypeResolver::new(&locals);

        let mut diff = expr(ExpressionKind::Binary {
            op: BinaryOp::Sub,
            left: Box::new(var(1)),
            right: Box::new(var(1)),
        })
        .with_type(Type::Int);
        resolver.resolve_expression(&mut diff).unwrap();
        assert_eq!(diff.expr_type, Some(Type::Int));
    }
}
