//! Statement, function and translation unit AST nodes

use crate::ast::{Expression, NodeId};
use crate::types::Type;
use serde::{Deserialize, Serialize};
use xcc_common::SourceSpan;

/// Index of a local in [`FunctionDefinition::locals`]
pub type VarId = usize;

/// Statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub node_id: NodeId,
    pub kind: StatementKind,
    pub span: SourceSpan,
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    Expression(Expression),

    Compound(Vec<Statement>),

    If {
        condition: Expression,
        then_stmt: Box<Statement>,
        else_stmt: Option<Box<Statement>>,
    },

    /// Also used for `while`, which has no init or update
    For {
        init: Option<Box<Statement>>,
        condition: Option<Expression>,
        update: Option<Expression>,
        body: Box<Statement>,
    },

    Return(Expression),
}

/// A local variable or parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub var_type: Type,
    /// Offset from %rbp; negative once the frame is laid out, 0 before
    pub offset: i64,
}

impl Variable {
    pub fn new(name: impl Into<String>, var_type: Type) -> Self {
        Self {
            name: name.into(),
            var_type,
            offset: 0,
        }
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub node_id: NodeId,
    pub name: String,
    pub return_type: Type,
    /// Parameters in declaration order (= argument register order)
    pub parameters: Vec<VarId>,
    /// Every local in first-seen order, parameters included
    pub locals: Vec<Variable>,
    pub body: Statement,
    /// Bytes reserved below %rbp; a multiple of 16 after frame layout
    pub stack_size: i64,
    pub span: SourceSpan,
}

/// Whole program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub functions: Vec<FunctionDefinition>,
}
