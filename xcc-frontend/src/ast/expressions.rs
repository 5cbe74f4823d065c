//! Expression AST nodes

use crate::ast::{BinaryOp, NodeId, UnaryOp, VarId};
use crate::types::Type;
use serde::{Deserialize, Serialize};
use xcc_common::SourceSpan;

/// Expression node
///
/// `span` is the token that best identifies the node in diagnostics: the
/// operator for unary and binary nodes, the name for variables and calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub node_id: NodeId,
    pub kind: ExpressionKind,
    pub span: SourceSpan,
    /// Filled in by the type resolver
    pub expr_type: Option<Type>,
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    IntLiteral(i64),

    /// Reference to a local of the enclosing function
    Variable(VarId),

    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    Assignment {
        target: Box<Expression>,
        value: Box<Expression>,
    },

    Call {
        function: String,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn new(node_id: NodeId, kind: ExpressionKind, span: SourceSpan) -> Self {
        Self {
            node_id,
            kind,
            span,
            expr_type: None,
        }
    }

    /// Attach a type up front; the resolver leaves typed nodes alone
    pub fn with_type(mut self, ty: Type) -> Self {
        self.expr_type = Some(ty);
        self
    }
}
