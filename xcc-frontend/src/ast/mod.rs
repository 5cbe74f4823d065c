//! Abstract Syntax Tree definitions
//!
//! The parser builds these nodes, the type resolver fills in expression
//! types, and the code generator walks them to emit assembly.

pub mod ops;
pub mod expressions;
pub mod statements;

pub use ops::{BinaryOp, UnaryOp};
pub use expressions::{Expression, ExpressionKind};
pub use statements::{FunctionDefinition, Statement, StatementKind, TranslationUnit, VarId, Variable};

/// Unique identifier for AST nodes (useful for debugging and analysis)
pub type NodeId = u32;

/// Node ID generator for AST nodes
#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    next_id: NodeId,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    pub fn next(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
