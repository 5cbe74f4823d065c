//! Type system definitions
//!
//! The language knows exactly two kinds of value: 64-bit integers and
//! pointers. Both occupy one 8-byte stack slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// 64-bit signed integer
    Int,

    /// Pointer to another type
    Pointer(Box<Type>),
}

impl Type {
    /// Build a pointer to `base`
    pub fn pointer_to(base: Type) -> Self {
        Type::Pointer(Box::new(base))
    }

    /// The pointee type, if this is a pointer
    pub fn base(&self) -> Option<&Type> {
        match self {
            Type::Pointer(base) => Some(base),
            Type::Int => None,
        }
    }

    /// Size in bytes
    pub fn size(&self) -> i64 {
        8
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Pointer(base) => write!(f, "{}*", base),
        }
    }
}
