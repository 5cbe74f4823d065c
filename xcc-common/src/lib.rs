//! xcc x86-64 C Compiler - Common Types and Utilities
//!
//! Error definitions and source location tracking shared by every phase
//! of the compiler.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic};
pub use source_loc::{SourceLocation, SourceSpan, SourceText};
