//! xcc x86-64 C Compiler - Code Generation Backend
//!
//! This crate handles the final phase of compilation: lowering the typed AST
//! to x86-64 assembly in AT&T syntax. It includes:
//!
//! - Assembly instruction definitions
//! - ABI implementation (System V calling convention, stack frames)
//! - The AST walker that emits instructions
//! - Text emission

pub mod asm;
pub mod abi;
pub mod emit;
pub mod generator;

pub use asm::{AsmInst, Cond, Operand, Reg};
pub use abi::{assign_lvar_offsets, AbiError, CallingConvention, Frame};
pub use emit::emit_instructions;
pub use generator::CodeGenerator;

use xcc_common::CompilerError;
use xcc_frontend::{Frontend, TranslationUnit};

/// Lay out frames and generate the assembly listing for a typed program.
///
/// The listing is only returned once every function generated cleanly.
pub fn generate_assembly(unit: &mut TranslationUnit) -> Result<String, CompilerError> {
    assign_lvar_offsets(unit);
    let instructions = CodeGenerator::new().generate(unit)?;
    Ok(emit_instructions(&instructions))
}

/// Compile program text all the way to an assembly listing
pub fn compile(source: &str) -> Result<String, CompilerError> {
    let mut unit = Frontend::analyze_source(source)?;
    generate_assembly(&mut unit)
}
