//! System V AMD64 ABI Implementation
//!
//! Calling convention (integer arguments in six registers only), stack
//! frame layout for locals, and function prologue/epilogue generation.

use crate::asm::{AsmInst, Operand, Reg};
use log::debug;
use thiserror::Error;
use xcc_common::{CompilerError, SourceLocation};
use xcc_frontend::{FunctionDefinition, TranslationUnit};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbiError {
    #[error("Too many parameters: {0} (maximum: {1})")]
    TooManyParameters(usize, usize),

    #[error("Too many arguments: {0} (maximum: {1})")]
    TooManyArguments(usize, usize),
}

impl AbiError {
    /// Attach a source location, turning this into a compiler error
    pub fn at(self, location: SourceLocation) -> CompilerError {
        match self {
            AbiError::TooManyParameters(count, max) => CompilerError::TooManyParameters { count, max, location },
            AbiError::TooManyArguments(count, max) => CompilerError::TooManyArguments { count, max, location },
        }
    }
}

/// System V calling convention, integer class only.
///
/// Arguments go in %rdi, %rsi, %rdx, %rcx, %r8, %r9. Stack-passed
/// arguments are not supported, so a seventh one is an error.
pub struct CallingConvention;

impl CallingConvention {
    /// Maximum number of parameters that can be passed in registers
    pub const MAX_REG_PARAMS: usize = 6;

    /// Registers used for passing parameters
    pub const PARAM_REGS: [Reg; 6] = [Reg::Rdi, Reg::Rsi, Reg::Rdx, Reg::Rcx, Reg::R8, Reg::R9];

    pub const STACK_PTR: Reg = Reg::Rsp;
    pub const FRAME_PTR: Reg = Reg::Rbp;

    /// %rsp must be a multiple of this at every `call`
    pub const STACK_ALIGN: i64 = 16;

    /// Get the register for a parameter index (0-based)
    pub fn param_reg(index: usize) -> Result<Reg, AbiError> {
        Self::PARAM_REGS
            .get(index)
            .copied()
            .ok_or(AbiError::TooManyParameters(index + 1, Self::MAX_REG_PARAMS))
    }

    pub fn check_param_count(count: usize) -> Result<(), AbiError> {
        if count > Self::MAX_REG_PARAMS {
            return Err(AbiError::TooManyParameters(count, Self::MAX_REG_PARAMS));
        }
        Ok(())
    }

    pub fn check_arg_count(count: usize) -> Result<(), AbiError> {
        if count > Self::MAX_REG_PARAMS {
            return Err(AbiError::TooManyArguments(count, Self::MAX_REG_PARAMS));
        }
        Ok(())
    }
}

/// Round `n` up to the nearest multiple of `align`
pub fn align_to(n: i64, align: i64) -> i64 {
    (n + align - 1) / align * align
}

/// Stack Frame Layout
///
/// ```text
///   return address
///   saved %rbp        <- %rbp
///   local 0           -8(%rbp)
///   local 1           -16(%rbp)
///   ...
///   padding to 16     <- %rsp
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Bytes reserved below %rbp, a multiple of 16
    pub size: i64,
}

impl Frame {
    /// Give every local of `func` its slot and record the frame size.
    ///
    /// Slots are handed out in first-seen order: the first local gets
    /// -8(%rbp), the next the slot below it.
    pub fn layout(func: &mut FunctionDefinition) -> Frame {
        let mut offset = 0;
        for var in func.locals.iter_mut() {
            offset += var.var_type.size();
            var.offset = -offset;
        }
        func.stack_size = align_to(offset, CallingConvention::STACK_ALIGN);
        debug!("frame of '{}': {} locals, {} bytes", func.name, func.locals.len(), func.stack_size);
        Frame { size: func.stack_size }
    }

    /// Generate function prologue
    pub fn gen_prologue(&self) -> Vec<AsmInst> {
        vec![
            AsmInst::Push(CallingConvention::FRAME_PTR),
            AsmInst::Mov(CallingConvention::STACK_PTR.into(), CallingConvention::FRAME_PTR.into()),
            AsmInst::Sub(Operand::Imm(self.size), CallingConvention::STACK_PTR),
        ]
    }

    /// Generate function epilogue
    pub fn gen_epilogue(&self) -> Vec<AsmInst> {
        vec![
            AsmInst::Mov(CallingConvention::FRAME_PTR.into(), CallingConvention::STACK_PTR.into()),
            AsmInst::Pop(CallingConvention::FRAME_PTR),
            AsmInst::Ret,
        ]
    }
}

/// Lay out the frame of every function in the program
pub fn assign_lvar_offsets(unit: &mut TranslationUnit) {
    for func in unit.functions.iter_mut() {
        Frame::layout(func);
    }
}
