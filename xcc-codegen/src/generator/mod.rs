//! AST to x86-64 lowering
//!
//! Stack-machine style: every expression leaves its value in %rax and
//! intermediate values are parked on the hardware stack. `depth` tracks how
//! many are parked and must be zero whenever a statement finishes.

mod expressions;
mod statements;

use crate::abi::{CallingConvention, Frame};
use crate::asm::{AsmInst, Operand, Reg};
use log::{debug, trace};
use xcc_common::{CompilerError, SourceLocation};
use xcc_frontend::{FunctionDefinition, TranslationUnit, VarId};

/// Per-function state
struct FunctionContext {
    name: String,
    /// Frame offset of each local, indexed by `VarId`
    offsets: Vec<i64>,
}

/// Code generator for one translation unit
pub struct CodeGenerator {
    instructions: Vec<AsmInst>,
    /// Values currently pushed on the evaluation stack
    depth: usize,
    /// Source of unique label numbers across the whole unit
    label_counter: u32,
    current: Option<FunctionContext>,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            depth: 0,
            label_counter: 0,
            current: None,
        }
    }

    fn emit(&mut self, inst: AsmInst) {
        trace!("emit {}", inst);
        self.instructions.push(inst);
    }

    /// Park %rax on the stack
    fn push(&mut self) {
        self.emit(AsmInst::Push(Reg::Rax));
        self.depth += 1;
    }

    /// Pop the most recently parked value into `reg`
    fn pop(&mut self, reg: Reg) -> Result<(), CompilerError> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| CompilerError::internal("pop from empty evaluation stack"))?;
        self.emit(AsmInst::Pop(reg));
        Ok(())
    }

    /// Next number for `.L.<kind>.<n>` labels
    fn next_label_id(&mut self) -> u32 {
        self.label_counter += 1;
        trace!("label id {}", self.label_counter);
        self.label_counter
    }

    fn return_label(name: &str) -> String {
        format!(".L.return.{}", name)
    }

    /// Frame offset of a local in the function being generated
    fn local_offset(&self, id: VarId, location: SourceLocation) -> Result<i64, CompilerError> {
        self.current
            .as_ref()
            .and_then(|ctx| ctx.offsets.get(id).copied())
            .ok_or_else(|| CompilerError::invalid_expression(format!("unknown local #{}", id), location))
    }

    /// Generate the whole program. Frames must already be laid out.
    pub fn generate(mut self, unit: &TranslationUnit) -> Result<Vec<AsmInst>, CompilerError> {
        for func in &unit.functions {
            self.generate_function(func)?;
        }
        Ok(self.instructions)
    }

    fn generate_function(&mut self, func: &FunctionDefinition) -> Result<(), CompilerError> {
        debug!("generating '{}' (frame {} bytes)", func.name, func.stack_size);
        CallingConvention::check_param_count(func.parameters.len())
            .map_err(|e| e.at(func.span.location()))?;

        self.current = Some(FunctionContext {
            name: func.name.clone(),
            offsets: func.locals.iter().map(|v| v.offset).collect(),
        });

        let frame = Frame { size: func.stack_size };
        self.emit(AsmInst::Globl(func.name.clone()));
        self.emit(AsmInst::Label(func.name.clone()));
        for inst in frame.gen_prologue() {
            self.emit(inst);
        }

        // Spill register arguments into their slots
        for (index, &param) in func.parameters.iter().enumerate() {
            let reg = CallingConvention::param_reg(index).map_err(|e| e.at(func.span.location()))?;
            let offset = self.local_offset(param, func.span.location())?;
            self.emit(AsmInst::Mov(reg.into(), Operand::Mem { base: Reg::Rbp, offset }));
        }

        self.gen_stmt(&func.body)?;

        self.emit(AsmInst::Label(Self::return_label(&func.name)));
        for inst in frame.gen_epilogue() {
            self.emit(inst);
        }

        self.current = None;
        Ok(())
    }
}
