//! x86-64 Assembly Instruction Definitions
//!
//! Only the handful of instructions the generator needs. `Display` renders
//! AT&T syntax as accepted by the GNU assembler.

use std::fmt;

/// x86-64 registers used by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    Rax, Rdi, Rsi, Rdx, Rcx, R8, R9,

    // Frame and stack pointers
    Rbp,
    Rsp,

    /// Low byte of %rax, target of the setcc instructions
    Al,
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg::Rax => "rax",
            Reg::Rdi => "rdi",
            Reg::Rsi => "rsi",
            Reg::Rdx => "rdx",
            Reg::Rcx => "rcx",
            Reg::R8 => "r8",
            Reg::R9 => "r9",
            Reg::Rbp => "rbp",
            Reg::Rsp => "rsp",
            Reg::Al => "al",
        };
        write!(f, "%{}", name)
    }
}

/// Instruction operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg),
    Imm(i64),
    /// `offset(%base)`
    Mem { base: Reg, offset: i64 },
}

impl Operand {
    /// Memory at `base` with no displacement
    pub fn deref(base: Reg) -> Self {
        Operand::Mem { base, offset: 0 }
    }
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Operand::Reg(reg)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{}", reg),
            Operand::Imm(value) => write!(f, "${}", value),
            Operand::Mem { base, offset: 0 } => write!(f, "({})", base),
            Operand::Mem { base, offset } => write!(f, "{}({})", offset, base),
        }
    }
}

/// Condition codes for `setcc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    E,
    Ne,
    L,
    Le,
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self {
            Cond::E => "e",
            Cond::Ne => "ne",
            Cond::L => "l",
            Cond::Le => "le",
        };
        write!(f, "{}", suffix)
    }
}

/// x86-64 instructions and assembler directives.
///
/// Two-operand forms follow AT&T order: source first, destination last.
#[derive(Debug, Clone, PartialEq)]
pub enum AsmInst {
    // Directives and labels
    Globl(String),
    Label(String),

    // Data movement
    Mov(Operand, Operand),
    Lea(Operand, Reg),
    Movzb(Reg, Reg),
    Push(Reg),
    Pop(Reg),

    // Arithmetic
    Add(Operand, Reg),
    Sub(Operand, Reg),
    Imul(Operand, Reg),
    /// Sign-extend %rax into %rdx:%rax
    Cqo,
    Idiv(Reg),
    Neg(Reg),

    // Comparison
    Cmp(Operand, Reg),
    Set(Cond, Reg),

    // Control flow
    Jmp(String),
    Je(String),
    Call(String),
    Ret,
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Globl(name) => write!(f, "  .globl {}", name),
            AsmInst::Label(name) => write!(f, "{}:", name),

            AsmInst::Mov(src, dst) => write!(f, "  mov {}, {}", src, dst),
            AsmInst::Lea(src, dst) => write!(f, "  lea {}, {}", src, dst),
            AsmInst::Movzb(src, dst) => write!(f, "  movzb {}, {}", src, dst),
            AsmInst::Push(reg) => write!(f, "  push {}", reg),
            AsmInst::Pop(reg) => write!(f, "  pop {}", reg),

            AsmInst::Add(src, dst) => write!(f, "  add {}, {}", src, dst),
            AsmInst::Sub(src, dst) => write!(f, "  sub {}, {}", src, dst),
            AsmInst::Imul(src, dst) => write!(f, "  imul {}, {}", src, dst),
            AsmInst::Cqo => write!(f, "  cqo"),
            AsmInst::Idiv(reg) => write!(f, "  idiv {}", reg),
            AsmInst::Neg(reg) => write!(f, "  neg {}", reg),

            AsmInst::Cmp(src, dst) => write!(f, "  cmp {}, {}", src, dst),
            AsmInst::Set(cond, reg) => write!(f, "  set{} {}", cond, reg),

            AsmInst::Jmp(label) => write!(f, "  jmp {}", label),
            AsmInst::Je(label) => write!(f, "  je {}", label),
            AsmInst::Call(name) => write!(f, "  call {}", name),
            AsmInst::Ret => write!(f, "  ret"),
        }
    }
}
