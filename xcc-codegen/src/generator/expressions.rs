//! Expression lowering

use super::CodeGenerator;
use crate::abi::CallingConvention;
use crate::asm::{AsmInst, Cond, Operand, Reg};
use xcc_common::{CompilerError, SourceLocation};
use xcc_frontend::{BinaryOp, Expression, ExpressionKind, UnaryOp};

impl CodeGenerator {
    /// Compute the address of an lvalue into %rax
    pub(crate) fn gen_addr(&mut self, expr: &Expression) -> Result<(), CompilerError> {
        match &expr.kind {
            ExpressionKind::Variable(id) => {
                let offset = self.local_offset(*id, expr.span.location())?;
                self.emit(AsmInst::Lea(Operand::Mem { base: Reg::Rbp, offset }, Reg::Rax));
                Ok(())
            }
            ExpressionKind::Unary { op: UnaryOp::Dereference, operand } => self.gen_expr(operand),
            _ => Err(CompilerError::invalid_expression("not an lvalue", expr.span.location())),
        }
    }

    /// Replace the address in %rax with the value stored there
    fn load(&mut self) {
        self.emit(AsmInst::Mov(Operand::deref(Reg::Rax), Reg::Rax.into()));
    }

    /// Evaluate `expr` into %rax
    pub(crate) fn gen_expr(&mut self, expr: &Expression) -> Result<(), CompilerError> {
        match &expr.kind {
            ExpressionKind::IntLiteral(value) => {
                self.emit(AsmInst::Mov(Operand::Imm(*value), Reg::Rax.into()));
            }

            ExpressionKind::Variable(_) => {
                self.gen_addr(expr)?;
                self.load();
            }

            ExpressionKind::Unary { op, operand } => match op {
                UnaryOp::Negate => {
                    self.gen_expr(operand)?;
                    self.emit(AsmInst::Neg(Reg::Rax));
                }
                UnaryOp::AddressOf => self.gen_addr(operand)?,
                UnaryOp::Dereference => {
                    self.gen_expr(operand)?;
                    self.load();
                }
            },

            ExpressionKind::Assignment { target, value } => {
                self.gen_addr(target)?;
                self.push();
                self.gen_expr(value)?;
                self.pop(Reg::Rdi)?;
                self.emit(AsmInst::Mov(Reg::Rax.into(), Operand::deref(Reg::Rdi)));
            }

            ExpressionKind::Call { function, arguments } => {
                self.gen_call(function, arguments, expr.span.location())?;
            }

            ExpressionKind::Binary { op, left, right } => {
                self.gen_expr(right)?;
                self.push();
                self.gen_expr(left)?;
                self.pop(Reg::Rdi)?;
                self.gen_binary_op(*op);
            }
        }
        Ok(())
    }

    /// Apply `op` to %rax (left) and %rdi (right), result in %rax
    fn gen_binary_op(&mut self, op: BinaryOp) {
        let rdi = Operand::Reg(Reg::Rdi);
        let cond = match op {
            BinaryOp::Add => return self.emit(AsmInst::Add(rdi, Reg::Rax)),
            BinaryOp::Sub => return self.emit(AsmInst::Sub(rdi, Reg::Rax)),
            BinaryOp::Mul => return self.emit(AsmInst::Imul(rdi, Reg::Rax)),
            BinaryOp::Div => {
                self.emit(AsmInst::Cqo);
                self.emit(AsmInst::Idiv(Reg::Rdi));
                return;
            }
            BinaryOp::Equal => Cond::E,
            BinaryOp::NotEqual => Cond::Ne,
            BinaryOp::Less => Cond::L,
            BinaryOp::LessEqual => Cond::Le,
        };
        self.emit(AsmInst::Cmp(rdi, Reg::Rax));
        self.emit(AsmInst::Set(cond, Reg::Al));
        self.emit(AsmInst::Movzb(Reg::Al, Reg::Rax));
    }

    fn gen_call(&mut self, function: &str, arguments: &[Expression], location: SourceLocation) -> Result<(), CompilerError> {
        CallingConvention::check_arg_count(arguments.len()).map_err(|e| e.at(location))?;

        for arg in arguments {
            self.gen_expr(arg)?;
            self.push();
        }
        for index in (0..arguments.len()).rev() {
            let reg = CallingConvention::param_reg(index).map_err(|e| e.at(location))?;
            self.pop(reg)?;
        }

        // An odd number of parked values leaves %rsp 8 bytes off alignment
        let pad = self.depth % 2 == 1;
        if pad {
            self.emit(AsmInst::Sub(Operand::Imm(8), CallingConvention::STACK_PTR));
        }
        // %al carries the vector register count for variadic callees
        self.emit(AsmInst::Mov(Operand::Imm(0), Reg::Rax.into()));
        self.emit(AsmInst::Call(function.to_string()));
        if pad {
            self.emit(AsmInst::Add(Operand::Imm(8), CallingConvention::STACK_PTR));
        }
        Ok(())
    }
}
