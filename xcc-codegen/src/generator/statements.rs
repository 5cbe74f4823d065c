//! Statement lowering

use super::CodeGenerator;
use crate::asm::{AsmInst, Operand, Reg};
use xcc_common::CompilerError;
use xcc_frontend::{Statement, StatementKind};

impl CodeGenerator {
    /// Generate a statement and check the evaluation stack is empty after it
    pub(crate) fn gen_stmt(&mut self, stmt: &Statement) -> Result<(), CompilerError> {
        self.gen_stmt_inner(stmt)?;
        if self.depth != 0 {
            return Err(CompilerError::internal(format!(
                "{} values left on the evaluation stack after statement {}",
                self.depth, stmt.node_id
            )));
        }
        Ok(())
    }

    fn gen_stmt_inner(&mut self, stmt: &Statement) -> Result<(), CompilerError> {
        match &stmt.kind {
            StatementKind::Expression(expr) => self.gen_expr(expr),

            StatementKind::Return(expr) => {
                self.gen_expr(expr)?;
                let name = match &self.current {
                    Some(ctx) => ctx.name.clone(),
                    None => {
                        return Err(CompilerError::invalid_statement(
                            "return outside of a function",
                            stmt.span.location(),
                        ))
                    }
                };
                self.emit(AsmInst::Jmp(Self::return_label(&name)));
                Ok(())
            }

            StatementKind::Compound(statements) => {
                for s in statements {
                    self.gen_stmt(s)?;
                }
                Ok(())
            }

            StatementKind::If { condition, then_stmt, else_stmt } => {
                let id = self.next_label_id();
                let else_label = format!(".L.else.{}", id);
                let end_label = format!(".L.end.{}", id);

                self.gen_expr(condition)?;
                self.emit(AsmInst::Cmp(Operand::Imm(0), Reg::Rax));
                self.emit(AsmInst::Je(else_label.clone()));
                self.gen_stmt(then_stmt)?;
                self.emit(AsmInst::Jmp(end_label.clone()));
                self.emit(AsmInst::Label(else_label));
                if let Some(else_stmt) = else_stmt {
                    self.gen_stmt(else_stmt)?;
                }
                self.emit(AsmInst::Label(end_label));
                Ok(())
            }

            StatementKind::For { init, condition, update, body } => {
                let id = self.next_label_id();
                let begin_label = format!(".L.begin.{}", id);
                let end_label = format!(".L.end.{}", id);

                if let Some(init) = init {
                    self.gen_stmt(init)?;
                }
                self.emit(AsmInst::Label(begin_label.clone()));
                if let Some(condition) = condition {
                    self.gen_expr(condition)?;
                    self.emit(AsmInst::Cmp(Operand::Imm(0), Reg::Rax));
                    self.emit(AsmInst::Je(end_label.clone()));
                }
                self.gen_stmt(body)?;
                if let Some(update) = update {
                    self.gen_expr(update)?;
                }
                self.emit(AsmInst::Jmp(begin_label));
                self.emit(AsmInst::Label(end_label));
                Ok(())
            }
        }
    }
}
