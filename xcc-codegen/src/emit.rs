//! Assembly text emission

use crate::asm::AsmInst;

/// Render instructions one per line, with a trailing newline
pub fn emit_instructions(instructions: &[AsmInst]) -> String {
    let mut out = String::new();
    for inst in instructions {
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}
