//! Compile programs, assemble them with the host C compiler and check the
//! exit status. Skipped when no x86-64 Linux toolchain is available.

#![cfg(all(target_arch = "x86_64", target_os = "linux"))]

use std::fs;
use std::process::Command;
use tempfile::TempDir;
use xcc_codegen::compile;

fn have_cc() -> bool {
    Command::new("cc")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Exit status of the compiled program, or `None` if there is no toolchain.
/// `helpers` is C source linked in next to the generated assembly.
fn run_with(source: &str, helpers: Option<&str>) -> Option<i32> {
    if !have_cc() {
        eprintln!("skipping: no `cc` on PATH");
        return None;
    }

    let asm = compile(source).unwrap_or_else(|e| panic!("compile failed: {}", e));
    let dir = TempDir::new().unwrap();
    let asm_path = dir.path().join("prog.s");
    let exe_path = dir.path().join("prog");
    fs::write(&asm_path, asm).unwrap();

    let mut cc = Command::new("cc");
    cc.arg("-o").arg(&exe_path).arg(&asm_path);
    if let Some(helpers) = helpers {
        let c_path = dir.path().join("helpers.c");
        fs::write(&c_path, helpers).unwrap();
        cc.arg(&c_path);
    }
    let status = cc.status().unwrap();
    assert!(status.success(), "assembler/linker failed");

    let status = Command::new(&exe_path).status().unwrap();
    status.code()
}

fn check(source: &str, expected: i32) {
    if let Some(code) = run_with(source, None) {
        assert_eq!(code, expected, "program: {}", source);
    }
}

/// `chk(x)` returns `x` when called with a 16-byte aligned stack, `100 + x` otherwise
const ALIGNMENT_HELPER: &str = "
int chk(int x) {
    unsigned long frame = (unsigned long)__builtin_frame_address(0);
    return frame % 16 == 0 ? x : 100 + x;
}
";

#[test]
fn test_arithmetic() {
    check("int main() { return (3 + 5) * 2 - 4 / 2; }", 14);
    check("int main() { return -(-3) + +4; }", 7);
    check("int main() { return 7 / 2 * 2; }", 6);
}

#[test]
fn test_comparisons() {
    check(
        "int main() { return (1 < 2) + (2 <= 2) * 2 + (3 > 4) * 4 + (5 != 5) * 8 + (6 == 6) * 16 + (2 >= 3) * 32; }",
        19,
    );
}

#[test]
fn test_pointer_round_trip() {
    check("int main() { int x; int *p; p = &x; *p = 7; return x; }", 7);
    check("int main() { int x; int *p; int **pp; p = &x; pp = &p; **pp = 9; return x; }", 9);
}

#[test]
fn test_pointer_arithmetic() {
    // x occupies the slot above y
    check("int main() { int x; int y; int *p; x = 3; y = 5; p = &x; return *(p - 1); }", 5);
    check("int main() { int x; int y; int *p; x = 3; y = 5; p = &y; return *(1 + p); }", 3);
    check("int main() { int a; int b; return &a - &b; }", 1);
}

#[test]
fn test_control_flow() {
    check("int main() { int i; int s; s = 0; for (i = 1; i <= 5; i = i + 1) s = s + i; return s; }", 15);
    check("int main() { int a; a = 0; if (0) a = 1; else a = 2; return a; }", 2);
    // Each branch adds something different, so running both would show
    check("int main() { int a; a = 0; if (0) a = a + 1; else a = a + 10; return a; }", 10);
    check("int main() { int a; a = 0; if (1) a = a + 1; else a = a + 10; return a; }", 1);
    check("int main() { int i; i = 10; while (i > 3) i = i - 1; return i; }", 3);
    check("int main() { for (;;) return 4; }", 4);
}

#[test]
fn test_declarations_with_initializers() {
    check("int main() { int a = 2, b = a * 3, *p = &b; return *p + a; }", 8);
}

#[test]
fn test_six_argument_call() {
    check(
        "int pick(int a, int b, int c, int d, int e, int f) { return c + e; } int main() { return pick(1, 2, 3, 4, 5, 6); }",
        8,
    );
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    // x = 1, 10, 9, 6, 41, 9 in order; s returns the third plus the fifth
    check(
        "int s(int a, int b, int c, int d, int e, int f) { return c + e; }
         int main() { int x; x = 0; return s(x = 1, x * 10, s(1, 2, 3, 4, 5, 6) + x, (x = 2) * 3, x * 20 + 1, 9); }",
        50,
    );
}

#[test]
fn test_nested_calls_inside_operands() {
    check(
        "int id(int n) { return n; } int deref(int *p) { return *p; }
         int main() { int v; v = 5; return 1 + id(2 + id(3 + deref(&v))); }",
        11,
    );
}

#[test]
fn test_calls_see_aligned_stack() {
    let source = "
        int add3(int a, int b, int c) { return a + b + c; }
        int main() { return chk(1) + (1 + chk(2) - 1) + add3(1, chk(3), 2 + chk(4)); }";
    // 1 + 2 + (1 + 3 + 2 + 4)
    if let Some(code) = run_with(source, Some(ALIGNMENT_HELPER)) {
        assert_eq!(code, 13);
    }
}

#[test]
fn test_recursion() {
    check(
        "int fib(int n) { if (n <= 1) return n; return fib(n - 1) + fib(n - 2); } int main() { return fib(10); }",
        55,
    );
}

#[test]
fn test_call_inside_expression() {
    check(
        "int two() { return 2; } int main() { return two() * 10 + two(); }",
        22,
    );
}
