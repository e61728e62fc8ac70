//! Source fixtures

/// Two independent subprograms; only `crash` holds the trigger
pub fn fixture_two_subprograms() -> String {
    r#"def helper():
    x = 1
    y = 2
    return x + y


def crash():
    a = 1
    trigger_bug()
    b = 2
    return a
"#
    .to_string()
}

/// Module with a stub companion declaring both functions
pub fn fixture_module_with_stub() -> (String, String) {
    (
        "def f():\n    return 1\n\ndef g():\n    return 2\n".to_string(),
        "def f() -> int: ...\ndef g() -> int: ...\n".to_string(),
    )
}

/// Rust file mixing every category
pub fn fixture_rust_program() -> String {
    r#"use std::fmt;

#[derive(Debug)]
struct Unused;

// entry point
fn main() {
    let a = 1;
    panic!("boom");
}
"#
    .to_string()
}

/// Python file with N functions, the last one holding the trigger
pub fn fixture_n_functions(n: usize) -> String {
    let mut source: String = (0..n)
        .map(|i| format!("def func_{i}():\n    value = {i}\n    return value\n\n"))
        .collect();
    source.push_str("def target():\n    trigger_bug()\n");
    source
}
