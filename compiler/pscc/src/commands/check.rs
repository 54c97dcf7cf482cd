//! The `check` command: run the frontend without executing anything.

use psc_ir::StringInterner;

use super::{frontend, read_file};

pub fn check_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let Some(checked) = frontend(path, &source, &interner) else {
        std::process::exit(1);
    };

    let callables = checked.modules.len().saturating_sub(1);
    println!("OK: {path} ({callables} modulo(s) ademas del principal)");
}
