#![allow(dead_code)]
use std::fs;

use lazyjs::ast::Program;

pub const WORKLOADS: [(&str, &str); 3] = [
    ("loop_capture", "tests/programs/loop_capture/program.yaml"),
    ("recursion", "tests/programs/recursion/program.yaml"),
    ("branches", "tests/programs/branches/program.yaml"),
];

pub fn load_program(path: &str) -> Program {
    let source = fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"));
    Program::from_yaml_str(&source).unwrap_or_else(|err| panic!("decode {path}: {err}"))
}
