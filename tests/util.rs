//! Shared test utilities for integration tests
//!
//! Fixture trees used by more than one test file.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// Mixed tree: one text file, one binary, one
/// dependency directory that should be pruned.
pub fn make_mixed_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("a.txt")
        .write_str("hello")
        .expect("write a.txt");
    tmp.child("b.bin")
        .write_binary(b"\x00\x01")
        .expect("write b.bin");
    tmp.child("node_modules/x.txt")
        .write_str("dependency")
        .expect("write x.txt");

    tmp
}

/// Small project with a root `.gitignore`, nested sources and build output.
pub fn make_project_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child(".gitignore")
        .write_str("# build output\n\n/target\n*.log\n")
        .expect("write .gitignore");
    tmp.child("src/main.rs")
        .write_str("fn main() {}\n")
        .expect("write main.rs");
    tmp.child("src/util/mod.rs")
        .write_str("// helpers\npub fn help() {}\n")
        .expect("write mod.rs");
    tmp.child("target/debug/app")
        .write_str("not really a binary")
        .expect("write target");
    tmp.child("run.log")
        .write_str("log line\n")
        .expect("write run.log");
    tmp.child("README.md")
        .write_str("# Project\n")
        .expect("write README.md");

    tmp
}
