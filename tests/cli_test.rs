use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::{Command, Output};
use tfmod_gen::sample::SAMPLE_CRD;

fn run_cli(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tfmod-gen"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_generate_prints_module() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("crd.yaml").write_str(SAMPLE_CRD).unwrap();

    let output = run_cli(temp.path(), &["generate", "crd.yaml", "--no-header"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.starts_with("variable \"namespace\" {"));
    assert!(predicate::str::contains("variable \"config_resources_memory\" {").eval(stdout.as_str()));
    assert!(predicate::str::contains("resource \"myresource\" \"myresource\" {").eval(stdout.as_str()));
}

#[test]
fn test_generate_sample_to_file() {
    let temp = assert_fs::TempDir::new().unwrap();

    let output = run_cli(
        temp.path(),
        &["generate", "--sample", "--output", "module/main.tf"],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    temp.child("module/main.tf")
        .assert(predicate::str::contains("variable \"config_replicas\" {"))
        .assert(predicate::str::starts_with("# Generated by tfmod-gen"));
}

#[test]
fn test_default_log_filter_covers_library_crates() {
    let temp = assert_fs::TempDir::new().unwrap();

    let output = run_cli(temp.path(), &["generate", "--sample", "--no-header"]);
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert!(output.status.success());
    assert!(stderr.contains("Extracted 2 top-level fields for kind MyResource"));
    assert!(stderr.contains("Generating Terraform module for MyResource"));
}

#[test]
fn test_generate_fails_without_schema() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("broken.yaml")
        .write_str("kind: CustomResourceDefinition\nspec:\n  names:\n    kind: Broken\n")
        .unwrap();

    let output = run_cli(temp.path(), &["generate", "broken.yaml"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("spec.validation.openAPIV3Schema"));
}

#[test]
fn test_generate_fails_on_unparseable_input() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("bad.yaml").write_str("spec: {validation: [}").unwrap();

    let output = run_cli(temp.path(), &["generate", "bad.yaml"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_file_is_applied() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".tfmod-gen.yaml")
        .write_str("version: \"1.0\"\ngeneration:\n  max_depth: 1\n  source_header: false\n")
        .unwrap();

    let output = run_cli(temp.path(), &["generate", "--sample"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.starts_with("variable \"namespace\""));
    assert!(stdout.contains("variable \"config_resources\" {"));
    assert!(!stdout.contains("config_resources_cpu"));
}

#[test]
fn test_init_then_validate() {
    let temp = assert_fs::TempDir::new().unwrap();

    let output = run_cli(temp.path(), &["init", "--with-sample"]);
    assert!(output.status.success());
    temp.child(".tfmod-gen.yaml")
        .assert(predicate::str::contains("max_depth: 2"));
    temp.child("sample-crd.yaml")
        .assert(predicate::str::contains("kind: MyResource"));

    let again = run_cli(temp.path(), &["init"]);
    assert!(!again.status.success());

    let output = run_cli(temp.path(), &["validate", "sample-crd.yaml"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success());
    assert!(stdout.contains("Kind: MyResource"));
    assert!(stdout.contains("  - size (integer): skipped"));
    assert!(stdout.contains("  - config (object): generated"));
}

#[test]
fn test_inspect_json() {
    let temp = assert_fs::TempDir::new().unwrap();

    let output = run_cli(temp.path(), &["inspect", "--sample", "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["fields"]["config"]["required"][0], "replicas");
}
