use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn srcmap(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_srcmap"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn cli_generate_writes_readme_and_prints_summary() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("src/main.rs"),
        "// two\n// comments\nfn main() {\n    run();\n}\n",
    );
    fs::create_dir_all(dir.path().join("src/util")).unwrap();

    let output = srcmap(&["generate", "--project-root", dir.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Generating"));
    assert!(stdout.contains("Stats 1 files, 3 LoEC (Lines of Executable Code)"));

    let doc = fs::read_to_string(dir.path().join("src/README.md")).unwrap();
    assert!(doc.contains("- **Total Files**: 1"));
    assert!(doc.contains("### util/\n\n*No files in this directory.*"));
}

#[test]
fn cli_generate_json_summary() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("src/lib.rs"), "pub fn a() {}\n");
    write_file(&dir.path().join("src/fs/dir.rs"), "pub fn b() {}\npub fn c() {}\n");

    let output = srcmap(&[
        "generate",
        "--project-root",
        dir.path().to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["files"], 2);
    assert_eq!(v["lines"], 3);
    assert_eq!(v["written"], true);
    assert!(v["output"].as_str().unwrap().ends_with("README.md"));
}

#[test]
fn cli_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("src/lib.rs"), "pub fn a() {}\n");

    let output = srcmap(&[
        "generate",
        "--project-root",
        dir.path().to_str().unwrap(),
        "--dry-run",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("## Project Structure"));
    assert!(stdout.contains("╰── lib.rs"));
    assert!(!dir.path().join("src/README.md").exists());
}

#[test]
fn cli_uses_project_config() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("src/lib.rs"), "pub fn a() {}\n");
    write_file(
        &dir.path().join("srcmap.toml"),
        "project_name = \"Cerium\"\n\n[descriptions]\n\"lib.rs\" = \"Library root.\"\n",
    );

    let output = srcmap(&[
        "generate",
        "--project-root",
        dir.path().to_str().unwrap(),
        "--dry-run",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("# Cerium: Source Map (Auto-Generated)"));
}

#[test]
fn cli_missing_source_dir_fails() {
    let dir = tempdir().unwrap();

    let output = srcmap(&["generate", "--project-root", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: scan root not found"));
}

#[test]
fn cli_json_error_output_is_valid_json_even_with_quotes_in_path() {
    let dir = tempdir().unwrap();
    let bad_path = dir.path().join("does-not-exist-\"quoted\"");

    let output = srcmap(&[
        "generate",
        "--project-root",
        bad_path.to_str().unwrap(),
        "--json",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let v: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert!(v["error"].as_str().unwrap().contains("scan root not found"));
}

#[test]
fn cli_bad_config_fails() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("src/lib.rs"), "pub fn a() {}\n");
    write_file(&dir.path().join("srcmap.toml"), "extension = [\n");

    let output = srcmap(&["generate", "--project-root", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(6));
}
