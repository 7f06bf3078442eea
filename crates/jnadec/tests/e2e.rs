//! End-to-end tests for the `jnadec` binary.
//!
//! Each test writes Java sources into a temporary directory, runs the
//! driver, and checks its stdout, stderr, exit code and written files.

use std::path::Path;
use std::process::{Command, Output};

const HELLO: &str = "public class Hello {\n    public static void main(String[] args) {\n        System.out.println(\"hi\");\n    }\n}\n";

const HELLO_NAKO: &str = "クラス Hello\n　関数　メイン関数とは\n　　「hi」と表示。\n　ここまで。\nここまで。\n";

fn jnadec(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jnadec"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke jnadec")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn translate_to_stdout() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Hello.java"), HELLO).unwrap();

    let output = jnadec(tmp.path(), &["translate", "Hello.java"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), HELLO_NAKO);
}

#[test]
fn translate_to_file() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Hello.java"), HELLO).unwrap();

    let output = jnadec(tmp.path(), &["translate", "Hello.java", "-o", "out/Hello.nako"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");
    let written = std::fs::read_to_string(tmp.path().join("out/Hello.nako")).unwrap();
    assert_eq!(written, HELLO_NAKO);
}

#[test]
fn local_config_file_is_picked_up() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Hello.java"), HELLO).unwrap();
    std::fs::write(tmp.path().join("jnade.toml"), "[translate]\nindent_unit = \"  \"\n").unwrap();

    let output = jnadec(tmp.path(), &["translate", "Hello.java"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("\n    「hi」と表示。\n"));
}

#[test]
fn invalid_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Hello.java"), HELLO).unwrap();
    std::fs::write(tmp.path().join("bad.toml"), "[translate]\ncomments = 3\n").unwrap();

    let output = jnadec(tmp.path(), &["translate", "Hello.java", "--config", "bad.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: invalid configuration"));
}

#[test]
fn parse_error_exits_without_output() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Broken.java"), "class A {\n  void m( {\n}\n").unwrap();

    let output = jnadec(tmp.path(), &["translate", "Broken.java", "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let err = stderr(&output);
    assert!(err.contains("Parse error"), "stderr: {err}");
    assert!(err.contains("error: 'Broken.java' was not translated"));
}

#[test]
fn parse_error_as_json() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("Broken.java"), "class A {\n  void m( {\n}\n").unwrap();

    let output = jnadec(tmp.path(), &["translate", "Broken.java", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    let objects: Vec<serde_json::Value> = err
        .lines()
        .map(|line| serde_json::from_str(line).expect("every stderr line is JSON"))
        .collect();
    assert_eq!(objects.len(), 2, "stderr: {err}");
    assert_eq!(objects[0]["code"], "P0001");
    assert_eq!(objects[0]["file"], "Broken.java");
    assert!(objects[0]["spans"][0]["start"].is_u64());
    assert_eq!(objects[1]["code"], "C0001");
}

#[test]
fn missing_file_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let output = jnadec(tmp.path(), &["translate", "Nope.java"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read 'Nope.java'"));
}

#[test]
fn batch_writes_next_to_sources() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    std::fs::create_dir_all(src.join("app")).unwrap();
    std::fs::write(src.join("Hello.java"), HELLO).unwrap();
    std::fs::write(src.join("app/Point.java"), "class Point {\n    int x;\n}\n").unwrap();

    let output = jnadec(tmp.path(), &["batch", "src"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(src.join("Hello.nako")).unwrap(),
        HELLO_NAKO
    );
    assert_eq!(
        std::fs::read_to_string(src.join("app/Point.nako")).unwrap(),
        "クラス Point\n　xとは整数。\nここまで。\n"
    );
}

#[test]
fn batch_mirrors_under_out_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    std::fs::create_dir_all(src.join("app")).unwrap();
    std::fs::write(src.join("app/Hello.java"), HELLO).unwrap();

    let output = jnadec(tmp.path(), &["batch", "src", "--out-dir", "gen"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(tmp.path().join("gen/app/Hello.nako").is_file());
    assert!(!src.join("app/Hello.nako").exists());
}

#[test]
fn batch_stops_at_first_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::write(src.join("A.java"), "class A {\n  void m( {\n}\n").unwrap();
    std::fs::write(src.join("B.java"), HELLO).unwrap();

    let output = jnadec(tmp.path(), &["batch", "src", "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!src.join("A.nako").exists());
    assert!(!src.join("B.nako").exists());
}

#[test]
fn tokens_as_json_lines() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("A.java"), "class A {}").unwrap();

    let output = jnadec(tmp.path(), &["tokens", "A.java"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let tokens: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(tokens[0]["kind"], "Class");
    assert_eq!(tokens[0]["text"], "class");
    assert_eq!(tokens[0]["span"]["start"], 0);
    assert_eq!(tokens[0]["span"]["end"], 5);
    assert!(tokens.iter().any(|t| t["text"] == "A"));
}
