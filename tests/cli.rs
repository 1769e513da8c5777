#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "kquote-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn run_with_stdin(bin: &str, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should start");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should accept input");

    child.wait_with_output().expect("binary should finish")
}

fn btok(args: &[&str], stdin: &[u8]) -> Output {
    run_with_stdin(env!("CARGO_BIN_EXE_btok"), args, stdin)
}

fn ktob(args: &[&str], stdin: &[u8]) -> Output {
    run_with_stdin(env!("CARGO_BIN_EXE_ktob"), args, stdin)
}

#[test]
fn btok_quotes_stdin() {
    let output = btok(&[], b"A#&\x01\n\xC1\xA3");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"A###&#A\n&A&##");
}

#[test]
fn ktob_restores_stdin() {
    let output = ktob(&[], b"A###&#A\n&A&##");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"A#&\x01\n\xC1\xA3");
}

#[test]
fn translate_newlines_flag() {
    let output = btok(&["-l"], b"a\r\nb");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"a#M#Jb");
}

#[test]
fn custom_markers_roundtrip_through_both_programs() {
    let original: Vec<u8> = (0..=255).collect();

    let encoded = btok(&["-p", "+", "-c", "!", "-r", "*"], &original);
    assert_eq!(encoded.status.code(), Some(0));

    let decoded = ktob(&["-p", "+", "-c", "!", "-r", "*"], &encoded.stdout);
    assert_eq!(decoded.status.code(), Some(0));
    assert_eq!(decoded.stdout, original);
}

#[test]
fn files_are_concatenated_in_order() {
    let dir = unique_temp_dir("concat");
    let first = dir.join("first.bin");
    let second = dir.join("second.bin");
    std::fs::write(&first, b"\x01").expect("first file should be writable");
    std::fs::write(&second, b"~").expect("second file should be writable");

    let output = btok(
        &[first.to_str().unwrap(), second.to_str().unwrap()],
        b"",
    );

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"#A#~");
}

#[test]
fn missing_file_is_reported_and_skipped() {
    let dir = unique_temp_dir("missing");
    let present = dir.join("present.txt");
    let missing = dir.join("missing.txt");
    std::fs::write(&present, b"ok").expect("file should be writable");

    let output = btok(
        &[missing.to_str().unwrap(), present.to_str().unwrap()],
        b"",
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(output.stdout, b"ok");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("Could Not Open {} in btok.", missing.display())));
}

#[test]
fn version_flag() {
    let output = ktob(&["-v"], b"");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ktob (Kermit to Binary) Version "));
}

#[test]
fn help_prints_usage_to_stdout_and_exits_with_one() {
    for flag in ["-?", "--help"] {
        let output = btok(&[flag], b"");

        assert_eq!(output.status.code(), Some(1), "flag {flag}");
        assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
        assert!(output.stderr.is_empty(), "flag {flag}");
    }
}

#[test]
fn parse_errors_print_usage_to_stderr_and_exit_with_one() {
    for args in [&["-z"][..], &["-p", "ab"][..]] {
        let output = ktob(args, b"");

        assert_eq!(output.status.code(), Some(1), "args {args:?}");
        assert!(output.stdout.is_empty(), "args {args:?}");
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    }
}

#[test]
fn duplicate_markers_are_rejected() {
    let output = btok(&["-p", "#"], b"");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"));
}

#[test]
fn truncated_input_fails_decoding() {
    let output = ktob(&[], b"ab&#");

    assert_eq!(output.status.code(), Some(60));
    assert_eq!(output.stdout, b"ab");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input ended inside escape sequence"));
}

#[test]
fn strict_decoding_rejects_foreign_input() {
    let output = ktob(&["--strict"], b"&&");
    assert_eq!(output.status.code(), Some(60));

    let output = ktob(&[], b"&&");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, vec![0xA6]);
}
