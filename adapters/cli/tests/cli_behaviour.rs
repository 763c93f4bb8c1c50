use std::{fs, process::Command};

const OPEN_3X3: &str = "3\n3\n000\n000\n00\n00\n00\n0 0\n2 2\n";

#[test]
fn solve_prints_the_shortest_route() {
    let input = std::env::temp_dir().join(format!("maze-wave-solve-{}.txt", std::process::id()));
    fs::write(&input, OPEN_3X3).expect("write maze file");

    let output = Command::new(env!("CARGO_BIN_EXE_maze-wave"))
        .args(["solve", "--model", "edge", "--input"])
        .arg(&input)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run maze-wave solve");
    let _ = fs::remove_file(&input);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("path length: 4"), "{stdout}");
    assert!(
        stdout.contains("(0, 0) -> (1, 0) -> (2, 0) -> (2, 1) -> (2, 2)"),
        "{stdout}"
    );
}

#[test]
fn oversized_generation_is_reported_not_aborted() {
    let output = Command::new(env!("CARGO_BIN_EXE_maze-wave"))
        .args(["--seed", "1", "generate", "--width", "100000", "--height", "100000"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run maze-wave generate");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("100000x100000"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}
