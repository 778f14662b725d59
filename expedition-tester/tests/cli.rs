use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "expedition-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_expedition-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("flaky-provider"));
}

#[test]
fn cli_runs_all_scenarios_offline_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_expedition-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--scenarios",
            "all",
            "--iterations",
            "2",
            "--seeds",
            "1,2",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Grammar Expedition Tester"));
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_path).expect("read report"))
            .expect("json report");
    assert_eq!(report["passed"], true);
    assert_eq!(report["results"].as_array().map(Vec::len), Some(10));
}

#[test]
fn cli_gemini_without_key_fails_fast() {
    let exe = env!("CARGO_BIN_EXE_expedition-tester");
    let output = Command::new(exe)
        .args(["--provider", "gemini", "--iterations", "1"])
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key"), "stderr: {stderr}");
}

#[test]
fn cli_rejects_malformed_seeds() {
    let exe = env!("CARGO_BIN_EXE_expedition-tester");
    let output = Command::new(exe)
        .args(["--seeds", "maple", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}
