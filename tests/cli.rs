use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Command;

fn out_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("steps_plot_{}_{}.html", name, std::process::id()))
}

#[test]
fn unreachable_url_exits_non_zero_without_chart() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = format!("http://{}/steps.csv", addr);
    let fout = out_path("unreachable");

    let output = Command::new(env!("CARGO_BIN_EXE_steps_plot"))
        .args(["--url", &url, "--timeout", "5", "-o"])
        .arg(&fout)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&url), "stderr: {}", stderr);
    assert!(!fout.exists());
}

#[test]
fn missing_column_exits_non_zero_without_chart() {
    let fout = out_path("missing_column");
    let output = Command::new(env!("CARGO_BIN_EXE_steps_plot"))
        .args(["-f", "test/missing_steps.csv", "-o"])
        .arg(&fout)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Steps"));
    assert!(!fout.exists());
}

#[test]
fn local_csv_produces_html_chart() {
    let fout = out_path("local");
    let output = Command::new(env!("CARGO_BIN_EXE_steps_plot"))
        .args(["-f", "test/steps.csv", "-o"])
        .arg(&fout)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let html = std::fs::read_to_string(&fout).unwrap();
    assert!(html.contains("2023-01-03"));
    std::fs::remove_file(&fout).unwrap();
}
