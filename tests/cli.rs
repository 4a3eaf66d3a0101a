use siteflow_lib::capture_page;
use siteflow_lib::schema;
use siteflow_lib::PageSnapshot;
use std::env;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/landing_snapshot.json");

fn fixture_path() -> String {
    format!("{}/tests/fixtures/landing_snapshot.json", env!("CARGO_MANIFEST_DIR"))
}

fn write_document(path: &Path) {
    let snapshot: PageSnapshot = serde_json::from_str(FIXTURE).expect("fixture");
    let doc = capture_page(&snapshot);
    std::fs::write(path, schema::to_json_pretty(&doc).unwrap()).expect("write document");
}

fn siteflow() -> Command {
    Command::new(env!("CARGO_BIN_EXE_siteflow"))
}

#[test]
fn import_of_valid_document_succeeds_and_writes_scene() {
    let dir = TempDir::new().expect("tempdir");
    let doc = dir.path().join("landing.json");
    let scene = dir.path().join("scene.json");
    write_document(&doc);

    let output = siteflow()
        .args(["import", doc.to_str().unwrap(), "--output", scene.to_str().unwrap()])
        .output()
        .expect("run siteflow");
    assert_eq!(output.status.code(), Some(0));

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(record["mode"], "import");
    assert_eq!(record["imported"], 1);

    let page: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&scene).expect("scene file")).unwrap();
    assert_eq!(page["roots"][0]["name"], "Acme Landing");
    assert_eq!(page["selection"].as_array().map(Vec::len), Some(1));
}

#[test]
fn single_malformed_document_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let doc = dir.path().join("broken.json");
    std::fs::write(&doc, "{ \"type\": ").unwrap();

    let status = siteflow()
        .args(["import", doc.to_str().unwrap()])
        .status()
        .expect("run siteflow");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn batch_with_nothing_imported_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    let first = dir.path().join("a.json");
    let second = dir.path().join("b.json");
    std::fs::write(&first, "not json").unwrap();
    std::fs::write(&second, "[]").unwrap();

    let output = siteflow()
        .args(["import", first.to_str().unwrap(), second.to_str().unwrap()])
        .output()
        .expect("run siteflow");
    assert_eq!(output.status.code(), Some(1));
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(record["imported"], 0);
    assert_eq!(record["failed"], 2);
}

#[test]
fn capture_from_snapshot_writes_timestamped_document() {
    let dir = TempDir::new().expect("tempdir");
    let out_dir = dir.path().join("captures");

    let output = siteflow()
        .args([
            "capture",
            "--snapshot",
            &fixture_path(),
            "--output-dir",
            out_dir.to_str().unwrap(),
        ])
        .output()
        .expect("run siteflow");
    assert_eq!(output.status.code(), Some(0));

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(record["mode"], "capture");
    assert_eq!(record["documentName"], "Acme Landing");
    assert_eq!(record["nodeCount"], 10);

    let written: Vec<_> = std::fs::read_dir(&out_dir)
        .expect("output dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("figma-export-"));
    assert!(written[0].ends_with(".json"));
}

#[test]
fn capture_rejects_unsupported_url_scheme() {
    let status = siteflow()
        .args(["capture", "--url", "ftp://example.com/page"])
        .status()
        .expect("run siteflow");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn serve_answers_each_command_line() {
    let dir = TempDir::new().expect("tempdir");
    let doc = dir.path().join("landing.json");
    write_document(&doc);
    let data = std::fs::read_to_string(&doc).unwrap();
    let document: serde_json::Value = serde_json::from_str(&data).unwrap();

    let mut child = siteflow()
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn siteflow");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        let import = serde_json::json!({ "type": "import-json", "data": document });
        writeln!(stdin, "{import}").unwrap();
        writeln!(stdin, "{{\"type\":\"import-json\"}}").unwrap();
        writeln!(stdin, "{{\"type\":\"close\"}}").unwrap();
    }
    let output = child.wait_with_output().expect("wait");
    assert_eq!(output.status.code(), Some(0));

    let replies: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("reply line"))
        .collect();
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0]["type"], "status");
    assert_eq!(replies[0]["message"], "Importing 10 nodes...");
    assert_eq!(replies[1]["type"], "success");
    assert_eq!(replies[2]["type"], "error");
    assert_eq!(replies[2]["message"], "No JSON data provided");
}

#[test]
fn unreadable_config_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = dir.path().join("siteflow.toml");
    std::fs::write(&cfg, "[import\nbatch_spacing = ").unwrap();
    let doc = dir.path().join("landing.json");
    write_document(&doc);

    let status = siteflow()
        .args([
            "import",
            doc.to_str().unwrap(),
            "--config",
            cfg.to_str().unwrap(),
        ])
        .status()
        .expect("run siteflow");
    assert_eq!(status.code(), Some(2));
}
