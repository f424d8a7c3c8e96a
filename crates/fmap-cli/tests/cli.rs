//! Runs the `fmap` binary against files in a scratch directory.
//!
//! Each command gets its own working directory and config home so that no
//! user-level config, `.env`, or API key leaks into the run.

use std::path::Path;
use std::process::Output;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENERGY: &str = r"public class Relativity {
    /**
     * Calculate Energy based on relativity theory.
     * Formula: E = m * c^2
     */
    public double calculateEnergy(double mass) {
        double speedOfLight = 299792458.0;
        double energy = mass*speedOfLight*speedOfLight;
        return energy;
    }
}
";

fn fmap(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fmap"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("DASHSCOPE_API_KEY")
        .env_remove("FMAP_ORACLE__API_KEY")
        .env_remove("FMAP_ORACLE__ENDPOINT")
        .env_remove("FMAP_LOG");
    cmd
}

async fn run(cmd: &mut Command) -> Output {
    cmd.output().await.expect("fmap binary runs")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn parse_prints_method_records() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Relativity.java"), ENERGY).unwrap();

    let output = run(fmap(dir.path()).args(["parse", "Relativity.java"])).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let records = stdout_json(&output);
    assert_eq!(records[0]["name"], "calculateEnergy");
    assert_eq!(
        records[0]["documentation"],
        "Calculate Energy based on relativity theory.\nFormula: E = m * c^2"
    );
    assert_eq!(
        records[0]["variables"],
        json!(["energy", "mass", "speedOfLight"])
    );
    assert_eq!(records[0]["start_line"], 6);
}

#[tokio::test]
async fn parse_policy_flag_changes_candidates() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("A.java"),
        "class A {\n    /** y = x */\n    double f(String label, double x) { return x; }\n}\n",
    )
    .unwrap();

    let output = run(fmap(dir.path()).args(["parse", "A.java", "--policy", "all-declared"])).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout_json(&output)[0]["variables"], json!(["label", "x"]));
}

#[tokio::test]
async fn empty_input_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Empty.java"), "\n  \n").unwrap();

    let output = run(fmap(dir.path()).args(["parse", "Empty.java"])).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No code provided"));
}

#[tokio::test]
async fn syntax_error_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Broken.java"), "public class Broken {\n  void f( {\n}\n").unwrap();

    let output = run(fmap(dir.path()).args(["parse", "Broken.java"])).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Syntax Error"));
}

#[tokio::test]
async fn no_methods_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Unit.java"), "enum Unit { METER, SECOND }\n").unwrap();

    let output = run(fmap(dir.path()).args(["analyze", "Unit.java"])).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No methods found"));
}

#[tokio::test]
async fn prompt_shows_request_for_one_method() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Relativity.java"), ENERGY).unwrap();

    let output = run(fmap(dir.path()).args([
        "prompt",
        "Relativity.java",
        "--method",
        "calculateEnergy",
    ]))
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let requests = stdout_json(&output);
    assert_eq!(requests.as_array().map(Vec::len), Some(1));
    assert_eq!(requests[0]["model"], "qwen-max");
    assert_eq!(
        requests[0]["messages"][0]["content"],
        "You are an assistant that outputs only structured JSON data."
    );
    let prompt = requests[0]["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("double speedOfLight = 299792458.0;"));

    let missing = run(fmap(dir.path()).args(["prompt", "Relativity.java", "--method", "nope"])).await;
    assert_eq!(missing.status.code(), Some(1));
    assert!(stderr(&missing).contains("no method named `nope`"));
}

#[tokio::test]
async fn analyze_without_key_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Relativity.java"), ENERGY).unwrap();

    let output = run(fmap(dir.path()).args(["analyze", "Relativity.java"])).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("oracle is not usable"), "stderr: {stderr}");
    assert!(stderr.contains("DASHSCOPE_API_KEY"), "stderr: {stderr}");
}

#[tokio::test]
async fn analyze_maps_and_writes_artifact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "```json\n{\"E\": \"energy\", \"m\": \"mass\", \"c\": \"speedOfLight\"}\n```"
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Relativity.java"), ENERGY).unwrap();
    let endpoint = format!("{}/v1", server.uri());

    let output = run(fmap(dir.path())
        .env("FMAP_ORACLE__API_KEY", "sk-test")
        .args([
            "analyze",
            "Relativity.java",
            "--endpoint",
            endpoint.as_str(),
            "--quiet",
            "--out",
        ]))
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = json!([{
        "method_name": "calculateEnergy",
        "mapping": {"E": "energy", "m": "mass", "c": "speedOfLight"}
    }]);
    assert_eq!(stdout_json(&output), expected);

    let artifact = std::fs::read_to_string(dir.path().join("analysis_results.json")).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&artifact).unwrap(), expected);
}
