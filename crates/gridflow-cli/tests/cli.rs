use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn sample_case() -> String {
    repo_path("test_data/cases/sample.toml")
        .to_str()
        .unwrap()
        .to_string()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn solve_prints_flow_table_and_cost() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["solve", &sample_case()])
        .assert()
        .success()
        .stdout(predicate::str::contains("LINE"))
        .stdout(predicate::str::contains("B->D"))
        .stdout(predicate::str::contains("Total cost: 740.00"));
}

#[test]
fn solve_emits_json() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    let output = cmd
        .args(["solve", &sample_case(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert!((json["total_cost"].as_f64().unwrap() - 740.0).abs() < 1e-9);
    let flows = json["flows"].as_array().unwrap();
    assert_eq!(flows.len(), 7);
    assert_eq!(flows[0]["from"], "A");
    assert_eq!(flows[0]["to"], "C");
}

#[test]
fn solve_writes_solution_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("solution.json");
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["solve", &sample_case(), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["flows"].as_array().unwrap().len(), 7);
    assert!(json["augmentations"].as_u64().unwrap() > 0);
}

#[test]
fn solve_reports_infeasible_case() {
    let case = repo_path("test_data/cases/unbalanced.json");
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["solve", case.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("infeasible"));
}

#[test]
fn solve_respects_augmentation_cap() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["solve", &sample_case(), "--max-augmentations", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not converge"));
}

#[test]
fn bottlenecks_on_case_flows() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    let output = cmd
        .args([
            "bottlenecks",
            &sample_case(),
            "--no-solve",
            "--threshold",
            "50",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    let lines: Vec<String> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| format!("{}->{}", b["line"]["from"].as_str().unwrap(), b["line"]["to"].as_str().unwrap()))
        .collect();
    assert_eq!(lines, vec!["B->D", "A->F", "A->C", "F->C"]);
}

#[test]
fn bottlenecks_after_solve_table() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["bottlenecks", &sample_case()])
        .assert()
        .success()
        .stdout(predicate::str::contains("UTILIZATION"))
        .stdout(predicate::str::contains("F->E"))
        .stdout(predicate::str::contains("congested"));
}

#[test]
fn bottlenecks_reject_bad_threshold() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["bottlenecks", &sample_case(), "--threshold", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid attribute"));
}

#[test]
fn report_includes_cost_and_summary() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["report", &sample_case()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Network"))
        .stdout(predicate::str::contains("Source nodes: 2"))
        .stdout(predicate::str::contains("Total transmission cost: 740.00"));
}

#[test]
fn report_without_solve_has_no_cost() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    let output = cmd
        .args(["report", &sample_case(), "--no-solve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert!(json.get("total_cost").is_none());
    assert_eq!(json["stats"]["num_lines"], 7);
}

#[test]
fn validate_clean_case() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["validate", &sample_case()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues"));
}

#[test]
fn validate_flags_imbalance() {
    let case = repo_path("test_data/cases/unbalanced.json");
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["validate", case.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error:balance]"));
}

#[test]
fn unknown_endpoint_requires_lenient() {
    let dir = tempdir().unwrap();
    let case = dir.path().join("hub.toml");
    fs::write(
        &case,
        r#"
[[nodes]]
id = "G"
supply = 30.0

[[nodes]]
id = "L"
demand = 30.0

[[lines]]
from = "G"
to = "HUB"
capacity = 50.0
cost = 1.0

[[lines]]
from = "HUB"
to = "L"
capacity = 50.0
cost = 1.0
"#,
    )
    .unwrap();

    let mut strict = cargo_bin_cmd!("gridflow-cli");
    strict
        .args(["solve", case.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node 'HUB'"));

    let mut lenient = cargo_bin_cmd!("gridflow-cli");
    lenient
        .args(["solve", case.to_str().unwrap(), "--lenient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total cost: 60.00"));
}

#[test]
fn graph_export_dot() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["graph", "export", &sample_case()])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph \"Sample Network\""))
        .stdout(predicate::str::contains("\"A\" -> \"F\""));
}

#[test]
fn graph_stats_summary() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["graph", "stats", &sample_case()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes         : 6"))
        .stdout(predicate::str::contains("Components    : 1"));
}

#[test]
fn graph_layout_writes_json() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("layout.json");
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args([
        "graph",
        "layout",
        &sample_case(),
        "--iterations",
        "10",
        "--solve",
        "-o",
        out.to_str().unwrap(),
    ])
    .assert()
    .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 6);
    let bd = json["lines"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["from"] == "B" && l["to"] == "D")
        .unwrap();
    assert_eq!(bd["color"], "red");
}

const CAPPED_CASE: &str = r#"
name = "Capped"

[[nodes]]
id = "G"
supply = 10.0

[[nodes]]
id = "L"
demand = 10.0

[[lines]]
from = "G"
to = "M"
capacity = 10.0
cost = 1.0

[[lines]]
from = "M"
to = "L"
capacity = 10.0
cost = 1.0

[solver]
max_augmentations = 0
"#;

#[test]
fn graph_commands_accept_lenient_endpoints() {
    let dir = tempdir().unwrap();
    let case = dir.path().join("capped.toml");
    fs::write(&case, CAPPED_CASE).unwrap();
    let case = case.to_str().unwrap();

    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["graph", "stats", case])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node"));

    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["graph", "stats", case, "--lenient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes         : 3"));

    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["graph", "export", case, "--lenient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"G\" -> \"M\""));
}

#[test]
fn graph_layout_uses_case_solver_settings() {
    let dir = tempdir().unwrap();
    let case = dir.path().join("capped.toml");
    fs::write(&case, CAPPED_CASE).unwrap();
    let case = case.to_str().unwrap();

    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["graph", "layout", case, "--lenient", "--solve", "--iterations", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not converge"));

    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args([
        "graph",
        "layout",
        case,
        "--lenient",
        "--solve",
        "--iterations",
        "5",
        "--max-augmentations",
        "10",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"flow_mw\": 10.0"));
}

#[test]
fn demo_walks_through_sample() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manually edited flows"))
        .stdout(predicate::str::contains("Total cost: 740.00"))
        .stdout(predicate::str::contains("Network Analysis Report"));
}

#[test]
fn completions_for_bash() {
    let mut cmd = cargo_bin_cmd!("gridflow-cli");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gridflow-cli"));
}
