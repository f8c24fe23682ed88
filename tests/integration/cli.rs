use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use service_scaffold::test_utils::sample_answers;

use crate::common::TestProject;

fn scaffold(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("scaffold").unwrap();
    cmd.current_dir(project.root())
        .env("SCAFFOLD_CONFIG", project.config_path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let project = TestProject::new().unwrap();
    scaffold(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("normalize"));
}

#[test]
fn test_init_without_network_or_installer() {
    let project = TestProject::new().unwrap();
    let answers = project.write_answers(&sample_answers()).unwrap();

    let output = project
        .run_scaffold(&[
            "init",
            "--answers",
            answers.to_str().unwrap(),
            "--path",
            "project",
            "--no-license",
            "--skip-install",
        ])
        .unwrap();
    output.assert_success();
    assert!(output.stdout.contains("Generated 13 files"));

    let config = project.read_project_file("config/development/config.json5").unwrap();
    assert!(config.contains("$ref: '#/storage/mysql/databases/main/db'"));
    let index = project.read_project_file("index.js").unwrap();
    assert!(index.contains("sample-service"));
}

#[test]
fn test_init_uses_configured_template_dir() {
    let project = TestProject::new().unwrap();
    let templates = project.root().join("templates");
    std::fs::create_dir_all(&templates).unwrap();
    std::fs::write(templates.join("CHANGELOG.tera"), "# Changes\n").unwrap();
    project
        .write_config(&format!("template_dir = {:?}\nskip_install = true\n", templates.to_str().unwrap()))
        .unwrap();
    let answers = project.write_answers(&json!({"name": "svc"})).unwrap();

    project
        .run_scaffold(&["init", "--answers", answers.to_str().unwrap(), "--path", "project", "--no-license"])
        .unwrap()
        .assert_success();

    assert_eq!(project.read_project_file("CHANGELOG.md").unwrap(), "# Changes\n");
}

#[test]
fn test_render_router_to_stdout() {
    let project = TestProject::new().unwrap();
    let data = project.write_json("data.json", &json!({"app": "public"})).unwrap();

    scaffold(&project)
        .args(["render", "router", "--data", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("appManager.get(\"public\")"));
}

#[test]
fn test_render_unknown_template_fails_with_suggestion() {
    let project = TestProject::new().unwrap();
    scaffold(&project)
        .args(["render", "packge"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Template not found: packge"))
        .stderr(predicate::str::contains("Did you mean: package"));
}

#[test]
fn test_normalize_dependencies_part() {
    let project = TestProject::new().unwrap();
    let answers = project.write_answers(&sample_answers()).unwrap();

    let output = project
        .run_scaffold(&["normalize", "--answers", answers.to_str().unwrap(), "--part", "dependencies"])
        .unwrap();
    output.assert_success();

    let value: Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(value["devDependencies"], json!({"mocha": "*"}));
    assert_eq!(value["dependencies"]["mysql"], "*");
}

#[test]
fn test_normalize_config_relaxed() {
    let project = TestProject::new().unwrap();
    let answers = project.write_answers(&sample_answers()).unwrap();

    scaffold(&project)
        .args(["normalize", "--answers", answers.to_str().unwrap(), "--part", "config", "--relaxed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ref: '#/listen/public/port',"))
        .stdout(predicate::str::contains("stopOnError: false,"));
}

#[test]
fn test_invalid_answers_report_field() {
    let project = TestProject::new().unwrap();
    let answers = project.write_answers(&json!({"_config": {"storage": 3}})).unwrap();

    let output = project
        .run_scaffold(&["normalize", "--answers", answers.to_str().unwrap()])
        .unwrap();
    output.assert_failure();
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("_config.storage"));
}
