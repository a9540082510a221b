//! End-to-end tests of the `schemaform` binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const SCHEMA_YAML: &str = r#"
type: object
required: [name, email]
properties:
  name:
    type: string
    title: Full name
  email:
    type: string
  plan:
    type: string
    enum: [free, pro]
  age:
    type: integer
"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.yaml"), SCHEMA_YAML).unwrap();
    dir
}

fn schemaform(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("schemaform").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn fields_prints_defaults_in_declaration_order() {
    let dir = workspace();
    let output = schemaform(dir.path())
        .args(["fields", "schema.yaml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let fields: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&str> = fields
        .iter()
        .map(|f| f["key"][0].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["name", "email", "plan"]);
    assert_eq!(fields[0]["title"], "Full name");
    assert_eq!(fields[0]["required"], true);
    assert_eq!(fields[2]["type"], "select");
}

#[test]
fn fields_with_definition_splices_wildcard() {
    let dir = workspace();
    fs::write(
        dir.path().join("form.json"),
        r#"[{"key": "intro", "type": "note"}, "*", {"key": "email", "title": "Work email"}]"#,
    )
    .unwrap();

    let output = schemaform(dir.path())
        .args(["fields", "schema.yaml", "--definition", "form.json"])
        .output()
        .unwrap();
    let fields: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0]["type"], "note");
    assert_eq!(fields[4]["title"], "Work email");
    assert_eq!(fields[4]["type"], "text");
}

#[test]
fn validate_exits_two_on_invalid_data() {
    let dir = workspace();
    fs::write(dir.path().join("data.json"), r#"{"name": "", "email": "a@b.com"}"#).unwrap();

    let output = schemaform(dir.path())
        .args(["validate", "schema.yaml", "data.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    let errors = report["errors"].as_object().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["name"][0]["code"], "required");
}

#[test]
fn validate_reads_stdin() {
    let dir = workspace();
    schemaform(dir.path())
        .args(["validate", "schema.yaml", "-"])
        .write_stdin(r#"{"name": "Ada", "email": "ada@example.com"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn render_wraps_fields_with_attributes() {
    let dir = workspace();
    schemaform(dir.path())
        .args([
            "render",
            "schema.yaml",
            "--attr",
            "method=post",
            "--attr",
            "action=/signup",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<form method=\"post\" action=\"/signup\">",
        ))
        .stdout(predicate::str::contains("name=\"plan\""))
        .stdout(predicate::str::contains("name=\"age\"").not());
}

#[test]
fn render_uses_template_directory_from_config() {
    let dir = workspace();
    fs::create_dir(dir.path().join("tpl")).unwrap();
    fs::write(dir.path().join("tpl").join("text.liquid"), "<{{ name }}>").unwrap();
    fs::write(dir.path().join("schemaform.toml"), "templates_dir = \"tpl\"\nignore = [\"plan\"]\n").unwrap();

    schemaform(dir.path())
        .args(["render", "schema.yaml"])
        .assert()
        .success()
        .stdout("<form><name><email></form>\n");
}

#[test]
fn render_shows_inline_errors() {
    let dir = workspace();
    fs::write(dir.path().join("data.yaml"), "name: Ada\nemail: ''\n").unwrap();

    schemaform(dir.path())
        .args(["render", "schema.yaml", "--data", "data.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value=\"Ada\""))
        .stdout(predicate::str::contains("has-errors"));
}

#[test]
fn string_root_schema_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), r#"{"type": "string"}"#).unwrap();

    schemaform(dir.path())
        .args(["fields", "bad.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("root schema must be of type \"object\""));
}

#[test]
fn malformed_attribute_is_an_error() {
    let dir = workspace();
    schemaform(dir.path())
        .args(["render", "schema.yaml", "--attr", "novalue"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("name=value"));
}
