use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn bodykit() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("bodykit")?)
}

#[test]
fn xml_to_json_from_stdin() -> TestResult {
    bodykit()?
        .arg("xml-to-json")
        .write_stdin("<a><b>1</b></a>")
        .assert()
        .success()
        .stdout("{\n  \"a\": {\n    \"b\": \"1\"\n  }\n}\n");
    Ok(())
}

#[test]
fn xml_to_json_rejects_malformed_input() -> TestResult {
    bodykit()?
        .arg("xml-to-json")
        .write_stdin("<a><b>1</a>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("illegal XML format"));
    Ok(())
}

#[test]
fn xml_to_json_reject_siblings() -> TestResult {
    bodykit()?
        .args(["xml-to-json", "--siblings", "reject"])
        .write_stdin("<a><b>1</b><b>2</b></a>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate sibling tag: b"));
    Ok(())
}

#[test]
fn json_to_xml_between_files() -> TestResult {
    let dir = tempdir()?;
    let input = dir.path().join("body.json");
    let output = dir.path().join("body.xml");
    fs::write(&input, r#"{"a":{"b":"1"}}"#)?;

    bodykit()?
        .arg("json-to-xml")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let xml = fs::read_to_string(&output)?;
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<a>\n\t<b>1</b>\n</a>\n"
    );
    Ok(())
}

#[test]
fn assemble_templated_json_with_vars() -> TestResult {
    let descriptor = r#"{
        "type": "JSON",
        "format": "JSON",
        "jsonSchema": {},
        "raw": "{\"user\": \"${{ name }}\"}"
    }"#;

    bodykit()?
        .args(["assemble", "--var", "name=alice"])
        .write_stdin(descriptor)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""rawBody": true"#))
        .stdout(predicate::str::contains(r#"\"user\": \"alice\""#));
    Ok(())
}

#[test]
fn assemble_binary_uses_body_dir() -> TestResult {
    let descriptor = r#"{
        "type": "BINARY",
        "binary": [
            {"name": "upload", "type": "file", "enable": true,
             "files": [{"id": "f1", "name": "x.png"}]}
        ]
    }"#;

    bodykit()?
        .args(["assemble", "--body-dir", "/srv/body"])
        .write_stdin(descriptor)
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/body/f1_x.png"))
        .stdout(predicate::str::contains(r#""multipart": true"#));
    Ok(())
}

#[test]
fn assemble_rejects_empty_raw_body() -> TestResult {
    bodykit()?
        .arg("assemble")
        .write_stdin(r#"{"type": "Raw", "raw": "  "}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to send"));
    Ok(())
}
