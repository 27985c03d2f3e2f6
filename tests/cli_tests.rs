#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn xmlbox() -> Command {
    Command::cargo_bin("xmlbox").unwrap()
}

#[test]
fn test_stdin_to_stdout() {
    xmlbox()
        .write_stdin(r#"{"name": "Ada", "tags": ["x", "y"]}"#)
        .assert()
        .success()
        .stdout("<root><name>Ada</name><tags>x</tags><tags>y</tags></root>");
}

#[test]
fn test_root_name_and_attributes() {
    xmlbox()
        .args(["--root", "book"])
        .write_stdin(r##"{"@attributes": {"id": 1}, "title": {"@attributes": {"lang": "en"}, "#text": "Dune"}}"##)
        .assert()
        .success()
        .stdout(r#"<book id="1"><title lang="en">Dune</title></book>"#);
}

#[test]
fn test_pretty_sorted_with_declaration() {
    xmlbox()
        .args(["--pretty", "--sort", "--indent", "2", "--xml-declaration"])
        .write_stdin(r#"{"b": 1, "a": {"c": true}}"#)
        .assert()
        .success()
        .stdout(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>\n  <a>\n    <c>true</c>\n  </a>\n  <b>1</b>\n</root>\n",
        );
}

#[test]
fn test_cdata_keys() {
    xmlbox()
        .args(["--cdata", "body"])
        .write_stdin(r#"{"body": "<p>", "title": "<t>"}"#)
        .assert()
        .success()
        .stdout("<root><body><![CDATA[<p>]]></body><title>&lt;t&gt;</title></root>");
}

#[test]
fn test_file_input_and_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.xml");
    fs::write(&input, r#"{"a": null}"#).unwrap();

    xmlbox()
        .arg(&input)
        .args(["--output", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), "<root><a /></root>");
}

#[test]
fn test_reserved_key_fails() {
    xmlbox()
        .write_stdin(r##"{"#CDATA": "x"}"##)
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved key"));
}

#[test]
fn test_invalid_json_fails() {
    xmlbox()
        .write_stdin("{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input"));
}
