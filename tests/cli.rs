//! End-to-end runs of the `polarize` binary over scratch files.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const JUNIT_XML: &str = r#"<testsuite tests="4" skips="0">
    <testcase classname="foo1" name="test_passed" file="source.py" line="8">
    </testcase>
    <testcase classname="foo1" name="test_passed_no_id"></testcase>
    <testcase classname="foo2" name="test_skipped">
        <skipped message="Skipped message">...</skipped>
    </testcase>
    <testcase classname="foo3" name="test_failure">
        <failure type="Type" message="Failure message">...</failure>
    </testcase>
    <testcase classname="foo4" name="test_error">
        <error type="ExceptionName" message="Error message">...</error>
    </testcase>
</testsuite>
"#;

const DESCRIPTORS_JSON: &str = r#"{
    "source.py": [
        {"name": "test_passed", "testmodule": "foo1",
         "fields": {"id": "ID-1"}},
        {"name": "test_passed_no_id", "testmodule": "foo1"},
        {"name": "test_skipped", "testmodule": "foo2",
         "fields": {"id": "ID-3"}},
        {"name": "test_failure", "testmodule": "foo3",
         "fields": {"id": "ID-4"}},
        {"name": "test_error", "testmodule": "foo4",
         "fields": {"id": "ID-5"}}
    ]
}"#;

fn polarize() -> Command {
    Command::cargo_bin("polarize").unwrap()
}

#[test]
fn test_results_summarizes_the_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("results.xml"), JUNIT_XML).unwrap();

    polarize()
        .current_dir(dir.path())
        .args(["test-results", "--path", "results.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: 1\n"))
        .stdout(predicate::str::contains("Failure: 1\n"))
        .stdout(predicate::str::contains("Passed: 2\n"))
        .stdout(predicate::str::contains("Skipped: 1\n"));
}

#[test]
fn test_results_reads_the_default_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("junit-results.xml"), JUNIT_XML).unwrap();

    polarize()
        .current_dir(dir.path())
        .arg("test-results")
        .assert()
        .success()
        .stdout(predicate::str::contains("Passed: 2\n"));
}

#[test]
fn test_results_fails_on_malformed_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("junit-results.xml"), "<testsuite><testcase")
        .unwrap();

    polarize()
        .current_dir(dir.path())
        .arg("test-results")
        .assert()
        .failure();
}

#[test]
fn test_run_builds_the_importer_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("junit_report.xml"), JUNIT_XML).unwrap();
    fs::write(dir.path().join("source.py"), DESCRIPTORS_JSON).unwrap();

    polarize()
        .current_dir(dir.path())
        .args([
            "test-run",
            "--dry-run",
            "--no-include-skipped",
            "--custom-fields",
            "field=value",
            "--response-property",
            "key=value",
            "--status",
            "inprogress",
            "--test-run-id",
            "test-run-id",
            "--test-run-template-id",
            "test-run-template-id",
            "--test-run-title",
            "test-run-title",
            "--test-run-type-id",
            "test-run-type-id",
            "junit_report.xml",
            "source.py",
            "userid",
            "projectid",
            "importer.xml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Was not able to find the ID for foo1.test_passed_no_id, \
             setting it to foo1.test_passed_no_id\n",
        ));

    let written =
        fs::read_to_string(dir.path().join("importer.xml")).unwrap();
    let document = roxmltree::Document::parse(&written).unwrap();
    let root = document.root_element();
    assert_eq!(root.tag_name().name(), "testsuites");

    let properties = root
        .children()
        .find(|n| n.has_tag_name("properties"))
        .unwrap()
        .children()
        .filter(|n| n.has_tag_name("property"))
        .map(|n| {
            (
                n.attribute("name").unwrap().to_owned(),
                n.attribute("value").unwrap().to_owned(),
            )
        })
        .collect::<Vec<_>>();
    let expected = [
        ("polarion-custom-field", "value"),
        ("polarion-custom-lookup-method-field-id", "testCaseID"),
        ("polarion-dry-run", "true"),
        ("polarion-include-skipped", "false"),
        ("polarion-lookup-method", "custom"),
        ("polarion-project-id", "projectid"),
        ("polarion-response-key", "value"),
        ("polarion-set-testrun-finished", "false"),
        ("polarion-testrun-id", "test-run-id"),
        ("polarion-testrun-template-id", "test-run-template-id"),
        ("polarion-testrun-title", "test-run-title"),
        ("polarion-testrun-type-id", "test-run-type-id"),
        ("polarion-user-id", "userid"),
    ];
    for (name, value) in expected {
        assert!(
            properties.iter().any(|(n, v)| n == name && v == value),
            "property {name}={value} missing from {properties:?}",
        );
    }

    let testsuite = root
        .children()
        .find(|n| n.has_tag_name("testsuite"))
        .unwrap();
    let ids = testsuite
        .children()
        .filter(|n| n.has_tag_name("testcase"))
        .map(|testcase| {
            let properties = testcase
                .children()
                .filter(|n| n.has_tag_name("properties"))
                .flat_map(|p| {
                    p.children()
                        .filter(|n| n.has_tag_name("property"))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            assert_eq!(properties.len(), 1);
            assert_eq!(
                properties[0].attribute("name"),
                Some("polarion-testcase-id"),
            );
            properties[0].attribute("value").unwrap().to_owned()
        })
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec!["ID-1", "foo1.test_passed_no_id", "ID-3", "ID-4", "ID-5"],
    );
}

#[test]
fn test_run_rejects_malformed_response_property() {
    polarize()
        .args([
            "test-run",
            "--response-property",
            "novalue",
            "junit_report.xml",
            "source.py",
            "userid",
            "projectid",
            "importer.xml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs to be in format key=value"));
}

#[test]
fn test_case_builds_the_importer_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("source.py"), DESCRIPTORS_JSON).unwrap();

    polarize()
        .current_dir(dir.path())
        .args([
            "test-case",
            "--response-property",
            "key=value",
            "source.py",
            "projectid",
            "testcases.xml",
        ])
        .assert()
        .success();

    let written =
        fs::read_to_string(dir.path().join("testcases.xml")).unwrap();
    let document = roxmltree::Document::parse(&written).unwrap();
    let root = document.root_element();
    assert_eq!(root.tag_name().name(), "testcases");
    assert_eq!(root.attribute("project-id"), Some("projectid"));
    let testcases = root
        .children()
        .filter(|n| n.has_tag_name("testcase"))
        .collect::<Vec<_>>();
    assert_eq!(testcases.len(), 5);
    assert_eq!(testcases[0].attribute("id"), Some("ID-1"));
    assert_eq!(testcases[1].attribute("id"), None);
}
