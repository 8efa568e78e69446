// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Builders of whole importer documents: test-run and test-case payloads.

use std::collections::HashMap;

use itertools::Itertools as _;
use lazy_regex::regex;

use crate::{
    collect::CollectedTests,
    config::Config,
    fields::{field_text, FieldMap},
    junit::{Status, TestResult},
};

use super::{
    element::Element,
    testcase::{create_xml_property, create_xml_testcase},
};

/// Options shaping a test-run importer document.
#[derive(Clone, Debug)]
pub struct TestRunOptions {
    /// Polarion project to import into.
    pub project_id: String,

    /// User the import runs as.
    pub user_id: String,

    /// Whether the importer should only simulate the import.
    pub dry_run: bool,

    /// Whether skipped test cases should be imported.
    pub include_skipped: bool,

    /// How the importer looks test cases up.
    pub lookup_method: String,

    /// Test run status; an `inprogress` run is not marked finished on
    /// import.
    pub status: String,

    /// Identifier of the test run, sanitized before emission.
    pub test_run_id: Option<String>,

    /// Identifier of the template the test run is created from.
    pub test_run_template_id: Option<String>,

    /// Title of the test run.
    pub test_run_title: Option<String>,

    /// Type identifier of the test run.
    pub test_run_type_id: Option<String>,

    /// Custom test run fields, emitted as `polarion-custom-*` properties.
    pub custom_fields: FieldMap,

    /// Response properties, emitted as `polarion-response-*` properties.
    pub response_properties: Vec<(String, String)>,
}

/// Options shaping a test-case importer document.
#[derive(Clone, Debug)]
pub struct TestCaseOptions {
    /// Polarion project to import into.
    pub project_id: String,

    /// Template filling the `automation_script` custom field, e.g.
    /// `{path}#{line_number}`.
    pub automation_script_format: Option<String>,

    /// Response properties, emitted as `<response-property>` children.
    pub response_properties: Vec<(String, String)>,
}

/// Deletes every character Polarion rejects in a test run identifier.
#[must_use]
pub fn sanitize_test_run_id(id: &str) -> String {
    regex!(r#"[\\/.:*"<>|~!@#$?%^&'()+`,=]"#)
        .replace_all(id, "")
        .into_owned()
}

/// Builds the `<testsuites>` test-run importer document out of parsed jUnit
/// records, joined with collected descriptors for the test case ids.
///
/// Records without a matching descriptor id get the derived
/// `{classname}.{name}` fallback id; every fallback also produces a
/// diagnostic line for the invoking user, returned alongside the document.
#[must_use]
pub fn create_test_run(
    config: &Config,
    results: &[TestResult],
    collected: &CollectedTests,
    options: &TestRunOptions,
) -> (Element, Vec<String>) {
    let ids: HashMap<(String, String), Option<String>> = collected
        .values()
        .flatten()
        .map(|tc| {
            (
                (tc.classname(), tc.name.clone()),
                tc.fields.get("id").map(field_text),
            )
        })
        .collect();

    let mut diagnostics = Vec::new();
    let mut suite = Element::new("testsuite");
    for result in results {
        let key = (result.classname.clone(), result.name.clone());
        let id = match ids.get(&key) {
            Some(Some(id)) => id.clone(),
            _ => {
                let fallback = format!("{}.{}", result.classname, result.name);
                diagnostics.push(format!(
                    "Was not able to find the ID for {fallback}, setting it to {fallback}",
                ));
                fallback
            }
        };
        suite = suite.child(result_element(result, &id));
    }

    let document = Element::new("testsuites")
        .child(run_properties(config, options))
        .child(suite);
    (document, diagnostics)
}

/// Builds the `<testcases>` test-case importer document out of collected
/// descriptors, in collection order.
#[must_use]
pub fn create_test_case_document(
    config: &Config,
    collected: &CollectedTests,
    options: &TestCaseOptions,
) -> Element {
    let mut document =
        Element::new("testcases").attr("project-id", &options.project_id);
    if !options.response_properties.is_empty() {
        let mut responses = Element::new("response-properties");
        for (name, value) in
            options.response_properties.iter().sorted_by(|a, b| a.0.cmp(&b.0))
        {
            responses = responses.child(
                Element::new("response-property")
                    .attr("name", name)
                    .attr("value", value),
            );
        }
        document = document.child(responses);
    }
    document = document.child(
        Element::new("properties")
            .child(create_xml_property("lookup-method", &config.lookup_method)),
    );
    for testcase in collected.values().flatten() {
        document = document.child(create_xml_testcase(
            config,
            testcase,
            options.automation_script_format.as_deref(),
        ));
    }
    document
}

/// Builds the `<properties>` element of a test-run document, sorted by
/// property name.
fn run_properties(config: &Config, options: &TestRunOptions) -> Element {
    let mut properties: Vec<(String, String)> = Vec::new();
    for (name, value) in &options.custom_fields {
        properties.push((format!("polarion-custom-{name}"), field_text(value)));
    }
    properties.push(("polarion-dry-run".to_owned(), options.dry_run.to_string()));
    properties.push((
        "polarion-include-skipped".to_owned(),
        options.include_skipped.to_string(),
    ));
    if options.lookup_method == "custom" {
        properties.push((
            "polarion-custom-lookup-method-field-id".to_owned(),
            config.lookup_method_field_id.clone(),
        ));
    }
    properties.push((
        "polarion-lookup-method".to_owned(),
        options.lookup_method.clone(),
    ));
    properties.push((
        "polarion-project-id".to_owned(),
        options.project_id.clone(),
    ));
    for (name, value) in &options.response_properties {
        properties.push((format!("polarion-response-{name}"), value.clone()));
    }
    properties.push((
        "polarion-set-testrun-finished".to_owned(),
        (options.status != "inprogress").to_string(),
    ));
    if let Some(id) = &options.test_run_id {
        properties
            .push(("polarion-testrun-id".to_owned(), sanitize_test_run_id(id)));
    }
    if let Some(id) = &options.test_run_template_id {
        properties.push(("polarion-testrun-template-id".to_owned(), id.clone()));
    }
    if let Some(title) = &options.test_run_title {
        properties.push(("polarion-testrun-title".to_owned(), title.clone()));
    }
    if let Some(id) = &options.test_run_type_id {
        properties.push(("polarion-testrun-type-id".to_owned(), id.clone()));
    }
    properties.push(("polarion-user-id".to_owned(), options.user_id.clone()));

    let mut element = Element::new("properties");
    for (name, value) in properties.iter().sorted() {
        element = element.child(create_xml_property(name, value));
    }
    element
}

/// Builds one `<testsuite>` child out of a jUnit record: the record's
/// attributes, its status child when not passed, and the identifying
/// `polarion-testcase-id` property.
fn result_element(result: &TestResult, id: &str) -> Element {
    let mut element = Element::new("testcase");
    element = element.attr("classname", &result.classname);
    if let Some(file) = &result.file {
        element = element.attr("file", file);
    }
    if let Some(line) = &result.line {
        element = element.attr("line", line);
    }
    element = element.attr("name", &result.name);
    if let Some(time) = &result.time {
        element = element.attr("time", time);
    }

    let status_child = match result.status {
        Status::Passed => None,
        Status::Skipped => Some(Element::new("skipped")),
        Status::Failure => Some(Element::new("failure")),
        Status::Error => Some(Element::new("error")),
    };
    if let Some(mut child) = status_child {
        if let Some(message) = &result.message {
            child = child.attr("message", message);
        }
        if let Some(kind) = &result.kind {
            child = child.attr("type", kind);
        }
        element = element.child(child);
    }

    element.child(
        Element::new("properties")
            .child(create_xml_property("polarion-testcase-id", id)),
    )
}
