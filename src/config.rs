// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Import configuration: which field names play which XML role.

use smart_default::SmartDefault;

/// Fields rendered as `<testcase>` attributes, paired with the attribute
/// name they render as.
const ATTRIBUTE_FIELDS: &[(&str, &str)] = &[
    ("approvers", "approver-ids"),
    ("assignee", "assignee-id"),
    ("duedate", "due-date"),
    ("id", "id"),
    ("initialestimate", "initial-estimate"),
    ("status", "status-id"),
];

/// Fields rendered as nested elements carrying the value as text content,
/// in emission order.
const ELEMENT_FIELDS: &[&str] = &["title", "description"];

/// Fields rendered as `<custom-field>` children.
const CUSTOM_FIELDS: &[&str] = &[
    "arch",
    "automation_script",
    "caseautomation",
    "casecomponent",
    "caseimportance",
    "caselevel",
    "caseposneg",
    "setup",
    "subcomponent",
    "subtype1",
    "subtype2",
    "tags",
    "tcmsarguments",
    "tcmsbug",
    "tcmscaseid",
    "tcmscategory",
    "tcmscomponent",
    "tcmsnotes",
    "tcmsplan",
    "tcmsreference",
    "tcmsrequirement",
    "tcmsscript",
    "tcmstag",
    "teardown",
    "testtier",
    "testtype",
    "upstream",
    "variant",
];

/// Mapping of test case field names to the XML role they take in the
/// importer document.
///
/// An immutable value threaded through the builders instead of a
/// process-wide constant, so a caller can rearrange categories without
/// touching globals. [`Config::default`] reproduces the stock Polarion
/// importer layout.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Fields emitted as `<testcase>` attributes: `(field name, attribute
    /// name)`. Attributes are written sorted by attribute name.
    #[default(_code = "owned_pairs(ATTRIBUTE_FIELDS)")]
    pub attribute_fields: Vec<(String, String)>,

    /// Fields emitted as nested elements holding text content, in order.
    #[default(_code = "owned(ELEMENT_FIELDS)")]
    pub element_fields: Vec<String>,

    /// Field linking the test case to the work item it verifies.
    #[default(_code = r#""requirement".to_owned()"#)]
    pub requirement_field: String,

    /// Field holding the test step markup.
    #[default(_code = r#""steps".to_owned()"#)]
    pub steps_field: String,

    /// Field holding the expected result markup.
    #[default(_code = r#""expectedresults".to_owned()"#)]
    pub expected_results_field: String,

    /// Fields emitted as `<custom-field>` children, written in alphabetical
    /// order regardless of mapping insertion order.
    #[default(_code = "owned(CUSTOM_FIELDS)")]
    pub custom_fields: Vec<String>,

    /// How the importer looks existing test cases up.
    #[default(_code = r#""custom".to_owned()"#)]
    pub lookup_method: String,

    /// Custom field consulted by the `custom` lookup method.
    #[default(_code = r#""testCaseID".to_owned()"#)]
    pub lookup_method_field_id: String,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|&v| v.to_owned()).collect()
}

fn owned_pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
    values.iter().map(|&(a, b)| (a.to_owned(), b.to_owned())).collect()
}
