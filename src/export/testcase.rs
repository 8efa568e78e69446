// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Builders of `<property>` and `<testcase>` importer elements.

use itertools::Itertools as _;

use crate::{
    collect::TestCase,
    config::Config,
    fields::field_text,
    steps::map_steps,
};

use super::element::Element;

/// Builds a self-closed `<property>` element with `name` and `value`
/// attributes copied verbatim.
#[must_use]
pub fn create_xml_property(name: &str, value: &str) -> Element {
    Element::new("property").attr("name", name).attr("value", value)
}

/// Builds a fully-formed `<testcase>` element out of a descriptor's fields,
/// with the [`Config`] deciding each field's XML role.
///
/// Attribute fields are written sorted by attribute name and custom fields
/// sorted by field name, so identical input yields byte-identical output.
/// `automation_script_format` (a template like `{path}#{line_number}`) fills
/// the `automation_script` custom field for descriptors that carry a source
/// line but no explicit value; it never overwrites an authored field.
#[must_use]
pub fn create_xml_testcase(
    config: &Config,
    testcase: &TestCase,
    automation_script_format: Option<&str>,
) -> Element {
    let mut element = Element::new("testcase");

    for (field, attribute) in
        config.attribute_fields.iter().sorted_by(|a, b| a.1.cmp(&b.1))
    {
        if let Some(value) = testcase.fields.get(field) {
            element = element.attr(attribute, field_text(value));
        }
    }

    for field in &config.element_fields {
        let value = testcase.fields.get(field).map(field_text).or_else(|| {
            (field == "description")
                .then(|| testcase.docstring.clone())
                .flatten()
        });
        if let Some(value) = value {
            element = element.child(Element::new(field).text(value));
        }
    }

    if let Some(requirement) = testcase.fields.get(&config.requirement_field) {
        element = element.child(
            Element::new("linked-work-items").child(
                Element::new("linked-work-item")
                    .attr("lookup-method", "name")
                    .attr("role-id", "verifies")
                    .attr("workitem-id", field_text(requirement)),
            ),
        );
    }

    if let (Some(steps), Some(expected)) = (
        testcase.fields.get(&config.steps_field),
        testcase.fields.get(&config.expected_results_field),
    ) {
        let mut test_steps = Element::new("test-steps");
        for (step, expected) in
            map_steps(&field_text(steps), &field_text(expected))
        {
            test_steps = test_steps.child(
                Element::new("test-step")
                    .child(
                        Element::new("test-step-column")
                            .attr("id", "step")
                            .text(step),
                    )
                    .child(
                        Element::new("test-step-column")
                            .attr("id", "expectedResult")
                            .text(expected),
                    ),
            );
        }
        element = element.child(test_steps);
    }

    let automation_script = automation_script_format.and_then(|format| {
        if testcase.fields.contains_key("automation_script") {
            return None;
        }
        testcase.line.map(|line| {
            format
                .replace("{path}", &testcase.testmodule)
                .replace("{line_number}", &line.to_string())
        })
    });
    let mut custom_fields = Element::new("custom-fields");
    let mut has_custom_fields = false;
    for field in config.custom_fields.iter().sorted() {
        let value = testcase.fields.get(field).map(field_text).or_else(|| {
            (field == "automation_script")
                .then(|| automation_script.clone())
                .flatten()
        });
        if let Some(value) = value {
            custom_fields = custom_fields.child(
                Element::new("custom-field")
                    .attr("content", value)
                    .attr("id", field),
            );
            has_custom_fields = true;
        }
    }
    if has_custom_fields {
        element = element.child(custom_fields);
    }

    element
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::fields::FieldMap;

    use super::*;

    fn descriptor(fields: FieldMap) -> TestCase {
        TestCase {
            name: "test_it_works".to_owned(),
            parent_class: Some("FeatureTestCase".to_owned()),
            testmodule: "tests/test_feature.py".to_owned(),
            docstring: Some("Test feature docstring".to_owned()),
            line: None,
            fields,
        }
    }

    fn field(name: &str) -> (String, Value) {
        (name.to_owned(), Value::String(name.to_owned()))
    }

    #[test]
    fn property_is_a_self_closed_pair_of_attributes() {
        assert_eq!(
            create_xml_property("name", "value").to_xml().unwrap(),
            r#"<property name="name" value="value"/>"#,
        );
    }

    #[test]
    fn attributes_are_sorted_by_attribute_name() {
        let fields = [field("status"), field("id"), field("approvers")]
            .into_iter()
            .collect();
        let generated = create_xml_testcase(&Config::default(), &descriptor(fields), None)
            .to_xml()
            .unwrap();
        assert!(generated.starts_with(
            r#"<testcase approver-ids="approvers" id="id" status-id="status">"#,
        ));
    }

    #[test]
    fn docstring_backs_an_absent_description_field() {
        let fields = [field("title")].into_iter().collect();
        let generated = create_xml_testcase(&Config::default(), &descriptor(fields), None)
            .to_xml()
            .unwrap();
        assert!(generated.contains(
            "<title>title</title>\
             <description>Test feature docstring</description>",
        ));
    }

    #[test]
    fn requirement_field_links_a_work_item() {
        let fields = [field("requirement")].into_iter().collect();
        let generated = create_xml_testcase(&Config::default(), &descriptor(fields), None)
            .to_xml()
            .unwrap();
        assert!(generated.contains(
            r#"<linked-work-items><linked-work-item lookup-method="name" role-id="verifies" workitem-id="requirement"/></linked-work-items>"#,
        ));
    }

    #[test]
    fn no_custom_fields_element_without_custom_fields() {
        let fields = [field("title")].into_iter().collect();
        let generated = create_xml_testcase(&Config::default(), &descriptor(fields), None)
            .to_xml()
            .unwrap();
        assert!(!generated.contains("custom-fields"));
    }

    #[test]
    fn automation_script_format_fills_the_absent_field() {
        let mut testcase = descriptor(FieldMap::new());
        testcase.line = Some(42);
        let generated = create_xml_testcase(
            &Config::default(),
            &testcase,
            Some("{path}#{line_number}"),
        )
        .to_xml()
        .unwrap();
        assert!(generated.contains(
            r#"<custom-field content="tests/test_feature.py#42" id="automation_script"/>"#,
        ));
    }

    #[test]
    fn automation_script_format_never_overwrites_the_field() {
        let mut testcase =
            descriptor([field("automation_script")].into_iter().collect());
        testcase.line = Some(42);
        let generated = create_xml_testcase(
            &Config::default(),
            &testcase,
            Some("{path}#{line_number}"),
        )
        .to_xml()
        .unwrap();
        assert!(generated.contains(
            r#"<custom-field content="automation_script" id="automation_script"/>"#,
        ));
    }
}
