// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Importer XML output: element model, testcase builders and whole
//! documents.
//!
//! Split across focused modules:
//! - `element`: generic element tree with deterministic serialization;
//! - `testcase`: `<property>`/`<testcase>` builders driven by a
//!   [`Config`](crate::Config);
//! - `document`: the test-run and test-case importer payloads.

mod document;
mod element;
mod testcase;

pub use self::{
    document::{
        create_test_case_document, create_test_run, sanitize_test_run_id,
        TestCaseOptions, TestRunOptions,
    },
    element::{write_document, Element},
    testcase::{create_xml_property, create_xml_testcase},
};
