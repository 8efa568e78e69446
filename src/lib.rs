// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Polarion importer XML generation out of test-authoring metadata.
//!
//! The pipeline is a stateless, single-pass transformation: docstring
//! field mappings and [jUnit reports][1] flow through the [`fields`],
//! [`steps`] and [`junit`] parsers into the [`export`] builders, which
//! produce the XML documents the Polarion importers consume. Gathering
//! test cases out of source files belongs to an external collector; the
//! [`collect`] module only defines that seam.
//!
//! Every transformation is a pure, synchronous function with no shared
//! mutable state, so callers may invoke them repeatedly or in parallel.
//!
//! [1]: https://llg.cubic.org/docs/junit

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod export;
pub mod fields;
pub mod junit;
pub mod steps;

pub use self::{
    config::Config,
    error::{Error, Result},
    fields::{field_text, load_custom_fields, FieldMap},
    junit::{parse_junit, summarize, Status, Summary, TestResult},
    steps::{map_steps, StepPair},
};
