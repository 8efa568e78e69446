// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Seam to the external docstring collector.
//!
//! Gathering test cases out of source files is somebody else's job: this
//! module only defines the [`TestCase`] descriptor shape that job produces,
//! the [`Collector`] trait the rest of the crate consumes, and a
//! [`JsonCollector`] reading descriptors some external collector already
//! wrote down as JSON.

use std::{fs::File, io::BufReader, path::Path};

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::{error::Result, fields::FieldMap};

/// Collected test cases, keyed by the source file they came from, in
/// collection order.
pub type CollectedTests = LinkedHashMap<String, Vec<TestCase>>;

/// Descriptor of one authored test case, as produced by a collector.
///
/// The crate only reads these: it never constructs or mutates them outside
/// of deserialization.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TestCase {
    /// Test function name.
    pub name: String,

    /// Class holding the test function, if it is a method.
    #[serde(default)]
    pub parent_class: Option<String>,

    /// Path of the module holding the test function.
    pub testmodule: String,

    /// Raw docstring of the test function.
    #[serde(default)]
    pub docstring: Option<String>,

    /// Source line of the test function.
    #[serde(default)]
    pub line: Option<u64>,

    /// Fields already parsed out of the docstring.
    #[serde(default)]
    pub fields: FieldMap,
}

impl TestCase {
    /// Dotted class path this test case reports under in a jUnit report:
    /// the module path with separators dotted and the `.py` suffix dropped,
    /// extended with the parent class when there is one.
    #[must_use]
    pub fn classname(&self) -> String {
        let module =
            self.testmodule.trim_end_matches(".py").replace('/', ".");
        match &self.parent_class {
            Some(parent) => format!("{module}.{parent}"),
            None => module,
        }
    }
}

/// Source of collected [`TestCase`]s.
pub trait Collector {
    /// Collects the test cases found under `path`, keeping only those
    /// matching `markers` when any are given.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the shipped [`JsonCollector`] fails on an
    /// unreadable or undecodable descriptor file.
    fn collect_tests(
        &self,
        path: &Path,
        markers: &[String],
    ) -> Result<CollectedTests>;
}

/// [`Collector`] reading descriptors from a JSON document mapping source
/// file paths to arrays of [`TestCase`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCollector;

impl Collector for JsonCollector {
    fn collect_tests(
        &self,
        path: &Path,
        markers: &[String],
    ) -> Result<CollectedTests> {
        if !markers.is_empty() {
            // Marker filtering happened when the descriptors were written.
            tracing::debug!("ignoring markers {markers:?}: descriptors are pre-filtered");
        }
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
