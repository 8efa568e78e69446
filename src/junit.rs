// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Streaming parser of [jUnit XML reports][1] and the per-status summary.
//!
//! [1]: https://llg.cubic.org/docs/junit

use std::{borrow::Cow, collections::HashMap, io::BufRead};

use derive_more::with_trait::{Deref, Display};
use itertools::Itertools as _;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::error::Result;

const TESTCASE: &[u8] = b"testcase";
const SKIPPED: &[u8] = b"skipped";
const FAILURE: &[u8] = b"failure";
const ERROR: &[u8] = b"error";

/// Outcome of a single test case in a [jUnit report][1].
///
/// [`Display`]s as the lowercase status string the report schema uses.
///
/// [1]: https://llg.cubic.org/docs/junit
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Status {
    /// Test case without a `skipped`, `failure` or `error` child.
    #[display("passed")]
    Passed,

    /// Test case carrying a `skipped` child.
    #[display("skipped")]
    Skipped,

    /// Test case carrying a `failure` child.
    #[display("failure")]
    Failure,

    /// Test case carrying an `error` child.
    #[display("error")]
    Error,
}

impl Status {
    /// All statuses, ordered the way summaries are reported.
    pub const ALL: [Self; 4] =
        [Self::Error, Self::Failure, Self::Passed, Self::Skipped];

    /// Capitalized label for user-facing summary lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Skipped => "Skipped",
            Self::Failure => "Failure",
            Self::Error => "Error",
        }
    }
}

/// One test case record out of a [jUnit report][1].
///
/// Every record carries `classname`, `name` and a [`Status`]; the remaining
/// attributes are copied only when the report provides them. Skipped,
/// failed and errored cases carry the status child's `message`, failed and
/// errored ones additionally its `type`.
///
/// [1]: https://llg.cubic.org/docs/junit
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestResult {
    /// Dotted class/module path of the test case.
    pub classname: String,

    /// Test case name.
    pub name: String,

    /// Classified outcome.
    pub status: Status,

    /// `message` attribute of the status child, if any.
    pub message: Option<String>,

    /// `type` attribute of a `failure`/`error` child, if any.
    pub kind: Option<String>,

    /// Source file of the test case.
    pub file: Option<String>,

    /// Source line of the test case.
    pub line: Option<String>,

    /// Execution time of the test case.
    pub time: Option<String>,
}

impl TestResult {
    fn open(e: &BytesStart<'_>) -> Result<Self> {
        Ok(Self {
            classname: attr(e, "classname")?.unwrap_or_default(),
            name: attr(e, "name")?.unwrap_or_default(),
            status: Status::Passed,
            message: None,
            kind: None,
            file: attr(e, "file")?,
            line: attr(e, "line")?,
            time: attr(e, "time")?,
        })
    }

    /// Classifies this record by the status child element found inside its
    /// `testcase`. The first status child in document order wins.
    fn classify(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if self.status != Status::Passed {
            return Ok(());
        }
        match e.name().as_ref() {
            SKIPPED => {
                self.status = Status::Skipped;
                self.message = attr(e, "message")?;
            }
            FAILURE => {
                self.status = Status::Failure;
                self.message = attr(e, "message")?;
                self.kind = attr(e, "type")?;
            }
            ERROR => {
                self.status = Status::Error;
                self.message = attr(e, "message")?;
                self.kind = attr(e, "type")?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Walks a [jUnit report][1] and produces one [`TestResult`] per `testcase`
/// element, in document order.
///
/// # Errors
///
/// Fails on malformed XML. There is no recovery: a report that cannot be
/// parsed aborts the whole invocation.
///
/// [1]: https://llg.cubic.org/docs/junit
pub fn parse_junit<R: BufRead>(xml: R) -> Result<Vec<TestResult>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut results = Vec::new();
    let mut current: Option<TestResult> = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => match e.name().as_ref() {
                TESTCASE => current = Some(TestResult::open(&e)?),
                SKIPPED | FAILURE | ERROR => {
                    if let Some(result) = current.as_mut() {
                        result.classify(&e)?;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                TESTCASE => results.push(TestResult::open(&e)?),
                SKIPPED | FAILURE | ERROR => {
                    if let Some(result) = current.as_mut() {
                        result.classify(&e)?;
                    }
                }
                _ => {}
            },
            Event::End(e) => {
                if e.name().as_ref() == TESTCASE {
                    results.extend(current.take());
                }
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(results)
}

/// Per-[`Status`] counts over a set of [`TestResult`]s.
///
/// Statuses without any record are simply absent; [`Summary::count`] reads
/// them as zero.
#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct Summary(HashMap<Status, usize>);

impl Summary {
    /// Number of records with the given [`Status`].
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.0.get(&status).copied().unwrap_or_default()
    }

    /// Total number of summarized records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

/// Aggregates [`TestResult`]s into a per-status [`Summary`].
#[must_use]
pub fn summarize(results: &[TestResult]) -> Summary {
    Summary(results.iter().map(|r| r.status).counts())
}

/// Reads an attribute of an element as an unescaped string.
fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    Ok(e.try_get_attribute(name)?
        .map(|a| a.unescape_value())
        .transpose()?
        .map(Cow::into_owned))
}
