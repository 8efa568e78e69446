// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for composing CLI options.
//!
//! The main thing in this module is [`Opts`], which composes the strongly
//! typed options of every subcommand into a single CLI. `key=value` options
//! are validated here, before any transformation runs.

use std::{borrow::Cow, path::PathBuf};

use clap::{Parser, Subcommand};
use console::Style;

use crate::error::{Error, Result};

/// Root CLI (command line interface) of the importer XML generator.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "polarize",
    about = "Generate Polarion importer XML out of test metadata",
    version
)]
pub struct Opts {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Increases logging verbosity (-v: info, -vv: debug, -vvv: trace).
    #[arg(
        long,
        short = 'v',
        global = true,
        action = clap::ArgAction::Count
    )]
    pub verbose: u8,
}

impl Opts {
    /// Shortcut for [`clap::Parser::parse()`], which doesn't require the
    /// trait being imported.
    #[must_use]
    pub fn parsed() -> Self {
        <Self as Parser>::parse()
    }
}

/// Subcommands of the importer XML generator.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Generates the test-case importer document out of collected test
    /// cases.
    TestCase(TestCaseArgs),

    /// Summarizes a jUnit report per test case status.
    TestResults(TestResultsArgs),

    /// Generates the test-run importer document out of a jUnit report.
    TestRun(TestRunArgs),
}

/// CLI options of the `test-case` subcommand.
#[derive(Clone, Debug, clap::Args)]
pub struct TestCaseArgs {
    /// Template filling the `automation_script` custom field, e.g.
    /// `{path}#{line_number}`.
    #[arg(long, value_name = "TEMPLATE")]
    pub automation_script_format: Option<String>,

    /// Response property to carry in the importer document.
    #[arg(
        long = "response-property",
        value_name = "KEY=VALUE",
        value_parser = response_property
    )]
    pub response_property: Vec<(String, String)>,

    /// Keeps only test cases carrying the given marker.
    #[arg(long = "marker", value_name = "MARKER")]
    pub markers: Vec<String>,

    /// Path the test cases were collected from.
    pub source_code_path: PathBuf,

    /// Polarion project to import into.
    pub project_id: String,

    /// File the importer document is written to.
    pub output_path: PathBuf,
}

/// CLI options of the `test-results` subcommand.
#[derive(Clone, Debug, clap::Args)]
pub struct TestResultsArgs {
    /// jUnit report to summarize.
    #[arg(long, default_value = "junit-results.xml")]
    pub path: PathBuf,
}

/// CLI options of the `test-run` subcommand.
#[derive(Clone, Debug, clap::Args)]
pub struct TestRunArgs {
    /// Custom test run field, as `key=value` or a JSON object.
    #[arg(long = "custom-fields", value_name = "KEY=VALUE|JSON")]
    pub custom_fields: Vec<String>,

    /// Response property to carry in the importer document.
    #[arg(
        long = "response-property",
        value_name = "KEY=VALUE",
        value_parser = response_property
    )]
    pub response_property: Vec<(String, String)>,

    /// Only simulates the import.
    #[arg(long)]
    pub dry_run: bool,

    /// Imports skipped test cases (default).
    #[arg(long, overrides_with = "no_include_skipped")]
    pub include_skipped: bool,

    /// Leaves skipped test cases out of the import.
    #[arg(long = "no-include-skipped")]
    pub no_include_skipped: bool,

    /// How the importer looks test cases up.
    #[arg(long, default_value = "custom")]
    pub lookup_method: String,

    /// Status of the test run: `finished` or `inprogress`.
    #[arg(long, default_value = "finished")]
    pub status: String,

    /// Identifier of the test run.
    #[arg(long)]
    pub test_run_id: Option<String>,

    /// Identifier of the template the test run is created from.
    #[arg(long)]
    pub test_run_template_id: Option<String>,

    /// Title of the test run.
    #[arg(long)]
    pub test_run_title: Option<String>,

    /// Type identifier of the test run.
    #[arg(long)]
    pub test_run_type_id: Option<String>,

    /// Keeps only test cases carrying the given marker.
    #[arg(long = "marker", value_name = "MARKER")]
    pub markers: Vec<String>,

    /// jUnit report with the test results to import.
    pub junit_path: PathBuf,

    /// Path the test cases were collected from.
    pub source_code_path: PathBuf,

    /// User the import runs as.
    pub user_id: String,

    /// Polarion project to import into.
    pub project_id: String,

    /// File the importer document is written to.
    pub output_path: PathBuf,
}

/// Splits a `key=value` option value on its first `=`, so values may
/// themselves contain `=`.
///
/// # Errors
///
/// Fails with [`Error::InvalidOption`] naming `option` when `value` carries
/// no `=` or an empty key.
pub fn parse_key_value(option: &str, value: &str) -> Result<(String, String)> {
    match value.split_once('=') {
        Some((key, rest)) if !key.is_empty() => {
            Ok((key.to_owned(), rest.to_owned()))
        }
        _ => Err(Error::invalid_option(option)),
    }
}

/// Validates an optional `key=value` CLI option: an omitted option passes
/// through unchanged, a present one is split by [`parse_key_value`].
///
/// # Errors
///
/// Fails with [`Error::InvalidOption`] naming `option` on a present value
/// not matching the `key=value` shape.
pub fn validate_key_value_option(
    option: &str,
    value: Option<&str>,
) -> Result<Option<(String, String)>> {
    value.map(|v| parse_key_value(option, v)).transpose()
}

/// [`clap`] value parser for `--response-property`.
fn response_property(value: &str) -> Result<(String, String)> {
    parse_key_value("--response-property", value)
}

/// [`Style`]s for terminal output.
#[derive(Debug)]
pub struct Styles {
    /// [`Style`] for rendering passed counts.
    pub ok: Style,

    /// [`Style`] for rendering skipped counts.
    pub skipped: Style,

    /// [`Style`] for rendering errors and failed counts.
    pub err: Style,

    /// Indicates whether the terminal was detected.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            ok: Style::new().green(),
            skipped: Style::new().cyan(),
            err: Style::new().red(),
            is_present: console::user_attended()
                && console::colors_enabled(),
        }
    }
}

impl Styles {
    /// Creates new [`Styles`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// If terminal is present colors `input` with [`Styles::ok`] color or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn ok<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        if self.is_present {
            self.ok.apply_to(input.into()).to_string().into()
        } else {
            input.into()
        }
    }

    /// If terminal is present colors `input` with [`Styles::skipped`] color
    /// or leaves "as is" otherwise.
    #[must_use]
    pub fn skipped<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        if self.is_present {
            self.skipped.apply_to(input.into()).to_string().into()
        } else {
            input.into()
        }
    }

    /// If terminal is present colors `input` with [`Styles::err`] color or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn err<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        if self.is_present {
            self.err.apply_to(input.into()).to_string().into()
        } else {
            input.into()
        }
    }
}
