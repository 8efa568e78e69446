// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `polarize` binary: Polarion importer XML generation from the command
//! line.

use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
    process,
};

use tracing_subscriber::EnvFilter;

use polarize::{
    cli::{Command, Opts, Styles, TestCaseArgs, TestResultsArgs, TestRunArgs},
    collect::{Collector as _, JsonCollector},
    export::{self, Element, TestCaseOptions, TestRunOptions},
    junit::{self, Status},
    load_custom_fields, Config, Result,
};

fn main() {
    let opts = Opts::parsed();
    init_tracing(opts.verbose);
    if let Err(err) = run(opts) {
        eprintln!("{}", Styles::new().err(err.to_string()));
        process::exit(1);
    }
}

fn run(opts: Opts) -> Result<()> {
    match opts.command {
        Command::TestCase(args) => test_case(&args),
        Command::TestResults(args) => test_results(&args),
        Command::TestRun(args) => test_run(&args),
    }
}

/// Prints a styled per-status summary of a jUnit report.
fn test_results(args: &TestResultsArgs) -> Result<()> {
    let report = File::open(&args.path)?;
    let results = junit::parse_junit(BufReader::new(report))?;
    let summary = junit::summarize(&results);

    let styles = Styles::new();
    for status in Status::ALL {
        let count = summary.count(status);
        if count == 0 {
            continue;
        }
        let line = format!("{}: {count}", status.label());
        let line = match status {
            Status::Passed => styles.ok(line),
            Status::Skipped => styles.skipped(line),
            Status::Failure | Status::Error => styles.err(line),
        };
        println!("{line}");
    }
    Ok(())
}

/// Builds the test-run importer document out of a jUnit report joined with
/// collected test cases, and writes it to the output path.
fn test_run(args: &TestRunArgs) -> Result<()> {
    let report = File::open(&args.junit_path)?;
    let results = junit::parse_junit(BufReader::new(report))?;
    let collected =
        JsonCollector.collect_tests(&args.source_code_path, &args.markers)?;

    let options = TestRunOptions {
        project_id: args.project_id.clone(),
        user_id: args.user_id.clone(),
        dry_run: args.dry_run,
        include_skipped: !args.no_include_skipped,
        lookup_method: args.lookup_method.clone(),
        status: args.status.clone(),
        test_run_id: args.test_run_id.clone(),
        test_run_template_id: args.test_run_template_id.clone(),
        test_run_title: args.test_run_title.clone(),
        test_run_type_id: args.test_run_type_id.clone(),
        custom_fields: load_custom_fields(&args.custom_fields),
        response_properties: args.response_property.clone(),
    };
    let (document, diagnostics) = export::create_test_run(
        &Config::default(),
        &results,
        &collected,
        &options,
    );
    for line in diagnostics {
        println!("{line}");
    }
    tracing::info!(
        results = results.len(),
        output = %args.output_path.display(),
        "writing test-run importer document",
    );
    write_output(&document, &args.output_path)
}

/// Builds the test-case importer document out of collected test cases and
/// writes it to the output path.
fn test_case(args: &TestCaseArgs) -> Result<()> {
    let collected =
        JsonCollector.collect_tests(&args.source_code_path, &args.markers)?;
    let document = export::create_test_case_document(
        &Config::default(),
        &collected,
        &TestCaseOptions {
            project_id: args.project_id.clone(),
            automation_script_format: args.automation_script_format.clone(),
            response_properties: args.response_property.clone(),
        },
    );
    tracing::info!(
        output = %args.output_path.display(),
        "writing test-case importer document",
    );
    write_output(&document, &args.output_path)
}

fn write_output(document: &Element, path: &Path) -> Result<()> {
    let out = File::create(path)?;
    export::write_document(document, out)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}
