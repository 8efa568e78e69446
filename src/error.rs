// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Consolidated error handling types for the crate.

use std::io;

use derive_more::{Display, Error};

/// Top-level error type for all import-XML generation operations.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// I/O error during file operations or output writing.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Malformed XML input or a failure while emitting XML output.
    ///
    /// A malformed [jUnit report][1] is fatal for the invocation and
    /// propagates here uncaught.
    ///
    /// [1]: https://llg.cubic.org/docs/junit
    #[display("XML processing failed: {_0}")]
    Xml(quick_xml::Error),

    /// Failure to decode a JSON document of collected test cases.
    #[display("failed to decode test case descriptors: {_0}")]
    Json(serde_json::Error),

    /// CLI option value not matching the `key=value` shape.
    #[display("{_0} needs to be in format key=value")]
    InvalidOption(#[error(not(source))] String),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an [`Error::InvalidOption`] for the named CLI option.
    #[must_use]
    pub fn invalid_option(option: impl Into<String>) -> Self {
        Self::InvalidOption(option.into())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.into())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Self::Xml(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
