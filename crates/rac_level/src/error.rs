//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

use crate::objects::ObjectKind;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Game id not one of the four supported releases
    #[error("unsupported game id {0}, expected 1..=4")]
    UnsupportedGame(u32),

    /// Section buffer too short for the claimed record count
    #[error("{kind} section truncated: need {expected} bytes, have {actual}")]
    TruncatedSection {
        kind: ObjectKind,
        expected: usize,
        actual: usize,
    },

    /// Record matrix contained NaN or infinite components
    #[error("{kind} record {index} contains a non-finite transform matrix")]
    MalformedMatrix { kind: ObjectKind, index: usize },

    /// Language text ran past the end of the section without a terminator
    #[error("language text starting at offset {offset:#x} has no zero terminator")]
    UnterminatedText { offset: usize },

    /// An object of the wrong kind was passed to a section encoder
    #[error("cannot encode a {actual} object into a {expected} section")]
    SectionKindMismatch {
        expected: ObjectKind,
        actual: ObjectKind,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
