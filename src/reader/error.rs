//! Error types for reading primitives from scene text.

use std::io;

use thiserror::Error;

use crate::geom::GeomError;
use crate::material::TextureError;

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading primitive descriptions.
///
/// Line numbers are 1-indexed and refer to the line holding the offending key.
#[derive(Error, Debug)]
pub enum ParseError {
    /// I/O error reading the scene file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A key was present but its values ran out early.
    #[error("line {line}: missing value for `{key}`")]
    MissingValue {
        line: usize,
        key: String,
    },

    /// A value could not be read as a number.
    #[error("line {line}: `{value}` is not a number (for `{key}`)")]
    InvalidNumber {
        line: usize,
        key: String,
        value: String,
    },

    /// `primitive` named a shape this crate does not know.
    #[error("line {line}: unknown primitive kind `{kind}`")]
    UnknownPrimitive {
        line: usize,
        kind: String,
    },

    /// A block was opened but the input ended before its `end`.
    #[error("line {line}: block is never closed with `end`")]
    UnterminatedBlock {
        line: usize,
    },

    /// A bezier profile received more control points than degree 5 allows.
    #[error("line {line}: at most {max} bezier control points are supported")]
    TooManyControlPoints {
        line: usize,
        max: usize,
    },

    /// The texture named by `texture=` could not be loaded.
    #[error("line {line}: {source}")]
    Texture {
        line: usize,
        #[source]
        source: TextureError,
    },

    /// The primitive's parameters describe degenerate geometry.
    #[error("line {line}: {source}")]
    Geometry {
        line: usize,
        #[source]
        source: GeomError,
    },
}

impl ParseError {
    /// The line the error refers to, if it came from the scene text.
    pub fn line(&self) -> Option<usize> {
        match *self {
            ParseError::Io(_) => None,
            ParseError::MissingValue { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::UnknownPrimitive { line, .. }
            | ParseError::UnterminatedBlock { line }
            | ParseError::TooManyControlPoints { line, .. }
            | ParseError::Texture { line, .. }
            | ParseError::Geometry { line, .. } => Some(line),
        }
    }
}
