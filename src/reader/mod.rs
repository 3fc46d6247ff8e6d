//! Reads primitives from line-oriented scene text.

mod error;
pub use crate::reader::error::{ParseError, ParseResult};

mod scene;
pub use crate::reader::scene::{read_primitives, read_scene_file};

mod tokens;
pub use crate::reader::tokens::Tokens;
