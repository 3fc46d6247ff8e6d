use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use crate::core::{Color, Vec};
use crate::reader::error::{ParseError, ParseResult};

/// The values following a key on one line of scene text, e.g. `0 1 2` after `O=`.
///
/// Each `next_*` call consumes tokens; whatever is left when the key's handler returns is
/// discarded with the rest of the line.
pub struct Tokens<'a> {
    line: usize,
    key: &'a str,
    iter: SplitWhitespace<'a>,
    base_dir: Option<&'a Path>,
}

impl<'a> Tokens<'a> {
    pub fn new(line: usize, key: &'a str, values: &'a str) -> Tokens<'a> {
        Tokens {
            line,
            key,
            iter: values.split_whitespace(),
            base_dir: None,
        }
    }

    /// Directory that relative file names (textures) are resolved against.
    pub fn with_base_dir(mut self, base_dir: Option<&'a Path>) -> Tokens<'a> {
        self.base_dir = base_dir;
        self
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_word(&mut self) -> ParseResult<&'a str> {
        match self.iter.next() {
            Some(word) => Ok(word),
            None => Err(ParseError::MissingValue {
                line: self.line,
                key: self.key.to_string(),
            }),
        }
    }

    pub fn next_f64(&mut self) -> ParseResult<f64> {
        let word = self.next_word()?;
        word.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            key: self.key.to_string(),
            value: word.to_string(),
        })
    }

    pub fn next_vec(&mut self) -> ParseResult<Vec> {
        let x = self.next_f64()?;
        let y = self.next_f64()?;
        let z = self.next_f64()?;
        Ok(Vec::new(x, y, z))
    }

    pub fn next_color(&mut self) -> ParseResult<Color> {
        let r = self.next_f64()?;
        let g = self.next_f64()?;
        let b = self.next_f64()?;
        Ok(Color::new(r, g, b))
    }

    /// Reads a file name and resolves it against the base directory.
    pub fn next_path(&mut self) -> ParseResult<PathBuf> {
        let word = self.next_word()?;
        let path = Path::new(word);
        Ok(match self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_vec_and_number() {
        let mut tokens = Tokens::new(3, "O=", " 1 -2.5  3e1 ");
        assert_eq!(tokens.next_vec().unwrap(), Vec::new(1.0, -2.5, 30.0));
        assert!(matches!(tokens.next_f64(), Err(ParseError::MissingValue { line: 3, .. })));
    }

    #[test]
    fn test_invalid_number() {
        let mut tokens = Tokens::new(1, "R=", "abc");
        match tokens.next_f64() {
            Err(ParseError::InvalidNumber { key, value, .. }) => {
                assert_eq!(key, "R=");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_path_resolution() {
        let dir = Path::new("scenes");
        let mut tokens = Tokens::new(1, "texture=", "wood.bmp").with_base_dir(Some(dir));
        assert_eq!(tokens.next_path().unwrap(), Path::new("scenes").join("wood.bmp"));
    }
}
