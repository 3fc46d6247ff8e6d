use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::geom::{Primitive, Shape, Surface};
use crate::material::Material;
use crate::reader::error::{ParseError, ParseResult};
use crate::reader::tokens::Tokens;

enum Block {
    Top,
    Primitive {
        line: usize,
        shape: Shape,
        material: Material,
    },
    Skipped {
        line: usize,
    },
}

/**
 * Reads every `primitive <kind> ... end` block in the scene text, in order. Other blocks
 * (camera, lights, background) are skipped whole.
 *
 * Relative texture paths are resolved against `base_dir`, or the working directory when it is
 * None.
 */
pub fn read_primitives(text: &str, base_dir: Option<&Path>) -> ParseResult<Vec<Primitive>> {
    let mut prims = vec![];
    let mut block = Block::Top;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (key, values) = match trimmed.split_once(char::is_whitespace) {
            Some((key, values)) => (key, values),
            None => (trimmed, ""),
        };

        block = match block {
            Block::Top => open_block(line, key, values)?,
            Block::Skipped { .. } if key == "end" => Block::Top,
            skipped @ Block::Skipped { .. } => skipped,
            Block::Primitive { line: start, shape, material } if key == "end" => {
                prims.push(close_primitive(start, line, shape, material)?);
                Block::Top
            }
            Block::Primitive { line: start, mut shape, mut material } => {
                let mut tokens = Tokens::new(line, key, values).with_base_dir(base_dir);
                if !shape.input(key, &mut tokens)? && !material.input(key, &mut tokens)? {
                    debug!("line {}: `{}` is not used by {}, ignored", line, key, shape.kind());
                }
                Block::Primitive { line: start, shape, material }
            }
        };
    }

    match block {
        Block::Top => Ok(prims),
        Block::Primitive { line, .. } | Block::Skipped { line, .. } => {
            Err(ParseError::UnterminatedBlock { line })
        }
    }
}

/// Reads the primitives of a scene file. Textures are looked up next to the file.
pub fn read_scene_file<P: AsRef<Path>>(path: P) -> ParseResult<Vec<Primitive>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let prims = read_primitives(&text, path.parent())?;
    debug!("read {} primitives from {}", prims.len(), path.display());
    Ok(prims)
}

fn open_block(line: usize, key: &str, values: &str) -> ParseResult<Block> {
    match key {
        "primitive" => {
            let kind = values.split_whitespace().next().unwrap_or("");
            let shape = Shape::for_kind(kind).ok_or_else(|| ParseError::UnknownPrimitive {
                line,
                kind: kind.to_string(),
            })?;
            Ok(Block::Primitive { line, shape, material: Material::new() })
        }
        "end" => {
            debug!("line {}: stray `end`, ignored", line);
            Ok(Block::Top)
        }
        _ => {
            debug!("line {}: skipping `{}` block", line, key);
            Ok(Block::Skipped { line })
        }
    }
}

fn close_primitive(start: usize, end: usize, shape: Shape, material: Material)
    -> ParseResult<Primitive>
{
    if !shape.is_supported() {
        warn!("line {}: {} primitives are never hit by rays", start, shape.kind());
    }
    Primitive::new(shape, material).map_err(|source| ParseError::Geometry { line: end, source })
}
