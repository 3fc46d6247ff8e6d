use crate::core;
use crate::core::Color;

use std::fs;
use std::io;
use std::io::{Cursor, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use thiserror::Error;

const BMP_MAGIC: u16 = 0x4D42; // "BM"
const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const COMPRESSION_NONE: u32 = 0;

/// Errors that can occur while loading or saving a texture bitmap.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("texture I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a BMP file (magic {0:#06x})")]
    BadMagic(u16),

    #[error("unsupported BMP layout: {bit_count} bits per pixel, compression {compression}")]
    Unsupported {
        bit_count: u16,
        compression: u32,
    },

    #[error("invalid BMP dimensions {width}x{height}")]
    InvalidDimensions {
        width: i32,
        height: i32,
    },

    #[error("BMP pixel data needs {needed} bytes, file has {available}")]
    Truncated {
        needed: u64,
        available: u64,
    },
}

/**
 * An RGB bitmap used as a surface texture.
 *
 * Texels are stored row by row starting from the bottom row, which is the order uncompressed BMP
 * files use on disk. Row indices therefore grow upwards in the image.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: std::vec::Vec<[u8; 3]>,
}

impl Texture {
    /// Creates a texture of the given size filled with one color.
    pub fn filled(width: usize, height: usize, color: Color) -> Texture {
        Texture {
            width,
            height,
            texels: vec![color.to_bytes(); width * height],
        }
    }

    /// Creates a texture by evaluating `f(row, col)` for every texel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Texture
        where F: Fn(usize, usize) -> Color
    {
        let mut texels = std::vec::Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                texels.push(f(row, col).to_bytes());
            }
        }
        Texture { width, height, texels }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Texture, TextureError> {
        let bytes = fs::read(path)?;
        Self::from_bmp_bytes(&bytes)
    }

    /**
     * Decodes an uncompressed 24- or 32-bit BMP. Top-down files (negative height) are flipped so
     * that row 0 is always the bottom row.
     */
    pub fn from_bmp_bytes(bytes: &[u8]) -> Result<Texture, TextureError> {
        let mut cursor = Cursor::new(bytes);

        let magic = cursor.read_u16::<LittleEndian>()?;
        if magic != BMP_MAGIC {
            return Err(TextureError::BadMagic(magic));
        }
        let _file_size = cursor.read_u32::<LittleEndian>()?;
        let _reserved = cursor.read_u32::<LittleEndian>()?;
        let data_offset = cursor.read_u32::<LittleEndian>()?;

        let _info_size = cursor.read_u32::<LittleEndian>()?;
        let width = cursor.read_i32::<LittleEndian>()?;
        let raw_height = cursor.read_i32::<LittleEndian>()?;
        let _planes = cursor.read_u16::<LittleEndian>()?;
        let bit_count = cursor.read_u16::<LittleEndian>()?;
        let compression = cursor.read_u32::<LittleEndian>()?;

        if (bit_count != 24 && bit_count != 32) || compression != COMPRESSION_NONE {
            return Err(TextureError::Unsupported { bit_count, compression });
        }
        if width <= 0 || raw_height == 0 || raw_height == i32::MIN {
            return Err(TextureError::InvalidDimensions { width, height: raw_height });
        }

        let top_down = raw_height < 0;
        let width = width as usize;
        let height = raw_height.unsigned_abs() as usize;
        let bytes_per_pixel = bit_count as usize / 8;
        let row_padding = (4 - (width * bytes_per_pixel) % 4) % 4;

        // The header sizes must be backed by pixel data before anything is allocated.
        let row_size = (width as u64) * bytes_per_pixel as u64 + row_padding as u64;
        let needed = row_size.checked_mul(height as u64)
            .and_then(|n| n.checked_add(data_offset as u64))
            .unwrap_or(u64::MAX);
        let available = bytes.len() as u64;
        if needed > available {
            return Err(TextureError::Truncated { needed, available });
        }

        cursor.set_position(data_offset as u64);
        let mut rows = std::vec::Vec::with_capacity(height);
        for _ in 0..height {
            let mut row = std::vec::Vec::with_capacity(width);
            for _ in 0..width {
                let b = cursor.read_u8()?;
                let g = cursor.read_u8()?;
                let r = cursor.read_u8()?;
                if bytes_per_pixel == 4 {
                    let _alpha = cursor.read_u8()?;
                }
                row.push([r, g, b]);
            }
            for _ in 0..row_padding {
                cursor.read_u8()?;
            }
            rows.push(row);
        }
        if top_down {
            rows.reverse();
        }

        Ok(Texture {
            width,
            height,
            texels: rows.into_iter().flatten().collect(),
        })
    }

    /// Encodes the texture as an uncompressed, bottom-up 24-bit BMP.
    pub fn to_bmp_bytes(&self) -> std::vec::Vec<u8> {
        let row_padding = (4 - (self.width * 3) % 4) % 4;
        let image_size = ((self.width * 3 + row_padding) * self.height) as u32;
        let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

        let mut buffer = std::vec::Vec::with_capacity((data_offset + image_size) as usize);
        // Writes into a Vec cannot fail.
        let _ = self.write_bmp_to(&mut buffer, data_offset, image_size, row_padding);
        buffer
    }

    fn write_bmp_to<W: Write>(&self, out: &mut W, data_offset: u32, image_size: u32,
        row_padding: usize) -> io::Result<()>
    {
        out.write_u16::<LittleEndian>(BMP_MAGIC)?;
        out.write_u32::<LittleEndian>(data_offset + image_size)?;
        out.write_u32::<LittleEndian>(0)?;
        out.write_u32::<LittleEndian>(data_offset)?;

        out.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
        out.write_i32::<LittleEndian>(self.width as i32)?;
        out.write_i32::<LittleEndian>(self.height as i32)?;
        out.write_u16::<LittleEndian>(1)?; // Planes.
        out.write_u16::<LittleEndian>(24)?;
        out.write_u32::<LittleEndian>(COMPRESSION_NONE)?;
        out.write_u32::<LittleEndian>(image_size)?;
        out.write_i32::<LittleEndian>(2835)?; // 72 DPI.
        out.write_i32::<LittleEndian>(2835)?;
        out.write_u32::<LittleEndian>(0)?;
        out.write_u32::<LittleEndian>(0)?;

        for row in self.texels.chunks(self.width.max(1)) {
            for &[r, g, b] in row {
                out.write_all(&[b, g, r])?;
            }
            for _ in 0..row_padding {
                out.write_u8(0)?;
            }
        }
        Ok(())
    }

    pub fn write_bmp<P: AsRef<Path>>(&self, path: P) -> Result<(), TextureError> {
        fs::write(path, self.to_bmp_bytes())?;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The texel at (row, col); row 0 is the bottom row.
    pub fn color(&self, row: usize, col: usize) -> Color {
        let [r, g, b] = self.texels[row * self.width + col];
        Color::from_bytes(r, g, b)
    }

    /**
     * Bilinearly samples the texture at (u, v), wrapping both coordinates. `u` runs along the
     * rows (height) and `v` along the columns (width), and the four texels around the sample
     * position are blended.
     */
    pub fn smooth_color(&self, u: f64, v: f64) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::black();
        }

        let fu = core::wrap_unit(u) * self.height as f64;
        let fv = core::wrap_unit(v) * self.width as f64;
        let u1 = (fu + core::EPS).floor();
        let v1 = (fv + core::EPS).floor();
        let rat_u = core::clamp_unit(u1 + 1.0 - fu);
        let rat_v = core::clamp_unit(v1 + 1.0 - fv);

        let h = self.height as i64;
        let w = self.width as i64;
        let row1 = (u1 as i64).rem_euclid(h) as usize;
        let row2 = (u1 as i64 + 1).rem_euclid(h) as usize;
        let col1 = (v1 as i64).rem_euclid(w) as usize;
        let col2 = (v1 as i64 + 1).rem_euclid(w) as usize;

        self.color(row1, col1) * (rat_u * rat_v)
            + self.color(row1, col2) * (rat_u * (1.0 - rat_v))
            + self.color(row2, col1) * ((1.0 - rat_u) * rat_v)
            + self.color(row2, col2) * ((1.0 - rat_u) * (1.0 - rat_v))
    }
}
