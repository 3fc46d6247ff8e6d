use crate::core::math;
use std::fmt;
use std::fmt::Display;
use std::ops::{Add, AddAssign, Mul, Sub};

/// An RGB triple. Channels are not clamped; call `confined` before writing to an 8-bit target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    pub fn black() -> Color {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn white() -> Color {
        Self::new(1.0, 1.0, 1.0)
    }

    /**
     * Builds a color from 8-bit channels, mapping a byte c to c / 256.
     */
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Color {
        Self::new(r as f64 / 256.0, g as f64 / 256.0, b as f64 / 256.0)
    }

    /**
     * Clamps every channel to [0, 1].
     */
    pub fn confined(&self) -> Color {
        Self::new(math::clamp_unit(self.r), math::clamp_unit(self.g), math::clamp_unit(self.b))
    }

    /**
     * Converts to 8-bit channels after clamping. Inverse of `from_bytes` for exact values.
     */
    pub fn to_bytes(&self) -> [u8; 3] {
        let c = self.confined();
        let byte = |x: f64| f64::min(x * 256.0, 255.0) as u8;
        [byte(c.r), byte(c.g), byte(c.b)]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Sub for Color {
    type Output = Color;
    fn sub(self, rhs: Color) -> Color {
        Color::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul for Color {
    type Output = Color;
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;
    fn mul(self, rhs: f64) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}
