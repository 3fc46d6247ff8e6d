mod color;
pub use crate::core::color::Color;

mod math;
pub use crate::core::math::*;

mod random;
pub use crate::core::random::ExpSampleDisk;

mod ray;
pub use crate::core::ray::Ray;

mod vector;
pub use crate::core::vector::Vec;
