//! Ray/primitive collision for a classic ray tracer.
//!
//! Scenes are lists of [`geom::Primitive`]s: a shape (sphere, plane, square, cube, cylinder or
//! a placeholder Bezier solid) paired with a [`material::Material`]. Each primitive answers
//! whether a ray hits it, where, with which normal, and what texture color lies there.

pub mod core;
pub mod geom;
pub mod logging;
pub mod material;
pub mod reader;
pub mod render;
