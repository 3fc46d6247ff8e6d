use crate::geom::cylinder::Cylinder;
use crate::geom::error::GeomError;
use crate::geom::prim::{Surface, SurfaceHit};

use crate::core;
use crate::reader::{ParseError, ParseResult, Tokens};

/// Highest profile degree the binomial table covers.
pub const MAX_DEGREE: usize = 5;

/**
 * A solid of revolution around the `o1`–`o2` axis. Its profile is a Bezier curve whose control
 * points are `(z, r)` pairs: height along the axis and distance from it.
 *
 * Only the profile and frame are computed; ray intersection is not implemented and always
 * misses.
 */
#[derive(Clone, Debug, Default)]
pub struct Bezier {
    pub o1: core::Vec,
    pub o2: core::Vec,
    points: Vec<(f64, f64)>,
    axis: core::Vec,
    frame_x: core::Vec,
    frame_y: core::Vec,
    bounds: Option<Cylinder>,
}

impl Bezier {
    pub fn new(o1: core::Vec, o2: core::Vec) -> Bezier {
        Bezier { o1, o2, ..Bezier::default() }
    }

    /// Appends a `(z, r)` control point. Fails once the degree would exceed `MAX_DEGREE`.
    pub fn push_point(&mut self, z: f64, r: f64) -> Result<(), usize> {
        if self.points.len() > MAX_DEGREE {
            return Err(MAX_DEGREE + 1);
        }
        self.points.push((z, r));
        Ok(())
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn degree(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// The axis frame `(N, Nx, Ny)`, with N pointing from `o2` to `o1`.
    pub fn frame(&self) -> (core::Vec, core::Vec, core::Vec) {
        (self.axis, self.frame_x, self.frame_y)
    }

    /// The cylinder enclosing the solid. None until finalized.
    pub fn bounds(&self) -> Option<&Cylinder> {
        self.bounds.as_ref()
    }

    /// The profile point `(z, r)` at curve parameter t in [0, 1].
    pub fn profile_point(&self, t: f64) -> (f64, f64) {
        let n = self.degree();
        self.points.iter().enumerate().fold((0.0, 0.0), |(z, r), (k, &(pz, pr))| {
            let b = core::bernstein(n, k, t);
            (z + b * pz, r + b * pr)
        })
    }
}

impl Surface for Bezier {
    fn intersect(&self, _: &core::Ray) -> Option<SurfaceHit> {
        None
    }

    fn uv(&self, _: &core::Vec) -> (f64, f64) {
        (0.5, 0.5)
    }

    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match key {
            "O1=" => self.o1 = tokens.next_vec()?,
            "O2=" => self.o2 = tokens.next_vec()?,
            "P=" => {
                let z = tokens.next_f64()?;
                let r = tokens.next_f64()?;
                self.push_point(z, r).map_err(|max| ParseError::TooManyControlPoints {
                    line: tokens.line(),
                    max,
                })?;
            }
            // Marks the end of the control points; the frame is built by `finalize`.
            "Cylinder" => {}
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finalize(&mut self) -> Result<(), GeomError> {
        self.axis = (self.o1 - self.o2).try_normalized()
            .ok_or_else(|| GeomError::degenerate("bezier", "axis (O1 = O2)"))?;
        self.frame_x = self.axis.any_perpendicular();
        self.frame_y = self.axis.cross(&self.frame_x);

        let max_r = self.points.iter().map(|&(_, r)| r).fold(0.0, f64::max);
        let mut bounds = Cylinder::new(self.o1, self.o2, max_r);
        bounds.finalize()?;
        self.bounds = Some(bounds);
        Ok(())
    }
}
