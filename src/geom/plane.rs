use crate::geom::error::GeomError;
use crate::geom::prim::{Surface, SurfaceHit};

use crate::core;
use crate::reader::{ParseResult, Tokens};

/**
 * An infinite plane `N · p = R`. The texture tiles along `Dx` and `Dy`; one tile spans the
 * length of each basis vector.
 */
#[derive(Clone, Debug, Default)]
pub struct Plane {
    pub normal: core::Vec,
    /// Signed distance of the plane from the origin, along the normal.
    pub offset: f64,
    pub dx: core::Vec,
    pub dy: core::Vec,
}

impl Plane {
    pub fn new(normal: core::Vec, offset: f64) -> Plane {
        Plane { normal, offset, ..Plane::default() }
    }

    pub fn with_texture_basis(mut self, dx: core::Vec, dy: core::Vec) -> Plane {
        self.dx = dx;
        self.dy = dy;
        self
    }
}

impl Surface for Plane {
    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit> {
        let d = self.normal.dot(&ray.direction);
        if d.abs() < core::EPS {
            return None;
        }

        let l = (self.normal * self.offset - ray.origin).dot(&self.normal) / d;
        if l < core::EPS {
            return None;
        }

        // The ray approaches from the side the normal points to.
        Some(SurfaceHit::new(ray, l, d < 0.0, self.normal))
    }

    fn uv(&self, point: &core::Vec) -> (f64, f64) {
        let u = point.dot(&self.dx) / self.dx.magnitude2();
        let v = point.dot(&self.dy) / self.dy.magnitude2();
        (u, v)
    }

    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match key {
            "N=" => self.normal = tokens.next_vec()?,
            "R=" => self.offset = tokens.next_f64()?,
            "Dx=" => self.dx = tokens.next_vec()?,
            "Dy=" => self.dy = tokens.next_vec()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /**
     * Normalizes the normal. A missing texture basis vector is replaced by a unit vector in the
     * plane, so untextured planes need not specify one.
     */
    fn finalize(&mut self) -> Result<(), GeomError> {
        self.normal = self.normal.try_normalized()
            .ok_or_else(|| GeomError::degenerate("plane", "normal (N)"))?;

        if self.dx.is_exactly_zero() {
            self.dx = if self.dy.is_exactly_zero() {
                self.normal.any_perpendicular()
            }
            else {
                self.dy.cross(&self.normal).normalized()
            };
        }
        if self.dy.is_exactly_zero() {
            self.dy = self.normal.cross(&self.dx).normalized();
        }
        Ok(())
    }
}
