use crate::geom::error::GeomError;
use crate::geom::prim::{Surface, SurfaceHit};

use crate::core;
use crate::reader::{ParseResult, Tokens};

/**
 * A parallelogram centred on `center` spanning `center ± dx ± dy`. Its outward normal is
 * `dx × dy`.
 */
#[derive(Clone, Debug, Default)]
pub struct Square {
    pub center: core::Vec,
    pub dx: core::Vec,
    pub dy: core::Vec,
    normal: core::Vec,
    unit_dx: core::Vec,
    unit_dy: core::Vec,
}

impl Square {
    pub fn new(center: core::Vec, dx: core::Vec, dy: core::Vec) -> Square {
        Square { center, dx, dy, ..Square::default() }
    }

    pub fn normal(&self) -> core::Vec {
        self.normal
    }
}

/**
 * Intersects a ray with the bounded quad `center ± u_axis ± v_axis`, where `normal` is the unit
 * normal of its plane and the unit axes and half-lengths are precomputed. Shared by squares and
 * cube faces.
 */
pub(crate) fn intersect_quad(ray: &core::Ray, center: &core::Vec, normal: &core::Vec,
    unit_u: &core::Vec, half_u: f64, unit_v: &core::Vec, half_v: f64) -> Option<SurfaceHit>
{
    let d = normal.dot(&ray.direction);
    if d.abs() < core::EPS {
        return None;
    }
    let l = (*center - ray.origin).dot(normal) / d;
    if l < core::EPS {
        return None;
    }

    let offset = ray.at(l) - *center;
    let pu = offset.dot(unit_u);
    let pv = offset.dot(unit_v);
    if pu.abs() > half_u + core::EPS || pv.abs() > half_v + core::EPS {
        return None;
    }

    Some(SurfaceHit::new(ray, l, d < 0.0, *normal))
}

impl Surface for Square {
    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit> {
        intersect_quad(ray, &self.center, &self.normal,
            &self.unit_dx, self.dx.magnitude(), &self.unit_dy, self.dy.magnitude())
    }

    fn uv(&self, point: &core::Vec) -> (f64, f64) {
        let offset = *point - self.center;
        let u = offset.dot(&self.dx) / self.dx.magnitude2() / 2.0 + 0.5;
        let v = offset.dot(&self.dy) / self.dy.magnitude2() / 2.0 + 0.5;
        (u, v)
    }

    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match key {
            "O=" => self.center = tokens.next_vec()?,
            "Dx=" => self.dx = tokens.next_vec()?,
            "Dy=" => self.dy = tokens.next_vec()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finalize(&mut self) -> Result<(), GeomError> {
        self.unit_dx = self.dx.try_normalized()
            .ok_or_else(|| GeomError::degenerate("square", "edge Dx"))?;
        self.unit_dy = self.dy.try_normalized()
            .ok_or_else(|| GeomError::degenerate("square", "edge Dy"))?;
        self.normal = self.dx.cross(&self.dy).try_normalized()
            .ok_or_else(|| GeomError::degenerate("square", "normal (Dx × Dy)"))?;
        Ok(())
    }
}
