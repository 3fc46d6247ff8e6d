use crate::geom::error::GeomError;
use crate::geom::prim::{Surface, SurfaceHit};

use crate::core;
use crate::reader::{ParseResult, Tokens};

use std::f64::consts::PI;

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: core::Vec,
    pub radius: f64,
    /// Pole axis of the texture mapping.
    pub pole: core::Vec,
    /// Direction of the zero meridian of the texture mapping.
    pub meridian: core::Vec,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere {
            center: core::Vec::zero(),
            radius: 0.0,
            pole: core::Vec::z_axis(),
            meridian: core::Vec::y_axis(),
        }
    }
}

impl Sphere {
    pub fn new(center: core::Vec, radius: f64) -> Sphere {
        Sphere { center, radius, ..Sphere::default() }
    }

    pub fn with_texture_axes(mut self, pole: core::Vec, meridian: core::Vec) -> Sphere {
        self.pole = pole;
        self.meridian = meridian;
        self
    }
}

impl Surface for Sphere {
    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit> {
        let p = ray.origin - self.center;
        let b = -p.dot(&ray.direction);
        let det = b * b - p.magnitude2() + self.radius * self.radius;

        // A tangent ray (det within EPS of zero) does not count as a hit.
        if det <= core::EPS {
            return None;
        }

        let sqrt_det = det.sqrt();
        let x1 = b - sqrt_det;
        let x2 = b + sqrt_det;
        if x2 < core::EPS {
            return None;
        }

        // Entering from outside unless the near root is behind us.
        let (dist, front) = if core::is_positive(x1) { (x1, true) } else { (x2, false) };
        let outward = (ray.at(dist) - self.center).normalized();
        Some(SurfaceHit::new(ray, dist, front, outward))
    }

    fn uv(&self, point: &core::Vec) -> (f64, f64) {
        let i = (*point - self.center).normalized();
        let a = f64::acos(core::clamp(-i.dot(&self.pole), -1.0, 1.0));
        let sin_a = a.sin();
        let b = if core::is_nearly_zero(sin_a) {
            // Longitude is undefined at the poles.
            0.0
        }
        else {
            f64::acos(core::clamp(i.dot(&self.meridian) / sin_a, -1.0, 1.0))
        };

        let u = a / PI;
        let mut v = b / 2.0 / PI;
        if i.dot(&self.meridian.cross(&self.pole)) < 0.0 {
            v = 1.0 - v;
        }
        (u, v)
    }

    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match key {
            "O=" => self.center = tokens.next_vec()?,
            "R=" => self.radius = tokens.next_f64()?,
            "De=" => self.pole = tokens.next_vec()?,
            "Dc=" => self.meridian = tokens.next_vec()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finalize(&mut self) -> Result<(), GeomError> {
        if !(self.radius > 0.0) {
            return Err(GeomError::non_positive("sphere", "radius", self.radius));
        }
        self.pole = self.pole.try_normalized()
            .ok_or_else(|| GeomError::degenerate("sphere", "pole axis (De)"))?;
        self.meridian = self.meridian.try_normalized()
            .ok_or_else(|| GeomError::degenerate("sphere", "meridian axis (Dc)"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_sphere() -> Sphere {
        let mut s = Sphere::new(core::Vec::zero(), 1.0);
        s.finalize().unwrap();
        s
    }

    #[test]
    fn test_head_on_hit() {
        let s = unit_sphere();
        let ray = core::Ray::new(core::Vec::new(0.0, 0.0, 5.0), core::Vec::new(0.0, 0.0, -1.0));
        let hit = s.intersect(&ray).unwrap();
        assert!(hit.front);
        assert_abs_diff_eq!(hit.dist, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.point.z, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.normal.z, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.normal.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_through_center_roots_are_symmetric() {
        let mut s = Sphere::new(core::Vec::new(1.0, 2.0, 3.0), 2.0);
        s.finalize().unwrap();
        let origin = core::Vec::new(-7.0, 2.0, 3.0);
        let ray = core::Ray::new(origin, s.center - origin);
        let d = origin.distance(&s.center);

        let near = s.intersect(&ray).unwrap();
        assert_abs_diff_eq!(near.dist, d - s.radius, epsilon = 1e-9);

        // Start just inside the near surface to pick up the far root.
        let inner = core::Ray::new(ray.at(near.dist + 1e-3), ray.direction);
        let far = s.intersect(&inner).unwrap();
        assert!(!far.front);
        assert_abs_diff_eq!(near.dist + 1e-3 + far.dist, d + s.radius, epsilon = 1e-9);

        // Normals are parallel to (hit - center) and face the ray.
        for hit in [near, far] {
            let radial = (hit.point - s.center).normalized();
            assert_abs_diff_eq!(hit.normal.cross(&radial).magnitude(), 0.0, epsilon = 1e-9);
            assert!(hit.normal.dot(&ray.direction) < 0.0);
        }
    }

    #[test]
    fn test_from_inside_is_back_face() {
        let s = unit_sphere();
        let ray = core::Ray::new(core::Vec::zero(), core::Vec::x_axis());
        let hit = s.intersect(&ray).unwrap();
        assert!(!hit.front);
        assert_abs_diff_eq!(hit.dist, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.normal.x, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tangent_misses() {
        let s = unit_sphere();
        let ray = core::Ray::new(core::Vec::new(1.0, -5.0, 0.0), core::Vec::y_axis());
        assert!(s.intersect(&ray).is_none());
    }

    #[test]
    fn test_behind_misses() {
        let s = unit_sphere();
        let ray = core::Ray::new(core::Vec::new(0.0, 0.0, 5.0), core::Vec::z_axis());
        assert!(s.intersect(&ray).is_none());
    }

    #[test]
    fn test_uv_poles_and_meridian() {
        let s = unit_sphere();
        // The pole axis is +z; the point opposite to it maps to u = 0.
        let (u, _) = s.uv(&-core::Vec::z_axis());
        assert_abs_diff_eq!(u, 0.0, epsilon = 1e-9);
        let (u, v) = s.uv(&core::Vec::z_axis());
        assert_abs_diff_eq!(u, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);

        // On the equator along the meridian direction.
        let (u, v) = s.uv(&core::Vec::y_axis());
        assert_abs_diff_eq!(u, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);

        // A quarter turn either side of the meridian lands on v = 1/4 and v = 3/4.
        let (_, v_pos) = s.uv(&core::Vec::x_axis());
        let (_, v_neg) = s.uv(&-core::Vec::x_axis());
        assert_abs_diff_eq!(v_pos + v_neg, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!((v_pos - v_neg).abs(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_finalize_rejects_bad_parameters() {
        let mut s = Sphere::new(core::Vec::zero(), 0.0);
        assert!(matches!(s.finalize(), Err(GeomError::NonPositive { .. })));

        let mut s = Sphere::new(core::Vec::zero(), 1.0)
            .with_texture_axes(core::Vec::zero(), core::Vec::y_axis());
        assert!(matches!(s.finalize(), Err(GeomError::Degenerate { .. })));
    }
}
