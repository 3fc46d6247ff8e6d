use crate::geom::error::GeomError;
use crate::geom::prim::{Surface, SurfaceHit};

use crate::core;
use crate::reader::{ParseResult, Tokens};

use std::f64::consts::PI;

/// A capped right circular cylinder from `o1` to `o2`.
#[derive(Clone, Debug, Default)]
pub struct Cylinder {
    pub o1: core::Vec,
    pub o2: core::Vec,
    pub radius: f64,
    axis: core::Vec,
    length: f64,
    cap_u: core::Vec,
    cap_v: core::Vec,
}

impl Cylinder {
    pub fn new(o1: core::Vec, o2: core::Vec, radius: f64) -> Cylinder {
        Cylinder { o1, o2, radius, ..Cylinder::default() }
    }

    /// Unit vector from `o1` to `o2`. Zero until finalized.
    pub fn axis(&self) -> core::Vec {
        self.axis
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /**
     * Intersects the ray with the cap disc through `center` whose outward normal is `normal`.
     * Returns the distance along the ray.
     */
    fn cap_distance(&self, ray: &core::Ray, center: &core::Vec, normal: &core::Vec)
        -> Option<f64>
    {
        let d = normal.dot(&ray.direction);
        if d.abs() < core::EPS {
            return None;
        }
        let l = (*center - ray.origin).dot(normal) / d;
        if l < core::EPS || ray.at(l).distance(center) > self.radius - core::EPS {
            return None;
        }
        Some(l)
    }
}

impl Surface for Cylinder {
    /**
     * Solves against the infinite cylinder first. If that hit falls beyond either end, the
     * matching cap plane is tried instead; `front` is still decided by the lateral roots.
     */
    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit> {
        let od = ray.direction.cross(&self.axis);
        let oc = (ray.origin - self.o1).cross(&self.axis);
        let b = od.dot(&oc);
        let a = od.magnitude2();
        let det = b * b - a * (oc.magnitude2() - self.radius * self.radius);

        // Covers rays parallel to the axis, where `a` vanishes.
        if det <= core::EPS {
            return None;
        }

        let sqrt_det = det.sqrt();
        let x1 = (-b - sqrt_det) / a;
        let x2 = (-b + sqrt_det) / a;
        if x2 < core::EPS {
            return None;
        }
        let (mut dist, front) = if core::is_positive(x1) { (x1, true) } else { (x2, false) };

        let p = ray.at(dist);
        let h = (p - self.o1).dot(&self.axis);
        let mut outward = (p - self.o1 - self.axis * h).normalized();

        if h < core::EPS {
            outward = -self.axis;
            dist = self.cap_distance(ray, &self.o1, &outward)?;
        }
        if h > self.length - core::EPS {
            outward = self.axis;
            dist = self.cap_distance(ray, &self.o2, &outward)?;
        }

        Some(SurfaceHit::new(ray, dist, front, outward))
    }

    fn uv(&self, point: &core::Vec) -> (f64, f64) {
        let from_o1 = *point - self.o1;
        let h = from_o1.dot(&self.axis);

        if h.abs() < core::EPS {
            return (from_o1.dot(&self.cap_u) / self.radius, from_o1.dot(&self.cap_v) / self.radius);
        }
        let from_o2 = *point - self.o2;
        if from_o2.dot(&self.axis).abs() < core::EPS {
            return (from_o2.dot(&self.cap_u) / self.radius, from_o2.dot(&self.cap_v) / self.radius);
        }

        let radial = (from_o1 - self.axis * h).normalized();
        let mut v = f64::acos(core::clamp(radial.dot(&self.cap_u), -1.0, 1.0)) / 2.0 / PI;
        if self.cap_u.dot(&from_o1.cross(&self.axis)) < 0.0 {
            v = 1.0 - v;
        }
        (h / self.length, v)
    }

    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match key {
            "O1=" => self.o1 = tokens.next_vec()?,
            "O2=" => self.o2 = tokens.next_vec()?,
            "R=" => self.radius = tokens.next_f64()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finalize(&mut self) -> Result<(), GeomError> {
        if !(self.radius > 0.0) {
            return Err(GeomError::non_positive("cylinder", "radius", self.radius));
        }
        let span = self.o2 - self.o1;
        self.axis = span.try_normalized()
            .ok_or_else(|| GeomError::degenerate("cylinder", "axis (O1 = O2)"))?;
        self.length = span.magnitude();
        self.cap_u = self.axis.any_perpendicular();
        self.cap_v = self.cap_u.cross(&self.axis).normalized();
        Ok(())
    }
}
