use crate::geom::error::GeomError;
use crate::geom::prim::{Surface, SurfaceHit};
use crate::geom::square;

use crate::core;
use crate::reader::{ParseResult, Tokens};

/// Fallback texture coordinates for points that are not on any face.
const OFF_SURFACE_UV: (f64, f64) = (0.5, 0.5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Front,
    Left,
    Back,
    Right,
    Top,
    Bottom,
}

/// One face of a cube, with its in-face axes scaled to the face's half-extents.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CubeFace {
    face: Face,
    normal: core::Vec,
    center: core::Vec,
    u_axis: core::Vec,
    v_axis: core::Vec,
    unit_u: core::Vec,
    unit_v: core::Vec,
}

impl CubeFace {
    fn new(face: Face, normal: core::Vec, center: core::Vec, u_axis: core::Vec, v_axis: core::Vec)
        -> CubeFace
    {
        CubeFace {
            face,
            normal,
            center,
            u_axis,
            v_axis,
            unit_u: u_axis.normalized(),
            unit_v: v_axis.normalized(),
        }
    }

    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit> {
        square::intersect_quad(ray, &self.center, &self.normal,
            &self.unit_u, self.u_axis.magnitude(), &self.unit_v, self.v_axis.magnitude())
    }

    /// Unsigned distance from the point to this face's plane.
    fn plane_distance(&self, point: &core::Vec) -> f64 {
        (*point - self.center).dot(&self.normal).abs()
    }
}

/**
 * A box centred on `center`. Its local axes are `dx` and `dy` (directions only) and their cross
 * product; `x`, `y` and `z` are the half-extents along them.
 */
#[derive(Clone, Debug, Default)]
pub struct Cube {
    pub center: core::Vec,
    pub dx: core::Vec,
    pub dy: core::Vec,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    faces: Vec<CubeFace>,
}

impl Cube {
    pub fn new(center: core::Vec, dx: core::Vec, dy: core::Vec, half_extents: (f64, f64, f64))
        -> Cube
    {
        let (x, y, z) = half_extents;
        Cube { center, dx, dy, x, y, z, faces: vec![] }
    }

    /// An axis-aligned cube of the given half-size.
    pub fn axis_aligned(center: core::Vec, half_size: f64) -> Cube {
        Self::new(center, core::Vec::x_axis(), core::Vec::y_axis(),
            (half_size, half_size, half_size))
    }

    /// Hits on every face, in face order, before the nearest one is chosen.
    pub(crate) fn face_hits<'a>(&'a self, ray: &'a core::Ray)
        -> impl Iterator<Item = (Face, SurfaceHit)> + 'a
    {
        self.faces.iter().filter_map(move |f| f.intersect(ray).map(|hit| (f.face, hit)))
    }

    /**
     * The face a surface point lies on: the face whose plane is nearest, earliest in face order
     * on ties. None if the point is farther than EPS from every face plane.
     */
    pub fn face_of(&self, point: &core::Vec) -> Option<Face> {
        self.nearest_face(point).map(|f| f.face)
    }

    fn nearest_face(&self, point: &core::Vec) -> Option<&CubeFace> {
        let mut best: Option<(&CubeFace, f64)> = None;
        for f in &self.faces {
            let l = f.plane_distance(point);
            match best {
                Some((_, best_l)) if best_l <= l => {}
                _ => best = Some((f, l)),
            }
        }
        match best {
            Some((f, l)) if l < core::EPS => Some(f),
            _ => None,
        }
    }
}

impl Surface for Cube {
    /**
     * A ray entering the box crosses two faces; the nearer crossing wins. Equal distances (a
     * ray through an edge) keep the earlier face.
     */
    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit> {
        self.face_hits(ray)
            .map(|(_, hit)| hit)
            .fold(None, |nearest: Option<SurfaceHit>, hit| match nearest {
                Some(n) if n.dist <= hit.dist => Some(n),
                _ => Some(hit),
            })
    }

    fn uv(&self, point: &core::Vec) -> (f64, f64) {
        let face = match self.nearest_face(point) {
            Some(f) => f,
            None => return OFF_SURFACE_UV,
        };
        let offset = *point - self.center;
        let u = offset.dot(&face.u_axis) / face.u_axis.magnitude2() / 2.0 + 0.5;
        let v = offset.dot(&face.v_axis) / face.v_axis.magnitude2() / 2.0 + 0.5;
        (u, v)
    }

    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match key {
            "O=" => self.center = tokens.next_vec()?,
            "Dx=" => self.dx = tokens.next_vec()?,
            "Dy=" => self.dy = tokens.next_vec()?,
            "x=" => self.x = tokens.next_f64()?,
            "y=" => self.y = tokens.next_f64()?,
            "z=" => self.z = tokens.next_f64()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn finalize(&mut self) -> Result<(), GeomError> {
        for &(what, value) in &[("half-extent x", self.x), ("half-extent y", self.y),
            ("half-extent z", self.z)]
        {
            if !(value > 0.0) {
                return Err(GeomError::non_positive("cube", what, value));
            }
        }
        let ax = self.dx.try_normalized()
            .ok_or_else(|| GeomError::degenerate("cube", "direction Dx"))? * self.x;
        let ay = self.dy.try_normalized()
            .ok_or_else(|| GeomError::degenerate("cube", "direction Dy"))? * self.y;
        let nz = ax.cross(&ay).try_normalized()
            .ok_or_else(|| GeomError::degenerate("cube", "axis Dx × Dy"))?;
        let az = nz * self.z;
        let o = self.center;

        self.faces = vec![
            CubeFace::new(Face::Front, nz, o + az, ax, ay),
            CubeFace::new(Face::Left, -ax.normalized(), o - ax, az, ay),
            CubeFace::new(Face::Back, -nz, o - az, -ax, ay),
            CubeFace::new(Face::Right, ax.normalized(), o + ax, -az, ay),
            CubeFace::new(Face::Top, ay.normalized(), o + ay, ax, -az),
            CubeFace::new(Face::Bottom, -ay.normalized(), o - ay, ax, az),
        ];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_cube() -> Cube {
        let mut c = Cube::axis_aligned(core::Vec::zero(), 1.0);
        c.finalize().unwrap();
        c
    }

    #[test]
    fn test_axis_rays_find_two_candidates_and_pick_entry() {
        let c = unit_cube();
        for axis in [core::Vec::x_axis(), core::Vec::y_axis(), core::Vec::z_axis()] {
            for sign in [1.0, -1.0] {
                let origin = axis * (5.0 * sign);
                let ray = core::Ray::new(origin, -origin);
                assert_eq!(c.face_hits(&ray).count(), 2);

                let hit = c.intersect(&ray).unwrap();
                assert!(hit.front);
                assert_abs_diff_eq!(hit.dist, 4.0, epsilon = 1e-9);
                assert_abs_diff_eq!(hit.normal.dot(&axis), sign, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_from_inside_hits_exit_face() {
        let c = unit_cube();
        let ray = core::Ray::new(core::Vec::new(0.2, 0.1, 0.0), core::Vec::x_axis());
        assert_eq!(c.face_hits(&ray).count(), 1);
        let hit = c.intersect(&ray).unwrap();
        assert!(!hit.front);
        assert_abs_diff_eq!(hit.dist, 0.8, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.normal.x, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_miss() {
        let c = unit_cube();
        let ray = core::Ray::new(core::Vec::new(5.0, 1.5, 0.0), -core::Vec::x_axis());
        assert!(c.intersect(&ray).is_none());
    }

    #[test]
    fn test_oriented_box() {
        // Rotated 45 degrees about z, stretched along its local x.
        let mut c = Cube::new(core::Vec::new(0.0, 0.0, 0.0), core::Vec::new(1.0, 1.0, 0.0),
            core::Vec::new(-1.0, 1.0, 0.0), (2.0, 0.5, 0.5));
        c.finalize().unwrap();
        let dir = core::Vec::new(-1.0, -1.0, 0.0);
        let ray = core::Ray::new(core::Vec::new(5.0, 5.0, 0.0), dir);
        let hit = c.intersect(&ray).unwrap();
        assert_abs_diff_eq!(hit.dist, 50.0f64.sqrt() - 2.0, epsilon = 1e-9);
        assert_eq!(c.face_of(&hit.point), Some(Face::Right));
    }

    #[test]
    fn test_uv_face_centres() {
        let c = unit_cube();
        let cases = [
            (core::Vec::z_axis(), Face::Front),
            (-core::Vec::x_axis(), Face::Left),
            (-core::Vec::z_axis(), Face::Back),
            (core::Vec::x_axis(), Face::Right),
            (core::Vec::y_axis(), Face::Top),
            (-core::Vec::y_axis(), Face::Bottom),
        ];
        for &(p, face) in &cases {
            assert_eq!(c.face_of(&p), Some(face));
            let (u, v) = c.uv(&p);
            assert_abs_diff_eq!(u, 0.5, epsilon = 1e-9);
            assert_abs_diff_eq!(v, 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_uv_corner_of_front_face() {
        let c = unit_cube();
        // The corner sits on three face planes; the front face, first in order, wins.
        let corner = core::Vec::new(1.0, 1.0, 1.0);
        assert_eq!(c.face_of(&corner), Some(Face::Front));
        let (u, v) = c.uv(&corner);
        assert_abs_diff_eq!(u, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uv_off_surface_falls_back() {
        let c = unit_cube();
        assert_eq!(c.face_of(&core::Vec::new(0.1, 0.2, 0.3)), None);
        assert_eq!(c.uv(&core::Vec::new(0.1, 0.2, 0.3)), OFF_SURFACE_UV);
    }

    #[test]
    fn test_finalize_rejects_flat_box() {
        let mut c = Cube::new(core::Vec::zero(), core::Vec::x_axis(), core::Vec::y_axis(),
            (1.0, 1.0, 0.0));
        assert!(matches!(c.finalize(), Err(GeomError::NonPositive { .. })));
    }
}
