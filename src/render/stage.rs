use crate::core;
use crate::geom;

use rayon::prelude::*;

/// The primitives of a scene, queried by rays.
pub struct Stage {
    prims: Vec<geom::Primitive>,
}

impl Stage {
    pub fn new(prims: Vec<geom::Primitive>) -> Stage {
        Stage { prims }
    }

    pub fn prims(&self) -> &[geom::Primitive] {
        &self.prims
    }

    /// The nearest hit over all primitives. Ties keep the primitive listed first.
    pub fn closest_hit(&self, ray: &core::Ray) -> Option<geom::Collision> {
        let mut closest: Option<geom::Collision> = None;
        for prim in &self.prims {
            if let Some(hit) = prim.collide_ray(ray) {
                match closest {
                    Some(ref c) if c.dist <= hit.dist => {}
                    _ => closest = Some(hit),
                }
            }
        }
        closest
    }

    /// Finds the closest hit for each ray, in parallel. Results are in ray order.
    pub fn collide_all(&self, rays: &[core::Ray]) -> Vec<Option<geom::Collision>> {
        rays.par_iter().map(|ray| self.closest_hit(ray)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use approx::assert_abs_diff_eq;

    fn row_of_spheres() -> Stage {
        let prims = (0..4)
            .map(|i| {
                let center = core::Vec::new(0.0, 0.0, -4.0 * (i as f64 + 1.0));
                geom::Primitive::new(geom::Sphere::new(center, 1.0), Material::new()).unwrap()
            })
            .collect();
        Stage::new(prims)
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let stage = row_of_spheres();
        // Listed farthest-first, so order alone would pick the wrong one.
        let mut reversed: Vec<_> = stage.prims().to_vec();
        reversed.reverse();
        let stage = Stage::new(reversed);

        let hit = stage.closest_hit(&core::Ray::new(core::Vec::zero(), -core::Vec::z_axis()))
            .unwrap();
        assert_abs_diff_eq!(hit.dist, 3.0, epsilon = 1e-9);
        assert!(std::ptr::eq(hit.primitive, &stage.prims()[3]));
    }

    #[test]
    fn test_empty_and_missing() {
        let empty = Stage::new(vec![]);
        let ray = core::Ray::new(core::Vec::zero(), core::Vec::x_axis());
        assert!(empty.closest_hit(&ray).is_none());
        assert!(row_of_spheres().closest_hit(&ray).is_none());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let stage = row_of_spheres();
        let rays: Vec<_> = (0..64)
            .map(|i| {
                let t = i as f64 / 64.0;
                core::Ray::new(core::Vec::new(0.0, 0.0, 2.0),
                    core::Vec::new(t - 0.5, 0.25 - t * 0.5, -1.0))
            })
            .collect();

        let parallel = stage.collide_all(&rays);
        assert_eq!(parallel.len(), rays.len());
        for (ray, hit) in rays.iter().zip(&parallel) {
            let expected = stage.closest_hit(ray);
            assert_eq!(hit.is_some(), expected.is_some());
            if let (Some(a), Some(b)) = (hit, expected) {
                assert_eq!(a.dist, b.dist);
                assert!(std::ptr::eq(a.primitive, b.primitive));
            }
        }
        assert!(parallel.iter().any(|h| h.is_some()));
    }
}
