use crate::core::vector::Vec;
use std::fmt;
use std::fmt::Display;

/// A ray with a unit-length direction.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Vec,
    pub direction: Vec,
}

impl Ray {
    /**
     * Creates a ray, normalizing the direction. A zero direction produces NaN components; use
     * `try_new` for directions that come from outside the crate.
     */
    pub fn new(origin: Vec, direction: Vec) -> Ray {
        Ray {origin, direction: direction.normalized()}
    }

    /**
     * Creates a ray, or returns None if the direction has no usable length.
     */
    pub fn try_new(origin: Vec, direction: Vec) -> Option<Ray> {
        direction.try_normalized().map(|direction| Ray {origin, direction})
    }

    pub fn at(&self, k: f64) -> Vec {
        self.origin + k * self.direction
    }
}

impl Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ray {{origin: {}, direction: {}}}", self.origin, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec::zero(), Vec::new(2.0, 0.0, 0.0));
        let p = ray.at(5.0);
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_try_new_zero_direction() {
        assert!(Ray::try_new(Vec::one(), Vec::zero()).is_none());
    }
}
