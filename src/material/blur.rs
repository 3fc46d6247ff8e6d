use crate::core;

use std::fmt::Debug;

use rand::distributions::Distribution;
use rand::RngCore;

/**
 * A rule for perturbing a reflection or refraction direction to simulate a glossy surface.
 * Implementations return an offset in a unit disk; the caller scales it and applies it in the
 * plane perpendicular to the direction being blurred.
 */
pub trait Blur: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn sample_offset(&self, rng: &mut dyn RngCore) -> (f64, f64);
    fn clone_box(&self) -> Box<dyn Blur>;
}

impl Clone for Box<dyn Blur> {
    fn clone(&self) -> Box<dyn Blur> {
        self.clone_box()
    }
}

/// Exponentially weighted disk sampling; see `core::ExpSampleDisk`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpBlur {
    disk: core::ExpSampleDisk,
}

impl ExpBlur {
    pub fn new() -> ExpBlur {
        ExpBlur::default()
    }
}

impl Blur for ExpBlur {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn sample_offset(&self, rng: &mut dyn RngCore) -> (f64, f64) {
        self.disk.sample(rng)
    }

    fn clone_box(&self) -> Box<dyn Blur> {
        Box::new(*self)
    }
}

/// Looks up a blur strategy by the name used in scene files.
pub fn blur_by_name(name: &str) -> Option<Box<dyn Blur>> {
    match name {
        "exp" => Some(Box::new(ExpBlur::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lookup() {
        assert_eq!(blur_by_name("exp").unwrap().name(), "exp");
        assert!(blur_by_name("gauss").is_none());
    }

    #[test]
    fn test_boxed_clone_keeps_strategy() {
        let blur: Box<dyn Blur> = Box::new(ExpBlur::new());
        let copy = blur.clone();
        assert_eq!(copy.name(), blur.name());

        let mut rng = StdRng::seed_from_u64(11);
        let (x, y) = copy.sample_offset(&mut rng);
        assert!(x * x + y * y <= 1.0);
    }
}
