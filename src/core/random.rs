use rand::distributions::Distribution;
use rand::Rng;
use std::f64::consts::PI;

/**
 * Samples a point in the disk of radius 1, with the radius drawn as 2^u - 1 for u uniform in
 * [0, 1) and the angle uniform over a full turn. The radius distribution is biased towards the
 * centre, so most perturbations built from these samples stay small.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpSampleDisk {
}

impl ExpSampleDisk {
    /**
     * Maps a pair of uniform variates in [0, 1) to the disk.
     */
    pub fn warp(u: f64, t: f64) -> (f64, f64) {
        let r = f64::powf(2.0, u) - 1.0;
        let theta = t * 2.0 * PI;
        (r * theta.cos(), r * theta.sin())
    }
}

impl Distribution<(f64, f64)> for ExpSampleDisk {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let u: f64 = rng.gen();
        let t: f64 = rng.gen();
        Self::warp(u, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_warp_endpoints() {
        let (x, y) = ExpSampleDisk::warp(0.0, 0.3);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);

        let (x, y) = ExpSampleDisk::warp(1.0, 0.25);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_samples_stay_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(7);
        let disk = ExpSampleDisk::default();
        for _ in 0..1000 {
            let (x, y) = disk.sample(&mut rng);
            assert!(x * x + y * y < 1.0 + 1e-12);
        }
    }
}
