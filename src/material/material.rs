use crate::material::blur;
use crate::material::texture::Texture;

use crate::core;
use crate::reader::{ParseError, ParseResult, Tokens};

use std::sync::Arc;

use log::debug;
use rand::RngCore;

/**
 * Optical and appearance properties of a primitive's surface.
 *
 * The collision routines never read a material; it is carried so that the renderer calling them
 * can shade the hit. Cloning a material copies every parameter and the blur strategy, while the
 * texture bitmap is shared.
 */
#[derive(Clone, Debug)]
pub struct Material {
    pub color: core::Color,
    /// Absorption color for light travelling through a refractive body.
    pub absor: core::Color,
    pub refl: f64,
    pub refr: f64,
    pub diff: f64,
    pub spec: f64,
    /// Index of refraction.
    pub rindex: f64,
    /// Blur radius applied to reflected directions; zero means a perfect mirror.
    pub drefl: f64,
    pub texture: Option<Arc<Texture>>,
    pub blur: Box<dyn blur::Blur>,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: core::Color::black(),
            absor: core::Color::black(),
            refl: 0.0,
            refr: 0.0,
            diff: 0.0,
            spec: 0.0,
            rindex: 0.0,
            drefl: 0.0,
            texture: None,
            blur: Box::new(blur::ExpBlur::new()),
        }
    }
}

impl Material {
    pub fn new() -> Material {
        Material::default()
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Material {
        self.texture = Some(texture);
        self
    }

    /**
     * Applies one `key= values` line from a scene description. Returns Ok(false) when the key
     * is not a material key, leaving the material untouched.
     */
    pub fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match key {
            "color=" => self.color = tokens.next_color()?,
            "absor=" => self.absor = tokens.next_color()?,
            "refl=" => self.refl = tokens.next_f64()?,
            "refr=" => self.refr = tokens.next_f64()?,
            "diff=" => self.diff = tokens.next_f64()?,
            "spec=" => self.spec = tokens.next_f64()?,
            "drefl=" => self.drefl = tokens.next_f64()?,
            "rindex=" => self.rindex = tokens.next_f64()?,
            "texture=" => {
                let path = tokens.next_path()?;
                let texture = Texture::open(&path).map_err(|source| ParseError::Texture {
                    line: tokens.line(),
                    source,
                })?;
                debug!("loaded texture {} ({}x{})",
                    path.display(), texture.width(), texture.height());
                self.texture = Some(Arc::new(texture));
            }
            "blur=" => {
                let name = tokens.next_word()?;
                match blur::blur_by_name(name) {
                    Some(b) => self.blur = b,
                    None => debug!("line {}: unknown blur `{}`, keeping `{}`",
                        tokens.line(), name, self.blur.name()),
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /**
     * Perturbs a unit reflection direction using the blur strategy, scaled by `drefl`. With
     * `drefl == 0` the direction is returned unchanged.
     */
    pub fn blur_direction(&self, direction: &core::Vec, rng: &mut dyn RngCore) -> core::Vec {
        if self.drefl <= 0.0 {
            return *direction;
        }

        let tangent = direction.any_perpendicular();
        let binormal = direction.cross(&tangent).normalized();
        let (x, y) = self.blur.sample_offset(rng);
        let perturbed = *direction + tangent * (x * self.drefl) + binormal * (y * self.drefl);
        perturbed.try_normalized().unwrap_or(*direction)
    }

    /// Texture color at (u, v), or None if the material carries no texture.
    pub fn texture_color(&self, u: f64, v: f64) -> Option<core::Color> {
        self.texture.as_ref().map(|t| t.smooth_color(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn apply(material: &mut Material, key: &str, values: &str) -> ParseResult<bool> {
        let mut tokens = Tokens::new(1, key, values);
        material.input(key, &mut tokens)
    }

    #[test]
    fn test_defaults() {
        let m = Material::new();
        assert_eq!(m.color, core::Color::black());
        assert!(m.texture.is_none());
        assert_eq!(m.blur.name(), "exp");
    }

    #[test]
    fn test_input_sets_fields() {
        let mut m = Material::new();
        assert!(apply(&mut m, "color=", "1 0.5 0").unwrap());
        assert!(apply(&mut m, "refl=", "0.3").unwrap());
        assert!(apply(&mut m, "rindex=", "1.7").unwrap());
        assert!(apply(&mut m, "drefl=", "0.25").unwrap());
        assert!(apply(&mut m, "blur=", "exp").unwrap());
        assert_eq!(m.color, core::Color::new(1.0, 0.5, 0.0));
        assert_abs_diff_eq!(m.refl, 0.3);
        assert_abs_diff_eq!(m.rindex, 1.7);
        assert_abs_diff_eq!(m.drefl, 0.25);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut m = Material::new();
        assert!(!apply(&mut m, "shininess=", "12").unwrap());
        assert_eq!(m.refl, 0.0);
    }

    #[test]
    fn test_missing_texture_file() {
        let mut m = Material::new();
        let err = apply(&mut m, "texture=", "/nonexistent/primray/none.bmp").unwrap_err();
        assert!(matches!(err, ParseError::Texture { line: 1, .. }));
    }

    #[test]
    fn test_clone_shares_texture() {
        let texture = Arc::new(Texture::filled(2, 2, core::Color::white()));
        let m = Material::new().with_texture(texture.clone());
        let copy = m.clone();
        assert!(Arc::ptr_eq(copy.texture.as_ref().unwrap(), &texture));
        assert_eq!(Arc::strong_count(&texture), 3);
    }

    #[test]
    fn test_blur_direction() {
        let mut rng = StdRng::seed_from_u64(3);
        let dir = core::Vec::new(0.0, 0.0, -1.0);

        let sharp = Material::new();
        assert_eq!(sharp.blur_direction(&dir, &mut rng), dir);

        let glossy = Material { drefl: 0.2, ..Material::new() };
        for _ in 0..100 {
            let d = glossy.blur_direction(&dir, &mut rng);
            assert_abs_diff_eq!(d.magnitude(), 1.0, epsilon = 1e-9);
            // Offsets are at most drefl long, so the cone half-angle is atan(0.2).
            assert!(d.dot(&dir) >= (1.0 / (1.0f64 + 0.04).sqrt()) - 1e-9);
        }
    }
}
