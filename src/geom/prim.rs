use crate::geom::bezier::Bezier;
use crate::geom::cube::Cube;
use crate::geom::cylinder::Cylinder;
use crate::geom::error::GeomError;
use crate::geom::plane::Plane;
use crate::geom::sphere::Sphere;
use crate::geom::square::Square;

use crate::core;
use crate::material;
use crate::reader::{ParseResult, Tokens};

/**
 * Where a ray meets a surface, before it is attributed to a primitive.
 * The normal is unit-length and faces the incoming ray.
 */
#[derive(Clone, Copy, Debug)]
pub struct SurfaceHit {
    pub dist: f64,
    pub front: bool,
    pub point: core::Vec,
    pub normal: core::Vec,
}

impl SurfaceHit {
    /**
     * Builds a hit at distance `dist` along the ray. `outward` is the surface normal pointing
     * out of the solid (or along the plane normal); it is flipped when the ray arrives from
     * the back.
     */
    pub fn new(ray: &core::Ray, dist: f64, front: bool, outward: core::Vec) -> SurfaceHit {
        SurfaceHit {
            dist,
            front,
            point: ray.at(dist),
            normal: if front { outward } else { -outward },
        }
    }
}

/**
 * The geometric half of a primitive: a ray test, a surface parameterization and the keys it
 * accepts from scene text.
 */
pub trait Surface {
    /**
     * Intersects the ray with the surface and returns the nearest hit at a distance greater
     * than EPS. The ray direction must be unit length.
     */
    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit>;
    /**
     * Maps a point on the surface to texture coordinates. Results are in [0, 1] for bounded
     * shapes; planes tile, so their coordinates are unbounded and wrap at lookup time.
     */
    fn uv(&self, point: &core::Vec) -> (f64, f64);
    /**
     * Applies one `key= values` line. Returns Ok(false) for keys this shape does not use.
     * Derived geometry is stale until `finalize` runs.
     */
    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool>;
    /**
     * Validates the parameters and recomputes every derived vector used by `intersect` and
     * `uv`.
     */
    fn finalize(&mut self) -> Result<(), GeomError>;
}

/// The closed set of primitive shapes.
#[derive(Clone, Debug)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Square(Square),
    Cube(Cube),
    Cylinder(Cylinder),
    Bezier(Bezier),
}

impl Shape {
    /// An unfinalized shape of the kind named in scene text, ready for `input`.
    pub fn for_kind(kind: &str) -> Option<Shape> {
        match kind {
            "sphere" => Some(Shape::Sphere(Sphere::default())),
            "plane" => Some(Shape::Plane(Plane::default())),
            "square" => Some(Shape::Square(Square::default())),
            "cube" => Some(Shape::Cube(Cube::default())),
            "cylinder" => Some(Shape::Cylinder(Cylinder::default())),
            "bezier" => Some(Shape::Bezier(Bezier::default())),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match *self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Square(_) => "square",
            Shape::Cube(_) => "cube",
            Shape::Cylinder(_) => "cylinder",
            Shape::Bezier(_) => "bezier",
        }
    }

    /// Whether `intersect` is implemented for this shape. Bezier solids always miss.
    pub fn is_supported(&self) -> bool {
        !matches!(*self, Shape::Bezier(_))
    }
}

impl Surface for Shape {
    fn intersect(&self, ray: &core::Ray) -> Option<SurfaceHit> {
        match *self {
            Shape::Sphere(ref s) => s.intersect(ray),
            Shape::Plane(ref s) => s.intersect(ray),
            Shape::Square(ref s) => s.intersect(ray),
            Shape::Cube(ref s) => s.intersect(ray),
            Shape::Cylinder(ref s) => s.intersect(ray),
            Shape::Bezier(ref s) => s.intersect(ray),
        }
    }

    fn uv(&self, point: &core::Vec) -> (f64, f64) {
        match *self {
            Shape::Sphere(ref s) => s.uv(point),
            Shape::Plane(ref s) => s.uv(point),
            Shape::Square(ref s) => s.uv(point),
            Shape::Cube(ref s) => s.uv(point),
            Shape::Cylinder(ref s) => s.uv(point),
            Shape::Bezier(ref s) => s.uv(point),
        }
    }

    fn input(&mut self, key: &str, tokens: &mut Tokens) -> ParseResult<bool> {
        match *self {
            Shape::Sphere(ref mut s) => s.input(key, tokens),
            Shape::Plane(ref mut s) => s.input(key, tokens),
            Shape::Square(ref mut s) => s.input(key, tokens),
            Shape::Cube(ref mut s) => s.input(key, tokens),
            Shape::Cylinder(ref mut s) => s.input(key, tokens),
            Shape::Bezier(ref mut s) => s.input(key, tokens),
        }
    }

    fn finalize(&mut self) -> Result<(), GeomError> {
        match *self {
            Shape::Sphere(ref mut s) => s.finalize(),
            Shape::Plane(ref mut s) => s.finalize(),
            Shape::Square(ref mut s) => s.finalize(),
            Shape::Cube(ref mut s) => s.finalize(),
            Shape::Cylinder(ref mut s) => s.finalize(),
            Shape::Bezier(ref mut s) => s.finalize(),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(s: $variant) -> Shape {
                    Shape::$variant(s)
                }
            }
        )*
    };
}

impl_from_shape!(Sphere, Plane, Square, Cube, Cylinder, Bezier);

/**
 * A shape paired with the material it is drawn with.
 *
 * The geometry is finalized on construction and cannot be mutated afterwards, so a primitive
 * can be collided from several threads at once.
 */
#[derive(Clone, Debug)]
pub struct Primitive {
    /// Opaque tag for external samplers, drawn at random on construction and kept on clone.
    pub sample: u32,
    material: material::Material,
    shape: Shape,
}

impl Primitive {
    pub fn new<S: Into<Shape>>(shape: S, material: material::Material)
        -> Result<Primitive, GeomError>
    {
        let mut shape = shape.into();
        shape.finalize()?;
        Ok(Primitive {
            sample: rand::random(),
            material,
            shape,
        })
    }

    pub fn material(&self) -> &material::Material {
        &self.material
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /**
     * Intersects the ray (origin, direction) with the primitive. The direction need not be
     * unit length; a zero direction never hits.
     */
    pub fn collide(&self, origin: core::Vec, direction: core::Vec) -> Option<Collision> {
        let ray = core::Ray::try_new(origin, direction)?;
        self.collide_ray(&ray)
    }

    /// As `collide`, for a ray whose direction is already unit length.
    pub fn collide_ray(&self, ray: &core::Ray) -> Option<Collision> {
        self.shape.intersect(ray).map(|hit| Collision {
            dist: hit.dist,
            front: hit.front,
            point: hit.point,
            normal: hit.normal,
            primitive: self,
        })
    }

    pub fn uv(&self, point: &core::Vec) -> (f64, f64) {
        self.shape.uv(point)
    }

    /**
     * Samples the material's texture at the surface point. Returns None if the material has no
     * texture.
     */
    pub fn texture_color(&self, point: &core::Vec) -> Option<core::Color> {
        let texture = self.material.texture.as_ref()?;
        let (u, v) = self.uv(point);
        Some(texture.smooth_color(u, v))
    }
}

/// A ray's hit on a primitive. The primitive is borrowed, never owned.
#[derive(Clone, Copy, Debug)]
pub struct Collision<'a> {
    pub dist: f64,
    pub front: bool,
    pub point: core::Vec,
    pub normal: core::Vec,
    pub primitive: &'a Primitive,
}

impl<'a> Collision<'a> {
    pub fn texture_color(&self) -> Option<core::Color> {
        self.primitive.texture_color(&self.point)
    }

    pub fn material(&self) -> &'a material::Material {
        self.primitive.material()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    fn unit_sphere() -> Primitive {
        Primitive::new(Sphere::new(core::Vec::zero(), 1.0), material::Material::new()).unwrap()
    }

    #[test]
    fn test_collision_refers_back_to_primitive() {
        let prim = unit_sphere();
        let hit = prim.collide(core::Vec::new(0.0, 0.0, 5.0), core::Vec::new(0.0, 0.0, -3.0))
            .unwrap();
        assert!(std::ptr::eq(hit.primitive, &prim));
        assert_abs_diff_eq!(hit.dist, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_direction_misses() {
        let prim = unit_sphere();
        assert!(prim.collide(core::Vec::new(0.0, 0.0, 5.0), core::Vec::zero()).is_none());
    }

    #[test]
    fn test_short_direction_still_hits() {
        let prim = unit_sphere();
        let hit = prim.collide(core::Vec::new(0.0, 0.0, 5.0), core::Vec::new(0.0, 0.0, -1e-7))
            .unwrap();
        assert_abs_diff_eq!(hit.dist, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.normal.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_texture_color_requires_texture() {
        let prim = unit_sphere();
        assert!(prim.texture_color(&core::Vec::z_axis()).is_none());

        let red = core::Color::from_bytes(255, 0, 0);
        let textured = Primitive::new(
            Sphere::new(core::Vec::zero(), 1.0),
            material::Material::new().with_texture(Arc::new(material::Texture::filled(4, 4, red))))
            .unwrap();
        let hit = textured.collide(core::Vec::new(0.0, 0.0, 5.0), -core::Vec::z_axis()).unwrap();
        let c = hit.texture_color().unwrap();
        assert_abs_diff_eq!(c.r, red.r, epsilon = 1e-9);
        assert_abs_diff_eq!(c.g, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clone_keeps_sample_and_copies_material() {
        let prim = unit_sphere();
        let mut copy = prim.clone();
        assert_eq!(copy.sample, prim.sample);
        copy.material.refl = 0.5;
        assert_eq!(prim.material().refl, 0.0);
    }

    #[test]
    fn test_kind_lookup() {
        for kind in ["sphere", "plane", "square", "cube", "cylinder", "bezier"] {
            assert_eq!(Shape::for_kind(kind).unwrap().kind(), kind);
        }
        assert!(Shape::for_kind("torus").is_none());
        assert!(!Shape::for_kind("bezier").unwrap().is_supported());
        assert!(Shape::for_kind("cube").unwrap().is_supported());
    }

    #[test]
    fn test_primitive_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Primitive>();
    }
}
