mod bezier;
pub use crate::geom::bezier::{Bezier, MAX_DEGREE};

mod cube;
pub use crate::geom::cube::{Cube, Face};

mod cylinder;
pub use crate::geom::cylinder::Cylinder;

mod error;
pub use crate::geom::error::GeomError;

mod plane;
pub use crate::geom::plane::Plane;

mod prim;
pub use crate::geom::prim::{Collision, Primitive, Shape, Surface, SurfaceHit};

mod sphere;
pub use crate::geom::sphere::Sphere;

mod square;
pub use crate::geom::square::Square;
