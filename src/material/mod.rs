mod blur;
pub use crate::material::blur::{blur_by_name, Blur, ExpBlur};

mod material;
pub use crate::material::material::Material;

mod texture;
pub use crate::material::texture::{Texture, TextureError};
