mod stage;
pub use crate::render::stage::Stage;
