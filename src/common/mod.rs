pub mod material;
pub mod moment;

pub use material::Material;
pub use moment::{moment_for_circle, moment_for_segment};
