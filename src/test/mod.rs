mod image;

pub use image::*;
pub use temp::*;
