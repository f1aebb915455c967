pub mod detection;
pub mod image;
pub mod loader;

pub use image::ImagePayload;
pub use loader::{LoadedImage, load_image};
