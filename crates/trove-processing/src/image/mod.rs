pub mod optimize;
pub mod processor;
pub mod thumbnail;

pub use optimize::optimize;
pub use processor::{extract_metadata, ImageMetadata};
pub use thumbnail::{create_thumbnail, ThumbnailSpec};
