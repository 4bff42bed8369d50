pub mod asset_image;

pub use asset_image::{AssetImage, AssetImageResponse, NewAssetImage};
