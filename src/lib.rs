// Pointer-driven grayscale touch texture.
//
// Feed normalized pointer samples in, call update() once per frame, and
// sample the resulting image to displace/shade a surface.

pub mod config;
pub mod deferred;
pub mod draw;
pub mod envelope;
pub mod error;
pub mod raster;
pub mod surface;
pub mod texture;
pub mod trail;
pub mod types;

pub use config::TouchOptions;
pub use error::Error;
pub use texture::TouchTexture;
pub use types::TouchPoint;
