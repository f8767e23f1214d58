pub mod errors;
pub mod types;

pub use errors::{ConfigError, HostError, PlatformError};
pub use types::{Dpi, PixelPoint, PixelRect, PixelSize, BASE_DPI};

pub type Result<T> = std::result::Result<T, HostError>;
