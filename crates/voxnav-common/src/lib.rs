//! Common utilities and data structures used by both the voxel grid builder
//! and the path query crates

mod math;

pub use math::*;

/// Represents a 3D position
pub type Vec3 = glam::Vec3;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("point out of bounds: {0}")]
    OutOfBounds(String),

    #[error("no path: {0}")]
    NoPath(String),

    #[error("corner budget exceeded: {0}")]
    CornerBudgetExceeded(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for voxnav operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("cell size must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid parameter: cell size must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        fn read_missing() -> Result<Vec<u8>> {
            Ok(std::fs::read("/definitely/not/a/real/voxnav/path")?)
        }

        assert!(matches!(read_missing(), Err(Error::Io(_))));
    }
}
