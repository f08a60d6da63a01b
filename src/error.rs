//! Error types for the engine core

use thiserror::Error;

use crate::color::ColorParseError;

/// Everything that can go wrong while building engine values.
///
/// Per-tick operations (`Animation::next_frame`, condition checks) never
/// return these; failures surface only at construction or load time.
#[derive(Debug, Error)]
pub enum Error {
    /// The image source is not a multi-frame (animated) container
    #[error("invalid image format: {0}")]
    InvalidFormat(String),

    /// A constructor was handed a value it cannot work with
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A hex color string could not be parsed
    #[error(transparent)]
    Format(#[from] ColorParseError),

    /// Fetching a remote frame source failed
    #[error("failed to fetch {url}: {reason}")]
    Upstream { url: String, reason: String },

    /// The container was recognized but its frames could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed configuration JSON
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
