//! Error taxonomy
//!
//! The frame loop itself cannot fail once settings validate; errors come from
//! configuration, buffer allocation, and the optional file collaborators.

pub type LatheResult<T> = Result<T, LatheError>;

#[derive(thiserror::Error, Debug)]
pub enum LatheError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("resource error: {0}")]
    Resource(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl LatheError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }
}
