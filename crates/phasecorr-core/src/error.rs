use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown image source: {0}")]
    UnknownSource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported color type: {0}")]
    UnsupportedColorType(String),
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
