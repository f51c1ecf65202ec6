pub mod archive;
pub mod encoding;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
