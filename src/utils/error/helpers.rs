//! Helper functions for creating specific error types

use super::types::TileBatchError;

impl TileBatchError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn archive<S: Into<String>>(message: S) -> Self {
        Self::Archive(message.into())
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<url::ParseError> for TileBatchError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid endpoint URL: {}", err))
    }
}

impl From<zip::result::ZipError> for TileBatchError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}
