use thiserror::Error;
use tokencert_keys::AttributeType;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Name(#[from] tokencert_pkix_types::name::Error),

    #[error("missing attribute {0}")]
    MissingAttribute(AttributeType),

    #[error("{0}")]
    Key(tokencert_keys::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex in {attribute}: {source}")]
    Hex {
        attribute: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<tokencert_keys::Error> for Error {
    fn from(e: tokencert_keys::Error) -> Self {
        match e {
            tokencert_keys::Error::MissingAttribute(attribute) => {
                Error::MissingAttribute(attribute)
            }
            other => Error::Key(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
