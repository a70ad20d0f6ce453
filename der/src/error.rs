use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),
    #[error("indefinite length is not allowed in DER")]
    IndefiniteLength,
    #[error("high tag number form is not supported")]
    UnsupportedTagNumber,
    #[error("constructed values nested deeper than {}", crate::MAX_NESTING_DEPTH)]
    NestingTooDeep,
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.code {
                nom::error::ErrorKind::LengthValue => Error::IndefiniteLength,
                nom::error::ErrorKind::TagBits => Error::UnsupportedTagNumber,
                nom::error::ErrorKind::Count => Error::NestingTooDeep,
                code => Error::Parser(code),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
