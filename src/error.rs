use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("OAuth sign failed : {0}")]
    Signer(#[from] SignError),
    #[error("missing environment variable : {0}")]
    MissingEnvVar(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("consumer key is empty, check the credential configuration.")]
    MissingConsumerKey,
    #[error("consumer secret is empty, check the credential configuration.")]
    MissingConsumerSecret,
    #[error("invalid url {0} : {1}")]
    InvalidUrl(String, String),
    #[error("parameter {0} is reserved and cannot be supplied by the caller.")]
    ReservedParameter(String),
    #[error("form body could not be serialized : {0}")]
    InvalidForm(String),
    #[error("value for header {0} is not a valid header value.")]
    InvalidHeaderValue(&'static str),
    #[error("unknown parameter : {0}")]
    UnknownParameter(String),
    #[error("required parameter {0} is missing.")]
    MissingParameter(&'static str),
    #[error("path argument {0} is missing.")]
    MissingPathArgument(String),
}
