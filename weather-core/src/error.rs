use thiserror::Error;

/// Ways a weather check can fail. Each variant is produced where it is
/// detected and reaches the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckError {
    /// Input does not look like a zipcode.
    #[error("invalid zipcode")]
    InvalidZipcode,

    /// The locale resolver could not be reached or answered garbage.
    #[error("error on get zipcode")]
    LocaleLookupFailed,

    /// The locale resolver answered but knows no locality for the code.
    #[error("can not find zipcode")]
    ZipcodeNotFound,

    /// The weather lookup could not be reached or answered garbage.
    #[error("error on get weather")]
    WeatherLookupFailed,
}
