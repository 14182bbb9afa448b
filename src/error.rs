//! use authcert::error::AuthCertError;

use thiserror::Error;

/// Represents errors that can occur in the authcert library.
///
/// Every variant is recoverable by the caller and is returned from the call
/// that triggered it; nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthCertError {
    /// Malformed base64, PEM, key or archive input.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// The bytes do not parse as a well-formed X.509 certificate.
    #[error("Invalid certificate: {0}")]
    InvalidCertificateError(String),

    /// Private key material was requested from a handle that has none.
    #[error("Certificate has no associated private key")]
    NoPrivateKeyError,

    /// The supplied private key does not belong to the certificate.
    #[error("Private key does not match certificate: {0}")]
    KeyMismatchError(String),

    /// The certificate carries a key algorithm this library cannot represent.
    #[error("Unsupported key algorithm: {0}")]
    UnsupportedAlgorithmError(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),
}

pub type Result<T> = std::result::Result<T, AuthCertError>;

impl From<der::Error> for AuthCertError {
    /// Converts a `der::Error` into an `AuthCertError`.
    fn from(err: der::Error) -> Self {
        AuthCertError::DecodingError(err.to_string())
    }
}

impl From<base64::DecodeError> for AuthCertError {
    fn from(err: base64::DecodeError) -> Self {
        AuthCertError::DecodingError(err.to_string())
    }
}

impl From<pem::PemError> for AuthCertError {
    fn from(err: pem::PemError) -> Self {
        AuthCertError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for AuthCertError {
    fn from(err: pkcs8::Error) -> Self {
        AuthCertError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for AuthCertError {
    fn from(err: pkcs8::spki::Error) -> Self {
        AuthCertError::InvalidCertificateError(err.to_string())
    }
}
