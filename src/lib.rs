//! # authcert - Typed X.509 Certificates for Authentication
//!
//! authcert wraps a parsed X.509 certificate in an immutable
//! [`CertificateHandle`](cert::CertificateHandle) and exposes the parts of it
//! that authentication code cares about: the extended key usage purposes, the
//! public key, the private key when one was supplied, and portable encodings
//! of the certificate. It is built on the rustcrypto `x509-cert` and `der`
//! crates and does not validate chains or issue certificates.
//!
//! ## Supported Key Types
//!
//! - **RSA**: any modulus size
//! - **ECDSA**: P-256, P-384, and P-521 curves
//! - **Ed25519**: Edwards curve digital signature algorithm
//!
//! ## Supported Input Formats
//!
//! - **DER**: raw certificate bytes
//! - **Base64**: DER wrapped in standard base64, whitespace tolerated
//! - **PEM**: a `CERTIFICATE` block, optionally bundled with one private key
//!   (`PRIVATE KEY`, `RSA PRIVATE KEY` or `EC PRIVATE KEY`)
//! - **Archive**: the explicit format written by
//!   [`CertificateHandle::archive`](cert::CertificateHandle::archive)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authcert::{cert::CertificateHandle, oids};
//!
//! # fn main() -> Result<(), authcert::error::AuthCertError> {
//! # let encoded = "";
//! let cert = CertificateHandle::from_base64(encoded)?;
//!
//! if cert.has_enhanced_key_usage(oids::CLIENT_AUTH)? {
//!     let key = cert.public_key()?;
//!     println!("{} ({} bits)", key.algorithm(), key.key_size());
//! }
//!
//! let exported = cert.to_base64();
//! # let _ = exported;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use authcert::{cert::CertificateHandle, error::AuthCertError};
//!
//! match CertificateHandle::from_base64("not base64!") {
//!     Ok(_) => println!("Certificate loaded"),
//!     Err(AuthCertError::DecodingError(msg)) => println!("Bad input: {}", msg),
//!     Err(AuthCertError::InvalidCertificateError(msg)) => println!("Not a certificate: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`cert`]: the certificate handle, its constructors and accessors
//! - [`key`]: owned public and private key material
//! - [`oids`]: well-known key purpose identifiers
//! - [`error`]: error types

pub mod cert;
pub mod error;
pub mod key;
pub mod oids;
mod pem_utils;
