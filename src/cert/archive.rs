//! Explicit archive format for [`CertificateHandle`].
//!
//! An archive is a single DER value:
//!
//! ```text
//! CertificateArchive ::= SEQUENCE {
//!     version      INTEGER (1),
//!     certificate  Certificate,
//!     privateKey   [0] EXPLICIT OCTET STRING OPTIONAL
//!                  -- PKCS#8 PrivateKeyInfo, present only when the
//!                  -- handle carries a private key
//! }
//! ```
//!
//! The certificate is carried as its original encoding and restored byte
//! for byte.
//!
//! Archives holding a private key contain the key in the clear and must
//! be stored accordingly.

use der::{Any, Decode, Encode, Sequence, asn1::OctetString};

use super::CertificateHandle;
use crate::error::{AuthCertError, Result};
use crate::key::PrivateKey;

pub const ARCHIVE_VERSION: u8 = 1;

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct CertificateArchive {
    version: u8,
    certificate: Any,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    private_key: Option<OctetString>,
}

pub(crate) fn encode(handle: &CertificateHandle) -> Result<Vec<u8>> {
    let private_key = match handle.private_key.as_ref() {
        Some(key) => Some(
            OctetString::new(key.to_pkcs8_der()?)
                .map_err(|e| AuthCertError::EncodingError(e.to_string()))?,
        ),
        None => None,
    };

    let archive = CertificateArchive {
        version: ARCHIVE_VERSION,
        certificate: Any::from_der(handle.as_der())
            .map_err(|e| AuthCertError::EncodingError(e.to_string()))?,
        private_key,
    };
    archive
        .to_der()
        .map_err(|e| AuthCertError::EncodingError(e.to_string()))
}

pub(crate) fn decode(bytes: &[u8]) -> Result<CertificateHandle> {
    let archive = CertificateArchive::from_der(bytes)
        .map_err(|e| AuthCertError::DecodingError(format!("certificate archive: {e}")))?;

    if archive.version != ARCHIVE_VERSION {
        return Err(AuthCertError::DecodingError(format!(
            "unsupported certificate archive version {}",
            archive.version
        )));
    }

    let cert_der = archive
        .certificate
        .to_der()
        .map_err(|e| AuthCertError::DecodingError(format!("certificate archive: {e}")))?;
    let handle = CertificateHandle::from_der(&cert_der)?;
    match archive.private_key {
        Some(key) => handle.with_private_key(PrivateKey::from_pkcs8_der(key.as_bytes())?),
        None => Ok(handle),
    }
}
