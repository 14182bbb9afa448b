pub mod archive;
pub mod extensions;
pub mod params;

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use der::{Decode, Encode};
use extensions::{ExtendedKeyUsage, KeyPurpose, ToAndFromX509Extension};
use params::{DistinguishedName, ImportOptions};
use sha1::{Digest, Sha1};
use time::OffsetDateTime;
use tracing::{debug, trace, warn};
use x509_cert::Certificate;
use x509_cert::time::Time;

use crate::error::{AuthCertError, Result};
use crate::key::{PrivateKey, PublicKey, is_private_key_label};
use crate::pem_utils;

/// An immutable, parsed X.509 certificate.
///
/// The handle owns its parsed certificate exclusively and never hands out
/// references into it: key material, purposes and encodings are returned
/// as owned values, so they stay valid after the handle (or any clone of
/// it) is dropped.
#[derive(Clone)]
pub struct CertificateHandle {
    inner: Certificate,
    der: Vec<u8>,
    private_key: Option<PrivateKey>,
}

impl CertificateHandle {
    /// Parses a DER-encoded certificate.
    ///
    /// The input bytes are kept verbatim; exports and the thumbprint are
    /// computed over exactly what was decoded.
    ///
    /// # Errors
    /// `InvalidCertificateError` if the bytes are not exactly one
    /// well-formed certificate (trailing data is rejected).
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = Certificate::from_der(der).map_err(|e| {
            warn!(error = %e, "rejected certificate bytes");
            AuthCertError::InvalidCertificateError(e.to_string())
        })?;
        Ok(Self::from_parsed(inner, der.to_vec()))
    }

    /// Copies an already parsed certificate.
    ///
    /// The certificate is re-encoded and parsed again, so a value that was
    /// assembled by hand and does not survive a DER round trip is rejected
    /// with `InvalidCertificateError`.
    pub fn from_certificate(certificate: &Certificate) -> Result<Self> {
        let der = certificate
            .to_der()
            .map_err(|e| AuthCertError::InvalidCertificateError(e.to_string()))?;
        Self::from_der(&der)
    }

    /// Decodes a standard base64 string and parses the result as DER.
    ///
    /// Whitespace is ignored. See [`CertificateHandle::from_base64_with`].
    pub fn from_base64(encoded: &str) -> Result<Self> {
        Self::from_base64_with(encoded, &ImportOptions::default())
    }

    /// Decodes a base64 (or, when enabled, PEM) string and parses the result.
    ///
    /// # Errors
    /// `DecodingError` if the text is not valid base64;
    /// `InvalidCertificateError` if the decoded bytes are not a certificate.
    pub fn from_base64_with(encoded: &str, options: &ImportOptions) -> Result<Self> {
        if options.accept_pem && encoded.trim_start().starts_with("-----BEGIN") {
            return Self::from_pem(encoded);
        }

        let result = if options.strip_whitespace {
            let compact: String = encoded
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            STANDARD.decode(compact)
        } else {
            STANDARD.decode(encoded)
        };
        let decoded = result.map_err(|e| {
            warn!(error = %e, "rejected base64 certificate text");
            AuthCertError::from(e)
        })?;

        Self::from_der(&decoded)
    }

    /// Parses the first `CERTIFICATE` block of a PEM document.
    pub fn from_pem(pem_str: &str) -> Result<Self> {
        let blocks = pem_utils::pem_blocks(pem_str)?;
        let der = pem_utils::first_block(&blocks, pem_utils::CERTIFICATE_TAG).ok_or_else(|| {
            AuthCertError::DecodingError("no CERTIFICATE block found".to_string())
        })?;
        Self::from_der(der)
    }

    /// Parses a PEM bundle holding exactly one certificate and, optionally,
    /// its private key.
    ///
    /// The key may be PKCS#8 (`PRIVATE KEY`), PKCS#1 (`RSA PRIVATE KEY`) or
    /// SEC1 (`EC PRIVATE KEY`).
    ///
    /// # Errors
    /// `DecodingError` for malformed or encrypted blocks, a second
    /// certificate or key, or any other block label; `KeyMismatchError`
    /// when the key does not belong to the certificate.
    pub fn from_pem_bundle(pem_str: &str) -> Result<Self> {
        let mut cert_der = None;
        let mut key = None;
        for block in pem_utils::pem_blocks(pem_str)? {
            if block.tag() == pem_utils::CERTIFICATE_TAG {
                if cert_der.replace(block.into_contents()).is_some() {
                    return Err(AuthCertError::DecodingError(
                        "bundle holds more than one certificate".to_string(),
                    ));
                }
            } else if is_private_key_label(block.tag()) {
                if key.replace(PrivateKey::from_pem_block(&block)?).is_some() {
                    return Err(AuthCertError::DecodingError(
                        "bundle holds more than one private key".to_string(),
                    ));
                }
            } else {
                warn!(label = block.tag(), "rejected PEM bundle block");
                return Err(AuthCertError::DecodingError(format!(
                    "unexpected {} block in bundle",
                    block.tag()
                )));
            }
        }

        let cert_der = cert_der.ok_or_else(|| {
            AuthCertError::DecodingError("no CERTIFICATE block found".to_string())
        })?;
        let handle = Self::from_der(&cert_der)?;
        match key {
            Some(key) => handle.with_private_key(key),
            None => Ok(handle),
        }
    }

    /// Parses a DER certificate together with its PKCS#8 DER private key.
    pub fn from_der_with_private_key(cert_der: &[u8], pkcs8_der: &[u8]) -> Result<Self> {
        let handle = Self::from_der(cert_der)?;
        let key = PrivateKey::from_pkcs8_der(pkcs8_der)?;
        handle.with_private_key(key)
    }

    /// Restores a handle from bytes produced by [`CertificateHandle::archive`].
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        archive::decode(bytes)
    }

    /// Attaches the private key that belongs to this certificate.
    ///
    /// # Errors
    /// `KeyMismatchError` if the key's public half differs from the
    /// certificate's public key.
    pub fn with_private_key(mut self, key: PrivateKey) -> Result<Self> {
        let public = self.public_key()?;
        if !key.matches(&public) {
            warn!(
                key_algorithm = %key.algorithm(),
                certificate_algorithm = %public.algorithm(),
                "private key does not match certificate"
            );
            return Err(AuthCertError::KeyMismatchError(format!(
                "{} private key is not the pair of the certificate's {} public key",
                key.algorithm(),
                public.algorithm()
            )));
        }
        self.private_key = Some(key);
        Ok(self)
    }

    // `der` must be the bytes `inner` was decoded from.
    fn from_parsed(inner: Certificate, der: Vec<u8>) -> Self {
        let handle = Self {
            inner,
            der,
            private_key: None,
        };
        debug!(
            subject = %handle.subject(),
            serial = %handle.serial_number_hex(),
            "loaded certificate"
        );
        handle
    }

    /// The certificate's purposes as dotted-decimal OID strings.
    ///
    /// Purposes from every extended key usage extension are returned in the
    /// order they are declared, extension by extension, without
    /// deduplication. A certificate with no such extension yields an empty
    /// list.
    ///
    /// # Errors
    /// `InvalidCertificateError` if an extended key usage extension does
    /// not decode.
    pub fn enhanced_key_usages(&self) -> Result<Vec<String>> {
        Ok(self
            .key_purposes()?
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Typed form of [`CertificateHandle::enhanced_key_usages`].
    pub fn key_purposes(&self) -> Result<Vec<KeyPurpose>> {
        let mut purposes = Vec::new();
        for ext in self.inner.tbs_certificate.extensions.iter().flatten() {
            if ext.extn_id == ExtendedKeyUsage::OID {
                let eku = ExtendedKeyUsage::from_x509_extension_value(ext.extn_value.as_bytes())?;
                purposes.extend(eku.usage);
            }
        }
        trace!(count = purposes.len(), "read extended key usages");
        Ok(purposes)
    }

    /// Returns true if `oid` is one of the certificate's declared purposes.
    pub fn has_enhanced_key_usage(&self, oid: &str) -> Result<bool> {
        Ok(self.enhanced_key_usages()?.iter().any(|usage| usage == oid))
    }

    /// The certificate's public key as an owned value.
    ///
    /// # Errors
    /// `UnsupportedAlgorithmError` for key algorithms without a
    /// [`PublicKey`] variant and `InvalidCertificateError` for malformed keys.
    pub fn public_key(&self) -> Result<PublicKey> {
        // Extract from a private copy; the result shares nothing with `self`.
        let spki = self.inner.tbs_certificate.subject_public_key_info.clone();
        let key = PublicKey::from_x509spki(&spki)?;
        trace!(algorithm = %key.algorithm(), bits = key.key_size(), "extracted public key");
        Ok(key)
    }

    /// The private key attached at construction, as an owned copy.
    ///
    /// # Errors
    /// `NoPrivateKeyError` if the handle was built without one.
    pub fn private_key(&self) -> Result<PrivateKey> {
        self.private_key
            .clone()
            .ok_or(AuthCertError::NoPrivateKeyError)
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Standard base64 (padded) of the certificate's DER encoding.
    ///
    /// Never includes private key material.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.der)
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> String {
        pem_utils::der_to_pem(&self.der, pem_utils::CERTIFICATE_TAG)
    }

    /// Encodes the handle, including any private key, in the archive format
    /// described in [`archive`].
    pub fn archive(&self) -> Result<Vec<u8>> {
        archive::encode(self)
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn to_der(&self) -> Vec<u8> {
        self.der.clone()
    }

    /// An owned copy of the underlying parsed certificate.
    pub fn to_x509(&self) -> Certificate {
        self.inner.clone()
    }

    /// The subject as an RFC 4514 string.
    pub fn subject(&self) -> String {
        self.inner.tbs_certificate.subject.to_string()
    }

    /// The issuer as an RFC 4514 string.
    pub fn issuer(&self) -> String {
        self.inner.tbs_certificate.issuer.to_string()
    }

    pub fn subject_name(&self) -> DistinguishedName {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.subject)
    }

    pub fn issuer_name(&self) -> DistinguishedName {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.issuer)
    }

    /// Big-endian serial number bytes as encoded in the certificate.
    pub fn serial_number(&self) -> Vec<u8> {
        self.inner.tbs_certificate.serial_number.as_bytes().to_vec()
    }

    pub fn serial_number_hex(&self) -> String {
        hex::encode_upper(self.inner.tbs_certificate.serial_number.as_bytes())
    }

    pub fn not_before(&self) -> OffsetDateTime {
        to_offset_date_time(&self.inner.tbs_certificate.validity.not_before)
    }

    pub fn not_after(&self) -> OffsetDateTime {
        to_offset_date_time(&self.inner.tbs_certificate.validity.not_after)
    }

    /// SHA-1 digest of the DER encoding, as uppercase hex.
    pub fn thumbprint(&self) -> String {
        hex::encode_upper(Sha1::digest(&self.der))
    }
}

fn to_offset_date_time(time: &Time) -> OffsetDateTime {
    match time {
        Time::UtcTime(ut) => OffsetDateTime::from(ut.to_system_time()),
        Time::GeneralTime(gt) => OffsetDateTime::from(gt.to_system_time()),
    }
}

impl fmt::Debug for CertificateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateHandle")
            .field("subject", &self.subject())
            .field("issuer", &self.issuer())
            .field("serial_number", &self.serial_number_hex())
            .field("has_private_key", &self.has_private_key())
            .finish()
    }
}

impl TryFrom<&[u8]> for CertificateHandle {
    type Error = AuthCertError;

    fn try_from(der: &[u8]) -> Result<Self> {
        Self::from_der(der)
    }
}

impl TryFrom<&Certificate> for CertificateHandle {
    type Error = AuthCertError;

    fn try_from(certificate: &Certificate) -> Result<Self> {
        Self::from_certificate(certificate)
    }
}
