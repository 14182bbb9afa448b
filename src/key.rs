use std::fmt;

use const_oid::ObjectIdentifier;
use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use const_oid::db::rfc8410::ID_ED_25519;
use der::{Decode, Encode};
use ed25519_dalek::{SigningKey as Ed25519SigningKey, VerifyingKey as Ed25519VerifyingKey};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, PrivateKeyInfo};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey, traits::PublicKeyParts};
use sec1::EcPrivateKey;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{AuthCertError, Result};

/// The asymmetric algorithm family of a key, including the curve for ECDSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    EcdsaP256,
    EcdsaP384,
    EcdsaP521,
    Ed25519,
}

impl KeyAlgorithm {
    /// The `SubjectPublicKeyInfo` algorithm identifier for this family.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            KeyAlgorithm::Rsa => RSA_ENCRYPTION,
            KeyAlgorithm::EcdsaP256 | KeyAlgorithm::EcdsaP384 | KeyAlgorithm::EcdsaP521 => {
                ID_EC_PUBLIC_KEY
            }
            KeyAlgorithm::Ed25519 => ID_ED_25519,
        }
    }

    /// The named curve carried in the algorithm parameters, for ECDSA keys.
    pub fn curve(&self) -> Option<ObjectIdentifier> {
        match self {
            KeyAlgorithm::EcdsaP256 => Some(SECP_256_R_1),
            KeyAlgorithm::EcdsaP384 => Some(SECP_384_R_1),
            KeyAlgorithm::EcdsaP521 => Some(SECP_521_R_1),
            KeyAlgorithm::Rsa | KeyAlgorithm::Ed25519 => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::EcdsaP256 => "ECDSA P-256",
            KeyAlgorithm::EcdsaP384 => "ECDSA P-384",
            KeyAlgorithm::EcdsaP521 => "ECDSA P-521",
            KeyAlgorithm::Ed25519 => "Ed25519",
        }
    }

    /// Resolves an algorithm identifier and optional curve parameter.
    fn from_oids(algorithm: ObjectIdentifier, curve: Option<ObjectIdentifier>) -> Result<Self> {
        match (algorithm, curve) {
            (RSA_ENCRYPTION, _) => Ok(KeyAlgorithm::Rsa),
            (ID_ED_25519, _) => Ok(KeyAlgorithm::Ed25519),
            (ID_EC_PUBLIC_KEY, Some(SECP_256_R_1)) => Ok(KeyAlgorithm::EcdsaP256),
            (ID_EC_PUBLIC_KEY, Some(SECP_384_R_1)) => Ok(KeyAlgorithm::EcdsaP384),
            (ID_EC_PUBLIC_KEY, Some(SECP_521_R_1)) => Ok(KeyAlgorithm::EcdsaP521),
            (ID_EC_PUBLIC_KEY, Some(other)) => Err(AuthCertError::UnsupportedAlgorithmError(
                format!("elliptic curve {other}"),
            )),
            (ID_EC_PUBLIC_KEY, None) => Err(AuthCertError::InvalidCertificateError(
                "EC key is missing its named curve".to_string(),
            )),
            (other, _) => Err(AuthCertError::UnsupportedAlgorithmError(other.to_string())),
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An owned public key taken from a certificate.
///
/// Values of this type never borrow from the certificate they were read
/// from and stay valid after that certificate is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    EcdsaP256(p256::PublicKey),
    EcdsaP384(p384::PublicKey),
    EcdsaP521(p521::PublicKey),
    Ed25519(Ed25519VerifyingKey),
}

impl PublicKey {
    /// Decodes a `SubjectPublicKeyInfo` into an owned key.
    ///
    /// # Errors
    /// `UnsupportedAlgorithmError` for algorithms other than RSA, ECDSA on
    /// the NIST prime curves and Ed25519; `InvalidCertificateError` when the
    /// key bits do not decode.
    pub fn from_x509spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let curve = match &spki.algorithm.parameters {
            Some(params) if spki.algorithm.oid == ID_EC_PUBLIC_KEY => {
                Some(params.decode_as::<ObjectIdentifier>().map_err(|e| {
                    AuthCertError::InvalidCertificateError(format!("EC parameters: {e}"))
                })?)
            }
            _ => None,
        };
        let algorithm = KeyAlgorithm::from_oids(spki.algorithm.oid, curve)?;

        let der = spki
            .to_der()
            .map_err(|e| AuthCertError::InvalidCertificateError(e.to_string()))?;

        let key = match algorithm {
            KeyAlgorithm::Rsa => PublicKey::Rsa(RsaPublicKey::from_public_key_der(&der)?),
            KeyAlgorithm::EcdsaP256 => {
                PublicKey::EcdsaP256(p256::PublicKey::from_public_key_der(&der)?)
            }
            KeyAlgorithm::EcdsaP384 => {
                PublicKey::EcdsaP384(p384::PublicKey::from_public_key_der(&der)?)
            }
            KeyAlgorithm::EcdsaP521 => {
                PublicKey::EcdsaP521(p521::PublicKey::from_public_key_der(&der)?)
            }
            KeyAlgorithm::Ed25519 => {
                PublicKey::Ed25519(Ed25519VerifyingKey::from_public_key_der(&der)?)
            }
        };
        Ok(key)
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Rsa(_) => KeyAlgorithm::Rsa,
            PublicKey::EcdsaP256(_) => KeyAlgorithm::EcdsaP256,
            PublicKey::EcdsaP384(_) => KeyAlgorithm::EcdsaP384,
            PublicKey::EcdsaP521(_) => KeyAlgorithm::EcdsaP521,
            PublicKey::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// Key size in bits: the modulus length for RSA, the field size otherwise.
    pub fn key_size(&self) -> usize {
        match self {
            PublicKey::Rsa(key) => key.n().bits(),
            PublicKey::EcdsaP256(_) => 256,
            PublicKey::EcdsaP384(_) => 384,
            PublicKey::EcdsaP521(_) => 521,
            PublicKey::Ed25519(_) => 256,
        }
    }

    /// Encodes the key as a DER `SubjectPublicKeyInfo`.
    pub fn to_public_key_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            PublicKey::Rsa(key) => key.to_public_key_der(),
            PublicKey::EcdsaP256(key) => key.to_public_key_der(),
            PublicKey::EcdsaP384(key) => key.to_public_key_der(),
            PublicKey::EcdsaP521(key) => key.to_public_key_der(),
            PublicKey::Ed25519(key) => key.to_public_key_der(),
        }
        .map_err(|e| AuthCertError::EncodingError(e.to_string()))?;
        Ok(document.as_bytes().to_vec())
    }
}

/// An owned private key bound to a certificate handle.
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(Box<RsaPrivateKey>),
    EcdsaP256(p256::SecretKey),
    EcdsaP384(p384::SecretKey),
    EcdsaP521(p521::SecretKey),
    Ed25519(Ed25519SigningKey),
}

impl PrivateKey {
    /// Imports a private key from PKCS#8 DER (`PrivateKeyInfo`).
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::from_der(der)?;
        let curve = if info.algorithm.oid == ID_EC_PUBLIC_KEY {
            Some(info.algorithm.parameters_oid().map_err(|e| {
                AuthCertError::DecodingError(format!("EC private key parameters: {e}"))
            })?)
        } else {
            None
        };
        let algorithm = KeyAlgorithm::from_oids(info.algorithm.oid, curve).map_err(|e| match e {
            AuthCertError::InvalidCertificateError(msg) => AuthCertError::DecodingError(msg),
            other => other,
        })?;

        let key = match algorithm {
            KeyAlgorithm::Rsa => PrivateKey::Rsa(Box::new(RsaPrivateKey::from_pkcs8_der(der)?)),
            KeyAlgorithm::EcdsaP256 => {
                PrivateKey::EcdsaP256(p256::SecretKey::from_pkcs8_der(der)?)
            }
            KeyAlgorithm::EcdsaP384 => {
                PrivateKey::EcdsaP384(p384::SecretKey::from_pkcs8_der(der)?)
            }
            KeyAlgorithm::EcdsaP521 => {
                PrivateKey::EcdsaP521(p521::SecretKey::from_pkcs8_der(der)?)
            }
            KeyAlgorithm::Ed25519 => {
                PrivateKey::Ed25519(Ed25519SigningKey::from_pkcs8_der(der)?)
            }
        };
        Ok(key)
    }

    /// Imports an RSA private key from PKCS#1 DER (`RSAPrivateKey`).
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let key = RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| AuthCertError::DecodingError(format!("PKCS#1 private key: {e}")))?;
        Ok(PrivateKey::Rsa(Box::new(key)))
    }

    /// Imports an EC private key from SEC1 DER (`ECPrivateKey`).
    ///
    /// The key must name its curve in the `parameters` field.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self> {
        let info = EcPrivateKey::from_der(der)?;
        let curve = info.parameters.and_then(|params| params.named_curve()).ok_or_else(|| {
            AuthCertError::DecodingError("SEC1 private key does not name its curve".to_string())
        })?;

        let sec1_error = |e: p256::elliptic_curve::Error| {
            AuthCertError::DecodingError(format!("SEC1 private key: {e}"))
        };
        let key = match KeyAlgorithm::from_oids(ID_EC_PUBLIC_KEY, Some(curve))? {
            KeyAlgorithm::EcdsaP256 => {
                PrivateKey::EcdsaP256(p256::SecretKey::from_sec1_der(der).map_err(sec1_error)?)
            }
            KeyAlgorithm::EcdsaP384 => {
                PrivateKey::EcdsaP384(p384::SecretKey::from_sec1_der(der).map_err(sec1_error)?)
            }
            KeyAlgorithm::EcdsaP521 => {
                PrivateKey::EcdsaP521(p521::SecretKey::from_sec1_der(der).map_err(sec1_error)?)
            }
            other => {
                return Err(AuthCertError::UnsupportedAlgorithmError(format!(
                    "{other} in a SEC1 private key"
                )));
            }
        };
        Ok(key)
    }

    /// Imports a private key from a single PEM block.
    ///
    /// Accepts `PRIVATE KEY` (PKCS#8), `RSA PRIVATE KEY` (PKCS#1) and
    /// `EC PRIVATE KEY` (SEC1). Encrypted keys and any other label are
    /// rejected with `DecodingError`.
    pub fn from_pem_block(block: &pem::Pem) -> Result<Self> {
        match block.tag() {
            PKCS8_PEM_TAG => Self::from_pkcs8_der(block.contents()),
            PKCS1_PEM_TAG => Self::from_pkcs1_der(block.contents()),
            SEC1_PEM_TAG => Self::from_sec1_der(block.contents()),
            ENCRYPTED_PKCS8_PEM_TAG => Err(AuthCertError::DecodingError(
                "encrypted private keys are not supported".to_string(),
            )),
            other => Err(AuthCertError::DecodingError(format!(
                "unsupported private key block {other}"
            ))),
        }
    }

    /// Imports a private key from a PEM `PRIVATE KEY` block.
    pub fn from_pkcs8_pem(pem_str: &str) -> Result<Self> {
        let block = pem::parse(pem_str)?;
        if block.tag() != PKCS8_PEM_TAG {
            return Err(AuthCertError::DecodingError(format!(
                "expected a {PKCS8_PEM_TAG} block, found {}",
                block.tag()
            )));
        }
        Self::from_pkcs8_der(block.contents())
    }

    /// Encodes the key as PKCS#8 DER.
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            PrivateKey::Rsa(key) => key.to_pkcs8_der(),
            PrivateKey::EcdsaP256(key) => key.to_pkcs8_der(),
            PrivateKey::EcdsaP384(key) => key.to_pkcs8_der(),
            PrivateKey::EcdsaP521(key) => key.to_pkcs8_der(),
            // v1 form without the embedded public key; wider tool support.
            PrivateKey::Ed25519(key) => ed25519_dalek::pkcs8::KeypairBytes {
                secret_key: key.to_bytes(),
                public_key: None,
            }
            .to_pkcs8_der(),
        }
        .map_err(|e| AuthCertError::EncodingError(e.to_string()))?;
        Ok(document.as_bytes().to_vec())
    }

    /// Derives the matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Rsa(key) => PublicKey::Rsa(RsaPublicKey::from(key.as_ref())),
            PrivateKey::EcdsaP256(key) => PublicKey::EcdsaP256(key.public_key()),
            PrivateKey::EcdsaP384(key) => PublicKey::EcdsaP384(key.public_key()),
            PrivateKey::EcdsaP521(key) => PublicKey::EcdsaP521(key.public_key()),
            PrivateKey::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PrivateKey::Rsa(_) => KeyAlgorithm::Rsa,
            PrivateKey::EcdsaP256(_) => KeyAlgorithm::EcdsaP256,
            PrivateKey::EcdsaP384(_) => KeyAlgorithm::EcdsaP384,
            PrivateKey::EcdsaP521(_) => KeyAlgorithm::EcdsaP521,
            PrivateKey::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    pub fn key_size(&self) -> usize {
        match self {
            PrivateKey::Rsa(key) => key.n().bits(),
            other => other.public_key().key_size(),
        }
    }

    /// Returns true when `public` is the public half of this key.
    pub fn matches(&self, public: &PublicKey) -> bool {
        self.public_key() == *public
    }
}

// Secret material stays out of debug output.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

pub(crate) const PKCS8_PEM_TAG: &str = "PRIVATE KEY";
pub(crate) const ENCRYPTED_PKCS8_PEM_TAG: &str = "ENCRYPTED PRIVATE KEY";
pub(crate) const PKCS1_PEM_TAG: &str = "RSA PRIVATE KEY";
pub(crate) const SEC1_PEM_TAG: &str = "EC PRIVATE KEY";

/// True for PEM labels that carry private key material.
pub(crate) fn is_private_key_label(label: &str) -> bool {
    label.ends_with("PRIVATE KEY")
}
