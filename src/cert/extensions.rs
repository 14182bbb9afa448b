use std::fmt;

use const_oid::AssociatedOid;
use der::{Decode, Encode, oid::ObjectIdentifier};

use crate::error::AuthCertError;
use crate::oids;

/// Trait for converting to and from X.509 extensions.
///
/// This trait provides methods to encode and decode X.509 extension values.
///
/// # Example
/// ```
/// use authcert::cert::extensions::{ExtendedKeyUsage, KeyPurpose, ToAndFromX509Extension};
/// let eku = ExtendedKeyUsage { usage: vec![KeyPurpose::ServerAuth] };
/// let encoded = eku.to_x509_extension_value().unwrap();
/// let decoded = ExtendedKeyUsage::from_x509_extension_value(&encoded).unwrap();
/// assert_eq!(eku.usage, decoded.usage);
/// ```
pub trait ToAndFromX509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Encodes the extension into a DER-encoded byte vector.
    fn to_x509_extension_value(&self) -> Result<Vec<u8>, AuthCertError>;

    /// Decodes the extension from a DER-encoded byte slice.
    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, AuthCertError>
    where
        Self: Sized;
}

/// Represents the Extended Key Usage extension.
///
/// This extension indicates purposes for which the public key may be used.
/// Purposes keep the order in which the certificate declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    pub usage: Vec<KeyPurpose>,
}

impl ToAndFromX509Extension for ExtendedKeyUsage {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::ExtendedKeyUsage::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, AuthCertError> {
        let oids: Vec<ObjectIdentifier> = self.usage.iter().map(KeyPurpose::oid).collect();
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage(oids);
        eku.to_der()
            .map_err(|e| AuthCertError::EncodingError(e.to_string()))
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, AuthCertError> {
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage::from_der(extension).map_err(|e| {
            AuthCertError::InvalidCertificateError(format!("extended key usage: {e}"))
        })?;
        let usage = eku.0.into_iter().map(KeyPurpose::from).collect();
        Ok(Self { usage })
    }
}

const SMARTCARD_LOGON: ObjectIdentifier = ObjectIdentifier::new_unwrap(oids::SMARTCARD_LOGON);
const CORPORATE_SMARTCARD_LOGON: ObjectIdentifier =
    ObjectIdentifier::new_unwrap(oids::CORPORATE_SMARTCARD_LOGON);
const VIRTUAL_SMARTCARD_LOGON_POLICY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap(oids::VIRTUAL_SMARTCARD_LOGON_POLICY);
const VIRTUAL_SMARTCARD_INTUNE_POLICY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap(oids::VIRTUAL_SMARTCARD_INTUNE_POLICY);

/// A single purpose from the Extended Key Usage extension.
///
/// Purposes without a named variant are carried as [`KeyPurpose::Other`]
/// and are never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPurpose {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    TimeStamping,
    OcspSigning,
    SmartcardLogon,
    CorporateSmartcardLogon,
    VirtualSmartcardLogonPolicy,
    VirtualSmartcardIntunePolicy,
    Other(ObjectIdentifier),
}

impl KeyPurpose {
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            KeyPurpose::ServerAuth => const_oid::db::rfc5912::ID_KP_SERVER_AUTH,
            KeyPurpose::ClientAuth => const_oid::db::rfc5912::ID_KP_CLIENT_AUTH,
            KeyPurpose::CodeSigning => const_oid::db::rfc5912::ID_KP_CODE_SIGNING,
            KeyPurpose::EmailProtection => const_oid::db::rfc5912::ID_KP_EMAIL_PROTECTION,
            KeyPurpose::TimeStamping => const_oid::db::rfc5912::ID_KP_TIME_STAMPING,
            KeyPurpose::OcspSigning => const_oid::db::rfc5912::ID_KP_OCSP_SIGNING,
            KeyPurpose::SmartcardLogon => SMARTCARD_LOGON,
            KeyPurpose::CorporateSmartcardLogon => CORPORATE_SMARTCARD_LOGON,
            KeyPurpose::VirtualSmartcardLogonPolicy => VIRTUAL_SMARTCARD_LOGON_POLICY,
            KeyPurpose::VirtualSmartcardIntunePolicy => VIRTUAL_SMARTCARD_INTUNE_POLICY,
            KeyPurpose::Other(oid) => *oid,
        }
    }

    /// True for the purposes that allow signing on to a host with a smartcard.
    pub fn is_smartcard_logon(&self) -> bool {
        matches!(
            self,
            KeyPurpose::SmartcardLogon
                | KeyPurpose::CorporateSmartcardLogon
                | KeyPurpose::VirtualSmartcardLogonPolicy
                | KeyPurpose::VirtualSmartcardIntunePolicy
        )
    }
}

impl From<ObjectIdentifier> for KeyPurpose {
    fn from(oid: ObjectIdentifier) -> Self {
        match oid {
            const_oid::db::rfc5912::ID_KP_SERVER_AUTH => KeyPurpose::ServerAuth,
            const_oid::db::rfc5912::ID_KP_CLIENT_AUTH => KeyPurpose::ClientAuth,
            const_oid::db::rfc5912::ID_KP_CODE_SIGNING => KeyPurpose::CodeSigning,
            const_oid::db::rfc5912::ID_KP_EMAIL_PROTECTION => KeyPurpose::EmailProtection,
            const_oid::db::rfc5912::ID_KP_TIME_STAMPING => KeyPurpose::TimeStamping,
            const_oid::db::rfc5912::ID_KP_OCSP_SIGNING => KeyPurpose::OcspSigning,
            SMARTCARD_LOGON => KeyPurpose::SmartcardLogon,
            CORPORATE_SMARTCARD_LOGON => KeyPurpose::CorporateSmartcardLogon,
            VIRTUAL_SMARTCARD_LOGON_POLICY => KeyPurpose::VirtualSmartcardLogonPolicy,
            VIRTUAL_SMARTCARD_INTUNE_POLICY => KeyPurpose::VirtualSmartcardIntunePolicy,
            other => KeyPurpose::Other(other),
        }
    }
}

impl From<KeyPurpose> for ObjectIdentifier {
    fn from(value: KeyPurpose) -> Self {
        value.oid()
    }
}

impl fmt::Display for KeyPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.oid())
    }
}
