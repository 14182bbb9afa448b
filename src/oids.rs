//! Well-known key purpose identifiers used by authentication consumers.
//!
//! These are stable dotted-decimal strings that can be compared directly
//! against the output of
//! [`CertificateHandle::enhanced_key_usages`](crate::cert::CertificateHandle::enhanced_key_usages).
//! They are not an exhaustive list: the extractor returns every purpose a
//! certificate declares, recognized or not.

/// TLS web server authentication (`id-kp-serverAuth`).
pub const SERVER_AUTH: &str = "1.3.6.1.5.5.7.3.1";

/// TLS web client authentication (`id-kp-clientAuth`).
pub const CLIENT_AUTH: &str = "1.3.6.1.5.5.7.3.2";

/// Microsoft smartcard logon.
pub const SMARTCARD_LOGON: &str = "1.3.6.1.4.1.311.20.2.2";

/// Organization-specific smartcard logon variant.
pub const CORPORATE_SMARTCARD_LOGON: &str = "1.3.6.1.4.1.311.42.2.1";

/// Virtual smartcard logon policy.
pub const VIRTUAL_SMARTCARD_LOGON_POLICY: &str = "1.3.6.1.4.1.311.42.1.5";

/// Virtual smartcard in-tune policy.
pub const VIRTUAL_SMARTCARD_INTUNE_POLICY: &str = "1.3.6.1.4.1.311.42.1.20";

/// Extended key usage extension (`id-ce-extKeyUsage`).
pub const EXTENDED_KEY_USAGE_EXTENSION: &str = "2.5.29.37";
