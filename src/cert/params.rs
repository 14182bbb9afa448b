use bon::Builder;
use const_oid::db::rfc4519;
use der::{Tag, Tagged, asn1::Any};

/// Options controlling how text input is turned into certificate bytes.
///
/// # Fields
/// * `strip_whitespace` - Remove ASCII whitespace (line breaks included) before base64 decoding.
/// * `accept_pem` - Treat input starting with `-----BEGIN` as PEM rather than bare base64.
#[derive(Clone, Debug, Builder, PartialEq, Eq)]
pub struct ImportOptions {
    #[builder(default = true)]
    pub strip_whitespace: bool,
    #[builder(default)]
    pub accept_pem: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A read-only view of the common attributes of a subject or issuer name.
///
/// # Fields
/// * `common_name` - The common name (CN).
/// * `country` - The country (C).
/// * `state` - The state or province (ST).
/// * `locality` - The locality or city (L).
/// * `organization` - The organization (O).
/// * `organization_unit` - The organizational unit (OU).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
}

impl DistinguishedName {
    /// Creates a `DistinguishedName` from an X.509 name.
    ///
    /// The first occurrence of each attribute wins. Attributes with a
    /// non-string encoding are skipped.
    pub fn from_x509_name(x509dn: &x509_cert::name::DistinguishedName) -> Self {
        let mut dn = DistinguishedName::default();

        for rdn in x509dn.0.iter() {
            for attr in rdn.0.iter() {
                let slot = match attr.oid {
                    rfc4519::CN => &mut dn.common_name,
                    rfc4519::C => &mut dn.country,
                    rfc4519::ST => &mut dn.state,
                    rfc4519::L => &mut dn.locality,
                    rfc4519::O => &mut dn.organization,
                    rfc4519::OU => &mut dn.organization_unit,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = attribute_text(&attr.value);
                }
            }
        }

        dn
    }
}

fn attribute_text(value: &Any) -> Option<String> {
    match value.tag() {
        Tag::Utf8String | Tag::PrintableString | Tag::Ia5String | Tag::TeletexString => {
            std::str::from_utf8(value.value()).ok().map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use x509_cert::name::RdnSequence;

    #[test]
    fn test_from_x509_name() {
        let name = RdnSequence::from_str("CN=server.example,OU=Ops,O=Example Corp,C=US").unwrap();
        let dn = DistinguishedName::from_x509_name(&name);
        assert_eq!(dn.common_name.as_deref(), Some("server.example"));
        assert_eq!(dn.organization.as_deref(), Some("Example Corp"));
        assert_eq!(dn.organization_unit.as_deref(), Some("Ops"));
        assert_eq!(dn.country.as_deref(), Some("US"));
        assert_eq!(dn.state, None);
    }

    #[test]
    fn test_import_options_defaults() {
        let options = ImportOptions::default();
        assert!(options.strip_whitespace);
        assert!(!options.accept_pem);

        let strict = ImportOptions::builder().strip_whitespace(false).build();
        assert!(!strict.strip_whitespace);
    }
}
