#![allow(dead_code)]

use authcert::cert::CertificateHandle;

/// RSA-2048, EKU serverAuth + clientAuth, serial 0x1A2B3C.
pub const RSA_EKU_PEM: &str = include_str!("data/rsa_eku.pem");
pub const RSA_EKU_DER: &[u8] = include_bytes!("data/rsa_eku.der");
pub const RSA_KEY_PEM: &str = include_str!("data/rsa.key");
/// The RSA key above as PKCS#1 `RSA PRIVATE KEY`.
pub const RSA_PKCS1_KEY_PEM: &str = include_str!("data/rsa_pkcs1.key");
/// `RSA_EKU_DER` with an explicit `critical FALSE` on the EKU extension.
pub const RSA_EKU_CRITICAL_FALSE_DER: &[u8] = include_bytes!("data/rsa_eku_critical_false.der");
pub const RSA_EKU_CRITICAL_FALSE_SHA1: &str = "FECF4BFED00AA9D335C3CAE2140F2620D7355F10";

/// P-256, no extended key usage, serial 7.
pub const P256_NO_EKU_PEM: &str = include_str!("data/p256_no_eku.pem");
pub const P256_KEY_PEM: &str = include_str!("data/p256.key");
/// The P-256 key above as SEC1 `EC PRIVATE KEY`.
pub const P256_SEC1_KEY_PEM: &str = include_str!("data/p256_sec1.key");

/// Ed25519, EKU smartcard logon + corporate smartcard logon + 1.2.3.4.5, serial 42.
pub const ED25519_SMARTCARD_PEM: &str = include_str!("data/ed25519_smartcard.pem");
pub const ED25519_KEY_PEM: &str = include_str!("data/ed25519.key");

/// P-384, EKU smartcard logon, serial 99.
pub const P384_SMARTCARD_PEM: &str = include_str!("data/p384_smartcard.pem");
pub const P384_KEY_PEM: &str = include_str!("data/p384.key");

/// RSA key with a 2047-bit modulus.
pub const RSA_2047_KEY_PEM: &str = include_str!("data/rsa_2047.key");

/// A P-256 key unrelated to any fixture certificate.
pub const OTHER_P256_KEY_PEM: &str = include_str!("data/other_p256.key");

pub fn load(pem_str: &str) -> CertificateHandle {
    CertificateHandle::from_pem(pem_str).expect("fixture certificate should parse")
}

pub fn load_with_key(cert_pem: &str, key_pem: &str) -> CertificateHandle {
    let bundle = format!("{cert_pem}\n{key_pem}");
    CertificateHandle::from_pem_bundle(&bundle).expect("fixture bundle should parse")
}

/// The DER contents of the single PEM block in `pem_str`.
pub fn pem_contents(pem_str: &str) -> Vec<u8> {
    pem::parse(pem_str)
        .expect("fixture PEM should parse")
        .contents()
        .to_vec()
}
