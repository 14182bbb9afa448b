mod util;

use authcert::cert::CertificateHandle;
use base64::{Engine, engine::general_purpose::STANDARD};
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::x509::X509;

#[test]
fn test_openssl_crate_reads_exported_certificate() {
    let cert = util::load(util::RSA_EKU_PEM);

    // Parse the exported base64 with the openssl crate
    let der = STANDARD.decode(cert.to_base64()).unwrap();
    let x509 = X509::from_der(&der).expect("Failed to parse exported DER");

    let subject = x509
        .subject_name()
        .entries_by_nid(Nid::COMMONNAME)
        .next()
        .unwrap()
        .data()
        .as_utf8()
        .unwrap();
    assert_eq!(subject.to_string(), "server.authcert.test", "Subject CN mismatch");

    let serial = x509.serial_number().to_bn().unwrap().to_hex_str().unwrap();
    assert_eq!(serial.to_string(), cert.serial_number_hex(), "Serial number mismatch");

    let digest = x509.digest(openssl::hash::MessageDigest::sha1()).unwrap();
    assert_eq!(hex::encode_upper(&*digest), cert.thumbprint(), "Thumbprint mismatch");
}

#[test]
fn test_openssl_crate_agrees_on_non_canonical_input() {
    let cert = CertificateHandle::from_der(util::RSA_EKU_CRITICAL_FALSE_DER).unwrap();
    let x509 = X509::from_der(&cert.to_der()).expect("Failed to parse exported DER");
    let digest = x509.digest(openssl::hash::MessageDigest::sha1()).unwrap();
    assert_eq!(hex::encode_upper(&*digest), cert.thumbprint());
    assert_eq!(cert.thumbprint(), util::RSA_EKU_CRITICAL_FALSE_SHA1);
}

#[test]
fn test_openssl_crate_reads_exported_pem() {
    let cert = util::load(util::ED25519_SMARTCARD_PEM);
    let x509 = X509::from_pem(cert.to_pem().as_bytes()).expect("Failed to parse exported PEM");
    assert_eq!(x509.to_der().unwrap(), cert.to_der());
}

#[test]
fn test_openssl_crate_accepts_exported_keys() {
    let pairs = [
        (util::RSA_EKU_PEM, util::RSA_KEY_PEM),
        (util::P256_NO_EKU_PEM, util::P256_KEY_PEM),
        (util::P384_SMARTCARD_PEM, util::P384_KEY_PEM),
        (util::ED25519_SMARTCARD_PEM, util::ED25519_KEY_PEM),
    ];

    for (cert_pem, key_pem) in pairs {
        let cert = util::load_with_key(cert_pem, key_pem);
        let x509 = X509::from_der(cert.as_der()).unwrap();

        let public_der = cert.public_key().unwrap().to_public_key_der().unwrap();
        let public = PKey::public_key_from_der(&public_der).expect("openssl rejected public key");
        assert!(public.public_eq(&x509.public_key().unwrap()));

        let private_der = cert.private_key().unwrap().to_pkcs8_der().unwrap();
        let private =
            PKey::private_key_from_pkcs8(&private_der).expect("openssl rejected private key");
        assert!(private.public_eq(&x509.public_key().unwrap()));
    }
}
