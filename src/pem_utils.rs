use crate::error::{AuthCertError, Result};

pub(crate) const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub(crate) fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Parse every PEM block in `pem_str`, in order.
pub(crate) fn pem_blocks(pem_str: &str) -> Result<Vec<pem::Pem>> {
    let blocks = pem::parse_many(pem_str)?;
    if blocks.is_empty() {
        return Err(AuthCertError::DecodingError(
            "no PEM blocks found".to_string(),
        ));
    }
    Ok(blocks)
}

/// The contents of the first block labelled `label`, if any.
pub(crate) fn first_block<'a>(blocks: &'a [pem::Pem], label: &str) -> Option<&'a [u8]> {
    blocks
        .iter()
        .find(|block| block.tag() == label)
        .map(pem::Pem::contents)
}
