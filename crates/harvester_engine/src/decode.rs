use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode a body with a fixed encoding, ignoring any charset the server
/// declared. A matching BOM is stripped.
pub fn decode_fixed(bytes: &[u8], encoding: &'static Encoding) -> DecodedHtml {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
        had_errors,
    }
}
