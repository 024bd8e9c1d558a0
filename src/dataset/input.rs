//! Input bytes, BOM stripping, and encoding guardrails.

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encoding guardrail failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingIssue {
    /// UTF-16/UTF-32 BOM detected.
    Utf16Or32Bom,
}

/// Strip a UTF-8 BOM if present.
#[inline]
pub fn strip_utf8_bom(input: &[u8]) -> &[u8] {
    input.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(input)
}

/// Returns true if the input begins with a UTF-16 or UTF-32 BOM.
#[inline]
pub fn has_utf16_or_utf32_bom(input: &[u8]) -> bool {
    matches!(
        input,
        [0x00, 0x00, 0xFE, 0xFF, ..]
            | [0xFF, 0xFE, 0x00, 0x00, ..]
            | [0xFE, 0xFF, ..]
            | [0xFF, 0xFE, ..]
    )
}

/// Refuse wide encodings and strip a UTF-8 BOM if present.
#[inline]
pub fn guard_input_bytes(input: &[u8]) -> Result<&[u8], EncodingIssue> {
    if has_utf16_or_utf32_bom(input) {
        return Err(EncodingIssue::Utf16Or32Bom);
    }
    Ok(strip_utf8_bom(input))
}
