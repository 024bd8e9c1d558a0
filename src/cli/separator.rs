//! Multi-value separator flag parsing.

/// Error returned when a separator flag cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeparatorError {
    Empty,
    InvalidHex,
    InvalidValue,
    NonAscii,
    InvalidByte(u8),
}

impl std::fmt::Display for SeparatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeparatorError::Empty => write!(f, "separator is empty"),
            SeparatorError::InvalidHex => write!(f, "invalid hex separator; expected 0xNN"),
            SeparatorError::InvalidValue => write!(f, "invalid separator value"),
            SeparatorError::NonAscii => write!(f, "separator must be a single ASCII character"),
            SeparatorError::InvalidByte(byte) => {
                write!(f, "invalid separator byte 0x{byte:02X}")
            }
        }
    }
}

impl std::error::Error for SeparatorError {}

/// Parse the separator used inside multi-valued cells.
///
/// Accepts `comma`, `semicolon`, `pipe`, `caret`, `space`, a `0xNN` byte,
/// or a single ASCII character. Tab and line breaks are rejected since
/// they delimit fields and rows.
pub fn parse_separator_arg(raw: &str) -> Result<char, SeparatorError> {
    if raw.is_empty() {
        return Err(SeparatorError::Empty);
    }

    let lower = raw.to_ascii_lowercase();
    match lower.as_str() {
        "comma" => return Ok(','),
        "semicolon" => return Ok(';'),
        "pipe" => return Ok('|'),
        "caret" => return Ok('^'),
        "space" => return Ok(' '),
        _ => {}
    }

    if let Some(hex) = lower.strip_prefix("0x") {
        if hex.len() != 2 {
            return Err(SeparatorError::InvalidHex);
        }
        let byte = u8::from_str_radix(hex, 16).map_err(|_| SeparatorError::InvalidHex)?;
        return validate_separator_byte(byte);
    }

    let mut chars = raw.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Err(SeparatorError::InvalidValue);
    };
    if !ch.is_ascii() {
        return Err(SeparatorError::NonAscii);
    }
    validate_separator_byte(ch as u8)
}

fn validate_separator_byte(byte: u8) -> Result<char, SeparatorError> {
    if !(1..=0x7F).contains(&byte) || matches!(byte, b'\t' | b'\r' | b'\n') {
        return Err(SeparatorError::InvalidByte(byte));
    }
    Ok(byte as char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_separators() {
        assert_eq!(parse_separator_arg("comma"), Ok(','));
        assert_eq!(parse_separator_arg("PIPE"), Ok('|'));
        assert_eq!(parse_separator_arg("space"), Ok(' '));
    }

    #[test]
    fn parses_hex_and_literal_forms() {
        assert_eq!(parse_separator_arg("0x3B"), Ok(';'));
        assert_eq!(parse_separator_arg(","), Ok(','));
    }

    #[test]
    fn rejects_field_and_row_delimiters() {
        assert_eq!(
            parse_separator_arg("\t"),
            Err(SeparatorError::InvalidByte(b'\t'))
        );
        assert_eq!(
            parse_separator_arg("0x0A"),
            Err(SeparatorError::InvalidByte(0x0A))
        );
        assert_eq!(
            parse_separator_arg("0x00"),
            Err(SeparatorError::InvalidByte(0x00))
        );
    }

    #[test]
    fn rejects_other_values() {
        assert_eq!(parse_separator_arg(""), Err(SeparatorError::Empty));
        assert_eq!(parse_separator_arg("0x3"), Err(SeparatorError::InvalidHex));
        assert_eq!(parse_separator_arg("::"), Err(SeparatorError::InvalidValue));
        assert_eq!(parse_separator_arg("é"), Err(SeparatorError::NonAscii));
    }
}
