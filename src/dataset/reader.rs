//! Tab-delimited reader construction.
//!
//! Association files are plain tab-separated text. Quotes carry no meaning in
//! them, so quoting is disabled and a `"` inside an id is kept verbatim.

use std::io::Read;

use csv::Reader;

/// Default field delimiter for every pipeline file.
pub const TAB: u8 = b'\t';

/// Build a reader with the requested delimiter.
pub fn build_reader<R: Read>(reader: R, delimiter: u8) -> Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(false)
        .quoting(false)
        .from_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn keeps_quotes_and_ragged_rows() {
        let data = b"P1\t\"x\"\nP2\n";
        let mut reader = build_reader(Cursor::new(&data[..]), TAB);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "\"x\"");
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn keeps_trailing_empty_fields() {
        let data = b"P1\t100\t\t\n";
        let mut reader = build_reader(Cursor::new(&data[..]), TAB);
        let row = reader.records().next().expect("row").expect("parse");
        assert_eq!(row.len(), 4);
        assert_eq!(&row[3], "");
    }
}
