//! Multi-valued field splitting.

/// Split a raw multi-valued field on `separator`.
///
/// Empty elements are dropped, so `""`, `"100,"` and `"A,,B"` never yield
/// an empty value. Duplicates and element order are kept as written.
pub fn split_multi(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a sequence back into its single-field form.
pub fn join_multi(values: &[String]) -> String {
    values.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_is_empty_sequence() {
        assert!(split_multi("", ',').is_empty());
    }

    #[test]
    fn trailing_separator_adds_no_empty_value() {
        assert_eq!(split_multi("100,", ','), vec!["100"]);
        assert_eq!(split_multi(",100", ','), vec!["100"]);
    }

    #[test]
    fn doubled_separator_adds_no_empty_value() {
        assert_eq!(split_multi("A,,B", ','), vec!["A", "B"]);
        assert!(split_multi(",,", ',').is_empty());
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(split_multi("A,B,A", ','), vec!["A", "B", "A"]);
    }

    #[test]
    fn single_value() {
        assert_eq!(split_multi("ENSMUSG00000000001", ','), vec!["ENSMUSG00000000001"]);
    }

    #[test]
    fn honors_custom_separator() {
        assert_eq!(split_multi("A|B", '|'), vec!["A", "B"]);
        assert_eq!(split_multi("A|B", ','), vec!["A|B"]);
    }

    #[test]
    fn join_uses_comma() {
        let values = vec!["100".to_string(), "200".to_string()];
        assert_eq!(join_multi(&values), "100,200");
        assert_eq!(join_multi(&[]), "");
    }
}
