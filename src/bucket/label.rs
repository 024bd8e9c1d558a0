//! Bucket labels (0_1, 1_0, 1_1, 1_N, N_1, N_N).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BucketLabel {
    #[serde(rename = "0_1")]
    ZeroOne,
    #[serde(rename = "1_0")]
    OneZero,
    #[serde(rename = "1_1")]
    OneOne,
    #[serde(rename = "1_N")]
    OneMany,
    #[serde(rename = "N_1")]
    ManyOne,
    #[serde(rename = "N_N")]
    ManyMany,
}

impl BucketLabel {
    /// Every label, in output order.
    pub const ALL: [BucketLabel; 6] = [
        BucketLabel::ZeroOne,
        BucketLabel::OneZero,
        BucketLabel::OneOne,
        BucketLabel::OneMany,
        BucketLabel::ManyOne,
        BucketLabel::ManyMany,
    ];

    /// File-name form.
    pub const fn as_str(self) -> &'static str {
        match self {
            BucketLabel::ZeroOne => "0_1",
            BucketLabel::OneZero => "1_0",
            BucketLabel::OneOne => "1_1",
            BucketLabel::OneMany => "1_N",
            BucketLabel::ManyOne => "N_1",
            BucketLabel::ManyMany => "N_N",
        }
    }

    /// Log form (`1:N`).
    pub const fn ratio(self) -> &'static str {
        match self {
            BucketLabel::ZeroOne => "0:1",
            BucketLabel::OneZero => "1:0",
            BucketLabel::OneOne => "1:1",
            BucketLabel::OneMany => "1:N",
            BucketLabel::ManyOne => "N:1",
            BucketLabel::ManyMany => "N:N",
        }
    }

    /// Classify a component by its left and right sizes.
    ///
    /// Returns `None` only for an empty component, which BFS never yields.
    pub fn from_counts(left: usize, right: usize) -> Option<Self> {
        match (left, right) {
            (0, 0) => None,
            (0, _) => Some(BucketLabel::ZeroOne),
            (_, 0) => Some(BucketLabel::OneZero),
            (1, 1) => Some(BucketLabel::OneOne),
            (1, _) => Some(BucketLabel::OneMany),
            (_, 1) => Some(BucketLabel::ManyOne),
            _ => Some(BucketLabel::ManyMany),
        }
    }

    /// `<prefix>.<label>.txt`
    pub fn file_name(self, prefix: &str) -> String {
        format!("{prefix}.{}.txt", self.as_str())
    }
}

impl fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBucketLabel(pub String);

impl fmt::Display for UnknownBucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bucket label: {}", self.0)
    }
}

impl std::error::Error for UnknownBucketLabel {}

impl FromStr for BucketLabel {
    type Err = UnknownBucketLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BucketLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == value || label.ratio() == value)
            .ok_or_else(|| UnknownBucketLabel(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for label in BucketLabel::ALL {
            assert_eq!(label.as_str().parse::<BucketLabel>(), Ok(label));
            assert_eq!(label.ratio().parse::<BucketLabel>(), Ok(label));
        }
        assert!("2_2".parse::<BucketLabel>().is_err());
    }

    #[test]
    fn classifies_by_counts() {
        assert_eq!(BucketLabel::from_counts(0, 1), Some(BucketLabel::ZeroOne));
        assert_eq!(BucketLabel::from_counts(1, 0), Some(BucketLabel::OneZero));
        assert_eq!(BucketLabel::from_counts(1, 1), Some(BucketLabel::OneOne));
        assert_eq!(BucketLabel::from_counts(1, 5), Some(BucketLabel::OneMany));
        assert_eq!(BucketLabel::from_counts(3, 1), Some(BucketLabel::ManyOne));
        assert_eq!(BucketLabel::from_counts(2, 2), Some(BucketLabel::ManyMany));
        assert_eq!(BucketLabel::from_counts(0, 0), None);
    }

    #[test]
    fn file_names_use_prefix() {
        assert_eq!(BucketLabel::OneMany.file_name("bucket"), "bucket.1_N.txt");
    }
}
