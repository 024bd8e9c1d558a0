use std::fmt;
use std::str::FromStr;

/// Canonical error codes (v0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Config,
    Io,
    Encoding,
    MalformedRecord,
    UnknownField,
    DuplicateField,
    NoSuchIndex,
    JoinKeys,
    NotRun,
    UniProtParse,
    AssocSchema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownErrorCode;

impl ErrorCode {
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::Config,
        ErrorCode::Io,
        ErrorCode::Encoding,
        ErrorCode::MalformedRecord,
        ErrorCode::UnknownField,
        ErrorCode::DuplicateField,
        ErrorCode::NoSuchIndex,
        ErrorCode::JoinKeys,
        ErrorCode::NotRun,
        ErrorCode::UniProtParse,
        ErrorCode::AssocSchema,
    ];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "E_CONFIG",
            ErrorCode::Io => "E_IO",
            ErrorCode::Encoding => "E_ENCODING",
            ErrorCode::MalformedRecord => "E_MALFORMED_RECORD",
            ErrorCode::UnknownField => "E_UNKNOWN_FIELD",
            ErrorCode::DuplicateField => "E_DUPLICATE_FIELD",
            ErrorCode::NoSuchIndex => "E_NO_SUCH_INDEX",
            ErrorCode::JoinKeys => "E_JOIN_KEYS",
            ErrorCode::NotRun => "E_NOT_RUN",
            ErrorCode::UniProtParse => "E_UNIPROT_PARSE",
            ErrorCode::AssocSchema => "E_ASSOC_SCHEMA",
        }
    }

    /// A short, stable reason label for human output.
    #[inline]
    pub const fn reason(self) -> &'static str {
        match self {
            ErrorCode::Config => "required configuration is missing",
            ErrorCode::Io => "file read or write error",
            ErrorCode::Encoding => "unsupported text encoding",
            ErrorCode::MalformedRecord => "row has fewer fields than the schema",
            ErrorCode::UnknownField => "field is not part of the schema",
            ErrorCode::DuplicateField => "field named twice in the schema",
            ErrorCode::NoSuchIndex => "field was never indexed",
            ErrorCode::JoinKeys => "join key lists do not pair up",
            ErrorCode::NotRun => "bucketizer queried before run",
            ErrorCode::UniProtParse => "UniProt record could not be parsed",
            ErrorCode::AssocSchema => "association report header not recognized",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnknownErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown error code")
    }
}

impl std::error::Error for UnknownErrorCode {}

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or(UnknownErrorCode)
    }
}
