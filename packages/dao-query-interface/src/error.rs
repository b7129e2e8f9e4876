use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("query is not valid JSON: {msg}")]
    InvalidJson { msg: String },

    #[error("query must be a JSON object with a single variant key")]
    NotAnObject {},

    #[error("query has no variant key")]
    NoVariant {},

    #[error("query may only have one variant key, got ({tags:?})")]
    MultipleVariants { tags: Vec<String> },

    #[error("unknown query variant ({tag})")]
    UnknownVariant { tag: String },

    #[error("payload of ({tag}) query must be a JSON object")]
    PayloadNotObject { tag: String },

    #[error("invalid ({tag}) query: {msg}")]
    InvalidPayload { tag: String, msg: String },

    #[error("invalid range order ({order}), expected one of (asc, desc)")]
    InvalidOrder { order: String },

    #[error("Request size ({size}) is above limit of ({max})")]
    OversizedRequest { size: u64, max: u64 },

    #[error("invalid page limits. default ({default_limit}) must be non-zero and at most max ({max_limit})")]
    InvalidPageLimits { default_limit: u32, max_limit: u32 },
}
