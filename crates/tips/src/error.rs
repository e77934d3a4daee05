use thiserror::Error;

/// Why a tip could not be produced. Never shown to the player: the fetcher
/// logs it and substitutes the fallback text.
#[derive(Debug, Error)]
pub enum TipError {
    #[error("invalid tip endpoint {0:?} (expected an http:// URL)")]
    Endpoint(String),

    #[error("tip request failed: {0}")]
    Request(String),

    #[error("tip service answered HTTP {0}")]
    Status(u16),

    #[error("reading tip response failed: {0}")]
    Body(String),

    #[error("malformed tip response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("tip service returned no text")]
    Empty,

    #[error("tip request timed out after {0}ms")]
    Timeout(u64),
}
