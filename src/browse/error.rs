use thiserror::Error;

/// Errors produced while serving a browse or search request.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("please provide a `{0}` parameter")]
    MissingParameter(&'static str),

    #[error("unknown value `{value}` for parameter '{param}'")]
    UnknownValue { param: &'static str, value: String },

    #[error("invalid value `{value}` for parameter '{param}'")]
    InvalidParameter { param: &'static str, value: String },

    #[error("couldn't find {article} {0} with that id", article = article(.0))]
    NotFound(&'static str),

    /// A strategy that needs the requesting user was reached without one.
    #[error("album list `{0}` requires a requesting user")]
    MissingCaller(&'static str),

    #[error("Store error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl BrowseError {
    /// Whether the fault lies with the request rather than with the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BrowseError::MissingParameter(_)
                | BrowseError::UnknownValue { .. }
                | BrowseError::InvalidParameter { .. }
                | BrowseError::NotFound(_)
        )
    }
}

fn article(kind: &str) -> &'static str {
    match kind.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}
