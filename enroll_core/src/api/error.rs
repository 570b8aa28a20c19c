use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level failures: the request never produced an interpretable
/// response. Business rejections (the server answered but said no) are not
/// errors; they come back as a `register::Resp` with a non-success status.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We encountered an HTTP error, for example a connection failure or a
    /// body that didn't deserialize.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a 5xx.
    #[error("The server had an internal problem")]
    Server,

    /// The server returned something it's not supposed to issue at all,
    /// like a redirect or an informational response.
    #[error("Unexpected response status: {0}")]
    Unexpected(reqwest::StatusCode),
}
