use super::{error, register, Error};
use url::Url;

/// Client for the registration API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain,
    /// e.g. `https://accounts.your-domain.com`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    #[must_use]
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Register a new account with the server. At most one request per
    /// call; retrying is the caller's decision.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn register(
        &self,
        client: &reqwest::Client,
        req: &register::Req,
    ) -> error::Result<register::Resp> {
        let url = Url::parse(&self.server)?.join(register::PATH)?;

        Self::handle_response(client.post(url).json(req)).await
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server answered with a 2xx or 4xx (a 4xx still
    ///   carries a response body whose status field reports the rejection)
    /// - `Error::Server` if the server returned a server error (5xx)
    /// - `Error::Unexpected` if the server returned something else (the
    ///   server is not supposed to issue redirects or informational
    ///   responses.)
    async fn handle_response(resp: reqwest::RequestBuilder) -> error::Result<register::Resp> {
        let resp = resp.send().await?;

        let status = resp.status();

        if status.is_success() || status.is_client_error() {
            Ok(resp.json().await?)
        } else if status.is_server_error() {
            Err(Error::Server)
        } else {
            Err(Error::Unexpected(status))
        }
    }
}
