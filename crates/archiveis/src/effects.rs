//! Effects layer: the HTTP transport seam and the client built on it.

use tracing::debug;

use archiveis_timemap::MementoList;

use crate::data::{REFERER, SUBMIT_ENDPOINT, SaveOptions, SaveResult, TIMEMAP_ENDPOINT, USER_AGENT};
use crate::error::ArchiveError;

/// What the client needs back from a request: status, headers, body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Response {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The single capability the client requires of its HTTP collaborator.
///
/// Implementations must not follow redirects on `post_form`: the save flow
/// decodes `302`/`307` + `Location` itself. Timeout and proxy policy belong
/// to the implementation; the client adds none of its own.
pub trait HttpTransport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, url: &str) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

/// Client for the archive.is snapshot service.
///
/// Stateless: every call issues exactly one request and holds nothing
/// afterwards, so calls may run concurrently without coordination.
pub struct ArchiveClient<T: HttpTransport> {
    transport: T,
}

impl<T: HttpTransport> ArchiveClient<T> {
    pub fn new(transport: T) -> Self { Self { transport } }

    pub fn transport(&self) -> &T { &self.transport }

    /// Fetches and parses the snapshot history of `url`.
    pub async fn timemap(&self, url: &str) -> Result<MementoList, ArchiveError> {
        // the service wants the page URL appended literally, not
        // percent-encoded
        let endpoint = format!("{TIMEMAP_ENDPOINT}{url}");
        debug!(%endpoint, "fetching timemap");

        let response = self
            .transport
            .get(&endpoint)
            .await
            .map_err(Self::transport_error)?;
        if response.status != 200 {
            return Err(ArchiveError::HttpStatus {
                status: response.status,
            });
        }

        Ok(archiveis_timemap::parse(&response.body)?)
    }

    /// Asks the service to capture `url`, or reports the existing snapshot.
    ///
    /// Not guaranteed idempotent: without [`SaveOptions::forced`] the
    /// service decides whether to serve a cached capture.
    pub async fn save(
        &self,
        url: &str,
        options: SaveOptions,
    ) -> Result<SaveResult, ArchiveError> {
        let mut form = vec![("url", url)];
        if options.force {
            form.push(("anyway", "1"));
        }
        let headers = [("Referer", REFERER), ("User-Agent", USER_AGENT)];

        debug!(%url, force = options.force, "submitting snapshot request");
        let response = self
            .transport
            .post_form(SUBMIT_ENDPOINT, &form, &headers)
            .await
            .map_err(Self::transport_error)?;
        debug!(status = response.status, "submission answered");

        crate::core::decode_save_response(
            url,
            response.status,
            response.header("Refresh"),
            response.header("Location"),
        )
    }

    /// Callback-style adapter over [`ArchiveClient::timemap`]: awaits the
    /// same future and hands the result to `callback`.
    pub async fn timemap_with<F>(&self, url: &str, callback: F)
    where
        F: FnOnce(Result<MementoList, ArchiveError>),
    {
        callback(self.timemap(url).await);
    }

    /// Callback-style adapter over [`ArchiveClient::save`].
    pub async fn save_with<F>(&self, url: &str, options: SaveOptions, callback: F)
    where
        F: FnOnce(Result<SaveResult, ArchiveError>),
    {
        callback(self.save(url, options).await);
    }

    fn transport_error(e: T::Error) -> ArchiveError { ArchiveError::Transport(Box::new(e)) }
}

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use super::{ArchiveClient, HttpTransport, Response};
    use reqwest::Client;
    use reqwest::redirect::Policy;

    /// Reqwest-backed transport with redirect following disabled.
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = Client::builder().redirect(Policy::none()).build()?;
            Ok(Self { client })
        }

        /// Wraps a caller-configured client (timeouts, proxies, TLS). The
        /// client must be built with `Policy::none()`, or the save flow
        /// cannot observe the service's redirects.
        pub fn with_client(client: Client) -> Self { Self { client } }
    }

    impl HttpTransport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> Result<Response, Self::Error> {
            convert(self.client.get(url).send().await?).await
        }

        async fn post_form(
            &self,
            url: &str,
            form: &[(&str, &str)],
            headers: &[(&str, &str)],
        ) -> Result<Response, Self::Error> {
            let mut request = self.client.post(url).form(form);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }
            convert(request.send().await?).await
        }
    }

    async fn convert(response: reqwest::Response) -> Result<Response, reqwest::Error> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;
        Ok(Response {
            status,
            headers,
            body,
        })
    }

    impl ArchiveClient<ReqwestTransport> {
        /// Client over a fresh [`ReqwestTransport`].
        pub fn with_default_transport() -> Result<Self, reqwest::Error> {
            Ok(Self::new(ReqwestTransport::new()?))
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
