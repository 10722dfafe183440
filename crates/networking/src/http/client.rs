//! Check-in HTTP client with cookie-based authentication

use checkin_core::{CheckinResponse, CheckinStatus, Error, PointsResponse, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, COOKIE},
    Client, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// HTTP client for the check-in API
///
/// Sends the session token as a cookie on every request. Without a token
/// the server answers as for a logged-out visitor.
pub struct CheckinClient {
    http: Client,
    base_url: String,
    session_token: Option<String>,
}

impl CheckinClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:8787`)
    pub fn new(base_url: &str, session_token: Option<&str>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token: session_token.map(str::to_string),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.session_token {
            let cookie = HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token))
                .map_err(|e| Error::AuthenticationError(format!("Invalid session token: {}", e)))?;
            headers.insert(COOKIE, cookie);
        }

        Ok(headers)
    }

    /// Map error statuses, then decode the JSON body
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Request failed with {}: {}", status, body);
            return Err(Error::ApiError(format!("{}: {}", status, body)));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Perform today's check-in
    #[instrument(skip(self))]
    pub async fn check_in(&self) -> Result<CheckinResponse> {
        let response = self
            .http
            .post(self.url("/checkin"))
            .headers(self.default_headers()?)
            .send()
            .await?;

        let result: CheckinResponse = Self::read_json(response).await?;
        debug!("Check-in response: {:?}", result);
        Ok(result)
    }

    /// Current point balance
    #[instrument(skip(self))]
    pub async fn user_points(&self) -> Result<i64> {
        let response = self
            .http
            .get(self.url("/points"))
            .headers(self.default_headers()?)
            .send()
            .await?;

        let points: PointsResponse = Self::read_json(response).await?;
        Ok(points.points)
    }

    /// Whether today's check-in is done (and whether the feature is off)
    #[instrument(skip(self))]
    pub async fn checkin_status(&self) -> Result<CheckinStatus> {
        let response = self
            .http
            .get(self.url("/checkin/status"))
            .headers(self.default_headers()?)
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Liveness probe
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<()> {
        let response = self.http.get(self.url("/health")).send().await?;
        let _: serde_json::Value = Self::read_json(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = CheckinClient::new("http://localhost:8787/", None).unwrap();
        assert_eq!(client.url("/points"), "http://localhost:8787/api/points");
    }

    #[test]
    fn test_session_cookie_header() {
        let client = CheckinClient::new("http://localhost:8787", Some("abc123")).unwrap();
        let headers = client.default_headers().unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "session=abc123");

        let anonymous = CheckinClient::new("http://localhost:8787", None).unwrap();
        assert!(anonymous.default_headers().unwrap().get(COOKIE).is_none());
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let client = CheckinClient::new("http://localhost:8787", Some("bad\ntoken")).unwrap();
        assert!(matches!(
            client.default_headers(),
            Err(Error::AuthenticationError(_))
        ));
    }
}
