//! Fetch a rendered dashboard page from the portal.

use reqwest::blocking::Client;
use reqwest::header::COOKIE;

use crate::error::AppError;
use crate::io::page::Page;

const ENV_BASE_URL: &str = "PORTAL_BASE_URL";
const ENV_SESSION: &str = "PORTAL_SESSION";

pub struct PortalClient {
    client: Client,
    base_url: String,
    session: Option<String>,
}

impl PortalClient {
    /// Read `PORTAL_BASE_URL` (required) and `PORTAL_SESSION` (optional
    /// session cookie value) from the environment or `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(ENV_BASE_URL)
            .map_err(|_| AppError::input(format!("Missing {ENV_BASE_URL} in environment (.env).")))?;
        let session = std::env::var(ENV_SESSION).ok().filter(|s| !s.is_empty());
        Ok(Self::new(base_url, session))
    }

    pub fn new(base_url: impl Into<String>, session: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    /// Full URL for a page path such as `/org/dashboard/`.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn fetch_page(&self, path: &str) -> Result<Page, AppError> {
        let url = self.url_for(path);
        tracing::info!(%url, "fetching dashboard page");

        let mut request = self.client.get(&url);
        if let Some(session) = &self.session {
            request = request.header(COOKIE, format!("sessionid={session}"));
        }

        let response = request
            .send()
            .map_err(|e| AppError::input(format!("Request to {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::input(format!("Portal returned an error for {url}: {e}")))?;
        let body = response
            .text()
            .map_err(|e| AppError::input(format!("Failed to read response body from {url}: {e}")))?;

        Ok(Page::from_html(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path() {
        let client = PortalClient::new("https://portal.example/", None);
        assert_eq!(client.url_for("/org/dashboard/"), "https://portal.example/org/dashboard/");
        assert_eq!(client.url_for("http://other/x"), "http://other/x");
    }
}
