use crate::error::{Result, ScholarError};
use reqwest::Client;
use tracing::{debug, info};

pub const DEFAULT_SCHOLAR_URL: &str = "https://scholar.google.es/citations?user=";

// Profile pages are refused to the default library agent
const USER_AGENTS: [&str; 8] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (Linux; Android 14; Pixel 7) AppleWebKit/537.36",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_6) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Fedora; Linux x86_64) AppleWebKit/537.36",
];

// No escaping of the identifier
pub fn profile_url(base: &str, scholar_id: &str) -> String {
    format!("{}{}", base, scholar_id)
}

pub struct ProfileFetcher {
    client: Client,
}

impl ProfileFetcher {
    pub fn new() -> Result<Self> {
        let user_agent = USER_AGENTS[fastrand::usize(..USER_AGENTS.len())];
        debug!(user_agent, "building http client");

        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        info!(url, "fetching profile page");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScholarError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "profile page received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn profile_url_appends_identifier_verbatim() {
        assert_eq!(
            profile_url(DEFAULT_SCHOLAR_URL, "abc_DEF&hl=en"),
            "https://scholar.google.es/citations?user=abc_DEF&hl=en"
        );
    }

    #[tokio::test]
    async fn fetch_returns_page_body() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/citations")
                    .query_param("user", "XyZ123");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body("<html><body>profile</body></html>");
            })
            .await;

        let fetcher = ProfileFetcher::new().unwrap();
        let url = profile_url(&server.url("/citations?user="), "XyZ123");
        let body = fetcher.fetch(&url).await.unwrap();

        page.assert_async().await;
        assert_eq!(body, "<html><body>profile</body></html>");
    }

    #[tokio::test]
    async fn fetch_rejects_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/citations");
                then.status(429).body("slow down");
            })
            .await;

        let fetcher = ProfileFetcher::new().unwrap();
        let url = profile_url(&server.url("/citations?user="), "XyZ123");
        let err = fetcher.fetch(&url).await.unwrap_err();

        match err {
            ScholarError::UnexpectedStatus { status, .. } => assert_eq!(status.as_u16(), 429),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn fetch_surfaces_connection_failures() {
        let fetcher = ProfileFetcher::new().unwrap();
        let err = fetcher
            .fetch("http://127.0.0.1:1/citations?user=nobody")
            .await
            .unwrap_err();

        assert!(matches!(err, ScholarError::Http(_)));
    }
}
