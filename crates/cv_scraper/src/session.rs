use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use scraper::{Html, Selector};
use serde_json::json;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use cv_core::Result;

pub const LOGIN_URL: &str = "https://www.linkedin.com/login";
pub const CHECKPOINT_URL: &str = "https://www.linkedin.com/checkpoint/lg/login-submit";
pub const FEED_URL: &str = "https://www.linkedin.com/feed/";

const USERNAME_FIELD: Locator<'static> = Locator::Id("username");
const PASSWORD_FIELD: Locator<'static> = Locator::Id("password");
const SIGN_IN_BUTTON: Locator<'static> =
    Locator::Css("button.btn__primary--large.from__button--floating");

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Outcome of a credential submission. `Verify` means the site imposed an
/// interactive verification step; the user has to complete it in the browser
/// window before trying again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Success,
    Fail,
    Verify,
}

/// Classify the landing URL after a credential submission. The checkpoint
/// URL means the credentials were rejected; anything other than the feed
/// means the site wants verification.
pub fn classify_login(url: &str) -> LoginStatus {
    if url == CHECKPOINT_URL {
        LoginStatus::Fail
    } else if url != FEED_URL {
        LoginStatus::Verify
    } else {
        LoginStatus::Success
    }
}

/// One exclusively-owned browser session behind a WebDriver endpoint.
pub struct Session {
    client: Client,
    page_timeout: Duration,
}

impl Session {
    pub async fn connect(webdriver: &str, page_timeout: Duration, headless: bool) -> Result<Self> {
        let mut builder = ClientBuilder::native();
        if headless {
            let mut caps = serde_json::Map::new();
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless=new", "--window-size=1280,1024"] }),
            );
            builder.capabilities(caps);
        }
        let client = builder.connect(webdriver).await?;
        Ok(Self {
            client,
            page_timeout,
        })
    }

    /// Submit credentials to the login form and classify where the site
    /// lands us. No retry logic; each classification is terminal for the call.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginStatus> {
        self.client.goto(LOGIN_URL).await?;
        self.client
            .find(USERNAME_FIELD)
            .await?
            .send_keys(username)
            .await?;
        self.client
            .find(PASSWORD_FIELD)
            .await?
            .send_keys(password)
            .await?;
        self.client.find(SIGN_IN_BUTTON).await?.click().await?;

        // Wait for the form submission to navigate somewhere.
        let deadline = Instant::now() + self.page_timeout;
        loop {
            let url = self.client.current_url().await?;
            if !url.as_str().starts_with(LOGIN_URL) {
                return Ok(classify_login(url.as_str()));
            }
            if Instant::now() >= deadline {
                debug!("still on the login form after {:?}", self.page_timeout);
                return Ok(classify_login(url.as_str()));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Release the browser session. Consumes the session so it can only
    /// happen once.
    pub async fn terminate(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// Page navigation with condition-based readiness instead of fixed sleeps.
#[async_trait]
pub trait Navigator {
    /// Navigate to `url` and return the page HTML once the `ready` selector
    /// matches, or the last captured source after the timeout.
    async fn open(&mut self, url: &str, ready: &str) -> Result<String>;
}

#[async_trait]
impl Navigator for Session {
    async fn open(&mut self, url: &str, ready: &str) -> Result<String> {
        self.client.goto(url).await?;
        let deadline = Instant::now() + self.page_timeout;
        loop {
            let source = self.client.source().await?;
            if selector_matches(&source, ready) {
                return Ok(source);
            }
            if Instant::now() >= deadline {
                warn!(
                    "no match for {:?} on {} after {:?}, proceeding with current page",
                    ready, url, self.page_timeout
                );
                return Ok(source);
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

fn selector_matches(html: &str, css: &str) -> bool {
    let selector = match Selector::parse(css) {
        Ok(selector) => selector,
        Err(_) => return false,
    };
    Html::parse_document(html).select(&selector).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_login() {
        assert_eq!(classify_login(CHECKPOINT_URL), LoginStatus::Fail);
        assert_eq!(classify_login(FEED_URL), LoginStatus::Success);
        assert_eq!(
            classify_login("https://www.linkedin.com/checkpoint/challenge/"),
            LoginStatus::Verify
        );
        assert_eq!(classify_login(LOGIN_URL), LoginStatus::Verify);
    }

    #[test]
    fn test_selector_matches() {
        let html = r#"<html><body><h1>Jane</h1></body></html>"#;
        assert!(selector_matches(html, "h1"));
        assert!(!selector_matches(html, ".artdeco-card.pb3"));
        assert!(!selector_matches(html, "!!not-a-selector"));
    }
}
