//! Headless browser session driver using chromiumoxide.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;

use crate::config::Config;

/// Login form field and button selectors on the portal.
const USERNAME_SELECTOR: &str = "input[name='username']";
const PASSWORD_SELECTOR: &str = "input[name='password']";
const SUBMIT_SELECTOR: &str = "input[type='submit']";

/// Drives one browser session through login and the status page.
pub struct PortalBrowser {
    /// Whether to run in headless mode.
    headless: bool,
}

impl PortalBrowser {
    /// Create a new browser driver.
    #[must_use]
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }

    /// Log in to the portal and return the rendered status page HTML.
    ///
    /// The browser process is closed and the CDP handler task joined on
    /// every exit path, whether the session succeeded or failed.
    pub async fn fetch_status_page(&self, config: &Config) -> Result<String> {
        tracing::info!(headless = self.headless, "Launching browser");

        let browser_config = if self.headless {
            BrowserConfig::builder()
                .arg("--no-sandbox") // Required for containerized environments
                .arg("--disable-dev-shm-usage") // Avoid /dev/shm size issues in containers
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?
        } else {
            BrowserConfig::builder()
                .with_head()
                .arg("--no-sandbox")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?
        };

        let (mut browser, mut handler) = Browser::launch(browser_config).await?;

        // Spawn handler task
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let result = Self::drive(&browser, config).await;

        // Unconditional teardown; a failed close must not mask the session error.
        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "Failed to close browser cleanly");
        }
        handle.await.ok();

        result
    }

    /// Run the login-then-navigate sequence against a launched browser.
    async fn drive(browser: &Browser, config: &Config) -> Result<String> {
        tracing::debug!(url = %config.login_url, "Opening login page");
        let page = browser.new_page(config.login_url.as_str()).await?;
        page.wait_for_navigation().await?;

        tracing::debug!("Submitting credentials");
        let username_field = page
            .find_element(USERNAME_SELECTOR)
            .await
            .context("Username field not found on login page")?;
        username_field.click().await?;
        username_field.type_str(&config.username).await?;

        let password_field = page
            .find_element(PASSWORD_SELECTOR)
            .await
            .context("Password field not found on login page")?;
        password_field.click().await?;
        password_field.type_str(&config.password).await?;

        page.find_element(SUBMIT_SELECTOR)
            .await
            .context("Submit button not found on login page")?
            .click()
            .await?;
        page.wait_for_navigation().await?;

        // Still on the login form after submit means the portal rejected us.
        let url = page.url().await?.unwrap_or_default();
        if url.contains("login") {
            tracing::error!(url, "Still on login page after submitting credentials");
            anyhow::bail!("Authentication failed: portal rejected the configured credentials");
        }

        tracing::debug!(url = %config.status_url, "Navigating to status page");
        page.goto(config.status_url.as_str()).await?;
        page.wait_for_navigation().await?;

        // Give client-side rendering a moment to settle.
        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;

        let html = page.content().await?;
        tracing::debug!(len = html.len(), "Got status page content");

        // Debug: dump HTML to file for inspection
        if std::env::var("PORTAL_DUMP_HTML").is_ok() {
            let dump_path = std::env::var("PORTAL_DUMP_PATH")
                .unwrap_or_else(|_| "/tmp/portal-status.html".to_string());
            if let Err(e) = std::fs::write(&dump_path, &html) {
                tracing::warn!(path = %dump_path, error = %e, "Failed to dump HTML");
            } else {
                tracing::info!(path = %dump_path, "Dumped HTML for inspection");
            }
        }

        Ok(html)
    }
}
