use super::{Browser, BrowserError};
use crate::config::{BrowserKind, WebDriverConfig};
use async_trait::async_trait;
use color_eyre::eyre::{WrapErr, eyre};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::{Capabilities, WindowHandle};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tracing::{error, info, warn};

/// A WebDriver browser session with an optional driver process it owns.
///
/// Listings are opened in a new tab; closing the tab switches back to the
/// window the session started with.
#[derive(Debug)]
pub struct WebDriverSession {
    client: Option<Client>,
    main_window: WindowHandle,
    driver: Option<Child>,
}

impl WebDriverSession {
    /// Starts the configured driver (if any) and connects a new session.
    pub async fn start(config: &WebDriverConfig) -> color_eyre::Result<Self> {
        let driver = match config.driver_command.split_first() {
            Some((program, args)) => {
                info!("Starting {}", program);
                let child = Command::new(program)
                    .args(args)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .wrap_err_with(|| format!("failed to start {program}"))?;
                tokio::time::sleep(config.driver_startup()).await;
                Some(child)
            }
            None => None,
        };

        info!("Connecting to webdriver at {}", config.url);
        let client = match ClientBuilder::native()
            .capabilities(capabilities(config))
            .connect(&config.url)
            .await
        {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to webdriver: {}", e);
                if let Some(mut child) = driver {
                    let _ = child.kill();
                }
                return Err(eyre!("failed to connect to webdriver at {}: {}", config.url, e));
            }
        };
        let main_window = client.window().await?;
        info!("Webdriver client connected");

        Ok(Self {
            client: Some(client),
            main_window,
            driver,
        })
    }

    /// Closes the session and stops the driver process.
    pub async fn shutdown(mut self) -> color_eyre::Result<()> {
        if let Some(client) = self.client.take() {
            info!("Closing webdriver session");
            client.close().await?;
        }
        self.kill_driver();
        Ok(())
    }

    fn kill_driver(&mut self) {
        if let Some(mut child) = self.driver.take() {
            info!("Stopping webdriver process");
            if let Err(e) = child.kill() {
                warn!("Failed to stop webdriver process: {}", e);
            }
            let _ = child.wait();
        }
    }

    fn client(&self) -> Result<&Client, BrowserError> {
        self.client
            .as_ref()
            .ok_or_else(|| BrowserError::SessionLost("session already closed".into()))
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        self.kill_driver();
    }
}

fn capabilities(config: &WebDriverConfig) -> Capabilities {
    let mut caps = Capabilities::new();
    match config.browser {
        BrowserKind::Firefox => {
            let args: Vec<&str> = if config.headless { vec!["-headless"] } else { vec![] };
            caps.insert("moz:firefoxOptions".into(), json!({ "args": args }));
        }
        BrowserKind::Chrome => {
            let mut args = vec!["--no-sandbox", "--disable-dev-shm-usage"];
            if config.headless {
                args.insert(0, "--headless");
            }
            caps.insert("goog:chromeOptions".into(), json!({ "args": args }));
        }
    }
    caps
}

fn command_error(selector: &str, err: CmdError) -> BrowserError {
    match err {
        e if e.is_no_such_element() => BrowserError::NotFound(selector.to_string()),
        CmdError::WaitTimeout => BrowserError::NotFound(selector.to_string()),
        CmdError::Lost(e) => BrowserError::SessionLost(e.to_string()),
        e => BrowserError::Command(e.to_string()),
    }
}

fn navigation_error(url: &str, err: CmdError) -> BrowserError {
    match err {
        CmdError::Lost(e) => BrowserError::SessionLost(e.to_string()),
        e => BrowserError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        },
    }
}

#[async_trait]
impl Browser for WebDriverSession {
    type Element = Element;

    async fn goto(&mut self, url: &str) -> Result<(), BrowserError> {
        self.client()?
            .goto(url)
            .await
            .map_err(|e| navigation_error(url, e))
    }

    async fn open_tab(&mut self, url: &str) -> Result<(), BrowserError> {
        let client = self.client()?;
        let tab = client
            .new_window(true)
            .await
            .map_err(|e| navigation_error(url, e))?;
        client
            .switch_to_window(tab.handle)
            .await
            .map_err(|e| navigation_error(url, e))?;
        if let Err(e) = client.goto(url).await {
            // leave the session on the main window for the next listing
            let _ = client.close_window().await;
            let _ = client.switch_to_window(self.main_window.clone()).await;
            return Err(navigation_error(url, e));
        }
        Ok(())
    }

    async fn close_tab(&mut self) -> Result<(), BrowserError> {
        let client = self.client()?;
        client
            .close_window()
            .await
            .map_err(|e| command_error("window", e))?;
        client
            .switch_to_window(self.main_window.clone())
            .await
            .map_err(|e| command_error("window", e))
    }

    async fn find(&self, css: &str) -> Result<Element, BrowserError> {
        self.client()?
            .find(Locator::Css(css))
            .await
            .map_err(|e| command_error(css, e))
    }

    async fn find_all(&self, css: &str) -> Result<Vec<Element>, BrowserError> {
        self.client()?
            .find_all(Locator::Css(css))
            .await
            .map_err(|e| command_error(css, e))
    }

    async fn find_in(&self, parent: &Element, css: &str) -> Result<Element, BrowserError> {
        parent
            .find(Locator::Css(css))
            .await
            .map_err(|e| command_error(css, e))
    }

    async fn find_all_in(&self, parent: &Element, css: &str) -> Result<Vec<Element>, BrowserError> {
        parent
            .find_all(Locator::Css(css))
            .await
            .map_err(|e| command_error(css, e))
    }

    async fn text(&self, element: &Element) -> Result<String, BrowserError> {
        element.text().await.map_err(|e| command_error("text", e))
    }

    async fn attr(&self, element: &Element, name: &str) -> Result<Option<String>, BrowserError> {
        // the property carries the resolved absolute href
        match element.prop(name).await.map_err(|e| command_error(name, e))? {
            Some(value) => Ok(Some(value)),
            None => element.attr(name).await.map_err(|e| command_error(name, e)),
        }
    }

    async fn click(&self, element: &Element) -> Result<(), BrowserError> {
        element.click().await.map_err(|e| command_error("click", e))
    }

    async fn wait_for(&self, css: &str, timeout: Duration) -> Result<Element, BrowserError> {
        self.client()?
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await
            .map_err(|e| command_error(css, e))
    }
}
