//! Browsing session and fetch pipeline
//!
//! Every navigation action ends in a [`RenderedPage`]: either the fetched
//! document or an error page. Fetch failures never escape this module.
//!
//! Only one fetch runs at a time. A navigation request arriving while another
//! is loading is rejected with [`CoreError::FetchInFlight`] and leaves the
//! history untouched.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use webcli_fetch::{FetchError, FetchRequest, FetchedDocument, HttpFetcher, PageFetcher, ProgressSender};
use webcli_navigation::{normalize, simplify, History};
use webcli_render::{error_page, DispatchTable, HtmlDocument, RenderEngine, RenderedPage};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Result of retrieving one document.
pub enum FetchOutcome {
    /// `url` is where the document was finally served from, after redirects.
    Success {
        title: String,
        url: String,
        document: HtmlDocument,
    },
    HttpFailure { status_code: u16, message: String },
    TransportFailure { message: String },
}

impl FetchOutcome {
    pub fn from_result(result: std::result::Result<FetchedDocument, FetchError>) -> Self {
        match result {
            Ok(fetched) => {
                let document = HtmlDocument::parse(&fetched.body);
                FetchOutcome::Success {
                    title: document.title().unwrap_or_default(),
                    url: fetched.url,
                    document,
                }
            }
            Err(FetchError::Status { code, message }) => FetchOutcome::HttpFailure {
                status_code: code,
                message,
            },
            Err(e) => FetchOutcome::TransportFailure {
                message: e.to_string(),
            },
        }
    }
}

/// Releases the single-fetch slot when dropped.
struct FetchGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// One browsing session: history, renderer and fetcher.
pub struct Browser {
    config: Config,
    history: Arc<RwLock<History>>,
    engine: RenderEngine,
    fetcher: Arc<dyn PageFetcher>,
    in_flight: Arc<AtomicBool>,
}

impl Browser {
    /// Session over HTTP, starting at the configured homepage.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(
            &config.user_agent,
            config.redirect_limit,
            config.use_system_proxy,
        )?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        let table = if config.render_scripts {
            DispatchTable::with_scripts()
        } else {
            DispatchTable::new()
        };

        Self {
            history: Arc::new(RwLock::new(History::new(config.homepage.clone()))),
            engine: RenderEngine::with_table(table),
            fetcher,
            in_flight: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current_address(&self) -> String {
        self.history.read().current_address().to_string()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.read().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.read().can_go_forward()
    }

    /// History addresses, oldest first.
    pub fn history_entries(&self) -> Vec<String> {
        self.history.read().entries().map(str::to_string).collect()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    // === Navigation actions ===

    /// Go to a new address, recording it in history.
    pub async fn navigate(
        &self,
        address: &str,
        progress: Option<ProgressSender>,
    ) -> Result<RenderedPage> {
        self.load(address, true, progress).await
    }

    /// Step back and load that page. `Ok(None)` when there is nothing behind.
    pub async fn back(&self, progress: Option<ProgressSender>) -> Result<Option<RenderedPage>> {
        let _guard = self.begin_fetch()?;
        let address = self.history.write().back().map(str::to_string);
        match address {
            Some(address) => Ok(Some(self.fetch_and_render(&address, progress).await)),
            None => Ok(None),
        }
    }

    /// Step forward and load that page. `Ok(None)` when there is nothing ahead.
    pub async fn forward(&self, progress: Option<ProgressSender>) -> Result<Option<RenderedPage>> {
        let _guard = self.begin_fetch()?;
        let address = self.history.write().forward().map(str::to_string);
        match address {
            Some(address) => Ok(Some(self.fetch_and_render(&address, progress).await)),
            None => Ok(None),
        }
    }

    /// Reload the current page without touching history.
    pub async fn refresh(&self, progress: Option<ProgressSender>) -> Result<RenderedPage> {
        let address = self.current_address();
        self.load(&address, false, progress).await
    }

    pub async fn home(&self, progress: Option<ProgressSender>) -> Result<RenderedPage> {
        let homepage = self.config.homepage.clone();
        self.navigate(&homepage, progress).await
    }

    /// Fetch and render `address`.
    ///
    /// With `update_history` the address becomes a new history entry first;
    /// without it the address is loaded as-is (back/forward/refresh).
    pub async fn load(
        &self,
        address: &str,
        update_history: bool,
        progress: Option<ProgressSender>,
    ) -> Result<RenderedPage> {
        let _guard = self.begin_fetch()?;

        if update_history {
            self.history.write().visit(address);
        }

        Ok(self.fetch_and_render(address, progress).await)
    }

    fn begin_fetch(&self) -> Result<FetchGuard> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Navigation rejected, a page is already loading");
            return Err(CoreError::FetchInFlight);
        }

        Ok(FetchGuard {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    async fn fetch_and_render(&self, address: &str, progress: Option<ProgressSender>) -> RenderedPage {
        let url = normalize(address);
        let request = FetchRequest::new(url.clone(), self.config.request_timeout());

        tracing::info!(address, url = %url, "Loading page");

        let result = self.fetcher.fetch(&request, progress).await;
        self.render_outcome(FetchOutcome::from_result(result), &url)
    }

    fn render_outcome(&self, outcome: FetchOutcome, url: &str) -> RenderedPage {
        match outcome {
            FetchOutcome::Success {
                title,
                url: final_url,
                document,
            } => {
                if final_url != url {
                    tracing::debug!(url, final_url = %final_url, "Followed redirect");
                }
                let display = simplify(&final_url);
                let mut page = self.engine.render_document(&document);
                page.title = if title.is_empty() { display.clone() } else { title };
                page.address = Some(display);
                page
            }
            FetchOutcome::HttpFailure {
                status_code,
                message,
            } => {
                tracing::warn!(url, status_code, "Page load failed");
                error_page(status_code, Some(&message))
            }
            FetchOutcome::TransportFailure { message } => {
                tracing::warn!(url, error = %message, "Page load failed");
                error_page(0, Some(&message))
            }
        }
    }
}

impl Clone for Browser {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            history: Arc::clone(&self.history),
            engine: self.engine.clone(),
            fetcher: Arc::clone(&self.fetcher),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tokio::sync::Notify;

    enum Stub {
        Page(&'static str),
        Redirected { to: &'static str, body: &'static str },
        Status(u16),
        Refused,
    }

    /// Serves canned responses keyed by normalized URL and records requests.
    struct StubFetcher {
        pages: HashMap<String, Stub>,
        requests: parking_lot::Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(pages: Vec<(&str, Stub)>) -> Arc<Self> {
            Arc::new(Self {
                pages: pages
                    .into_iter()
                    .map(|(addr, stub)| (normalize(addr), stub))
                    .collect(),
                requests: parking_lot::Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(
            &self,
            request: &FetchRequest,
            progress: Option<ProgressSender>,
        ) -> webcli_fetch::Result<FetchedDocument> {
            self.requests.lock().push(request.url.clone());
            if let Some(tx) = progress {
                let _ = tx.send(100);
            }

            match self.pages.get(&request.url) {
                Some(Stub::Page(body)) => Ok(FetchedDocument {
                    url: request.url.clone(),
                    body: body.to_string(),
                }),
                Some(Stub::Redirected { to, body }) => Ok(FetchedDocument {
                    url: to.to_string(),
                    body: body.to_string(),
                }),
                Some(Stub::Status(code)) => Err(FetchError::Status {
                    code: *code,
                    message: format!("HTTP error fetching URL: {}", code),
                }),
                Some(Stub::Refused) | None => {
                    Err(FetchError::Transport("connection refused".to_string()))
                }
            }
        }
    }

    /// Blocks inside `fetch` until released.
    struct GatedFetcher {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl PageFetcher for GatedFetcher {
        async fn fetch(
            &self,
            request: &FetchRequest,
            _progress: Option<ProgressSender>,
        ) -> webcli_fetch::Result<FetchedDocument> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(FetchedDocument {
                url: request.url.clone(),
                body: "<title>slow</title>".to_string(),
            })
        }
    }

    fn test_config() -> Config {
        let mut config = Config::new(PathBuf::from("/tmp/webcli-test"));
        config.homepage = "home.example".to_string();
        config
    }

    fn site() -> Arc<StubFetcher> {
        StubFetcher::new(vec![
            ("home.example", Stub::Page("<title>Home</title><body><p>welcome</p></body>")),
            ("a.example", Stub::Page("<title>A</title><body><h1>A</h1></body>")),
            ("b.example", Stub::Page("<title>B</title><body><li>b</li></body>")),
            ("c.example", Stub::Page("<title>C</title><body><hr></body>")),
            ("d.example", Stub::Page("<body><br></body>")),
            (
                "old.example",
                Stub::Redirected {
                    to: "https://new.example/index.html",
                    body: "<body><p>moved</p></body>",
                },
            ),
            ("missing.example", Stub::Status(404)),
            ("broken.example", Stub::Status(500)),
            ("down.example", Stub::Refused),
        ])
    }

    #[tokio::test]
    async fn test_navigate_renders_page() {
        let fetcher = site();
        let browser = Browser::with_fetcher(test_config(), fetcher.clone());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let page = browser.navigate("a.example", Some(tx)).await.unwrap();

        assert_eq!(page.title, "A");
        assert_eq!(page.address.as_deref(), Some("a.example"));
        assert_eq!(page.lines, vec!["".to_string(), "======A======".to_string()]);
        assert_eq!(rx.recv().await, Some(100));

        assert_eq!(fetcher.requests(), vec!["https://a.example/index.html"]);
        assert_eq!(browser.history_entries(), vec!["home.example", "a.example"]);
        assert!(!browser.is_loading());
    }

    #[tokio::test]
    async fn test_title_falls_back_to_address() {
        let browser = Browser::with_fetcher(test_config(), site());
        let page = browser.navigate("d.example", None).await.unwrap();
        assert_eq!(page.title, "d.example");
    }

    #[tokio::test]
    async fn test_address_follows_redirect() {
        let browser = Browser::with_fetcher(test_config(), site());
        let page = browser.navigate("old.example", None).await.unwrap();

        assert_eq!(page.address.as_deref(), Some("new.example"));
        assert_eq!(page.title, "new.example");
        assert_eq!(browser.current_address(), "old.example");
    }

    #[tokio::test]
    async fn test_http_failure_becomes_error_page() {
        let browser = Browser::with_fetcher(test_config(), site());

        let page = browser.navigate("missing.example", None).await.unwrap();
        assert_eq!(page.title, "Error 404");
        assert!(page.address.is_none());
        assert!(page.lines.iter().any(|l| l.contains("Page not found")));

        let page = browser.navigate("broken.example", None).await.unwrap();
        assert_eq!(page.title, "Error 500");
        assert!(page.lines.iter().any(|l| l.trim() == "status: 500"));

        // Failed pages are still history entries.
        assert_eq!(browser.current_address(), "broken.example");
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_page() {
        let browser = Browser::with_fetcher(test_config(), site());

        let page = browser.navigate("down.example", None).await.unwrap();
        assert_eq!(page.title, "Error 0");
        assert!(page.lines.iter().any(|l| l.trim() == "status: 0"));
        assert!(page.lines.iter().any(|l| l.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_back_forward_do_not_record_history() {
        let fetcher = site();
        let browser = Browser::with_fetcher(test_config(), fetcher.clone());

        browser.navigate("b.example", None).await.unwrap();
        browser.navigate("c.example", None).await.unwrap();

        let page = browser.back(None).await.unwrap().unwrap();
        assert_eq!(page.title, "B");
        assert_eq!(browser.current_address(), "b.example");

        let page = browser.forward(None).await.unwrap().unwrap();
        assert_eq!(page.title, "C");
        assert!(browser.forward(None).await.unwrap().is_none());

        assert_eq!(
            browser.history_entries(),
            vec!["home.example", "b.example", "c.example"]
        );
        assert_eq!(fetcher.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_back_at_start_is_noop() {
        let fetcher = site();
        let browser = Browser::with_fetcher(test_config(), fetcher.clone());

        assert!(browser.back(None).await.unwrap().is_none());
        assert!(fetcher.requests().is_empty());
        assert_eq!(browser.current_address(), "home.example");
    }

    #[tokio::test]
    async fn test_navigate_after_back_drops_forward() {
        let browser = Browser::with_fetcher(test_config(), site());

        browser.navigate("b.example", None).await.unwrap();
        browser.navigate("c.example", None).await.unwrap();
        browser.back(None).await.unwrap();
        browser.navigate("d.example", None).await.unwrap();

        assert!(!browser.can_go_forward());
        assert_eq!(
            browser.history_entries(),
            vec!["home.example", "b.example", "d.example"]
        );

        let page = browser.back(None).await.unwrap().unwrap();
        assert_eq!(page.title, "B");
        let page = browser.forward(None).await.unwrap().unwrap();
        assert_eq!(page.address.as_deref(), Some("d.example"));
    }

    #[tokio::test]
    async fn test_refresh_and_home() {
        let fetcher = site();
        let browser = Browser::with_fetcher(test_config(), fetcher.clone());

        let page = browser.refresh(None).await.unwrap();
        assert_eq!(page.title, "Home");
        assert_eq!(browser.history_entries().len(), 1);

        browser.navigate("a.example", None).await.unwrap();
        let page = browser.home(None).await.unwrap();
        assert_eq!(page.title, "Home");
        assert_eq!(browser.history_entries().len(), 3);
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://home.example/index.html",
                "https://a.example/index.html",
                "https://home.example/index.html",
            ]
        );
    }

    #[tokio::test]
    async fn test_second_fetch_rejected_while_loading() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let browser = Browser::with_fetcher(
            test_config(),
            Arc::new(GatedFetcher {
                started: started.clone(),
                release: release.clone(),
            }),
        );

        let background = browser.clone();
        let slow = tokio::spawn(async move { background.navigate("slow.example", None).await });

        started.notified().await;
        assert!(browser.is_loading());

        let err = browser.navigate("other.example", None).await.unwrap_err();
        assert!(matches!(err, CoreError::FetchInFlight));
        assert!(matches!(
            browser.back(None).await.unwrap_err(),
            CoreError::FetchInFlight
        ));
        assert_eq!(browser.current_address(), "slow.example");

        release.notify_one();
        let page = slow.await.unwrap().unwrap();
        assert_eq!(page.title, "slow");
        assert!(!browser.is_loading());
        assert_eq!(
            browser.history_entries(),
            vec!["home.example", "slow.example"]
        );
    }
}
