// src/core/net.rs
//! Page loading.
//!
//! [`PageSource`] is the only way the crawler touches the network. A load
//! takes an optional *ready* selector: the page only counts as settled once
//! that selector matches, the same contract a headless browser's
//! wait-for-selector gives. [`HttpSource`] implements it by re-loading the
//! page until the selector shows up or the selector timeout runs out.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::config::consts::BASE_URL;
use crate::config::options::NetOptions;
use crate::core::pace::{Pacer, SleepPacer};
use crate::error::{Error, Result};

/// One loaded page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// What we asked for.
    pub url: String,
    /// Where we ended up after redirects.
    pub final_url: String,
    pub status: u16,
    pub html: String,
}

impl Page {
    pub fn is_ok(&self) -> bool {
        self.status < 400
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        Html::parse_document(&self.html).select(selector).next().is_some()
    }
}

pub trait PageSource {
    /// Load `url`. With `ready`, keep waiting until it matches (or give up and
    /// return the last copy; callers check for their content themselves).
    fn load(&mut self, url: &str, ready: Option<&str>) -> Result<Page>;
}

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| Error::Selector(s!(css)))
}

/// Resolve a site-relative href (`/international-investment-agreements/treaties/...`).
pub fn absolute_url(href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        s!(href)
    } else if href.starts_with('/') {
        join!(BASE_URL, href)
    } else {
        join!(BASE_URL, "/", href)
    }
}

/// Backoff before retry number `attempt` (1-based): 2, 4, 8 … seconds.
pub fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}

/* ---------------- Live HTTP ---------------- */

/// Backoff and settle waits go through `pacer`.
pub struct HttpSource {
    client: Client,
    opts: NetOptions,
    pacer: Box<dyn Pacer>,
}

impl HttpSource {
    pub fn new(opts: &NetOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.page_timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client, opts: opts.clone(), pacer: Box::new(SleepPacer) })
    }

    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    fn get_once(&self, url: &str) -> Result<Page> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| Error::Http { url: s!(url), source })?;

        let status = resp.status();
        if status.is_server_error() {
            return Err(Error::Status { url: s!(url), status: status.as_u16() });
        }
        let final_url = resp.url().to_string();
        let html = resp.text().map_err(|source| Error::Http { url: s!(url), source })?;

        Ok(Page { url: s!(url), final_url, status: status.as_u16(), html })
    }

    /// GET with retries on transient failures.
    fn fetch(&mut self, url: &str) -> Result<Page> {
        let mut attempt = 1;
        loop {
            match self.get_once(url) {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < self.opts.max_retries => {
                    let wait = backoff(attempt);
                    logw!("Navigation to {url} failed ({e}), retry in {}s…", wait.as_secs());
                    self.pacer.pause(wait);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl PageSource for HttpSource {
    fn load(&mut self, url: &str, ready: Option<&str>) -> Result<Page> {
        let mut page = self.fetch(url)?;
        let Some(css) = ready else { return Ok(page) };

        let selector = parse_selector(css)?;
        let mut polls = self.opts.settle_polls();
        while polls > 0 && page.is_ok() && !page.matches(&selector) {
            logd!("{url}: `{css}` not there yet, reloading in {:?}", self.opts.settle_poll);
            self.pacer.pause(self.opts.settle_poll);
            page = self.fetch(url)?;
            polls -= 1;
        }
        Ok(page)
    }
}

/* ---------------- Canned pages ---------------- */

/// Serves fixed HTML by URL. Offline runs and tests.
///
/// Unknown URLs answer 404 with an empty body; URLs registered with
/// [`MemorySource::with_failure`] fail like a dead connection.
#[derive(Default)]
pub struct MemorySource {
    pages: HashMap<String, Page>,
    failing: HashSet<String>,
    requests: Vec<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.with_redirect(url, url, html)
    }

    pub fn with_redirect(mut self, url: &str, final_url: &str, html: &str) -> Self {
        let page = Page { url: s!(url), final_url: s!(final_url), status: 200, html: s!(html) };
        self.pages.insert(s!(url), page);
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(s!(url));
        self
    }

    /// Every URL loaded so far, in order.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl PageSource for MemorySource {
    fn load(&mut self, url: &str, _ready: Option<&str>) -> Result<Page> {
        self.requests.push(s!(url));
        if self.failing.contains(url) {
            return Err(Error::Status { url: s!(url), status: 503 });
        }
        Ok(self.pages.get(url).cloned().unwrap_or_else(|| Page {
            url: s!(url),
            final_url: s!(url),
            status: 404,
            html: s!(),
        }))
    }
}
