//! Offline cache strategies.
//!
//! The browser shell intercepts fetches and answers them through one of
//! three strategies, picked by URL:
//!
//! - [`CacheStrategy::StaleWhileRevalidate`] for the quiz index, so the
//!   selection screen paints instantly and picks up new quizzes on the
//!   next visit.
//! - [`CacheStrategy::NetworkFirst`] for individual quiz files, so the
//!   player always gets the freshest questions but can still replay a
//!   quiz offline.
//! - [`CacheStrategy::CacheFirst`] for static assets and CDN resources.
//!
//! The strategies themselves are platform-neutral: they run against the
//! [`CacheStore`] and [`NetworkFetch`] traits, which the web crate backs
//! with the browser Cache API and `fetch`, and tests back with hash maps.

use std::fmt;

/// Bumped on every deploy that changes precached assets; stale caches
/// with older versions are deleted on activation.
pub const CACHE_VERSION: &str = "v1";

const CACHE_PREFIX: &str = "quizdeck-";

/// Assets cached eagerly at install time so the app shell works offline.
pub const PRECACHE_MANIFEST: &[&str] = &[
    "/",
    "/index.html",
    "/styles.css",
    "/quizdeck-web.js",
    "/quizdeck-web_bg.wasm",
    "/manifest.json",
    "/data/index.json",
    "/data/trophies.json",
    "/images/win.gif",
    "/images/loose.gif",
    "/images/start.gif",
];

const CDN_HOSTS: [&str; 2] = ["cdn.tailwindcss.com", "cdn.jsdelivr.net"];

#[must_use]
pub fn cache_name() -> String {
    format!("{CACHE_PREFIX}{CACHE_VERSION}")
}

/// True for caches from older deploys that should be dropped.
#[must_use]
pub fn is_stale_cache(name: &str) -> bool {
    name.starts_with(CACHE_PREFIX) && name != cache_name()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    CacheFirst,
    NetworkFirst,
    StaleWhileRevalidate,
}

impl CacheStrategy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CacheFirst => "cache-first",
            Self::NetworkFirst => "network-first",
            Self::StaleWhileRevalidate => "stale-while-revalidate",
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip scheme and host, keeping the path (and nothing after `?`).
fn url_path(url: &str) -> &str {
    let rest = url
        .split_once("://")
        .map_or(url, |(_, rest)| rest.find('/').map_or("/", |i| &rest[i..]));
    rest.split_once('?').map_or(rest, |(path, _)| path)
}

fn is_cdn(url: &str) -> bool {
    url.split_once("://")
        .map(|(_, rest)| rest.split('/').next().unwrap_or(""))
        .is_some_and(|host| CDN_HOSTS.contains(&host))
}

/// Pick the strategy for a request URL.
#[must_use]
pub fn strategy_for_url(url: &str) -> CacheStrategy {
    let path = url_path(url);
    if path == "/data/index.json" {
        return CacheStrategy::StaleWhileRevalidate;
    }
    if path.starts_with("/data/") && path.ends_with(".json") {
        return CacheStrategy::NetworkFirst;
    }
    if is_cdn(url)
        || path.starts_with("/images/")
        || path.ends_with(".css")
        || path.ends_with(".js")
        || path.ends_with(".wasm")
        || path == "/"
        || path == "/index.html"
    {
        return CacheStrategy::CacheFirst;
    }
    CacheStrategy::NetworkFirst
}

/// True if a successful network response for this URL should be stored.
/// Only quiz data is cached on the network-first path; other unmatched
/// requests pass through untouched.
#[must_use]
pub fn should_cache_response(url: &str) -> bool {
    let path = url_path(url);
    path.starts_with("/data/") && path.ends_with(".json")
}

/// Read/write access to a response cache, keyed by URL.
pub trait CacheStore {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get(&self, url: &str) -> Result<Option<Vec<u8>>, Self::Error>;
    async fn put(&self, url: &str, body: &[u8]) -> Result<(), Self::Error>;
}

/// Network access for cache strategies.
pub trait NetworkFetch {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Self::Error>;
}

/// Where a [`fetch_with_strategy`] response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub body: Vec<u8>,
    pub source: ResponseSource,
    /// Set on a stale-while-revalidate cache hit; the caller should spawn
    /// [`refresh_into_cache`] for the same URL.
    pub needs_refresh: bool,
}

impl CachedResponse {
    fn from_cache(body: Vec<u8>) -> Self {
        Self { body, source: ResponseSource::Cache, needs_refresh: false }
    }

    fn from_network(body: Vec<u8>) -> Self {
        Self { body, source: ResponseSource::Network, needs_refresh: false }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("network unavailable and no cached copy of {url}")]
    Unavailable { url: String },
    #[error("cache access failed: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Answer a request using the strategy chosen by [`strategy_for_url`].
///
/// # Errors
/// Returns [`CacheError::Unavailable`] when neither the network nor the
/// cache can satisfy the request, and [`CacheError::Store`] when the
/// cache backend itself fails.
pub async fn fetch_with_strategy<C, N>(
    cache: &C,
    network: &N,
    url: &str,
) -> Result<CachedResponse, CacheError>
where
    C: CacheStore,
    N: NetworkFetch,
{
    match strategy_for_url(url) {
        CacheStrategy::CacheFirst => cache_first(cache, network, url).await,
        CacheStrategy::NetworkFirst => network_first(cache, network, url).await,
        CacheStrategy::StaleWhileRevalidate => stale_while_revalidate(cache, network, url).await,
    }
}

/// Serve from cache; on a miss, fetch and store.
pub async fn cache_first<C, N>(
    cache: &C,
    network: &N,
    url: &str,
) -> Result<CachedResponse, CacheError>
where
    C: CacheStore,
    N: NetworkFetch,
{
    if let Some(body) = cache.get(url).await.map_err(store_err)? {
        return Ok(CachedResponse::from_cache(body));
    }
    match network.fetch(url).await {
        Ok(body) => {
            cache.put(url, &body).await.map_err(store_err)?;
            Ok(CachedResponse::from_network(body))
        }
        Err(err) => {
            log::warn!("cache-first fetch failed for {url}: {err}");
            Err(CacheError::Unavailable { url: url.to_string() })
        }
    }
}

/// Try the network; fall back to the cache when offline. Successful quiz
/// responses are stored for offline replay.
pub async fn network_first<C, N>(
    cache: &C,
    network: &N,
    url: &str,
) -> Result<CachedResponse, CacheError>
where
    C: CacheStore,
    N: NetworkFetch,
{
    match network.fetch(url).await {
        Ok(body) => {
            if should_cache_response(url) {
                cache.put(url, &body).await.map_err(store_err)?;
            }
            Ok(CachedResponse::from_network(body))
        }
        Err(err) => {
            log::info!("network unavailable for {url}, trying cache: {err}");
            match cache.get(url).await.map_err(store_err)? {
                Some(body) => Ok(CachedResponse::from_cache(body)),
                None => Err(CacheError::Unavailable { url: url.to_string() }),
            }
        }
    }
}

/// Serve the cached copy immediately, flagging it for a background
/// refresh; fall through to the network only on a cache miss.
pub async fn stale_while_revalidate<C, N>(
    cache: &C,
    network: &N,
    url: &str,
) -> Result<CachedResponse, CacheError>
where
    C: CacheStore,
    N: NetworkFetch,
{
    if let Some(body) = cache.get(url).await.map_err(store_err)? {
        let mut response = CachedResponse::from_cache(body);
        response.needs_refresh = true;
        return Ok(response);
    }
    match network.fetch(url).await {
        Ok(body) => {
            cache.put(url, &body).await.map_err(store_err)?;
            Ok(CachedResponse::from_network(body))
        }
        Err(err) => {
            log::warn!("stale-while-revalidate miss and fetch failed for {url}: {err}");
            Err(CacheError::Unavailable { url: url.to_string() })
        }
    }
}

/// Background half of stale-while-revalidate: refetch and overwrite the
/// cached copy. Network failures are logged and swallowed, the stale
/// copy already served stays valid.
pub async fn refresh_into_cache<C, N>(cache: &C, network: &N, url: &str)
where
    C: CacheStore,
    N: NetworkFetch,
{
    match network.fetch(url).await {
        Ok(body) => {
            if let Err(err) = cache.put(url, &body).await {
                log::warn!("cache refresh store failed for {url}: {err}");
            }
        }
        Err(err) => log::info!("cache refresh fetch failed for {url}: {err}"),
    }
}

fn store_err<E: std::error::Error + Send + Sync + 'static>(err: E) -> CacheError {
    CacheError::Store(Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;

    #[derive(Default)]
    struct MemoryCache {
        entries: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl CacheStore for MemoryCache {
        type Error = Infallible;

        async fn get(&self, url: &str) -> Result<Option<Vec<u8>>, Infallible> {
            Ok(self.entries.borrow().get(url).cloned())
        }

        async fn put(&self, url: &str, body: &[u8]) -> Result<(), Infallible> {
            self.entries.borrow_mut().insert(url.to_string(), body.to_vec());
            Ok(())
        }
    }

    struct FakeNetwork {
        responses: HashMap<String, Vec<u8>>,
        calls: RefCell<u32>,
    }

    impl FakeNetwork {
        fn online(pairs: &[(&str, &str)]) -> Self {
            Self {
                responses: pairs
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.as_bytes().to_vec()))
                    .collect(),
                calls: RefCell::new(0),
            }
        }

        fn offline() -> Self {
            Self { responses: HashMap::new(), calls: RefCell::new(0) }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct NetworkDown;

    impl NetworkFetch for FakeNetwork {
        type Error = NetworkDown;

        async fn fetch(&self, url: &str) -> Result<Vec<u8>, NetworkDown> {
            *self.calls.borrow_mut() += 1;
            self.responses.get(url).cloned().ok_or(NetworkDown)
        }
    }

    #[test]
    fn strategies_are_routed_by_url() {
        assert_eq!(
            strategy_for_url("https://quiz.example/data/index.json"),
            CacheStrategy::StaleWhileRevalidate
        );
        assert_eq!(strategy_for_url("/data/rust-basics.json"), CacheStrategy::NetworkFirst);
        assert_eq!(strategy_for_url("/images/win.gif"), CacheStrategy::CacheFirst);
        assert_eq!(strategy_for_url("/styles.css"), CacheStrategy::CacheFirst);
        assert_eq!(strategy_for_url("/quizdeck-web_bg.wasm"), CacheStrategy::CacheFirst);
        assert_eq!(strategy_for_url("https://quiz.example/"), CacheStrategy::CacheFirst);
        assert_eq!(
            strategy_for_url("https://cdn.jsdelivr.net/npm/some-lib"),
            CacheStrategy::CacheFirst
        );
        assert_eq!(strategy_for_url("/api/telemetry"), CacheStrategy::NetworkFirst);
    }

    #[test]
    fn stale_cache_names() {
        assert!(is_stale_cache("quizdeck-v0"));
        assert!(!is_stale_cache(&cache_name()));
        assert!(!is_stale_cache("other-app-v1"));
    }

    #[test]
    fn cache_first_hits_skip_the_network() {
        let cache = MemoryCache::default();
        let network = FakeNetwork::offline();
        block_on(cache.put("/styles.css", b"body{}")).unwrap();

        let response = block_on(cache_first(&cache, &network, "/styles.css")).unwrap();
        assert_eq!(response.body, b"body{}");
        assert_eq!(response.source, ResponseSource::Cache);
        assert_eq!(*network.calls.borrow(), 0);
    }

    #[test]
    fn cache_first_miss_fetches_and_stores() {
        let cache = MemoryCache::default();
        let network = FakeNetwork::online(&[("/app.js", "console")]);

        let response = block_on(cache_first(&cache, &network, "/app.js")).unwrap();
        assert_eq!(response.source, ResponseSource::Network);
        assert_eq!(
            block_on(cache.get("/app.js")).unwrap().as_deref(),
            Some(b"console".as_slice())
        );
    }

    #[test]
    fn network_first_caches_quiz_json_and_falls_back_offline() {
        let cache = MemoryCache::default();
        let online = FakeNetwork::online(&[("/data/history.json", "{\"v\":1}")]);

        let fresh = block_on(network_first(&cache, &online, "/data/history.json")).unwrap();
        assert_eq!(fresh.source, ResponseSource::Network);

        let offline = FakeNetwork::offline();
        let stale = block_on(network_first(&cache, &offline, "/data/history.json")).unwrap();
        assert_eq!(stale.source, ResponseSource::Cache);
        assert_eq!(stale.body, fresh.body);
    }

    #[test]
    fn network_first_does_not_cache_unmatched_urls() {
        let cache = MemoryCache::default();
        let network = FakeNetwork::online(&[("/api/ping", "pong")]);

        block_on(network_first(&cache, &network, "/api/ping")).unwrap();
        assert_eq!(block_on(cache.get("/api/ping")).unwrap(), None);
    }

    #[test]
    fn network_first_offline_miss_is_unavailable() {
        let cache = MemoryCache::default();
        let network = FakeNetwork::offline();

        let err = block_on(network_first(&cache, &network, "/data/new.json")).unwrap_err();
        assert!(matches!(err, CacheError::Unavailable { .. }));
    }

    #[test]
    fn stale_while_revalidate_serves_cache_and_flags_refresh() {
        let cache = MemoryCache::default();
        let network = FakeNetwork::online(&[("/data/index.json", "{\"quizzes\":[]}")]);
        block_on(cache.put("/data/index.json", b"old")).unwrap();

        let response =
            block_on(stale_while_revalidate(&cache, &network, "/data/index.json")).unwrap();
        assert_eq!(response.body, b"old");
        assert!(response.needs_refresh);
        assert_eq!(*network.calls.borrow(), 0);

        block_on(refresh_into_cache(&cache, &network, "/data/index.json"));
        assert_eq!(
            block_on(cache.get("/data/index.json")).unwrap().as_deref(),
            Some(b"{\"quizzes\":[]}".as_slice())
        );
    }

    #[test]
    fn stale_while_revalidate_miss_goes_to_network() {
        let cache = MemoryCache::default();
        let network = FakeNetwork::online(&[("/data/index.json", "fresh")]);

        let response =
            block_on(fetch_with_strategy(&cache, &network, "/data/index.json")).unwrap();
        assert_eq!(response.source, ResponseSource::Network);
        assert!(!response.needs_refresh);
    }

    #[test]
    fn refresh_failure_keeps_stale_copy() {
        let cache = MemoryCache::default();
        block_on(cache.put("/data/index.json", b"old")).unwrap();

        block_on(refresh_into_cache(&cache, &FakeNetwork::offline(), "/data/index.json"));
        assert_eq!(
            block_on(cache.get("/data/index.json")).unwrap().as_deref(),
            Some(b"old".as_slice())
        );
    }
}
