//! Browser half of the offline cache.
//!
//! Implements the platform traits from `quizdeck_core::cache` on top of
//! the Cache API and `fetch`, and exposes the install / activate /
//! fetch handlers the worker shell calls.

use quizdeck_core::cache::{
    CacheError, CacheStore, CachedResponse, NetworkFetch, PRECACHE_MANIFEST, cache_name,
    fetch_with_strategy, is_stale_cache, refresh_into_cache,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, Response};

use crate::dom::{js_error_message, window};

/// Cache API failure flattened to a message; `JsValue` is not `Send + Sync`.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BrowserCacheError(String);

fn js_err(value: wasm_bindgen::JsValue) -> BrowserCacheError {
    BrowserCacheError(js_error_message(&value))
}

#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
async fn open_cache() -> Result<Cache, BrowserCacheError> {
    let caches = window().caches().map_err(js_err)?;
    let cache = JsFuture::from(caches.open(&cache_name()))
        .await
        .map_err(js_err)?;
    cache.dyn_into::<Cache>().map_err(js_err)
}

#[allow(clippy::future_not_send)]
async fn response_bytes(response: &Response) -> Result<Vec<u8>, BrowserCacheError> {
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// [`CacheStore`] over the browser Cache API.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCache;

impl CacheStore for BrowserCache {
    type Error = BrowserCacheError;

    #[allow(clippy::future_not_send)]
    async fn get(&self, url: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let cache = open_cache().await?;
        let matched = JsFuture::from(cache.match_with_str(url))
            .await
            .map_err(js_err)?;
        let Ok(response) = matched.dyn_into::<Response>() else {
            return Ok(None);
        };
        Ok(Some(response_bytes(&response).await?))
    }

    #[allow(clippy::future_not_send)]
    async fn put(&self, url: &str, body: &[u8]) -> Result<(), Self::Error> {
        let cache = open_cache().await?;
        let mut owned = body.to_vec();
        let response =
            Response::new_with_opt_u8_array(Some(owned.as_mut_slice())).map_err(js_err)?;
        JsFuture::from(cache.put_with_str(url, &response))
            .await
            .map_err(js_err)?;
        Ok(())
    }
}

/// [`NetworkFetch`] over the browser `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNetwork;

impl NetworkFetch for BrowserNetwork {
    type Error = BrowserCacheError;

    #[allow(clippy::future_not_send)]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Self::Error> {
        let fetched = JsFuture::from(window().fetch_with_str(url))
            .await
            .map_err(js_err)?;
        let response = fetched.dyn_into::<Response>().map_err(js_err)?;
        if response.status() != 200 {
            return Err(BrowserCacheError(format!(
                "{url} answered HTTP {}",
                response.status()
            )));
        }
        response_bytes(&response).await
    }
}

/// Answer an intercepted request through the strategy picked for its URL.
/// Stale-while-revalidate hits kick off a background refresh.
///
/// # Errors
/// Fails when neither the network nor the cache can satisfy the request.
#[allow(clippy::future_not_send)]
pub async fn handle_fetch(url: &str) -> Result<CachedResponse, CacheError> {
    let response = fetch_with_strategy(&BrowserCache, &BrowserNetwork, url).await?;
    if response.needs_refresh {
        let url = url.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            refresh_into_cache(&BrowserCache, &BrowserNetwork, &url).await;
        });
    }
    Ok(response)
}

/// Install step: precache the app shell. A single missing asset is
/// logged and skipped rather than failing the whole install.
#[allow(clippy::future_not_send)]
pub async fn install() {
    for url in PRECACHE_MANIFEST {
        let full = crate::paths::asset_path(url);
        refresh_into_cache(&BrowserCache, &BrowserNetwork, &full).await;
    }
    log::info!("precached {} assets into {}", PRECACHE_MANIFEST.len(), cache_name());
}

/// Activate step: drop caches left over from older deploys.
///
/// # Errors
/// Fails when cache storage cannot be enumerated.
#[allow(clippy::future_not_send)]
pub async fn activate() -> Result<(), BrowserCacheError> {
    let caches = window().caches().map_err(js_err)?;
    let keys = JsFuture::from(caches.keys()).await.map_err(js_err)?;
    for key in js_sys::Array::from(&keys).iter() {
        if let Some(name) = key.as_string()
            && is_stale_cache(&name)
        {
            log::info!("deleting stale cache {name}");
            let _ = JsFuture::from(caches.delete(&name)).await;
        }
    }
    Ok(())
}
