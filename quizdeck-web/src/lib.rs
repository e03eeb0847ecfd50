//! QuizDeck browser front end: Yew app shell plus the wasm side of the
//! offline cache, exported for the service-worker shell.
#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod dom;
pub mod offline;
pub mod pages;
pub mod paths;
pub mod platform;
pub mod router;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    yew::Renderer::<app::App>::new().render();
}

/// Service-worker `install` handler: precache the app shell.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn sw_install() {
    offline::install().await;
}

/// Service-worker `activate` handler: purge caches from older deploys.
///
/// # Errors
/// Fails when cache storage cannot be enumerated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn sw_activate() -> Result<(), JsValue> {
    offline::activate()
        .await
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Service-worker `fetch` handler: answer a GET through the cache
/// strategy picked for the URL, returning the response body.
///
/// # Errors
/// Fails when neither the network nor the cache can satisfy the request.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn sw_fetch(url: String) -> Result<js_sys::Uint8Array, JsValue> {
    let response = offline::handle_fetch(&url)
        .await
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(js_sys::Uint8Array::from(response.body.as_slice()))
}
