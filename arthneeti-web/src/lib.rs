#![forbid(unsafe_code)]
//! Arth-Neeti browser client.
//!
//! Composition root for the session core: injects a `fetch` transport, a
//! `localStorage` pointer store and token auth into [`arthneeti_client`], then
//! renders one page per flow state.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod dom;
pub mod format;
pub mod lang;
pub mod logger;
pub mod pages;
pub mod paths;
pub mod platform;
pub mod router;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(paths::log_level());
    yew::Renderer::<app::App>::new().render();
}
