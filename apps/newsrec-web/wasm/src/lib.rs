//! WASM bindings for the news recommendation feed
//!
//! Wires `newsrec-core` to the page: a `fetch` transport, the query input
//! and results container looked up once by id, and the Enter-key binding.
//! All state and rendering decisions stay in Rust.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { NewsFeed } from './pkg/newsrec_wasm.js';
//!
//! await init();
//!
//! const feed = new NewsFeed({ timeout_ms: 15000 });
//! feed.exposePresetHook('searchTopic');   // <button onclick="searchTopic('AI')">
//! document.getElementById('searchButton')
//!     .addEventListener('click', () => feed.submitQuery());
//! ```

pub mod dom;
pub mod feed;
pub mod transport;

use wasm_bindgen::prelude::*;

pub use dom::{DomInput, DomResults};
pub use feed::NewsFeed;
pub use transport::FetchTransport;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
