//! JS-facing news feed object
//!
//! Owns the one `QueryRenderer` for the page. `submitQuery` and
//! `applyPresetQuery` run validation and the loading render synchronously,
//! then hand the network half to the microtask queue.

use std::rc::Rc;

use newsrec_core::{PendingSearch, QueryRenderer, RendererConfig, Settlement, ViewState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

use crate::dom::{document, DomInput, DomResults};
use crate::transport::FetchTransport;

type Renderer = QueryRenderer<FetchTransport, DomInput, DomResults>;

#[wasm_bindgen]
pub struct NewsFeed {
    renderer: Rc<Renderer>,
}

#[wasm_bindgen]
impl NewsFeed {
    /// Bind to the page. `config` is an optional plain object overriding
    /// any `RendererConfig` field, e.g. `{ endpoint: "/api/recommend" }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<NewsFeed, JsValue> {
        let config = parse_config(config)?;
        let document = document()?;

        let input = DomInput::find(&document, &config.input_id)?;
        let results = DomResults::find(&document, &config.results_id)?;
        let transport = FetchTransport::new(config.timeout_ms);

        let feed = NewsFeed {
            renderer: Rc::new(QueryRenderer::new(transport, input, results, config)),
        };
        feed.install_enter_trigger()?;
        Ok(feed)
    }

    /// Search for whatever is in the query field.
    #[wasm_bindgen(js_name = submitQuery)]
    pub fn submit_query(&self) {
        submit(&self.renderer);
    }

    /// Fill the query field with `topic` and search for it.
    #[wasm_bindgen(js_name = applyPresetQuery)]
    pub fn apply_preset_query(&self, topic: &str) {
        if let Some(pending) = self.renderer.begin_preset_query(topic) {
            settle_later(self.renderer.clone(), pending);
        }
    }

    /// Publish `window[name](topic)` so topic buttons can trigger presets.
    #[wasm_bindgen(js_name = exposePresetHook)]
    pub fn expose_preset_hook(&self, name: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let renderer = self.renderer.clone();
        let hook = Closure::<dyn Fn(String)>::new(move |topic: String| {
            if let Some(pending) = renderer.begin_preset_query(&topic) {
                settle_later(renderer.clone(), pending);
            }
        });
        js_sys::Reflect::set(&window, &JsValue::from_str(name), hook.as_ref())?;
        hook.forget();
        Ok(())
    }

    /// Live view state as a plain object, tagged by `state`.
    #[wasm_bindgen(js_name = currentState)]
    pub fn current_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.renderer.state())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Name of the live view state, e.g. `"loading"`.
    #[wasm_bindgen(js_name = stateName)]
    pub fn state_name(&self) -> String {
        self.renderer.state().name().to_string()
    }
}

impl NewsFeed {
    /// Enter in the query field submits. Installed once the document is
    /// ready and kept for the lifetime of the page.
    fn install_enter_trigger(&self) -> Result<(), JsValue> {
        let document = document()?;
        if document.ready_state() != "loading" {
            return bind_enter_key(&self.renderer);
        }

        let renderer = self.renderer.clone();
        let on_ready = Closure::once(move || {
            if let Err(e) = bind_enter_key(&renderer) {
                web_sys::console::error_1(&e);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    }
}

fn bind_enter_key(renderer: &Rc<Renderer>) -> Result<(), JsValue> {
    let handler = {
        let renderer = renderer.clone();
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                submit(&renderer);
            }
        })
    };
    renderer
        .input()
        .element()
        .add_event_listener_with_callback("keypress", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn submit(renderer: &Rc<Renderer>) {
    if let Some(pending) = renderer.begin_search() {
        settle_later(renderer.clone(), pending);
    }
}

fn settle_later(renderer: Rc<Renderer>, pending: PendingSearch) {
    spawn_local(async move {
        let settlement = renderer.complete_search(pending).await;
        report(&settlement);
    });
}

/// Diagnostic channel for failed and discarded settlements.
fn report(settlement: &Settlement) {
    match settlement {
        Settlement::Rendered(ViewState::NetworkError { message }) => {
            web_sys::console::error_1(
                &format!("Error fetching recommendations: {}", message).into(),
            );
        }
        Settlement::Stale { generation } => {
            web_sys::console::debug_1(
                &format!("Discarded superseded search #{}", generation).into(),
            );
        }
        _ => {}
    }
}

fn parse_config(value: JsValue) -> Result<RendererConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(RendererConfig::default());
    }
    let config: RendererConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid renderer config: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}
