//! `window.fetch` transport
//!
//! Every HTTP status comes back as an [`HttpReply`]; only failures where no
//! response exists at all (network down, CORS, abort) become errors. With a
//! timeout configured the request is aborted through an `AbortController`.

use std::cell::Cell;
use std::rc::Rc;

use newsrec_core::{HttpReply, Transport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, Response, Window};

#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
    timeout_ms: Option<u32>,
}

impl FetchTransport {
    pub fn new(timeout_ms: Option<u32>) -> Self {
        Self { timeout_ms }
    }

    async fn send(
        &self,
        url: &str,
        body: String,
        deadline: Option<&Deadline>,
    ) -> Result<HttpReply, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));
        if let Some(deadline) = deadline {
            opts.set_signal(Some(&deadline.controller.signal()));
        }

        let request = Request::new_with_str_and_init(url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;
        let status = response.status();

        let text = JsFuture::from(response.text()?).await?;

        Ok(HttpReply::new(status, text.as_string().unwrap_or_default()))
    }
}

impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, TransportError> {
        let deadline = match self.timeout_ms {
            Some(ms) => Some(
                Deadline::arm(ms).map_err(|e| TransportError::Network(describe_js_error(&e)))?,
            ),
            None => None,
        };

        let result = self.send(url, body, deadline.as_ref()).await;

        match (result, deadline) {
            (Ok(reply), _) => Ok(reply),
            (Err(_), Some(deadline)) if deadline.expired() => {
                Err(TransportError::Timeout(deadline.ms))
            }
            (Err(e), _) => Err(TransportError::Network(describe_js_error(&e))),
        }
    }
}

/// Aborts the request when the timer fires. Dropping it clears the timer.
struct Deadline {
    ms: u32,
    controller: AbortController,
    window: Window,
    handle: i32,
    expired: Rc<Cell<bool>>,
    _on_expire: Closure<dyn FnMut()>,
}

impl Deadline {
    fn arm(ms: u32) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let controller = AbortController::new()?;
        let expired = Rc::new(Cell::new(false));

        let on_expire = {
            let controller = controller.clone();
            let expired = expired.clone();
            Closure::<dyn FnMut()>::new(move || {
                expired.set(true);
                controller.abort();
            })
        };

        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            on_expire.as_ref().unchecked_ref(),
            i32::try_from(ms).unwrap_or(i32::MAX),
        )?;

        Ok(Self {
            ms,
            controller,
            window,
            handle,
            expired,
            _on_expire: on_expire,
        })
    }

    fn expired(&self) -> bool {
        self.expired.get()
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

/// Best human-readable text for a rejected promise value.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
