//! DOM-backed handles for the query input and the results container

use newsrec_core::{Fragment, QueryInput, ResultsRegion};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

pub struct DomInput {
    element: HtmlInputElement,
}

impl DomInput {
    pub fn new(element: HtmlInputElement) -> Self {
        Self { element }
    }

    /// Look up a text input by id.
    ///
    /// # Errors
    /// Returns JsValue error if the element is missing or not an `<input>`
    pub fn find(document: &Document, id: &str) -> Result<Self, JsValue> {
        let element = find_element(document, id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| JsValue::from_str(&format!("Element #{} is not an input", id)))?;
        Ok(Self::new(element))
    }

    pub fn element(&self) -> &HtmlInputElement {
        &self.element
    }
}

impl QueryInput for DomInput {
    fn value(&self) -> String {
        self.element.value()
    }

    fn set_value(&self, value: &str) {
        self.element.set_value(value);
    }
}

pub struct DomResults {
    element: Element,
}

impl DomResults {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn find(document: &Document, id: &str) -> Result<Self, JsValue> {
        Ok(Self::new(find_element(document, id)?))
    }
}

impl ResultsRegion for DomResults {
    fn replace(&self, fragment: &Fragment) {
        self.element.set_inner_html(fragment.as_str());
    }
}

fn find_element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window object available"))?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}
