use js_sys::wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::error::Error;

/// Id of the optional `<script type="application/json">` element holding
/// the runtime config.
pub(crate) const CONFIG_ELEMENT_ID: &str = "gyre-config";

pub(crate) fn window() -> Result<Window, Error> {
    web_sys::window().ok_or_else(Error::window_not_found)
}

pub(crate) fn document() -> Result<Document, Error> {
    window().and_then(|w| w.document().ok_or_else(Error::document_not_found))
}

pub(crate) fn get_canvas_by_selector(selector: &str) -> Result<HtmlCanvasElement, Error> {
    let document = document()?;
    document
        .query_selector(selector)
        .map_err(|_| Error::canvas_not_found())?
        .ok_or_else(Error::canvas_not_found)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| Error::canvas_not_found())
}

pub(crate) fn get_webgl2_context(
    canvas: &HtmlCanvasElement,
) -> Result<web_sys::WebGl2RenderingContext, Error> {
    canvas
        .get_context("webgl2")
        .map_err(|_| Error::webgl_context_failed())?
        .ok_or_else(Error::webgl_context_failed)?
        .dyn_into::<web_sys::WebGl2RenderingContext>()
        .map_err(|_| Error::webgl_context_failed())
}

/// Text of the config element, if the page has one.
pub(crate) fn config_json() -> Result<Option<String>, Error> {
    Ok(document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content()))
}
