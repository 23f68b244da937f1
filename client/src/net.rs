use std::fmt;

use gloo_net::http::Request;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::Window;

use mathpad_core::protocol::{parse_records, CalculateRequest, ResultRecord};

/// How a submission failed.
pub enum SubmitError {
    /// The request never produced a usable response (network, HTTP status,
    /// unreadable body). Shown to the user as the fixed error record.
    Transport(String),
    /// The service answered 200 with a body that is not the contract's array
    /// of records. Logged; the displayed result is left alone.
    Malformed(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Transport(message) => write!(f, "submission failed: {message}"),
            SubmitError::Malformed(message) => write!(f, "unusable response: {message}"),
        }
    }
}

/// The recognition service base URL: a `MATHPAD_API_URL` global on `window`
/// when the host page sets one, otherwise the page's own origin.
pub fn api_base_url(window: &Window) -> String {
    if let Ok(value) = Reflect::get(window.as_ref(), &JsValue::from_str("MATHPAD_API_URL")) {
        if let Some(base) = value.as_string() {
            if !base.is_empty() {
                return base;
            }
        }
    }
    let location = window.location();
    let protocol = location.protocol().ok().unwrap_or_default();
    let host = location.host().ok().unwrap_or_default();
    format!("{protocol}//{host}")
}

/// POST the serialized surface and bindings, returning the parsed records.
/// One shot: no retry, no explicit timeout, no cancellation.
pub async fn submit(url: &str, request: &CalculateRequest) -> Result<Vec<ResultRecord>, SubmitError> {
    let response = Request::post(url)
        .json(request)
        .map_err(|error| SubmitError::Transport(error.to_string()))?
        .send()
        .await
        .map_err(|error| SubmitError::Transport(error.to_string()))?;
    if !response.ok() {
        return Err(SubmitError::Transport(format!(
            "calculate returned HTTP {}",
            response.status()
        )));
    }
    let body = response
        .text()
        .await
        .map_err(|error| SubmitError::Transport(error.to_string()))?;
    match parse_records(&body) {
        Ok(parsed) => {
            if parsed.string_encoded {
                web_sys::console::warn_1(
                    &"Calculate response was string-encoded JSON; the contract is a top-level array (service-side bug)"
                        .into(),
                );
            }
            Ok(parsed.records)
        }
        Err(error) => Err(SubmitError::Malformed(error.to_string())),
    }
}
