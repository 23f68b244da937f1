use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, PointerEvent, Window};

use mathpad_core::geometry::{finite, surface_size, Point};

use crate::state::{Background, State, STROKE_WIDTH};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn is_touch_event(event: &PointerEvent) -> bool {
    event.pointer_type() == "touch"
}

/// Pointer position relative to the canvas origin, gated against degenerate
/// coordinates.
pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    finite(Point::new(
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    ))
}

pub fn set_draw_cursor(canvas: &HtmlCanvasElement) {
    if let Ok(element) = canvas.clone().dyn_into::<HtmlElement>() {
        let _ = element.style().set_property("cursor", "crosshair");
    }
}

/// Backdrop only; stroke color and the displayed result are untouched.
pub fn apply_background(canvas: &HtmlCanvasElement, background: Background) {
    if let Ok(element) = canvas.clone().dyn_into::<HtmlElement>() {
        let _ = element.style().set_property("background", background.css());
    }
}

fn viewport_dimension(value: Result<JsValue, JsValue>) -> f64 {
    value
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

/// Size the surface to the viewport, carrying existing raster content across
/// when possible. Snapshot and restore are both best-effort: a zero-sized
/// previous surface has nothing to save, and `putImageData` after a shrink
/// can throw, in which case the drawing is lost and we only log.
pub fn resize_surface(window: &Window, state: &mut State) {
    let snapshot = if state.surface_width > 0.0 && state.surface_height > 0.0 {
        state
            .ctx
            .get_image_data(0.0, 0.0, state.surface_width, state.surface_height)
            .ok()
    } else {
        None
    };

    let rect = state.canvas.get_bounding_client_rect();
    let (width, height) = surface_size(
        viewport_dimension(window.inner_width()),
        viewport_dimension(window.inner_height()),
        rect.top(),
    );
    state.canvas.set_width(width as u32);
    state.canvas.set_height(height as u32);
    state.surface_width = width;
    state.surface_height = height;

    // Resizing resets the context, so stroke styling is re-established here.
    state.ctx.set_line_width(STROKE_WIDTH);
    state.ctx.set_line_cap("round");
    state.ctx.set_line_join("round");

    if let Some(snapshot) = snapshot {
        if state.ctx.put_image_data(&snapshot, 0.0, 0.0).is_err() {
            web_sys::console::log_1(&"Surface resized; prior drawing could not be restored".into());
        }
    }
}
