use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{HtmlElement, PointerEvent, Window};

use mathpad_core::geometry::Point;
use mathpad_core::protocol::Calculation;

/// Show or hide the result panel and refresh its content and position. The
/// panel is visible only when the calculation has something to say.
pub fn sync_result(
    window: &Window,
    panel: &HtmlElement,
    expr_el: &HtmlElement,
    value_el: &HtmlElement,
    result: Option<&Calculation>,
    position: Point,
) {
    let shown = match result {
        Some(calculation) if !calculation.is_empty() => calculation,
        _ => {
            let _ = panel.set_attribute("hidden", "");
            return;
        }
    };
    expr_el.set_text_content(Some(&shown.expression));
    value_el.set_text_content(Some(&shown.result));
    set_position(panel, position);
    let _ = panel.remove_attribute("hidden");
    typeset(window, panel);
}

pub fn set_position(panel: &HtmlElement, position: Point) {
    let style = panel.style();
    let _ = style.set_property("left", &format!("{}px", position.x));
    let _ = style.set_property("top", &format!("{}px", position.y));
}

/// Grab context for a drag: the pointer's viewport position and the panel
/// origin at the same instant.
pub fn grab_points(panel: &HtmlElement, event: &PointerEvent) -> (Point, Point) {
    let rect = panel.get_bounding_client_rect();
    (
        Point::new(event.client_x() as f64, event.client_y() as f64),
        Point::new(rect.left(), rect.top()),
    )
}

/// Hand the panel to a `MathJax` global when the host page loaded one. Any
/// missing piece or thrown call leaves the plain text already in place.
fn typeset(window: &Window, panel: &HtmlElement) {
    let Ok(mathjax) = Reflect::get(window.as_ref(), &JsValue::from_str("MathJax")) else {
        return;
    };
    let typeset_fn = Reflect::get(&mathjax, &JsValue::from_str("typesetPromise"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let Some(typeset_fn) = typeset_fn else {
        return;
    };
    let targets = Array::of1(panel.as_ref());
    if typeset_fn.call1(&mathjax, &targets).is_err() {
        web_sys::console::log_1(&"Math typesetting failed; showing plain text".into());
    }
}
