use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use crate::state::SWATCHES;

/// Rebuild the swatch row, marking the selected color.
pub fn render_palette(document: &Document, palette_el: &HtmlElement, selected: usize) {
    palette_el.set_inner_html("");
    for (index, color) in SWATCHES.iter().enumerate() {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-index", &index.to_string());
        let _ = button.set_attribute("aria-label", &format!("Draw with {color}"));
        let class_name = if selected == index {
            "swatch active"
        } else {
            "swatch"
        };
        let _ = button.set_attribute("class", class_name);
        let _ = button.style().set_property("background", color);
        let _ = palette_el.append_child(&button);
    }
}

/// The swatch index a click landed on, walking up from the event target.
pub fn swatch_from_event(event: &Event) -> Option<usize> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(index) = element.get_attribute("data-index") {
            return index.parse::<usize>().ok();
        }
        current = element.parent_element().map(|parent| parent.into());
    }
    None
}
