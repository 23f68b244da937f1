use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CanvasRenderingContext2d, Element, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    PointerEvent, Window,
};

use mathpad_core::geometry::Point;
use mathpad_core::input::{step, Effect, Event as InputEvent, Gesture};
use mathpad_core::protocol::{
    apply_bindings, calculate_url, first_calculation, CalculateRequest, Calculation,
};

use crate::dom::{
    apply_background, event_to_point, get_element, is_touch_event, resize_surface, set_draw_cursor,
};
use crate::net::{self, SubmitError};
use crate::overlay;
use crate::palette::{render_palette, swatch_from_event};
use crate::render;
use crate::state::{Background, State, RESIZE_DEBOUNCE_MS, RESULT_HOME, SWATCHES};

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

/// Re-arm the debounced resize. Each viewport event cancels the pending
/// timeout, so the surface is only rebuilt after the quiet period.
fn schedule_resize(window: &Window, state: &Rc<RefCell<State>>) {
    let mut guard = state.borrow_mut();
    if let Some(handle) = guard.resize_timer.take() {
        window.clear_timeout_with_handle(handle);
    }
    let window_cb = window.clone();
    let state_cb = state.clone();
    let cb = Closure::once_into_js(move || {
        let mut state = state_cb.borrow_mut();
        state.resize_timer = None;
        resize_surface(&window_cb, &mut state);
    });
    if let Ok(handle) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), RESIZE_DEBOUNCE_MS)
    {
        guard.resize_timer = Some(handle);
    }
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "pad")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let reset_button: HtmlButtonElement = get_element(&document, "reset")?;
    let calculate_button: HtmlButtonElement = get_element(&document, "calculate")?;
    let background_button: HtmlButtonElement = get_element(&document, "background")?;
    let palette_el: HtmlElement = get_element(&document, "palette")?;
    let panel: HtmlElement = get_element(&document, "result")?;
    let result_expr: HtmlElement = get_element(&document, "resultExpr")?;
    let result_value: HtmlElement = get_element(&document, "resultValue")?;
    let result_close: HtmlButtonElement = get_element(&document, "resultClose")?;

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        ctx,
        surface_width: 0.0,
        surface_height: 0.0,
        background: Background::Black,
        color: SWATCHES[0].to_string(),
        swatch_selected: 0,
        gesture: Gesture::Idle,
        dict_of_vars: BTreeMap::new(),
        result: None,
        result_pos: RESULT_HOME,
        resize_timer: None,
    }));

    apply_background(&canvas, Background::Black);
    set_draw_cursor(&canvas);
    render_palette(&document, &palette_el, 0);
    overlay::sync_result(&window, &panel, &result_expr, &result_value, None, RESULT_HOME);
    {
        let mut state = state.borrow_mut();
        resize_surface(&window, &mut state);
    }

    {
        let resize_state = state.clone();
        let window_cb = window.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            schedule_resize(&window_cb, &resize_state);
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback(
            "orientationchange",
            onresize.as_ref().unchecked_ref(),
        )?;
        onresize.forget();
    }

    {
        let down_state = state.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            event.prevent_default();
            let mut state = down_state.borrow_mut();
            let Some(point) = event_to_point(&down_canvas, &event) else {
                return;
            };
            let (gesture, effect) = step(
                state.gesture,
                InputEvent::CanvasDown {
                    pointer: event.pointer_id(),
                    point,
                },
            );
            state.gesture = gesture;
            if let Some(Effect::BeginPath(point)) = effect {
                let _ = down_canvas.set_pointer_capture(event.pointer_id());
                render::begin_stroke(&state.ctx, point);
            }
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            // Only the stroke's own pointer gets the canvas-relative frame;
            // drag moves are handled at the document level.
            let Gesture::Drawing { pointer, .. } = state.gesture else {
                return;
            };
            if pointer != event.pointer_id() {
                return;
            }
            if is_touch_event(&event) {
                event.prevent_default();
            }
            let Some(point) = event_to_point(&move_canvas, &event) else {
                return;
            };
            let (gesture, effect) = step(
                state.gesture,
                InputEvent::PointerMove {
                    pointer: event.pointer_id(),
                    point,
                },
            );
            state.gesture = gesture;
            if let Some(Effect::DrawSegment { from, to }) = effect {
                render::draw_segment(&state.ctx, &state.color, from, to);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_state = state.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = up_state.borrow_mut();
            let (gesture, _) = step(
                state.gesture,
                InputEvent::PointerUp {
                    pointer: event.pointer_id(),
                },
            );
            state.gesture = gesture;
        });
        canvas.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("pointercancel", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let leave_state = state.clone();
        let onleave = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = leave_state.borrow_mut();
            let (gesture, _) = step(
                state.gesture,
                InputEvent::CanvasLeave {
                    pointer: event.pointer_id(),
                },
            );
            state.gesture = gesture;
        });
        canvas.add_event_listener_with_callback("pointerleave", onleave.as_ref().unchecked_ref())?;
        onleave.forget();
    }

    {
        let grab_state = state.clone();
        let grab_panel = panel.clone();
        let ongrab = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            // The dismiss button keeps its click; everything else on the
            // panel starts a drag.
            let on_dismiss = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.closest("#resultClose").ok().flatten())
                .is_some();
            if on_dismiss {
                return;
            }
            event.prevent_default();
            let mut state = grab_state.borrow_mut();
            let (position, panel_origin) = overlay::grab_points(&grab_panel, &event);
            let (gesture, _) = step(
                state.gesture,
                InputEvent::ResultGrab {
                    pointer: event.pointer_id(),
                    position,
                    panel: panel_origin,
                },
            );
            state.gesture = gesture;
        });
        panel.add_event_listener_with_callback("pointerdown", ongrab.as_ref().unchecked_ref())?;
        ongrab.forget();
    }

    // Drag tracking lives on the document: the pointer routinely leaves the
    // panel bounds mid-drag.
    {
        let drag_state = state.clone();
        let drag_panel = panel.clone();
        let ondragmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = drag_state.borrow_mut();
            if !matches!(state.gesture, Gesture::DraggingResult { .. }) {
                return;
            }
            let point = Point::new(event.client_x() as f64, event.client_y() as f64);
            let (gesture, effect) = step(
                state.gesture,
                InputEvent::PointerMove {
                    pointer: event.pointer_id(),
                    point,
                },
            );
            state.gesture = gesture;
            if let Some(Effect::MoveResult(position)) = effect {
                state.result_pos = position;
                overlay::set_position(&drag_panel, position);
            }
        });
        document
            .add_event_listener_with_callback("pointermove", ondragmove.as_ref().unchecked_ref())?;
        ondragmove.forget();
    }

    {
        let release_state = state.clone();
        let onrelease = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = release_state.borrow_mut();
            if !matches!(state.gesture, Gesture::DraggingResult { .. }) {
                return;
            }
            let (gesture, _) = step(
                state.gesture,
                InputEvent::PointerUp {
                    pointer: event.pointer_id(),
                },
            );
            state.gesture = gesture;
        });
        document
            .add_event_listener_with_callback("pointerup", onrelease.as_ref().unchecked_ref())?;
        onrelease.forget();
    }

    {
        let reset_state = state.clone();
        let reset_window = window.clone();
        let reset_panel = panel.clone();
        let reset_expr = result_expr.clone();
        let reset_value = result_value.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = reset_state.borrow_mut();
            render::clear_surface(&state);
            state.result = None;
            overlay::sync_result(
                &reset_window,
                &reset_panel,
                &reset_expr,
                &reset_value,
                None,
                state.result_pos,
            );
        });
        reset_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let close_state = state.clone();
        let close_window = window.clone();
        let close_panel = panel.clone();
        let close_expr = result_expr.clone();
        let close_value = result_value.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.stop_propagation();
            let mut state = close_state.borrow_mut();
            state.result = None;
            overlay::sync_result(
                &close_window,
                &close_panel,
                &close_expr,
                &close_value,
                None,
                state.result_pos,
            );
        });
        result_close.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let toggle_state = state.clone();
        let toggle_canvas = canvas.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = toggle_state.borrow_mut();
            state.background = state.background.toggled();
            apply_background(&toggle_canvas, state.background);
        });
        background_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let palette_state = state.clone();
        let palette_el_cb = palette_el.clone();
        let palette_el_listener = palette_el.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(index) = swatch_from_event(&event) else {
                return;
            };
            if index >= SWATCHES.len() {
                return;
            }
            let mut state = palette_state.borrow_mut();
            state.color = SWATCHES[index].to_string();
            state.swatch_selected = index;
            render_palette(&document_cb, &palette_el_cb, state.swatch_selected);
        });
        palette_el_listener
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let submit_state = state.clone();
        let submit_window = window.clone();
        let submit_panel = panel.clone();
        let submit_expr = result_expr.clone();
        let submit_value = result_value.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state = submit_state.clone();
            let window = submit_window.clone();
            let panel = submit_panel.clone();
            let expr_el = submit_expr.clone();
            let value_el = submit_value.clone();
            spawn_local(async move {
                let (url, request) = {
                    let state = state.borrow();
                    let data = match state.canvas.to_data_url_with_type("image/png") {
                        Ok(data) => data,
                        Err(_) => {
                            web_sys::console::error_1(
                                &"Could not serialize the surface to an image".into(),
                            );
                            return;
                        }
                    };
                    (
                        calculate_url(&net::api_base_url(&window)),
                        CalculateRequest {
                            data,
                            dict_of_vars: state.dict_of_vars.clone(),
                        },
                    )
                };
                match net::submit(&url, &request).await {
                    Ok(records) => {
                        let mut state = state.borrow_mut();
                        apply_bindings(&mut state.dict_of_vars, &records);
                        if let Some(calculation) = first_calculation(&records) {
                            state.result = Some(calculation);
                            overlay::sync_result(
                                &window,
                                &panel,
                                &expr_el,
                                &value_el,
                                state.result.as_ref(),
                                state.result_pos,
                            );
                        }
                    }
                    Err(SubmitError::Transport(message)) => {
                        web_sys::console::error_1(&format!("Calculate failed: {message}").into());
                        let mut state = state.borrow_mut();
                        state.result = Some(Calculation::error());
                        overlay::sync_result(
                            &window,
                            &panel,
                            &expr_el,
                            &value_el,
                            state.result.as_ref(),
                            state.result_pos,
                        );
                    }
                    Err(SubmitError::Malformed(message)) => {
                        // Contract violation, not a user problem: keep
                        // whatever result is already showing.
                        web_sys::console::warn_1(
                            &format!("Calculate response unusable: {message}").into(),
                        );
                    }
                }
            });
        });
        calculate_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    Ok(())
}
