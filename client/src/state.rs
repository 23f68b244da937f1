use std::collections::BTreeMap;

use serde_json::Value;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use mathpad_core::geometry::Point;
use mathpad_core::input::Gesture;
use mathpad_core::protocol::Calculation;
pub use mathpad_core::surface::Background;

/// Fixed stroke palette. The first entry is the default color, chosen to read
/// on the default black background.
pub const SWATCHES: [&str; 8] = [
    "#ffffff", "#f43f5e", "#fb923c", "#facc15", "#4ade80", "#38bdf8", "#818cf8", "#f472b6",
];

pub const STROKE_WIDTH: f64 = 5.0;

/// Quiet period before a viewport resize is applied to the surface.
pub const RESIZE_DEBOUNCE_MS: i32 = 100;

/// Where the result panel first appears, in viewport pixels.
pub const RESULT_HOME: Point = Point { x: 24.0, y: 96.0 };

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    /// Logical surface size, kept equal to the viewport after every settled
    /// resize.
    pub surface_width: f64,
    pub surface_height: f64,
    pub background: Background,
    pub color: String,
    pub swatch_selected: usize,
    /// The active gesture, including the pointer that owns it; events from
    /// other pointers are ignored until it releases.
    pub gesture: Gesture,
    /// Variable bindings accumulated from `assign` records, sent with every
    /// submission.
    pub dict_of_vars: BTreeMap<String, Value>,
    pub result: Option<Calculation>,
    pub result_pos: Point,
    /// Pending debounced-resize timeout handle.
    pub resize_timer: Option<i32>,
}
