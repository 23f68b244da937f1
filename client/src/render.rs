use web_sys::CanvasRenderingContext2d;

use mathpad_core::geometry::Point;

use crate::state::State;

pub fn begin_stroke(ctx: &CanvasRenderingContext2d, point: Point) {
    ctx.begin_path();
    ctx.move_to(point.x, point.y);
}

/// One stroke segment, committed to the raster immediately. Each segment is
/// its own path so a color change mid-gesture never restyles earlier ink.
pub fn draw_segment(ctx: &CanvasRenderingContext2d, color: &str, from: Point, to: Point) {
    ctx.set_stroke_style_str(color);
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
}

pub fn clear_surface(state: &State) {
    state
        .ctx
        .clear_rect(0.0, 0.0, state.surface_width, state.surface_height);
}
