//! Rendering: paints a [`Scene`] display list to a 2D context.
//!
//! This module is the only place that draws on a [`web_sys::CanvasRenderingContext2d`].
//! It receives a finished display list and produces pixels. It never mutates
//! application state or makes layout decisions.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::scene::{DrawCmd, Scene};
use crate::view::{Point, Viewport};

/// Ring stroke width around emphasized points, in pixels.
const RING_WIDTH: f64 = 2.0;

/// Gap between a point's dot and its emphasis ring, in pixels.
const RING_GAP: f64 = 3.0;

/// Label font size in pixels.
const LABEL_FONT_PX: f64 = 14.0;

/// Draw the full scene.
///
/// `viewport` is in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene, viewport: Viewport, dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    for cmd in &scene.commands {
        draw_cmd(ctx, cmd)?;
    }
    Ok(())
}

fn draw_cmd(ctx: &CanvasRenderingContext2d, cmd: &DrawCmd) -> Result<(), JsValue> {
    match cmd {
        DrawCmd::Polygon { points, fill, opacity } => {
            ctx.save();
            ctx.set_global_alpha(*opacity);
            trace_path(ctx, points);
            ctx.close_path();
            ctx.set_fill_style_str(fill);
            ctx.fill();
            ctx.restore();
        }
        DrawCmd::Line { from, to, color, width } => {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
        }
        DrawCmd::Polyline { points, color, width } => {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            trace_path(ctx, points);
            ctx.stroke();
        }
        DrawCmd::Arc { center, radius, start, end, anticlockwise, color, width } => {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.arc_with_anticlockwise(center.x, center.y, *radius, *start, *end, *anticlockwise)?;
            ctx.stroke();
        }
        DrawCmd::Dot { center, radius, fill, ring } => {
            ctx.begin_path();
            ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI)?;
            ctx.set_fill_style_str(fill);
            ctx.fill();
            if let Some(ring) = ring {
                ctx.begin_path();
                ctx.arc(center.x, center.y, radius + RING_GAP, 0.0, 2.0 * PI)?;
                ctx.set_stroke_style_str(ring);
                ctx.set_line_width(RING_WIDTH);
                ctx.stroke();
            }
        }
        DrawCmd::Text { text, at, color, bold } => {
            let weight = if *bold { "bold " } else { "" };
            ctx.set_font(&format!("{weight}{LABEL_FONT_PX}px sans-serif"));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_fill_style_str(color);
            ctx.fill_text(text, at.x, at.y)?;
        }
    }
    Ok(())
}

fn trace_path(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    ctx.begin_path();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        ctx.move_to(first.x, first.y);
    }
    for p in iter {
        ctx.line_to(p.x, p.y);
    }
}
