//! Canvas 2D renderer
//!
//! Draws taps in logical coordinates; a transform scales the logical frame
//! to the canvas backing size every frame.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::TapRenderer;
use super::celebrate::Celebrations;
use super::offsets::OffsetTable;
use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::sim::{GameEvent, TapSnapshot};

const BACKGROUND: &str = "#1a1208";
const TOWER_COLOR: &str = "#8a8a8a";
const GLASS_COLOR: &str = "rgba(255, 255, 255, 0.85)";
const BAND_COLOR: &str = "#3ddc84";
const SPILL_COLOR: &str = "#d83a2e";

const TOWER_HEIGHT: f64 = 50.0;
const HANDLE_LENGTH: f64 = 40.0;
const HANDLE_WIDTH: f64 = 12.0;
/// Handle tilt while pouring (radians)
const HANDLE_TILT: f64 = -0.6;
const GLASS_WALL: f64 = 3.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    offsets: OffsetTable,
    /// Perfect band edges drawn as guide lines
    band: (f32, f32),
    celebrations: Celebrations,
}

impl CanvasRenderer {
    /// None if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement, offsets: OffsetTable, band: (f32, f32)) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self {
            canvas,
            ctx,
            offsets,
            band,
            celebrations: Celebrations::new(),
        })
    }

    /// Canvas y of a fill level inside the glass
    fn level_y(tap: &TapSnapshot, fill_level: f32) -> f64 {
        let b = &tap.bounds;
        (b.bottom() - b.height * fill_level / 100.0) as f64
    }

    fn draw_tower(&self, tap: &TapSnapshot) {
        let b = &tap.bounds;
        let o = self.offsets.get(tap.id);
        let ctx = &self.ctx;

        let x = (b.x + b.width * 0.3 + o.tower.x) as f64;
        let y = b.y as f64 - TOWER_HEIGHT + o.tower.y as f64;
        ctx.set_fill_style_str(TOWER_COLOR);
        ctx.fill_rect(x, y, (b.width * 0.4) as f64, TOWER_HEIGHT);

        // Handle pivots on top of the tower
        let pivot_x = (b.x + b.width / 2.0 + o.handle.x) as f64;
        let pivot_y = y + o.handle.y as f64;
        ctx.save();
        let _ = ctx.translate(pivot_x, pivot_y);
        if tap.pouring {
            let _ = ctx.rotate(HANDLE_TILT);
        }
        ctx.set_fill_style_str(tap.beer_type.liquid_color());
        ctx.fill_rect(-HANDLE_WIDTH / 2.0, -HANDLE_LENGTH, HANDLE_WIDTH, HANDLE_LENGTH);
        ctx.restore();
    }

    fn draw_glass(&self, tap: &TapSnapshot) {
        let b = &tap.bounds;
        let o = self.offsets.get(tap.id);
        let ctx = &self.ctx;

        if tap.fill_level > 0.0 {
            let top = Self::level_y(tap, tap.fill_level) + o.liquid.y as f64;
            let height = b.bottom() as f64 + o.liquid.y as f64 - top;
            ctx.set_fill_style_str(tap.beer_type.liquid_color());
            ctx.fill_rect(
                b.x as f64 + GLASS_WALL + o.liquid.x as f64,
                top,
                b.width as f64 - 2.0 * GLASS_WALL,
                height,
            );
        }

        // Perfect band guides
        ctx.set_stroke_style_str(BAND_COLOR);
        ctx.set_line_width(1.0);
        for edge in [self.band.0, self.band.1] {
            let y = Self::level_y(tap, edge);
            ctx.begin_path();
            ctx.move_to(b.x as f64, y);
            ctx.line_to(b.right() as f64, y);
            ctx.stroke();
        }

        ctx.set_stroke_style_str(GLASS_COLOR);
        ctx.set_line_width(GLASS_WALL);
        ctx.stroke_rect(b.x as f64, b.y as f64, b.width as f64, b.height as f64);
    }

    fn draw_banner(&self, tap: &TapSnapshot, text: &str, color: &str) {
        let c = tap.bounds.center();
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, c.x as f64, c.y as f64);
    }
}

impl TapRenderer for CanvasRenderer {
    fn begin_frame(&mut self, dt_ms: f32) {
        self.celebrations.advance(dt_ms);

        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let ctx = &self.ctx;
        let _ = ctx.reset_transform();
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        let _ = ctx.set_transform(
            w / LOGICAL_WIDTH as f64,
            0.0,
            0.0,
            h / LOGICAL_HEIGHT as f64,
            0.0,
            0.0,
        );
        ctx.set_font("bold 22px sans-serif");
        ctx.set_text_align("center");
    }

    fn render(&mut self, tap: &TapSnapshot) {
        self.draw_tower(tap);
        self.draw_glass(tap);

        if tap.locked {
            self.ctx.set_global_alpha(0.35);
            self.ctx.set_fill_style_str(SPILL_COLOR);
            let b = &tap.bounds;
            self.ctx
                .fill_rect(b.x as f64, b.y as f64, b.width as f64, b.height as f64);
            self.ctx.set_global_alpha(1.0);
            self.draw_banner(tap, "SPILL!", SPILL_COLOR);
        } else if self.celebrations.is_active(tap.id) {
            self.draw_banner(tap, "PERFECT!", BAND_COLOR);
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.celebrations.observe(event);
    }
}
