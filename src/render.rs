//! Canvas painting for the snake scene.
//!
//! Called once per animation frame with read-only simulation state and the
//! current cosmetic effect state. Draw order: grid lines, eat-burst overlay,
//! food, snake (head then body), paused dim. Tolerates every run state,
//! including pre-start (empty snake) and post-game-over (frozen scene).

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::effects::EffectState;
use crate::sim::{Direction, RunState, Sim};

const GRID_COLOR: &str = "#222";
const FOOD_COLOR: &str = "#ff3860";
const SNAKE_COLOR: &str = "#39ff14";

pub fn draw(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    sim: &Sim,
    fx: &EffectState,
    cell: f64,
) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);

    draw_grid(ctx, sim.grid_size(), cell, w, h);
    draw_eat_burst(ctx, fx, cell);
    draw_food(ctx, sim, fx, cell);
    draw_snake(ctx, sim, fx, cell);

    if sim.run_state() == RunState::Paused {
        draw_pause_overlay(ctx, w, h);
    }

    ctx.set_shadow_blur(0.0);
}

fn draw_grid(ctx: &CanvasRenderingContext2d, grid_size: i32, cell: f64, w: f64, h: f64) {
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(0.5);
    for i in 0..=grid_size {
        let pos = i as f64 * cell;
        line(ctx, pos, 0.0, pos, h);
        line(ctx, 0.0, pos, w, pos);
    }
}

/// Expanding, fading white ring at the eaten food's former pixel center.
fn draw_eat_burst(ctx: &CanvasRenderingContext2d, fx: &EffectState, cell: f64) {
    let Some(progress) = fx.eat_burst_progress() else {
        return;
    };
    let radius = cell * (1.0 + progress);
    let alpha = 1.0 - progress;
    ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.5));
    ctx.begin_path();
    ctx.arc(fx.eat.x, fx.eat.y, radius, 0.0, TAU).ok();
    ctx.fill();
}

fn draw_food(ctx: &CanvasRenderingContext2d, sim: &Sim, fx: &EffectState, cell: f64) {
    let food = sim.food();
    let size = cell * fx.food_pulse_scale();
    ctx.set_fill_style_str(FOOD_COLOR);
    ctx.set_shadow_color(FOOD_COLOR);
    ctx.set_shadow_blur(10.0);
    ctx.begin_path();
    ctx.arc(
        food.x as f64 * cell + cell / 2.0,
        food.y as f64 * cell + cell / 2.0,
        size / 2.0,
        0.0,
        TAU,
    )
    .ok();
    ctx.fill();
    ctx.set_shadow_blur(0.0);
}

fn draw_snake(ctx: &CanvasRenderingContext2d, sim: &Sim, fx: &EffectState, cell: f64) {
    let len = sim.snake().len();
    for (index, segment) in sim.snake().iter().enumerate() {
        let x = segment.x as f64 * cell;
        let y = segment.y as f64 * cell;
        if index == 0 {
            draw_head(ctx, x, y, cell, sim.direction(), fx.glow);
        } else {
            // Body fades toward the tail and sits inside a small gap so the
            // segments read as separate cells.
            let alpha = 1.0 - (index as f64 / len as f64) * 0.6;
            ctx.set_fill_style_str(&format!("rgba(57, 255, 20, {alpha})"));
            let gap = 2.0;
            ctx.fill_rect(x + gap, y + gap, cell - gap * 2.0, cell - gap * 2.0);
        }
    }
}

fn draw_head(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    cell: f64,
    direction: Direction,
    glow: f64,
) {
    ctx.set_fill_style_str(SNAKE_COLOR);
    ctx.set_shadow_color(SNAKE_COLOR);
    ctx.set_shadow_blur(10.0 * glow);

    // Rounded square for the head.
    let radius = cell / 4.0;
    ctx.begin_path();
    ctx.move_to(x + radius, y);
    ctx.arc_to(x + cell, y, x + cell, y + cell, radius).ok();
    ctx.arc_to(x + cell, y + cell, x, y + cell, radius).ok();
    ctx.arc_to(x, y + cell, x, y, radius).ok();
    ctx.arc_to(x, y, x + cell, y, radius).ok();
    ctx.close_path();
    ctx.fill();

    // Two eyes on the leading edge of the committed direction.
    ctx.set_fill_style_str("#000");
    ctx.set_shadow_blur(0.0);
    let eye = cell / 6.0;
    let off = cell / 4.0;
    let far = cell - off - eye;
    let ((lx, ly), (rx, ry)) = match direction {
        Direction::Up => ((x + off, y + off), (x + far, y + off)),
        Direction::Down => ((x + off, y + far), (x + far, y + far)),
        Direction::Left => ((x + off, y + off), (x + off, y + far)),
        Direction::Right => ((x + far, y + off), (x + far, y + far)),
    };
    ctx.fill_rect(lx, ly, eye, eye);
    ctx.fill_rect(rx, ry, eye, eye);
}

fn draw_pause_overlay(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#fff");
    ctx.set_font("20px 'Press Start 2P', monospace");
    ctx.set_text_align("center");
    ctx.fill_text("PAUSED", w / 2.0, h / 2.0).ok();
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}
