//! Canvas + scheduler glue for the browser build.
//!
//! Two independently scheduled callbacks share the thread-local game state:
//! a `setInterval` timer that advances the simulation one grid step per tick,
//! and a `requestAnimationFrame` loop that advances cosmetic effects and
//! repaints every display frame. Both run on the single JS thread, so a
//! `RefCell` is all the coordination needed. Speed changes and pause/resume
//! swap the interval via cancel-then-reschedule so no two timers ever overlap
//! for one game; the frame loop is started once at mount and never cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::effects::EffectState;
use crate::render;
use crate::sim::{Direction, GameEvents, RunState, Sim, TickOutcome};
use crate::storage::LocalStorage;

const CANVAS_ID: &str = "snake-canvas";
const CANVAS_SIZE: u32 = 400;
const HIGH_SCORE_KEY: &str = "snakeHighScore";

const SCORE_ID: &str = "snake-score";
const HIGH_ID: &str = "snake-high";
const OVER_ID: &str = "snake-over";

const OVERLAY_BASE_STYLE: &str = "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); \
     font-family:'Press Start 2P', monospace; font-size:18px; padding:18px 26px; \
     background:rgba(0,0,0,0.75); border:2px solid #39ff14; border-radius:10px; \
     color:#39ff14; text-align:center; z-index:40;";

struct AppState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sim: Sim,
    fx: EffectState,
    cell_size: f64,
    interval_id: Option<i32>,
    last_frame_ms: Option<f64>,
}

thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = RefCell::new(None);
    // The tick closure lives for the page's lifetime; rescheduling only swaps
    // the interval handle, never the closure, so a tick can safely reschedule
    // the clock from inside its own invocation.
    static TICK_CB: RefCell<Option<Closure<dyn FnMut()>>> = RefCell::new(None);
}

// --- Exported API --------------------------------------------------------------

/// Build the game against the page's canvas (creating one if absent) and
/// start the render loop. Idempotent with respect to loop/closure setup, so
/// remounting just replaces the game state.
#[wasm_bindgen]
pub fn mount(grid_size: u32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(CANVAS_SIZE);
        c.set_height(CANVAS_SIZE);
        c.set_attribute(
            "style",
            "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); \
             border:2px solid #222; border-radius:8px; background:#0a0a0a; z-index:20;",
        )
        .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    ensure_overlays(&doc)?;

    let grid = grid_size.max(1) as i32;
    let cell_size = canvas.width() as f64 / grid as f64;
    let sim = Sim::new(
        grid,
        rng_seed(),
        Box::new(LocalStorage::new(HIGH_SCORE_KEY)),
        Box::new(DomScoreboard),
    );

    // Seed the scoreboard with the persisted high score before the first run.
    DomScoreboard.on_score_change(0, sim.high_score());

    let remount = APP_STATE.with(|cell| {
        let mut cell = cell.borrow_mut();
        // A remount must not leave the old game's interval ticking.
        if let Some(old) = cell.as_mut() {
            stop_clock(old);
        }
        let had_state = cell.is_some();
        *cell = Some(AppState {
            canvas,
            ctx,
            sim,
            fx: EffectState::new(),
            cell_size,
            interval_id: None,
            last_frame_ms: None,
        });
        had_state
    });

    if !remount {
        install_tick_closure();
        start_frame_loop();
    }
    Ok(())
}

/// Begin (or restart) a run and schedule the simulation clock at base speed.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    APP_STATE.with(|cell| {
        let mut cell = cell.borrow_mut();
        let state = cell
            .as_mut()
            .ok_or_else(|| JsValue::from_str("game not mounted"))?;
        set_overlay_visible(false);
        state.sim.start();
        restart_clock(state);
        Ok(())
    })
}

/// Request a turn for the next tick. Unknown names and illegal 180° turns
/// are ignored, matching the simulation's silent-no-op error model.
#[wasm_bindgen]
pub fn change_direction(direction: &str) {
    let Some(dir) = Direction::parse(direction) else {
        return;
    };
    APP_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.sim.change_direction(dir);
        }
    });
}

/// Toggle pause, returning the new paused flag so the host can adjust its
/// controls. Pausing cancels the interval (zero ticks until resume).
#[wasm_bindgen]
pub fn toggle_pause() -> bool {
    APP_STATE.with(|cell| {
        let mut cell = cell.borrow_mut();
        let Some(state) = cell.as_mut() else {
            return false;
        };
        let paused = state.sim.toggle_pause();
        if paused {
            stop_clock(state);
        } else if state.sim.run_state() == RunState::Running {
            restart_clock(state);
        }
        paused
    })
}

// --- Simulation clock ------------------------------------------------------------

fn install_tick_closure() {
    TICK_CB.with(|cb| {
        *cb.borrow_mut() = Some(Closure::wrap(Box::new(|| {
            APP_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    run_tick(state);
                }
            });
        }) as Box<dyn FnMut()>));
    });
}

fn run_tick(state: &mut AppState) {
    match state.sim.tick() {
        TickOutcome::Ate { at, speed_changed } => {
            let cx = at.x as f64 * state.cell_size + state.cell_size / 2.0;
            let cy = at.y as f64 * state.cell_size + state.cell_size / 2.0;
            state.fx.trigger_eat_burst(cx, cy);
            if speed_changed {
                restart_clock(state);
            }
        }
        TickOutcome::GameOver { .. } => stop_clock(state),
        TickOutcome::Moved | TickOutcome::Idle => {}
    }
}

fn stop_clock(state: &mut AppState) {
    if let Some(id) = state.interval_id.take() {
        if let Some(w) = window() {
            w.clear_interval_with_handle(id);
        }
    }
}

/// Atomic timer swap: cancel the active interval, then schedule a fresh one
/// at the simulation's current speed.
fn restart_clock(state: &mut AppState) {
    stop_clock(state);
    let speed = state.sim.speed_ms() as i32;
    TICK_CB.with(|cb| {
        let cb = cb.borrow();
        let (Some(w), Some(cb)) = (window(), cb.as_ref()) else {
            return;
        };
        if let Ok(id) =
            w.set_interval_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), speed)
        {
            state.interval_id = Some(id);
        }
    });
}

// --- Render loop -------------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                frame(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn frame(state: &mut AppState, ts: f64) {
    // No previous timestamp on the very first frame: zero delta.
    let delta = state.last_frame_ms.map(|prev| ts - prev).unwrap_or(0.0);
    state.last_frame_ms = Some(ts);
    state.fx.advance(delta);
    render::draw(
        &state.ctx,
        &state.canvas,
        &state.sim,
        &state.fx,
        state.cell_size,
    );
}

// --- DOM scoreboard ---------------------------------------------------------------

/// Observer wired to the overlay elements; looked up by id on each event so
/// the host page may rebuild its DOM freely.
struct DomScoreboard;

impl GameEvents for DomScoreboard {
    fn on_score_change(&mut self, score: u32, high_score: u32) {
        let Some(doc) = window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = doc.get_element_by_id(SCORE_ID) {
            el.set_text_content(Some(&format!("SCORE {score}")));
        }
        if let Some(el) = doc.get_element_by_id(HIGH_ID) {
            el.set_text_content(Some(&format!("HIGH {high_score}")));
        }
    }

    fn on_game_over(&mut self, score: u32, high_score: u32) {
        let Some(doc) = window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = doc.get_element_by_id(OVER_ID) {
            el.set_text_content(Some(&format!(
                "GAME OVER — SCORE {score} · HIGH {high_score}"
            )));
        }
        set_overlay_visible(true);
    }
}

fn ensure_overlays(doc: &web_sys::Document) -> Result<(), JsValue> {
    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    if doc.get_element_by_id(SCORE_ID).is_none() {
        let div = doc.create_element("div")?;
        div.set_id(SCORE_ID);
        div.set_text_content(Some("SCORE 0"));
        div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:'Press Start 2P', monospace; font-size:14px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#39ff14; z-index:30;").ok();
        body.append_child(&div)?;
    }
    if doc.get_element_by_id(HIGH_ID).is_none() {
        let div = doc.create_element("div")?;
        div.set_id(HIGH_ID);
        div.set_text_content(Some("HIGH 0"));
        div.set_attribute("style", "position:fixed; top:10px; left:150px; font-family:'Press Start 2P', monospace; font-size:14px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:30;").ok();
        body.append_child(&div)?;
    }
    if doc.get_element_by_id(OVER_ID).is_none() {
        let div = doc.create_element("div")?;
        div.set_id(OVER_ID);
        div.set_attribute("style", &format!("{OVERLAY_BASE_STYLE} display:none;"))
            .ok();
        body.append_child(&div)?;
    }
    Ok(())
}

fn set_overlay_visible(visible: bool) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = doc.get_element_by_id(OVER_ID) {
        let display = if visible { "display:block;" } else { "display:none;" };
        el.set_attribute("style", &format!("{OVERLAY_BASE_STYLE} {display}"))
            .ok();
    }
}

// --- Seeding ---------------------------------------------------------------------

fn rng_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
        .to_bits()
}
