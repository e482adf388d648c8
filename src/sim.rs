//! Fixed-step snake simulation.
//!
//! Everything in this module is pure Rust with no browser dependencies so it
//! can run under `cargo test` on the host. The wasm layer (`app`) drives
//! [`Sim::tick`] from an interval timer and reacts to the returned
//! [`TickOutcome`] (arming the eat burst, rescheduling the clock, stopping it
//! on game over). Outward notifications go through the [`GameEvents`]
//! observer, persistence through [`HighScoreStore`].

use std::collections::VecDeque;

use crate::storage::HighScoreStore;

/// Tick interval at the start of a run, in milliseconds.
pub const BASE_SPEED_MS: u32 = 150;
/// Fastest allowed tick interval.
pub const MIN_SPEED_MS: u32 = 70;
/// Interval reduction applied at each speed-up threshold.
pub const SPEED_STEP_MS: u32 = 10;
/// Score awarded per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;
/// The tick interval shrinks whenever the score reaches a multiple of this.
pub const SPEEDUP_EVERY_POINTS: u32 = 50;

// --- Grid primitives ----------------------------------------------------------

/// One grid cell. Coordinates are signed so a candidate head one step outside
/// the grid is representable before the bounds check rejects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse the lowercase direction names used by the host page.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Per-tick cell delta. Positive y points down (canvas convention).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Lifecycle of a run. Exactly one state holds at a time; only `Running`
/// processes ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

// --- Outward interface --------------------------------------------------------

/// Observer for score / terminal notifications. The wasm app installs a DOM
/// scoreboard; tests install a recorder.
pub trait GameEvents {
    /// Fired on `start()` and on every food eaten.
    fn on_score_change(&mut self, score: u32, high_score: u32);
    /// Fired exactly once per run, on the terminal collision.
    fn on_game_over(&mut self, score: u32, high_score: u32);
}

/// Observer that discards all notifications, for headless use.
pub struct NullEvents;

impl GameEvents for NullEvents {
    fn on_score_change(&mut self, _score: u32, _high_score: u32) {}
    fn on_game_over(&mut self, _score: u32, _high_score: u32) {}
}

/// What a single simulation step did, so the scheduler layer can react.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (or paused); nothing advanced.
    Idle,
    /// Plain movement, no growth.
    Moved,
    /// Food eaten at `at`. `speed_changed` asks the caller to reschedule the
    /// simulation clock at the new interval.
    Ate { at: Cell, speed_changed: bool },
    /// Wall or self collision ended the run.
    GameOver { score: u32, high_score: u32 },
}

// --- Randomness ----------------------------------------------------------------

// Linear congruential step (Numerical Recipes constants); plenty for food
// placement, not crypto secure.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
        if len == 0 {
            return 0;
        }
        // Low LCG bits cycle quickly; take from the middle.
        ((self.0 >> 16) as usize) % len
    }
}

// --- Simulation ----------------------------------------------------------------

/// Mutable game state advanced one grid step at a time.
pub struct Sim {
    grid_size: i32,
    snake: VecDeque<Cell>,
    food: Cell,
    direction: Direction,
    pending: Direction,
    score: u32,
    high_score: u32,
    speed_ms: u32,
    run: RunState,
    rng: Lcg,
    store: Box<dyn HighScoreStore>,
    events: Box<dyn GameEvents>,
}

impl Sim {
    /// Build an idle simulation. The persisted high score is read from
    /// `store` immediately (missing / unparsable values read as 0).
    pub fn new(
        grid_size: i32,
        seed: u64,
        store: Box<dyn HighScoreStore>,
        events: Box<dyn GameEvents>,
    ) -> Self {
        let high_score = store.load();
        Self {
            grid_size: grid_size.max(1),
            snake: VecDeque::new(),
            food: Cell { x: 0, y: 0 },
            direction: Direction::Right,
            pending: Direction::Right,
            score: 0,
            high_score,
            speed_ms: BASE_SPEED_MS,
            run: RunState::NotStarted,
            rng: Lcg::new(seed),
            store,
            events,
        }
    }

    // --- Public mutation API (spec'd operations) --------------------------------

    /// Begin (or restart) a run: one segment centered on the grid, heading
    /// right, score 0, base speed, fresh food. Notifies the score observer
    /// with `(0, high_score)`.
    pub fn start(&mut self) {
        let mid = self.grid_size / 2;
        self.snake.clear();
        self.snake.push_front(Cell { x: mid, y: mid });
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.speed_ms = BASE_SPEED_MS;
        self.run = RunState::Running;
        self.place_random_food();
        self.events.on_score_change(self.score, self.high_score);
    }

    /// Request a turn, applied at the start of the next tick. A 180° reversal
    /// of the committed direction is ignored, as is any request before the
    /// first `start()` or after game over. Allowed while paused.
    pub fn change_direction(&mut self, dir: Direction) {
        if !matches!(self.run, RunState::Running | RunState::Paused) {
            return;
        }
        if dir == self.direction.opposite() {
            return;
        }
        self.pending = dir;
    }

    /// Flip the paused flag and return it. No-op (returning `false`) unless a
    /// run is in progress. The caller owns the interval timer and must cancel
    /// or reschedule it accordingly.
    pub fn toggle_pause(&mut self) -> bool {
        match self.run {
            RunState::Running => {
                self.run = RunState::Paused;
                true
            }
            RunState::Paused => {
                self.run = RunState::Running;
                false
            }
            _ => false,
        }
    }

    /// Advance the game by exactly one grid step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.run != RunState::Running {
            return TickOutcome::Idle;
        }
        self.direction = self.pending;

        let head = match self.snake.front() {
            Some(&c) => c,
            None => return TickOutcome::Idle,
        };
        let (dx, dy) = self.direction.delta();
        let next = Cell {
            x: head.x + dx,
            y: head.y + dy,
        };

        let out_of_bounds =
            next.x < 0 || next.x >= self.grid_size || next.y < 0 || next.y >= self.grid_size;
        if out_of_bounds || self.occupied(next) {
            return self.finish_run();
        }

        self.snake.push_front(next);

        if next == self.food {
            self.score += POINTS_PER_FOOD;
            if self.score > self.high_score {
                self.high_score = self.score;
                self.store.save(self.high_score);
            }
            let mut speed_changed = false;
            if self.score % SPEEDUP_EVERY_POINTS == 0 && self.speed_ms > MIN_SPEED_MS {
                self.speed_ms -= SPEED_STEP_MS;
                speed_changed = true;
            }
            self.events.on_score_change(self.score, self.high_score);
            self.place_random_food();
            // Tail kept: the snake grows by one segment.
            TickOutcome::Ate {
                at: next,
                speed_changed,
            }
        } else {
            self.snake.pop_back();
            TickOutcome::Moved
        }
    }

    /// Pin the food to a specific free cell. Used by scripted demos and
    /// tests; a cell already covered by the snake is ignored so the
    /// food-off-snake invariant holds unconditionally.
    pub fn place_food(&mut self, cell: Cell) {
        if !self.occupied(cell) {
            self.food = cell;
        }
    }

    // --- Accessors ---------------------------------------------------------------

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    /// The direction committed by the most recent tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Current tick interval in milliseconds.
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    // --- Internals -----------------------------------------------------------------

    fn occupied(&self, cell: Cell) -> bool {
        self.snake.iter().any(|&s| s == cell)
    }

    fn finish_run(&mut self) -> TickOutcome {
        self.run = RunState::GameOver;
        self.events.on_game_over(self.score, self.high_score);
        TickOutcome::GameOver {
            score: self.score,
            high_score: self.high_score,
        }
    }

    /// Relocate the food to a uniformly random cell not covered by the snake.
    /// Rejection sampling is fine while the board is mostly empty; once the
    /// snake covers half the grid we sample the explicit free-cell set so the
    /// retry loop stays bounded. A completely full board leaves the food
    /// where it was.
    fn place_random_food(&mut self) {
        let area = (self.grid_size as usize) * (self.grid_size as usize);
        if self.snake.len() * 2 >= area {
            let free: Vec<Cell> = (0..self.grid_size)
                .flat_map(|y| (0..self.grid_size).map(move |x| Cell { x, y }))
                .filter(|&c| !self.occupied(c))
                .collect();
            if let Some(&cell) = free.get(self.rng.next_index(free.len())) {
                self.food = cell;
            }
            return;
        }
        loop {
            let cand = Cell {
                x: self.rng.next_index(self.grid_size as usize) as i32,
                y: self.rng.next_index(self.grid_size as usize) as i32,
            };
            if !self.occupied(cand) {
                self.food = cand;
                break;
            }
        }
    }
}
