//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! Everything runs on the thread that calls [`App::run`]. Recurring timers
//! are polled between driver polls and delivered as [`Msg::Tick`]s, so a
//! tick is a discrete, non-blocking step of the same loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative cancellation token.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

static NEXT_TIMER: AtomicU64 = AtomicU64::new(1);

/// Identifies the timer a [`Msg::Tick`] belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn fresh() -> Self {
        Self(NEXT_TIMER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    interval: Duration,
    next: Instant,
    ctx: Context,
}

/// The loop's recurring timers.
#[derive(Debug, Default)]
pub struct Timers {
    timers: Vec<Timer>,
}

impl Timers {
    pub fn add(&mut self, id: TimerId, interval: Duration, ctx: Context, now: Instant) {
        self.timers.push(Timer {
            id,
            interval,
            next: now + interval,
            ctx,
        });
    }

    /// Drop cancelled timers and return the ids due at `now`, rescheduling
    /// each of them one interval later.
    pub fn due(&mut self, now: Instant) -> Vec<TimerId> {
        self.timers.retain(|t| !t.ctx.is_done());
        let mut fired = Vec::new();
        for t in &mut self.timers {
            if t.next <= now {
                fired.push(t.id);
                t.next = now + t.interval;
            }
        }
        fired
    }

    /// No live timer remains. Cancelled timers may still be stored until
    /// the next [`due`](Self::due).
    pub fn is_idle(&self) -> bool {
        self.timers.iter().all(|t| t.ctx.is_done())
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command; its message, if any, is queued for the next turn.
    Cmd(Box<dyn FnOnce() -> Option<Msg>>),
    /// Deliver [`Msg::Tick`] for `timer` every `interval` until `ctx` is
    /// cancelled.
    Every {
        interval: Duration,
        ctx: Context,
        timer: TimerId,
    },
    Batch(Vec<Effect>),
    /// Stop the application loop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::Every {
                interval, timer, ..
            } => f
                .debug_struct("Effect::Every")
                .field("interval", interval)
                .field("timer", timer)
                .finish(),
            Self::Batch(v) => f.debug_tuple("Effect::Batch").field(&v.len()).finish(),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Shorthand for [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + 'static,
{
    Effect::Cmd(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model.
pub trait Model {
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    fn draw(&self, grid: &mut Grid);
}

/// A back-end that produces input and displays frames.
pub trait Driver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Push any pending input into `tx`, returning after a short wait at
    /// most. Must return promptly once `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the back-end.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// Mailbox / AppConfig / App
// ---------------------------------------------------------------------------

/// The application's message queue. Create it before the model so that
/// widgets can subscribe to subjects with [`sender`](Self::sender).
#[derive(Debug)]
pub struct Mailbox {
    tx: Sender<Msg>,
    rx: Receiver<Msg>,
}

impl Mailbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Msg> {
        self.tx.clone()
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
    pub mailbox: Mailbox,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    mailbox: Mailbox,
    timers: Timers,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            mailbox: config.mailbox,
            timers: Timers::default(),
        }
    }

    /// Run until the model returns [`Effect::End`] or the driver fails.
    ///
    /// Each turn polls the driver, queues due timer ticks, then drains the
    /// queue through `update` and flushes the diff of one `draw`.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let ctx = Context::new();
        self.mailbox.tx.send(Msg::Init).ok();

        let mut prev = Grid::new(self.width, self.height);
        let mut curr = Grid::new(self.width, self.height);

        while !ctx.is_done() {
            if let Err(e) = self.turn(&ctx, &mut prev, &mut curr) {
                ctx.cancel();
                self.driver.close();
                return Err(e);
            }
        }

        self.driver.close();
        Ok(())
    }

    fn turn(
        &mut self,
        ctx: &Context,
        prev: &mut Grid,
        curr: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.process_pending(ctx, prev, curr)?;
        if ctx.is_done() {
            return Ok(());
        }
        self.driver.poll_msgs(ctx, self.mailbox.sender())?;
        for timer in self.timers.due(Instant::now()) {
            self.mailbox.tx.send(Msg::tick(timer)).ok();
        }
        Ok(())
    }

    fn process_pending(
        &mut self,
        ctx: &Context,
        prev: &mut Grid,
        curr: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;
        // Only drain what is queued now: messages produced while handling
        // these wait for the next turn.
        let pending: Vec<Msg> = self.mailbox.rx.try_iter().collect();
        for msg in pending {
            if let Msg::Screen { width, height, .. } = msg {
                self.resize(width, height, prev, curr);
            }
            if let Some(effect) = self.model.update(msg) {
                if self.handle_effect(effect, ctx) {
                    return Ok(());
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.copy_from(curr);
        }
        Ok(())
    }

    fn resize(&mut self, width: i32, height: i32, prev: &mut Grid, curr: &mut Grid) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!("screen resized to {width}x{height}");
        self.width = width;
        self.height = height;
        // A blank previous frame forces a full repaint.
        *prev = Grid::new(width, height);
        *curr = Grid::new(width, height);
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(&mut self, effect: Effect, ctx: &Context) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::Cmd(f) => {
                if let Some(msg) = f() {
                    self.mailbox.tx.send(msg).ok();
                }
                false
            }
            Effect::Every {
                interval,
                ctx: timer_ctx,
                timer,
            } => {
                self.timers.add(timer, interval, timer_ctx, Instant::now());
                false
            }
            Effect::Batch(effects) => effects.into_iter().any(|e| self.handle_effect(e, ctx)),
        }
    }
}
