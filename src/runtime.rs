//! Event loop plumbing
//!
//! Every event source feeds one unbounded channel: the countdown and frame
//! tickers, a thread reading the terminal, the provider session listener and
//! the tasks that execute [`Effect`]s. The loop pulls events, hands them to
//! [`App::update`] and redraws. Each source is owned by a guard that stops
//! it when the runtime is dropped.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as term, Event as TermEvent};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::{App, AuthOutcome, Effect, Event};
use crate::auth::{AuthBridge, IdentityProvider, SessionSubscription};
use crate::media::{ExternalPlayer, PlayerKind};
use crate::ui;

/// Countdown refresh
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Media poll and idle-hide check
pub const FRAME_INTERVAL: Duration = Duration::from_millis(250);
/// How long the input thread blocks before checking its stop flag
const INPUT_POLL: Duration = Duration::from_millis(50);
/// Longest wait for a pending sign-out once the loop has exited
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

// =============================================================================
// Guards
// =============================================================================

/// Aborts a spawned task when dropped
#[derive(Debug)]
pub struct TaskGuard(JoinHandle<()>);

impl TaskGuard {
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Sends `event` every `period` until dropped
pub fn ticker(tx: UnboundedSender<Event>, period: Duration, event: Event) -> TaskGuard {
    TaskGuard(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(event.clone()).is_err() {
                break;
            }
        }
    }))
}

/// Thread forwarding crossterm input; stopped and joined on drop
#[derive(Debug)]
pub struct InputThread {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl InputThread {
    pub fn spawn(tx: UnboundedSender<Event>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                match term::poll(INPUT_POLL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal input poll failed");
                        break;
                    }
                }
                let event = match term::read() {
                    Ok(TermEvent::Key(key)) => Event::Key(key),
                    Ok(TermEvent::Mouse(mouse)) => Event::Pointer(mouse),
                    Ok(TermEvent::Resize(width, height)) => Event::Resize(width, height),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal input read failed");
                        break;
                    }
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// =============================================================================
// Auth context
// =============================================================================

/// The bridge plus its live session listener. Built once at startup;
/// dropping it stops the listener.
pub struct AuthContext {
    pub bridge: AuthBridge,
    _subscription: SessionSubscription,
}

impl AuthContext {
    /// Restore any saved session and start forwarding session changes
    pub fn start(provider: Arc<dyn IdentityProvider>, tx: UnboundedSender<Event>) -> Self {
        let bridge = AuthBridge::new(provider);
        let subscription = bridge.listen(move |session| {
            let _ = tx.send(Event::SessionChanged(session));
        });
        Self {
            bridge,
            _subscription: subscription,
        }
    }
}

// =============================================================================
// Effects
// =============================================================================

/// Runs effects as tasks that report back through the channel.
///
/// Sign-out tasks are not aborted on exit: [`EffectRunner::shutdown`] waits
/// for them so a logout right before quitting still reaches the provider.
pub struct EffectRunner {
    bridge: AuthBridge,
    tx: UnboundedSender<Event>,
    tasks: Vec<TaskGuard>,
    sign_outs: Vec<JoinHandle<()>>,
}

impl EffectRunner {
    pub fn new(bridge: AuthBridge, tx: UnboundedSender<Event>) -> Self {
        Self {
            bridge,
            tx,
            tasks: Vec::new(),
            sign_outs: Vec::new(),
        }
    }

    /// Tasks still running
    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
            + self.sign_outs.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn run(&mut self, effect: Effect) {
        self.tasks.retain(|t| !t.is_finished());
        self.sign_outs.retain(|h| !h.is_finished());

        let bridge = self.bridge.clone();
        let tx = self.tx.clone();
        let handle = match effect {
            Effect::SignUp(request) => tokio::spawn(async move {
                let result = bridge.sign_up(request).await;
                let _ = tx.send(Event::AuthFinished(AuthOutcome::SignedUp(result)));
            }),
            Effect::LogIn(request) => tokio::spawn(async move {
                let result = bridge.log_in(request).await;
                let _ = tx.send(Event::AuthFinished(AuthOutcome::LoggedIn(result)));
            }),
            Effect::LogOut => {
                self.sign_outs.push(tokio::spawn(async move {
                    let result = bridge.log_out().await;
                    let _ = tx.send(Event::AuthFinished(AuthOutcome::LoggedOut(result)));
                }));
                return;
            }
            Effect::OpenExternal(path, kind) => tokio::spawn(open_external(path, kind, tx)),
        };
        self.tasks.push(TaskGuard(handle));
    }

    /// Wait up to `grace` for pending sign-outs, then abort everything left
    pub async fn shutdown(mut self, grace: Duration) {
        self.sign_outs.retain(|h| !h.is_finished());
        if self.sign_outs.is_empty() {
            return;
        }
        tracing::debug!(pending = self.sign_outs.len(), "waiting for sign-out before exit");
        let deadline = tokio::time::Instant::now() + grace;
        for mut handle in self.sign_outs.drain(..) {
            if tokio::time::timeout_at(deadline, &mut handle).await.is_err() {
                tracing::warn!("sign-out did not finish before exit");
                handle.abort();
            }
        }
    }
}

async fn open_external(path: PathBuf, kind: PlayerKind, tx: UnboundedSender<Event>) {
    match ExternalPlayer::new(kind).open(&path) {
        Ok(mut child) => {
            tracing::info!(player = %kind, file = %path.display(), "teaser handed to external player");
            if let Err(e) = child.wait().await {
                tracing::debug!(error = %e, "external player wait failed");
            }
        }
        Err(e) => {
            tracing::warn!(player = %kind, error = %e, "external player failed");
            let _ = tx.send(Event::ExternalPlayerFailed(e.to_string()));
        }
    }
}

// =============================================================================
// Runtime
// =============================================================================

pub struct Runtime {
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    sources: Vec<TaskGuard>,
    input: Option<InputThread>,
}

impl Runtime {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            sources: Vec::new(),
            input: None,
        }
    }

    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Start the countdown and frame tickers
    pub fn with_tickers(mut self) -> Self {
        self.sources.push(ticker(self.tx.clone(), TICK_INTERVAL, Event::Tick));
        self.sources.push(ticker(self.tx.clone(), FRAME_INTERVAL, Event::Frame));
        self
    }

    /// Read keys, mouse and resizes from the real terminal
    pub fn with_terminal_input(mut self) -> Self {
        self.input = Some(InputThread::spawn(self.tx.clone()));
        self
    }

    /// Run until the app stops. Sources are torn down when this returns.
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>, app: &mut App, auth: &AuthContext) -> Result<()> {
        let mut effects = EffectRunner::new(auth.bridge.clone(), self.tx.clone());

        let size = terminal.size()?;
        app.update(Event::Resize(size.width, size.height));

        while app.running {
            terminal.draw(|frame| ui::render(frame, app))?;

            let Some(event) = self.rx.recv().await else {
                break;
            };
            dispatch(app, &mut effects, event);
            // Apply whatever else queued up before redrawing
            while let Ok(event) = self.rx.try_recv() {
                dispatch(app, &mut effects, event);
            }
        }

        tracing::debug!(in_flight = effects.in_flight(), "event loop finished");
        effects.shutdown(SHUTDOWN_GRACE).await;
        Ok(())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch(app: &mut App, effects: &mut EffectRunner, event: Event) {
    for effect in app.update(event) {
        tracing::debug!(?effect, "running effect");
        effects.run(effect);
    }
}
