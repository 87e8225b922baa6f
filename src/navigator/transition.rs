/*!
 * Transition-coordinated navigation.
 *
 * A back action marks the page root for its exit animation and performs the
 * route change once the animation has had `EXIT_TRANSITION` to run. The
 * navigator is either `Idle` or `Exiting`; a back action while `Exiting` is
 * ignored, so one exit always yields exactly one navigation.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::navigator::scroll::{ScrollHost, ScrollScheduler};
use crate::resolver::ParentResolver;
use crate::routes::{NavigationTarget, RouteParams};

/// Duration of the CSS exit transition; navigation waits exactly this long
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

/// Class added to the page root while it exits
pub const EXIT_MARKER_CLASS: &str = "page-exit";

/// Routing layer callback
pub trait Router: Send + Sync {
    fn navigate(&self, path: &str);
}

impl<F> Router for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

/// Root element of the current page
pub trait PageRoot: Send + Sync {
    /// Add the marker class; must be safe to call when it is already present
    fn apply_exit_marker(&self, class_name: &str);
}

/// Navigator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    /// Exit animation running; navigation to `destination` is pending
    Exiting { destination: String },
}

/// Result of requesting a transitioned navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackOutcome {
    /// Navigation to `destination` will happen after `EXIT_TRANSITION`
    Scheduled { destination: String },
    /// An exit is already running; nothing new was scheduled
    AlreadyExiting,
    /// The navigator was shut down; nothing was marked or scheduled
    ShutDown,
}

// State plus the handle of the exit task that owns it
struct ExitSlot {
    state: TransitionState,
    // Bumped whenever an exit is started or abandoned
    generation: u64,
    pending: Option<CancellationToken>,
}

impl ExitSlot {
    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && matches!(self.state, TransitionState::Exiting { .. })
    }

    fn reset(&mut self) {
        self.state = TransitionState::Idle;
        self.pending = None;
    }
}

/// Sequences exit transitions with route changes
pub struct TransitionNavigator {
    router: Arc<dyn Router>,
    page_root: Arc<dyn PageRoot>,
    scroll: ScrollScheduler,
    slot: Arc<Mutex<ExitSlot>>,
    shutdown: CancellationToken,
}

impl TransitionNavigator {
    pub fn new(router: Arc<dyn Router>, page_root: Arc<dyn PageRoot>, scroll_host: Arc<dyn ScrollHost>) -> Self {
        let shutdown = CancellationToken::new();
        Self {
            router,
            page_root,
            scroll: ScrollScheduler::new(scroll_host, shutdown.child_token()),
            slot: Arc::new(Mutex::new(ExitSlot {
                state: TransitionState::Idle,
                generation: 0,
                pending: None,
            })),
            shutdown,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.slot.lock().state.clone()
    }

    pub fn is_exiting(&self) -> bool {
        matches!(self.slot.lock().state, TransitionState::Exiting { .. })
    }

    /// Back action from the current route
    ///
    /// Must be called from within a Tokio runtime.
    pub fn go_back(&self, resolver: &ParentResolver, path: &str, params: &RouteParams) -> BackOutcome {
        if self.is_exiting() {
            debug!("Back from '{}' ignored, exit already running", path);
            return BackOutcome::AlreadyExiting;
        }
        let destination = resolver.resolve_parent(path, params);
        self.transition_to(destination)
    }

    /// Run the exit transition, then navigate to `destination`
    ///
    /// Must be called from within a Tokio runtime.
    pub fn transition_to(&self, destination: impl Into<String>) -> BackOutcome {
        let destination = destination.into();

        if self.shutdown.is_cancelled() {
            debug!("Transition to '{}' refused, navigator is shut down", destination);
            return BackOutcome::ShutDown;
        }

        let token = self.shutdown.child_token();
        let generation = {
            let mut slot = self.slot.lock();
            if matches!(slot.state, TransitionState::Exiting { .. }) {
                debug!("Transition to '{}' ignored, exit already running", destination);
                return BackOutcome::AlreadyExiting;
            }
            slot.generation += 1;
            slot.state = TransitionState::Exiting {
                destination: destination.clone(),
            };
            slot.pending = Some(token.clone());
            slot.generation
        };

        // The page root may query the navigator, so no lock is held here
        self.page_root.apply_exit_marker(EXIT_MARKER_CLASS);

        let router = Arc::clone(&self.router);
        let slot = Arc::clone(&self.slot);
        let target = destination.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Pending navigation to '{}' cancelled", target);
                    let mut slot = slot.lock();
                    if slot.is_current(generation) {
                        slot.reset();
                    }
                }
                _ = tokio::time::sleep(EXIT_TRANSITION) => {
                    let still_current = {
                        let mut slot = slot.lock();
                        let current = slot.is_current(generation) && !token.is_cancelled();
                        if current {
                            slot.reset();
                        }
                        current
                    };
                    if still_current {
                        info!("Navigating to '{}'", target);
                        router.navigate(&target);
                    }
                }
            }
        });

        BackOutcome::Scheduled { destination }
    }

    /// Navigate to a search result without a transition
    ///
    /// A running exit is abandoned, so its delayed navigation never fires.
    /// Anchored targets get a scroll schedule, replacing any pending one.
    pub fn open(&self, target: &NavigationTarget) {
        {
            let mut slot = self.slot.lock();
            if let Some(pending) = slot.pending.take() {
                pending.cancel();
                slot.generation += 1;
                slot.reset();
                debug!("Exit abandoned for '{}'", target.path);
            }
        }

        self.router.navigate(&target.path);
        match &target.anchor {
            Some(anchor) => self.scroll.schedule(anchor),
            None => self.scroll.cancel(),
        }
    }

    /// Cancel all pending work, as when the owning page is torn down
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for TransitionNavigator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
