/*!
 * Navigation side effects.
 *
 * - `transition`: back actions and other transitioned route changes
 * - `scroll`: anchor scrolling after opening a search result
 *
 * Both own their timers as spawned Tokio tasks tied to cancellation tokens.
 */

pub mod scroll;
pub mod transition;

pub use self::scroll::{ScrollHost, ScrollScheduler, SCROLL_RETRY_OFFSETS};
pub use self::transition::{
    BackOutcome, PageRoot, Router, TransitionNavigator, TransitionState, EXIT_MARKER_CLASS, EXIT_TRANSITION,
};
