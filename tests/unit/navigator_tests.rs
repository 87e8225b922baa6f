/*!
 * Tests for transition-coordinated navigation and anchor scrolling
 *
 * These run on a paused Tokio clock, so sleeps advance virtual time
 * deterministically.
 */

use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::Duration;
use tokio::time::sleep;

use catnav::navigator::{
    BackOutcome, PageRoot, TransitionNavigator, TransitionState, EXIT_MARKER_CLASS, EXIT_TRANSITION,
    SCROLL_RETRY_OFFSETS,
};
use catnav::resolver::ParentResolver;
use catnav::routes::{NavigationTarget, RouteParams};
use crate::common::{self, CHLORINE_SERVICE_PATH};
use crate::common::mock_surfaces::{MockSurfaces, RecordingRouter, RecordingScrollHost};

const JUST_UNDER: Duration = Duration::from_millis(1);

/// Test that navigation happens once, and not before the transition ends
#[tokio::test(start_paused = true)]
async fn test_transition_to_shouldNavigateExactlyOnceAfterDelay() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    let outcome = navigator.transition_to("/service/pump-stations");
    assert_eq!(outcome, BackOutcome::Scheduled { destination: "/service/pump-stations".to_string() });
    assert_eq!(surfaces.page_root.markers(), vec![EXIT_MARKER_CLASS]);
    assert!(navigator.is_exiting());

    sleep(EXIT_TRANSITION - JUST_UNDER).await;
    assert!(surfaces.router.paths().is_empty(), "navigated before the transition finished");

    sleep(JUST_UNDER * 2).await;
    assert_eq!(surfaces.router.paths(), vec!["/service/pump-stations"]);
    assert_eq!(navigator.state(), TransitionState::Idle);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(surfaces.router.paths().len(), 1);
}

/// Test that a rapid second back action does not schedule a second navigation
#[tokio::test(start_paused = true)]
async fn test_transition_to_whileExiting_shouldBeIgnored() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    assert!(matches!(navigator.transition_to("/first"), BackOutcome::Scheduled { .. }));
    sleep(Duration::from_millis(50)).await;
    assert_eq!(navigator.transition_to("/second"), BackOutcome::AlreadyExiting);
    assert_eq!(
        navigator.state(),
        TransitionState::Exiting { destination: "/first".to_string() }
    );

    sleep(Duration::from_secs(1)).await;
    assert_eq!(surfaces.router.paths(), vec!["/first"]);
    assert_eq!(surfaces.page_root.markers().len(), 1);
}

/// Test that a new transition can start once the previous one navigated
#[tokio::test(start_paused = true)]
async fn test_transition_to_afterNavigation_shouldScheduleAgain() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    navigator.transition_to("/first");
    sleep(EXIT_TRANSITION * 2).await;
    assert!(matches!(navigator.transition_to("/second"), BackOutcome::Scheduled { .. }));
    sleep(EXIT_TRANSITION * 2).await;

    assert_eq!(surfaces.router.paths(), vec!["/first", "/second"]);
}

/// Test the full back action through the resolver
#[tokio::test(start_paused = true)]
async fn test_go_back_fromChildPage_shouldNavigateToOwningService() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();
    let resolver = ParentResolver::new(common::fixture_catalog());

    let mut params = RouteParams::new();
    params.insert("slug".to_string(), "drum-lifting-beam".to_string());

    let outcome = navigator.go_back(&resolver, "/equipment/drum-lifting-beam", &params);
    assert_eq!(outcome, BackOutcome::Scheduled { destination: CHLORINE_SERVICE_PATH.to_string() });

    assert_eq!(
        navigator.go_back(&resolver, "/admin/submissions/1", &RouteParams::new()),
        BackOutcome::AlreadyExiting
    );

    sleep(EXIT_TRANSITION + JUST_UNDER).await;
    assert_eq!(surfaces.router.paths(), vec![CHLORINE_SERVICE_PATH]);
}

/// Test that shutting down drops a pending navigation
#[tokio::test(start_paused = true)]
async fn test_shutdown_withPendingNavigation_shouldNotNavigate() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    navigator.transition_to("/somewhere");
    navigator.shutdown();

    sleep(Duration::from_secs(1)).await;
    assert!(surfaces.router.paths().is_empty());
    assert_eq!(navigator.state(), TransitionState::Idle);
}

/// Test that dropping the navigator cancels its timers
#[tokio::test(start_paused = true)]
async fn test_drop_withPendingWork_shouldCancelTimers() {
    let surfaces = MockSurfaces::new();
    {
        let navigator = surfaces.navigator();
        navigator.transition_to("/somewhere");
        navigator.open(&NavigationTarget::anchored("/service/pump-stations", "booster-set"));
    }

    sleep(Duration::from_secs(1)).await;
    assert_eq!(surfaces.router.paths(), vec!["/service/pump-stations"]);
    assert!(surfaces.scroll_host.attempts().is_empty());
}

/// Test that opening a result navigates immediately without a transition
#[tokio::test(start_paused = true)]
async fn test_open_withPlainTarget_shouldNavigateImmediately() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    navigator.open(&NavigationTarget::page("/equipment/drum-lifting-beam"));
    assert_eq!(surfaces.router.paths(), vec!["/equipment/drum-lifting-beam"]);
    assert!(surfaces.page_root.markers().is_empty());
    assert!(!navigator.is_exiting());

    sleep(Duration::from_secs(1)).await;
    assert!(surfaces.scroll_host.attempts().is_empty());
}

/// Test the fixed scroll schedule, which runs every attempt regardless of outcome
#[tokio::test(start_paused = true)]
async fn test_open_withAnchor_shouldTryScrollOnFixedSchedule() {
    let surfaces = MockSurfaces::with_scroll_host(RecordingScrollHost::mounted_from(2));
    let navigator = surfaces.navigator();

    navigator.open(&NavigationTarget::anchored("/service/pump-stations", "booster-set"));
    assert_eq!(surfaces.router.paths(), vec!["/service/pump-stations"]);

    sleep(SCROLL_RETRY_OFFSETS[0] - JUST_UNDER).await;
    assert_eq!(surfaces.scroll_host.attempts_for("booster-set"), 0);

    sleep(JUST_UNDER * 2).await;
    assert_eq!(surfaces.scroll_host.attempts_for("booster-set"), 1);

    sleep(SCROLL_RETRY_OFFSETS[2]).await;
    assert_eq!(surfaces.scroll_host.attempts_for("booster-set"), SCROLL_RETRY_OFFSETS.len());
}

/// Test that a new anchored open replaces the pending scroll schedule
#[tokio::test(start_paused = true)]
async fn test_open_twice_shouldCancelEarlierScrollSchedule() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    navigator.open(&NavigationTarget::anchored("/service/a", "first"));
    sleep(SCROLL_RETRY_OFFSETS[0] + JUST_UNDER).await;
    navigator.open(&NavigationTarget::anchored("/service/b", "second"));
    sleep(Duration::from_secs(2)).await;

    assert_eq!(surfaces.scroll_host.attempts_for("first"), 1);
    assert_eq!(surfaces.scroll_host.attempts_for("second"), SCROLL_RETRY_OFFSETS.len());
    assert_eq!(surfaces.router.paths(), vec!["/service/a", "/service/b"]);
}

/// Test that opening a result during an exit abandons the pending back navigation
#[tokio::test(start_paused = true)]
async fn test_open_whileExiting_shouldCancelPendingNavigation() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    navigator.transition_to("/service/pump-stations");
    sleep(EXIT_TRANSITION / 3).await;

    navigator.open(&NavigationTarget::page("/equipment/drum-lifting-beam"));
    assert_eq!(navigator.state(), TransitionState::Idle);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(surfaces.router.paths(), vec!["/equipment/drum-lifting-beam"]);

    // A later back action is scheduled normally and is not reset by the abandoned one
    assert!(matches!(navigator.transition_to("/"), BackOutcome::Scheduled { .. }));
    sleep(EXIT_TRANSITION - JUST_UNDER).await;
    assert!(navigator.is_exiting());
    sleep(JUST_UNDER * 2).await;
    assert_eq!(surfaces.router.paths(), vec!["/equipment/drum-lifting-beam", "/"]);
}

/// Test that a shut down navigator neither marks the page nor reports a schedule
#[tokio::test(start_paused = true)]
async fn test_transition_to_afterShutdown_shouldReportShutDown() {
    let surfaces = MockSurfaces::new();
    let navigator = surfaces.navigator();

    navigator.shutdown();
    assert_eq!(navigator.transition_to("/service/pump-stations"), BackOutcome::ShutDown);
    assert!(surfaces.page_root.markers().is_empty());
    assert_eq!(navigator.state(), TransitionState::Idle);

    sleep(Duration::from_secs(1)).await;
    assert!(surfaces.router.paths().is_empty());
}

// Page root that reads navigator state while the marker is applied
#[derive(Default)]
struct ObservingPageRoot {
    navigator: OnceLock<Weak<TransitionNavigator>>,
    seen_exiting: Mutex<Vec<bool>>,
}

impl PageRoot for ObservingPageRoot {
    fn apply_exit_marker(&self, _class_name: &str) {
        if let Some(navigator) = self.navigator.get().and_then(Weak::upgrade) {
            self.seen_exiting.lock().unwrap().push(navigator.is_exiting());
        }
    }
}

/// Test that the page root may query the navigator from inside the marker callback
#[tokio::test(start_paused = true)]
async fn test_transition_to_withPageRootReadingState_shouldNotDeadlock() {
    let router = Arc::new(RecordingRouter::default());
    let page_root = Arc::new(ObservingPageRoot::default());
    let navigator = Arc::new(TransitionNavigator::new(
        router.clone(),
        page_root.clone(),
        Arc::new(RecordingScrollHost::default()),
    ));
    let _ = page_root.navigator.set(Arc::downgrade(&navigator));

    assert!(matches!(navigator.transition_to("/"), BackOutcome::Scheduled { .. }));
    assert_eq!(*page_root.seen_exiting.lock().unwrap(), vec![true]);

    sleep(EXIT_TRANSITION * 2).await;
    assert_eq!(router.paths(), vec!["/"]);
}
