//! Integration tests for the scroll -> decision -> deferred style pipeline
//!
//! These tests verify that:
//! - Scroll events drive the hidden flag synchronously
//! - Style writes only land when the host flushes its frame queue
//! - The painted styles always match the last decision once flushed
//! - Target resolution prefers a nested toolbar over the host

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use vanish_core::{FrameWriteQueue, ScrollEmitter, ScrollEvent, WriteJob, WriteScheduler};
use vanish_style::{NodeId, SharedStyleTree, StyleProperty};
use vanish_toolbar::{Platform, ScrollVanish, VanishConfig, VanishError, Visibility};

/// A host page: app-toolbar wrapping an ion-toolbar, a scroll area and a frame queue
struct Page {
    tree: SharedStyleTree,
    frames: FrameWriteQueue,
    content: ScrollEmitter,
    host: NodeId,
    toolbar: NodeId,
}

impl Page {
    fn new() -> Self {
        let tree = SharedStyleTree::default();
        let (host, toolbar) = tree.with_mut(|t| {
            let header = t.create_element("ion-header");
            let host = t.create_element("app-toolbar");
            let toolbar = t.create_element("ion-toolbar");
            let title = t.create_element("ion-title");
            t.append_child(header, host);
            t.append_child(host, toolbar);
            t.append_child(toolbar, title);
            (host, toolbar)
        });

        Self {
            tree,
            frames: FrameWriteQueue::new(),
            content: ScrollEmitter::new(),
            host,
            toolbar,
        }
    }

    fn attach(&self, config: VanishConfig) -> ScrollVanish {
        let mut vanish = ScrollVanish::new(self.host, self.tree.clone(), self.frames.clone());
        vanish.set_scroll_area(self.content.clone());
        vanish.initialize(config).expect("initialize");
        self.frames.flush();
        vanish
    }

    fn style(&self, node: NodeId, property: StyleProperty) -> Option<String> {
        self.tree
            .with(|t| t.inline_style(node, property).map(String::from))
    }

    fn emit(&self, current_y: f32, delta_y: f32) {
        self.content.emit(ScrollEvent::vertical(current_y, delta_y));
    }

    /// Painted styles must match the decision after a flush
    fn assert_painted(&self, vanish: &ScrollVanish, expanded_height: &str) {
        self.frames.flush();
        let target = vanish.target().expect("target");
        if vanish.is_hidden() {
            assert_eq!(self.style(target, StyleProperty::Height).as_deref(), Some("0px"));
            assert_eq!(self.style(target, StyleProperty::MinHeight).as_deref(), Some("0px"));
            assert_eq!(self.style(target, StyleProperty::Padding).as_deref(), Some("0"));
            assert_eq!(self.style(target, StyleProperty::Opacity).as_deref(), Some("0"));
        } else {
            assert_eq!(
                self.style(target, StyleProperty::Height).as_deref(),
                Some(expanded_height)
            );
            assert_eq!(self.style(target, StyleProperty::MinHeight), None);
            assert_eq!(self.style(target, StyleProperty::Padding), None);
            assert_eq!(self.style(target, StyleProperty::Opacity), None);
        }
    }
}

/// Initial visible, event {100, 25} with trigger 20 hides
#[test]
fn test_scroll_down_past_trigger_hides() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    page.emit(100.0, 25.0);
    assert!(vanish.is_hidden());
    page.assert_painted(&vanish, "56px");
}

/// Hidden, event {0, -5} shows through the top-of-scroll rule
#[test]
fn test_reaching_top_shows_even_with_small_delta() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());
    page.emit(100.0, 25.0);
    assert!(vanish.is_hidden());

    page.emit(0.0, -5.0);
    assert!(!vanish.is_hidden());
    page.assert_painted(&vanish, "56px");
}

/// Visible, event {50, 15} with trigger 20 is ignored
#[test]
fn test_small_scroll_down_keeps_toolbar() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    page.emit(50.0, 15.0);
    assert!(!vanish.is_hidden());
    assert_eq!(page.frames.pending(), 0);
}

/// Hidden, event {200, -25} with trigger 20 shows
#[test]
fn test_scroll_up_past_trigger_shows() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());
    page.emit(180.0, 30.0);

    page.emit(200.0, -25.0);
    assert!(!vanish.is_hidden());
    page.assert_painted(&vanish, "56px");
}

#[test]
fn test_exact_trigger_distance_does_not_transition() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    page.emit(60.0, 20.0);
    assert!(!vanish.is_hidden());

    page.emit(90.0, 21.0);
    assert!(vanish.is_hidden());

    page.emit(70.0, -20.0);
    assert!(vanish.is_hidden());
}

#[test]
fn test_repeated_top_events_while_visible_are_noops() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    for _ in 0..3 {
        page.emit(0.0, 0.0);
    }
    assert!(!vanish.is_hidden());
    assert_eq!(page.frames.pending(), 0);
    assert!(vanish.history().is_empty());
}

#[test]
fn test_no_ops_while_hidden_queue_nothing() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());
    page.emit(100.0, 40.0);
    page.frames.flush();

    page.emit(150.0, 50.0);
    page.emit(140.0, -10.0);
    assert!(vanish.is_hidden());
    assert_eq!(page.frames.pending(), 0);
}

#[test]
fn test_flag_updates_before_styles_land() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    page.emit(100.0, 25.0);
    assert!(vanish.is_hidden());
    assert_eq!(page.frames.pending(), 1);
    assert_eq!(page.style(page.toolbar, StyleProperty::Height).as_deref(), Some("56px"));

    assert_eq!(page.frames.flush(), 1);
    assert_eq!(page.style(page.toolbar, StyleProperty::Height).as_deref(), Some("0px"));
}

#[test]
fn test_queued_writes_apply_in_decision_order() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    // Hide, show, hide within one frame; only the last decision is painted
    page.emit(100.0, 30.0);
    page.emit(60.0, -40.0);
    page.emit(120.0, 60.0);
    assert_eq!(page.frames.pending(), 3);

    page.assert_painted(&vanish, "56px");
    assert!(vanish.is_hidden());
}

#[test]
fn test_scroll_session_keeps_styles_in_sync() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    let offsets = [
        10.0, 30.0, 80.0, 140.0, 150.0, 120.0, 90.0, 95.0, 200.0, 400.0, 380.0, 370.0, 0.0,
        40.0, 0.0,
    ];
    for y in offsets {
        let was_hidden = vanish.is_hidden();
        page.content.scroll_to(y);
        page.assert_painted(&vanish, "56px");

        if y == 0.0 && was_hidden {
            assert!(!vanish.is_hidden(), "top must show the toolbar");
        }
    }
    assert!(!vanish.is_hidden());
    assert!(!vanish.history().is_empty());
}

#[test]
fn test_nested_toolbar_is_the_target() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    assert_eq!(vanish.target(), Some(page.toolbar));
    assert_eq!(vanish.host(), page.host);

    assert_eq!(
        page.style(page.toolbar, StyleProperty::Transition).as_deref(),
        Some("0.2s linear")
    );
    assert_eq!(page.style(page.host, StyleProperty::Transition), None);
    assert_eq!(page.style(page.host, StyleProperty::Height), None);
}

#[test]
fn test_host_is_the_target_without_nested_toolbar() {
    let tree = SharedStyleTree::default();
    let host = tree.with_mut(|t| {
        let host = t.create_element("ion-toolbar");
        let title = t.create_element("ion-title");
        t.append_child(host, title);
        host
    });
    let frames = FrameWriteQueue::new();
    let content = ScrollEmitter::new();

    let mut vanish = ScrollVanish::new(host, tree.clone(), frames.clone());
    vanish.set_scroll_area(content.clone());
    vanish.initialize(VanishConfig::default()).unwrap();
    assert_eq!(vanish.target(), Some(host));

    content.emit(ScrollEvent::vertical(100.0, 25.0));
    frames.flush();
    assert_eq!(
        tree.with(|t| t.inline_style(host, StyleProperty::Opacity).map(String::from)),
        Some("0".to_string())
    );
}

#[test]
fn test_custom_target_tag() {
    let tree = SharedStyleTree::default();
    let (host, bar) = tree.with_mut(|t| {
        let host = t.create_element("header");
        let bar = t.create_element("mat-toolbar");
        t.append_child(host, bar);
        (host, bar)
    });

    let mut vanish = ScrollVanish::new(host, tree, FrameWriteQueue::new())
        .with_scroll_area(ScrollEmitter::new());
    vanish
        .initialize(VanishConfig::default().target_tag("mat-toolbar"))
        .unwrap();
    assert_eq!(vanish.target(), Some(bar));
}

#[test]
fn test_configured_trigger_and_height() {
    let page = Page::new();
    let config = VanishConfig::from_toml_str(
        r#"
        trigger_distance = 5.0
        toolbar_height = "64px"
        "#,
    )
    .unwrap();
    let vanish = page.attach(config);
    assert_eq!(page.style(page.toolbar, StyleProperty::Height).as_deref(), Some("64px"));

    page.emit(30.0, 6.0);
    assert!(vanish.is_hidden());

    page.emit(24.0, -6.0);
    assert!(!vanish.is_hidden());
    page.assert_painted(&vanish, "64px");
}

#[test]
fn test_ios_platform_height() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::for_platform(Platform::Ios));

    page.emit(100.0, 30.0);
    page.emit(0.0, -100.0);
    page.assert_painted(&vanish, "44px");
}

#[test]
fn test_missing_scroll_area_is_an_error() {
    let page = Page::new();
    let mut vanish = ScrollVanish::new(page.host, page.tree.clone(), page.frames.clone());

    let err = vanish.initialize(VanishConfig::default()).unwrap_err();
    assert!(matches!(err, VanishError::MissingScrollArea));
    assert_eq!(page.frames.pending(), 0);
    assert_eq!(page.style(page.toolbar, StyleProperty::Height), None);
}

#[test]
fn test_events_before_initialize_are_not_observed() {
    let page = Page::new();
    let mut vanish = ScrollVanish::new(page.host, page.tree.clone(), page.frames.clone());
    vanish.set_scroll_area(page.content.clone());

    page.emit(100.0, 50.0);
    assert!(!vanish.is_hidden());

    vanish.initialize(VanishConfig::default()).unwrap();
    assert!(!vanish.is_hidden());
    assert_eq!(page.frames.pending(), 1);
}

#[test]
fn test_two_toolbars_on_one_scroll_area() {
    let page = Page::new();
    let second = page.tree.with_mut(|t| t.create_element("ion-toolbar"));

    let first = page.attach(VanishConfig::default());
    let mut other = ScrollVanish::new(second, page.tree.clone(), page.frames.clone());
    other.set_scroll_area(page.content.clone());
    other
        .initialize(VanishConfig::default().trigger_distance(50.0))
        .unwrap();

    page.emit(100.0, 30.0);
    assert!(first.is_hidden());
    assert!(!other.is_hidden());
    assert_eq!(other.visibility(), Visibility::Visible);
}

#[test]
fn test_detached_controller_stops_reacting() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());
    page.emit(100.0, 30.0);
    page.frames.flush();

    vanish.detach();
    page.emit(0.0, -100.0);
    assert_eq!(page.frames.pending(), 0);

    // Last painted state stays in place
    assert_eq!(page.style(page.toolbar, StyleProperty::Height).as_deref(), Some("0px"));
    assert_eq!(
        page.style(page.toolbar, StyleProperty::Transition).as_deref(),
        Some("0.2s linear")
    );
}

#[test]
fn test_removed_target_ignores_writes() {
    let page = Page::new();
    let vanish = page.attach(VanishConfig::default());

    page.tree.with_mut(|t| t.remove_node(page.host));
    page.emit(100.0, 30.0);
    assert!(vanish.is_hidden());
    assert_eq!(page.frames.flush(), 1);
    assert!(!page.tree.with(|t| t.contains(page.toolbar)));
}

/// Frame queue that, once armed, starts a scroll on another thread while a
/// write is being queued
#[derive(Clone)]
struct ContendedQueue {
    frames: FrameWriteQueue,
    content: ScrollEmitter,
    armed: Arc<AtomicBool>,
    scroller: Arc<Mutex<Option<thread::JoinHandle<()>>>>,
}

impl WriteScheduler for ContendedQueue {
    fn write(&self, job: WriteJob) {
        if self.armed.swap(false, Ordering::SeqCst) {
            let content = self.content.clone();
            let handle = thread::spawn(move || content.emit(ScrollEvent::vertical(200.0, -30.0)));
            // Let the scroll thread reach the handler before this write is queued
            thread::sleep(Duration::from_millis(50));
            *self.scroller.lock().unwrap() = Some(handle);
        }
        self.frames.write(job);
    }
}

#[test]
fn test_scroll_during_explicit_hide_keeps_styles_in_sync() {
    let page = Page::new();
    let queue = ContendedQueue {
        frames: page.frames.clone(),
        content: page.content.clone(),
        armed: Arc::new(AtomicBool::new(false)),
        scroller: Arc::new(Mutex::new(None)),
    };

    let mut vanish = ScrollVanish::new(page.host, page.tree.clone(), queue.clone());
    vanish.set_scroll_area(page.content.clone());
    vanish.initialize(VanishConfig::default()).unwrap();
    page.frames.flush();

    queue.armed.store(true, Ordering::SeqCst);
    vanish.hide().unwrap();

    let scroller = queue.scroller.lock().unwrap().take().expect("scroll thread");
    scroller.join().unwrap();

    // The upward scroll is decided after the hide, so it wins
    assert!(!vanish.is_hidden());
    assert_eq!(
        vanish.history(),
        vec![
            (Visibility::Visible, Visibility::Hidden),
            (Visibility::Hidden, Visibility::Visible),
        ]
    );
    page.assert_painted(&vanish, "56px");
}
