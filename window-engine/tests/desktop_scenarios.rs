//! End-to-end desktop scenarios over the public engine API.
//!
//! A registry, virtual clock and recording notifier stand in for the browser.
//!
//! Run:
//!   cargo test -p window-engine --test desktop_scenarios

use std::rc::Rc;

use shared_types::{InitialWindowState, Point, Rect, ResizeDirection, Size, WindowMode};
use window_engine::{
    Choreographer, DesktopConfig, DragController, HitRegion, LayoutConfig, LayoutPhase,
    ManualScheduler, PointerPress, RecordingNotifier, ResizeController, WindowRegistry,
    WindowShell, LAYOUT_COMPLETE_MESSAGE,
};

const VIEWPORT: Size = Size::new(1280, 720);

// ─── Shared helpers ──────────────────────────────────────────────────────────

struct Desktop {
    config: DesktopConfig,
    registry: WindowRegistry,
    scheduler: ManualScheduler,
    notifier: RecordingNotifier,
}

impl Desktop {
    fn new() -> Self {
        init_tracing();
        let config = DesktopConfig::default();
        let notifier = RecordingNotifier::new();
        Self {
            registry: WindowRegistry::with_config(Rc::new(notifier.clone()), &config),
            scheduler: ManualScheduler::new(),
            notifier,
            config,
        }
    }

    fn shell(&self, id: &str, position: Point, size: Size) -> WindowShell {
        WindowShell::new(
            id,
            InitialWindowState::new(position, size),
            self.registry.clone(),
            Rc::new(self.scheduler.clone()),
            self.config.shell,
        )
    }

    fn drag(&self, id: &str) -> DragController {
        DragController::new(id, self.registry.clone(), self.config.drag)
    }

    fn resize(&self, id: &str) -> ResizeController {
        ResizeController::new(id, self.registry.clone(), self.config.resize)
    }

    fn rendered(&self, id: &str) -> Rect {
        let record = self.registry.get(id).unwrap();
        Rect {
            origin: record.position,
            size: record.size,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("window_engine=debug")
        .with_test_writer()
        .try_init();
}

fn cascade(desktop: &Desktop, ids: &[&str]) -> Vec<WindowShell> {
    ids.iter()
        .enumerate()
        .map(|(index, id)| {
            let step = index as i32;
            let shell = desktop.shell(
                id,
                Point::new(100 + 30 * step, 120 + 10 * step),
                Size::new(450, 320),
            );
            shell.mount();
            shell
        })
        .collect()
}

// ─── Focus ───────────────────────────────────────────────────────────────────

#[test]
fn raising_two_default_windows() {
    let desktop = Desktop::new();
    desktop.registry.register("a", InitialWindowState::default());
    desktop.registry.register("b", InitialWindowState::default());

    desktop.registry.bring_to_front("a");
    desktop.registry.bring_to_front("b");

    let a = desktop.registry.get("a").unwrap().z_order;
    let b = desktop.registry.get("b").unwrap().z_order;
    assert!(b > a);
    assert!(a > 100);
}

#[test]
fn independent_desktops_do_not_share_state() {
    let first = Desktop::new();
    let second = Desktop::new();
    first.registry.register("a", InitialWindowState::default());
    first.registry.register("b", InitialWindowState::default());
    first.registry.bring_to_front("a");
    first.registry.set_minimized("a");

    assert!(second.registry.is_empty());
    assert_eq!(second.registry.focus_counter(), 100);
    assert!(second.notifier.notifications().is_empty());
}

// ─── Mode transitions ────────────────────────────────────────────────────────

#[test]
fn minimize_twice_returns_to_initial_state() {
    let desktop = Desktop::new();
    let shells = cascade(&desktop, &["profile-window"]);
    let before = desktop.registry.get("profile-window").unwrap();

    shells[0].minimize_clicked();
    shells[0].minimize_clicked();

    assert_eq!(desktop.registry.get("profile-window").unwrap(), before);
    assert_eq!(
        desktop.notifier.messages(),
        vec!["Profile minimized".to_string(), "Profile restored".to_string()]
    );
}

#[test]
fn restore_from_strip_fits_and_centers() {
    let desktop = Desktop::new();
    let shells = cascade(&desktop, &["experience-window"]);
    shells[0].minimize_clicked();

    shells[0].maximize_clicked(VIEWPORT);
    desktop.scheduler.run_until_idle();

    let record = desktop.registry.get("experience-window").unwrap();
    assert_eq!(record.mode, WindowMode::Normal);
    let min_width = (450 + 40).max(320);
    let min_height = (320 + 40).max(200);
    assert!(record.size.width >= min_width.min(1152));
    assert!(record.size.width <= 1152);
    assert!(record.size.height >= min_height.min(648));
    assert!(record.size.height <= 648);
    assert_eq!(record.position.x, (VIEWPORT.width - record.size.width) / 2);
    assert_eq!(record.position.y, (VIEWPORT.height - record.size.height) / 2);
}

#[test]
fn maximized_frame_fills_viewport_and_refuses_gestures() {
    let desktop = Desktop::new();
    let shells = cascade(&desktop, &["education-window"]);
    shells[0].maximize_clicked(VIEWPORT);

    let frame = shells[0].frame(VIEWPORT).unwrap();
    assert_eq!(frame.rect.size, VIEWPORT);
    assert!(frame.class_list(None).contains("window-maximized"));

    let mut drag = desktop.drag("education-window");
    let mut resize = desktop.resize("education-window");
    assert!(!drag.begin(PointerPress::primary(120, 130), HitRegion::Header, frame.rect));
    assert!(!resize.begin(
        PointerPress::primary(120, 130),
        HitRegion::Handle(ResizeDirection::Se),
        frame.rect
    ));
}

// ─── Gestures ────────────────────────────────────────────────────────────────

#[test]
fn drag_past_the_origin_clamps_to_zero() {
    let desktop = Desktop::new();
    desktop.registry.register(
        "profile-window",
        InitialWindowState::new(Point::new(50, 50), Size::new(400, 300)),
    );
    let mut drag = desktop.drag("profile-window");

    let rect = desktop.rendered("profile-window");
    drag.begin(PointerPress::primary(60, 60), HitRegion::Header, rect);
    drag.update(Point::new(60 - 9999, 60 - 9999), VIEWPORT);
    drag.end();

    assert_eq!(
        desktop.registry.get("profile-window").unwrap().position,
        Point::new(0, 0)
    );
}

#[test]
fn diagonal_resize_keeps_height_when_width_hits_minimum() {
    let desktop = Desktop::new();
    desktop.registry.register(
        "tech-skills-window",
        InitialWindowState::new(Point::new(100, 100), Size::new(400, 300)),
    );
    let mut resize = desktop.resize("tech-skills-window");

    let rect = desktop.rendered("tech-skills-window");
    resize.begin(
        PointerPress::primary(100, 100),
        HitRegion::Handle(ResizeDirection::Nw),
        rect,
    );
    resize.update(Point::new(350, 60));
    resize.end();

    let record = desktop.registry.get("tech-skills-window").unwrap();
    assert_eq!(record.size, Size::new(400, 340));
    assert_eq!(record.position, Point::new(100, 60));
}

#[test]
fn gesture_live_geometry_stays_out_of_the_registry() {
    let desktop = Desktop::new();
    let shells = cascade(&desktop, &["welcome-window"]);
    let mut drag = desktop.drag("welcome-window");

    let rect = desktop.rendered("welcome-window");
    drag.begin(PointerPress::primary(110, 130), HitRegion::Header, rect);
    let revision = desktop.registry.revision();
    for step in 1..=30 {
        drag.update(Point::new(110 + step, 130 + step), VIEWPORT);
    }
    assert_eq!(desktop.registry.revision(), revision);

    let live = drag.live().map(|origin| Rect {
        origin,
        size: rect.size,
    });
    let frame = shells[0].frame(VIEWPORT).unwrap().with_live(live);
    assert_eq!(frame.rect.origin, Point::new(130, 150));

    drag.end();
    assert_eq!(desktop.registry.revision(), revision + 1);
}

// ─── Auto-layout ─────────────────────────────────────────────────────────────

#[test]
fn auto_layout_of_three_windows() {
    let desktop = Desktop::new();
    let ids = ["welcome-window", "profile-window", "experience-window"];
    let _shells = cascade(&desktop, &ids);

    let layout = Choreographer::new(
        desktop.registry.clone(),
        Rc::new(desktop.scheduler.clone()),
        LayoutConfig::default().with_windows(ids).with_start_delay(0),
        Size::new(900, 700),
    );
    layout.attach();
    desktop.scheduler.run_until_idle();

    let mut previous_x = i32::MIN;
    for id in ids {
        let record = desktop.registry.get(id).unwrap();
        assert!(record.is_minimized());
        assert!(record.position.x >= 10 && record.position.x <= 900);
        assert!(record.position.x > previous_x);
        previous_x = record.position.x;
    }

    assert_eq!(desktop.notifier.count_of(LAYOUT_COMPLETE_MESSAGE), 1);
    assert_eq!(
        desktop.notifier.messages().last().map(String::as_str),
        Some(LAYOUT_COMPLETE_MESSAGE)
    );
    assert_eq!(layout.phase(), LayoutPhase::Completed);
}

#[test]
fn window_closed_during_layout_is_skipped() {
    let desktop = Desktop::new();
    let ids = ["welcome-window", "profile-window", "experience-window"];
    let shells = cascade(&desktop, &ids);

    let layout = Choreographer::new(
        desktop.registry.clone(),
        Rc::new(desktop.scheduler.clone()),
        LayoutConfig::default().with_windows(ids),
        VIEWPORT,
    );
    layout.attach();
    desktop.scheduler.advance(3000);
    shells[1].unmount();
    desktop.scheduler.run_until_idle();

    assert!(!desktop.registry.contains("profile-window"));
    assert!(desktop.registry.get("welcome-window").unwrap().is_minimized());
    assert!(desktop.registry.get("experience-window").unwrap().is_minimized());
    assert_eq!(desktop.notifier.count_of(LAYOUT_COMPLETE_MESSAGE), 1);
}

#[test]
fn restoring_after_layout_raises_above_the_strip() {
    let desktop = Desktop::new();
    let ids = ["welcome-window", "profile-window"];
    let shells = cascade(&desktop, &ids);
    let layout = Choreographer::new(
        desktop.registry.clone(),
        Rc::new(desktop.scheduler.clone()),
        LayoutConfig::default().with_windows(ids).with_start_delay(0),
        VIEWPORT,
    );
    layout.attach();
    desktop.scheduler.run_until_idle();

    shells[1].press(PointerPress::primary(0, 0), HitRegion::Body);
    shells[0].maximize_clicked(VIEWPORT);
    desktop.scheduler.run_until_idle();

    let front = desktop.registry.records().pop().unwrap();
    assert_eq!(front.id, "welcome-window");
    assert_eq!(front.mode, WindowMode::Normal);
}
