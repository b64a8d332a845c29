use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_web::WebEventExt;
use shared_types::{
    InitialWindowState, Point, Rect, ResizeDirection, Size, WindowMode, WindowRecord,
    DEFAULT_WINDOW_POSITION, DEFAULT_WINDOW_SIZE,
};
use wasm_bindgen::JsCast;
use window_engine::{
    DragController, GestureKind, HitRegion, PointerButton, PointerPress, ResizeController,
    WindowFrame, WindowShell,
};

use crate::desktop::DesktopContext;

/// One pointer event reduced to what the window engine consumes
#[derive(Clone, Copy, Debug, PartialEq)]
struct PointerInput {
    pointer_id: i32,
    press: PointerPress,
    /// DOM `buttons` bitmask, zero once every button is up
    buttons: u16,
    on_control: bool,
}

impl PointerInput {
    fn read(e: &PointerEvent) -> Self {
        let data = e.data();
        let pointer_id = data.pointer_id();
        let dom = data
            .try_as_web_event()
            .and_then(|event| event.dyn_into::<web_sys::PointerEvent>().ok());

        match dom {
            Some(dom) => Self {
                pointer_id,
                press: press_from_dom(dom.client_x(), dom.client_y(), dom.button()),
                buttons: dom.buttons(),
                on_control: targets_window_control(&dom),
            },
            None => {
                let point = data.client_coordinates();
                Self {
                    pointer_id,
                    press: PointerPress::primary(point.x as i32, point.y as i32),
                    buttons: 1,
                    on_control: false,
                }
            }
        }
    }

    /// Region the press landed on, given the element that received it.
    fn region(&self, over: HitRegion) -> HitRegion {
        if self.on_control {
            HitRegion::Control
        } else {
            over
        }
    }

    fn released(&self) -> bool {
        self.buttons == 0
    }
}

/// Buttons other than the three the engine knows never start a gesture.
fn press_from_dom(x: i32, y: i32, button: i16) -> PointerPress {
    PointerPress {
        point: Point::new(x, y),
        button: PointerButton::from_dom(button)
            .unwrap_or(PointerButton::Auxiliary),
    }
}

fn targets_window_control(dom: &web_sys::PointerEvent) -> bool {
    dom.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest("button, .window-controls").ok().flatten())
        .is_some()
}

fn window_element(e: &PointerEvent) -> Option<web_sys::Element> {
    let target = e.data().try_as_web_event()?.current_target()?;
    let element = target.dyn_into::<web_sys::Element>().ok()?;
    element.closest(".floating-window").ok().flatten()
}

/// Gesture in progress on this window, bound to the pointer that began it
#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveGesture {
    kind: GestureKind,
    pointer_id: i32,
    /// Rendered frame when the gesture began
    start: Rect,
}

impl ActiveGesture {
    fn new(kind: GestureKind, input: &PointerInput, start: Rect) -> Self {
        Self {
            kind,
            pointer_id: input.pointer_id,
            start,
        }
    }

    fn owns(&self, input: &PointerInput) -> bool {
        self.pointer_id == input.pointer_id
    }

    /// Route the rest of the gesture's events to the window element.
    fn capture(&self, e: &PointerEvent) {
        if let Some(window) = window_element(e) {
            let _ = window.set_pointer_capture(self.pointer_id);
        }
    }

    fn release(&self, e: &PointerEvent) {
        if let Some(window) = window_element(e) {
            let _ = window.release_pointer_capture(self.pointer_id);
        }
    }
}

fn window_style(frame: &WindowFrame) -> String {
    let Rect { origin, size } = frame.rect;
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; z-index: {}; \
         display: flex; flex-direction: column; background: var(--window-bg, #1f2937); \
         border: 1px solid var(--border-color, #374151); border-radius: var(--radius-lg, 12px); \
         overflow: hidden; box-shadow: var(--shadow-lg, 0 10px 40px rgba(0,0,0,0.5));",
        origin.x, origin.y, size.width, size.height, frame.z_order
    )
}

fn handle_style(direction: ResizeDirection) -> &'static str {
    match direction {
        ResizeDirection::N => {
            "position: absolute; top: -4px; left: 8px; right: 8px; height: 8px; cursor: n-resize; touch-action: none;"
        }
        ResizeDirection::S => {
            "position: absolute; bottom: -4px; left: 8px; right: 8px; height: 8px; cursor: s-resize; touch-action: none;"
        }
        ResizeDirection::E => {
            "position: absolute; right: -4px; top: 8px; bottom: 8px; width: 8px; cursor: e-resize; touch-action: none;"
        }
        ResizeDirection::W => {
            "position: absolute; left: -4px; top: 8px; bottom: 8px; width: 8px; cursor: w-resize; touch-action: none;"
        }
        ResizeDirection::Ne => {
            "position: absolute; top: -4px; right: -4px; width: 16px; height: 16px; cursor: ne-resize; touch-action: none;"
        }
        ResizeDirection::Nw => {
            "position: absolute; top: -4px; left: -4px; width: 16px; height: 16px; cursor: nw-resize; touch-action: none;"
        }
        ResizeDirection::Se => {
            "position: absolute; bottom: -4px; right: -4px; width: 16px; height: 16px; cursor: se-resize; touch-action: none;"
        }
        ResizeDirection::Sw => {
            "position: absolute; bottom: -4px; left: -4px; width: 16px; height: 16px; cursor: sw-resize; touch-action: none;"
        }
    }
}

fn maximize_label(mode: WindowMode) -> &'static str {
    match mode {
        WindowMode::Normal => "Maximize",
        WindowMode::Minimized | WindowMode::Maximized => "Restore",
    }
}

/// A draggable, resizable window registered with the surrounding desktop.
#[component]
pub fn FloatingWindow(
    id: String,
    title: String,
    #[props(default = DEFAULT_WINDOW_POSITION)] initial_position: Point,
    #[props(default = DEFAULT_WINDOW_SIZE)] initial_size: Size,
    children: Element,
) -> Element {
    let desktop = use_context::<DesktopContext>();
    let viewport = desktop.viewport;

    let record = use_signal(|| None::<WindowRecord>);
    let mut gesture = use_signal(|| None::<ActiveGesture>);
    let mut live_bounds = use_signal(|| None::<Rect>);

    let shell = use_hook(|| {
        Rc::new(WindowShell::new(
            id.clone(),
            InitialWindowState::new(initial_position, initial_size),
            desktop.registry.clone(),
            desktop.scheduler.clone(),
            desktop.config.shell,
        ))
    });
    let drag = use_hook(|| {
        Rc::new(RefCell::new(DragController::new(
            id.clone(),
            desktop.registry.clone(),
            desktop.config.drag,
        )))
    });
    let resize = use_hook(|| {
        Rc::new(RefCell::new(ResizeController::new(
            id.clone(),
            desktop.registry.clone(),
            desktop.config.resize,
        )))
    });

    let subscription = use_hook(|| {
        desktop.registry.subscribe(id.clone(), move |next| {
            let mut record = record;
            record.set(next.cloned());
        })
    });

    {
        let shell = shell.clone();
        use_effect(move || {
            if !shell.mount() {
                // Already registered under this id; render what is there.
                let mut record = record;
                record.set(shell.record());
            }
        });
    }

    {
        let shell = shell.clone();
        let registry = desktop.registry.clone();
        use_drop(move || {
            registry.unsubscribe(subscription);
            shell.unmount();
        });
    }

    let on_minimize = use_callback({
        let shell = shell.clone();
        move |_: ()| {
            shell.minimize_clicked();
        }
    });
    let on_maximize = use_callback({
        let shell = shell.clone();
        move |_: ()| {
            shell.maximize_clicked(viewport());
        }
    });

    let begin_resize = use_callback({
        let resize = resize.clone();
        move |(direction, e): (ResizeDirection, PointerEvent)| {
            let Some(current) = record.peek().clone() else {
                return;
            };
            let input = PointerInput::read(&e);
            let start = Rect {
                origin: current.position,
                size: current.size,
            };
            let region = input.region(HitRegion::Handle(direction));
            if !resize.borrow_mut().begin(input.press, region, start) {
                return;
            }
            e.prevent_default();
            let active = ActiveGesture::new(GestureKind::Resize, &input, start);
            active.capture(&e);
            gesture.set(Some(active));
        }
    });

    // Commits through the controller, then drops the live frame.
    let finish = use_callback({
        let drag = drag.clone();
        let resize = resize.clone();
        move |active: ActiveGesture| {
            match active.kind {
                GestureKind::Drag => {
                    drag.borrow_mut().end();
                }
                GestureKind::Resize => {
                    resize.borrow_mut().end();
                }
            }
            live_bounds.set(None);
            gesture.set(None);
        }
    });

    let Some(current) = record() else {
        return rsx! {};
    };

    let frame = WindowFrame::from_record(&current, viewport(), &desktop.config.shell)
        .with_live(live_bounds());
    let window_class = frame.class_list(gesture().map(|active| active.kind));
    let window_style = window_style(&frame);

    let shell_for_press = shell.clone();
    let drag_for_header = drag.clone();
    let drag_for_move = drag.clone();
    let resize_for_move = resize.clone();
    let end_gesture = move |e: PointerEvent| {
        let Some(active) = gesture() else {
            return;
        };
        if !active.owns(&PointerInput::read(&e)) {
            return;
        }
        active.release(&e);
        finish.call(active);
    };

    rsx! {
        div {
            class: "{window_class}",
            role: "dialog",
            "aria-label": title.clone(),
            style: "{window_style}",
            onpointerdown: move |e| {
                let input = PointerInput::read(&e);
                shell_for_press.press(input.press, input.region(HitRegion::Body));
            },
            onpointermove: move |e| {
                let Some(active) = gesture() else {
                    return;
                };
                let input = PointerInput::read(&e);
                if !active.owns(&input) {
                    return;
                }

                // Pointer capture can be lost across browser focus transitions.
                // With no buttons held the gesture is over.
                if input.released() {
                    finish.call(active);
                    return;
                }

                let point = input.press.point;
                let next = match active.kind {
                    GestureKind::Drag => drag_for_move
                        .borrow_mut()
                        .update(point, viewport())
                        .map(|origin| Rect {
                            origin,
                            size: active.start.size,
                        }),
                    GestureKind::Resize => resize_for_move.borrow_mut().update(point),
                };
                if next.is_some() {
                    live_bounds.set(next);
                }
            },
            onpointerup: end_gesture,
            onpointercancel: end_gesture,

            div {
                class: "window-header",
                style: "display: flex; align-items: center; gap: 0.75rem; padding: 0.5rem 0.75rem; background: var(--titlebar-bg, #111827); border-bottom: 1px solid var(--border-color, #374151); cursor: grab; user-select: none; touch-action: none;",
                onpointerdown: move |e| {
                    let input = PointerInput::read(&e);
                    let start = frame.rect;
                    let region = input.region(HitRegion::Header);
                    if !drag_for_header
                        .borrow_mut()
                        .begin(input.press, region, start)
                    {
                        return;
                    }
                    e.prevent_default();
                    let active = ActiveGesture::new(GestureKind::Drag, &input, start);
                    active.capture(&e);
                    gesture.set(Some(active));
                },

                WindowControls {
                    mode: frame.mode,
                    on_minimize,
                    on_maximize,
                }
                div {
                    class: "window-title",
                    style: "font-weight: 500; color: var(--text-primary, white); white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                    "{title}"
                }
            }

            if frame.shows_content() {
                div {
                    class: "window-content",
                    style: "flex: 1; overflow: auto; padding: 1rem; color: var(--text-primary, white);",
                    {children}
                }
            }

            if frame.resizable() {
                for direction in ResizeDirection::ALL {
                    div {
                        key: "{direction}",
                        class: "resize-handle resize-handle-{direction}",
                        style: handle_style(direction),
                        onpointerdown: move |e| begin_resize.call((direction, e)),
                    }
                }
            }
        }
    }
}

#[component]
fn WindowControls(
    mode: WindowMode,
    on_minimize: Callback<()>,
    on_maximize: Callback<()>,
) -> Element {
    let maximize_label = maximize_label(mode);

    rsx! {
        div {
            class: "window-controls",
            style: "display: flex; align-items: center; gap: 0.375rem;",
            button {
                class: "control-btn control-minimize",
                style: "width: 14px; height: 14px; padding: 0; background: #facc15; border: none; border-radius: 999px; cursor: pointer;",
                title: "Minimize",
                "aria-label": "Minimize",
                onpointerdown: move |e| e.stop_propagation(),
                onclick: move |e| {
                    e.stop_propagation();
                    on_minimize.call(());
                },
            }
            button {
                class: "control-btn control-maximize",
                style: "width: 14px; height: 14px; padding: 0; background: #22c55e; border: none; border-radius: 999px; cursor: pointer;",
                title: maximize_label,
                "aria-label": maximize_label,
                onpointerdown: move |e| e.stop_propagation(),
                onclick: move |e| {
                    e.stop_propagation();
                    on_maximize.call(());
                },
            }
        }
    }
}
