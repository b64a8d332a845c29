//! Demo portfolio desktop

use dioxus::prelude::*;
use shared_types::{Point, Size};

use crate::desktop::DesktopShell;
use crate::desktop_window::FloatingWindow;

pub const LAYOUT_START_DELAY_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortfolioWindow {
    pub id: &'static str,
    pub title: &'static str,
    pub size: Size,
}

pub const PORTFOLIO_WINDOWS: [PortfolioWindow; 5] = [
    PortfolioWindow {
        id: "welcome-window",
        title: "Welcome",
        size: Size::new(420, 280),
    },
    PortfolioWindow {
        id: "profile-window",
        title: "Profile",
        size: Size::new(400, 320),
    },
    PortfolioWindow {
        id: "experience-window",
        title: "Experience",
        size: Size::new(480, 360),
    },
    PortfolioWindow {
        id: "education-window",
        title: "Education",
        size: Size::new(420, 300),
    },
    PortfolioWindow {
        id: "tech-skills-window",
        title: "Tech Skills",
        size: Size::new(440, 340),
    },
];

/// Initial cascade so every title bar stays reachable
pub fn cascade_position(index: usize) -> Point {
    let step = index as i32;
    Point::new(100 + 30 * step, 120 + 10 * step)
}

#[component]
pub fn Portfolio() -> Element {
    let layout_windows: Vec<String> = PORTFOLIO_WINDOWS
        .iter()
        .map(|window| window.id.to_string())
        .collect();
    let windows: Vec<(PortfolioWindow, Point)> = PORTFOLIO_WINDOWS
        .iter()
        .enumerate()
        .map(|(index, window)| (*window, cascade_position(index)))
        .collect();

    rsx! {
        DesktopShell {
            layout_windows,
            layout_delay_ms: LAYOUT_START_DELAY_MS,
            for (window, position) in windows {
                FloatingWindow {
                    key: "{window.id}",
                    id: window.id.to_string(),
                    title: window.title.to_string(),
                    initial_position: position,
                    initial_size: window.size,
                    WindowBody { window_id: window.id.to_string() }
                }
            }
        }
    }
}

#[component]
fn WindowBody(window_id: String) -> Element {
    match window_id.as_str() {
        "welcome-window" => rsx! {
            h2 { "Hi, welcome to my desktop" }
            p { "Every panel here is a window. Drag it by its title bar, resize it from any edge, or tuck it into the strip above." }
        },
        "profile-window" => rsx! {
            h2 { "Profile" }
            p { "Systems engineer focused on interactive tools, developer experience and fast, reliable front ends." }
        },
        "experience-window" => rsx! {
            h2 { "Experience" }
            ul {
                li { "Senior engineer, developer tooling" }
                li { "Front-end engineer, data visualisation" }
                li { "Software engineer, embedded dashboards" }
            }
        },
        "education-window" => rsx! {
            h2 { "Education" }
            p { "B.Sc. Computer Science" }
        },
        "tech-skills-window" => rsx! {
            h2 { "Tech Skills" }
            ul {
                li { "Rust, WebAssembly, Dioxus" }
                li { "TypeScript, CSS layout" }
                li { "Distributed systems, observability" }
            }
        },
        _ => rsx! {
            p { "Nothing here yet" }
        },
    }
}
