pub mod desktop;
pub mod desktop_window;
pub mod interop;
pub mod portfolio;

pub use desktop::*;
pub use desktop_window::*;
pub use interop::*;
pub use portfolio::*;
