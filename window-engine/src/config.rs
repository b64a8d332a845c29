//! Desktop configuration.
//!
//! Every section carries `#[serde(default)]` so a host page only has to
//! spell out the values it wants to change.

use serde::{Deserialize, Serialize};
use shared_types::Size;

use crate::error::{ConfigError, Result};

pub const BASELINE_Z_ORDER: u32 = 100;
/// Largest z-order a window may request at registration. The space above it
/// is left for `bring_to_front`.
pub const MAX_Z_ORDER_OVERRIDE: u32 = u32::MAX / 2;
pub const LAYOUT_COMPLETE_MESSAGE: &str = "Click on any window to explore!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Initial value of the focus counter and default z-order
    pub baseline_z: u32,
    /// How long minimize/maximize/restore toasts stay visible
    pub notification_ms: u32,
    pub drag: DragConfig,
    pub resize: ResizeConfig,
    pub fit: FitConfig,
    pub shell: ShellConfig,
    pub layout: LayoutConfig,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            baseline_z: BASELINE_Z_ORDER,
            notification_ms: 2000,
            drag: DragConfig::default(),
            resize: ResizeConfig::default(),
            fit: FitConfig::default(),
            shell: ShellConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl DesktopConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.baseline_z > MAX_Z_ORDER_OVERRIDE {
            return Err(ConfigError::Invalid(format!(
                "baseline_z must be at most {MAX_Z_ORDER_OVERRIDE}, got {}",
                self.baseline_z
            )));
        }
        if self.resize.min_width <= 0 || self.resize.min_height <= 0 {
            return Err(ConfigError::Invalid("resize minimums must be positive".to_string()));
        }
        if self.fit.min_width <= 0 || self.fit.min_height <= 0 {
            return Err(ConfigError::Invalid("fit minimums must be positive".to_string()));
        }
        if !(self.fit.max_viewport_fraction > 0.0 && self.fit.max_viewport_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "fit.max_viewport_fraction must be in (0, 1], got {}",
                self.fit.max_viewport_fraction
            )));
        }
        self.layout.validate()
    }
}

/// Bounds applied to a dragged window's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// The corner stays at least this far from the right viewport edge
    pub margin_x: i32,
    /// The corner stays at least this far from the bottom viewport edge
    pub margin_y: i32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            margin_x: 200,
            margin_y: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            min_width: 200,
            min_height: 150,
        }
    }
}

/// Sizing rules for restoring a minimized window straight to a centered,
/// content-sized frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub padding: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub max_viewport_fraction: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            padding: 40,
            min_width: 320,
            min_height: 200,
            max_viewport_fraction: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Footprint of a window collapsed into the menu strip
    pub minimized_size: Size,
    /// Delay before re-raising a window restored from the strip
    pub raise_delay_ms: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            minimized_size: Size::new(180, 40),
            raise_delay_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Windows arranged into the strip, left to right
    pub window_ids: Vec<String>,
    pub start_delay_ms: u32,
    pub stagger_ms: u32,
    pub minimize_delay_ms: u32,
    pub resize_debounce_ms: u32,
    pub notice_ms: u32,
    pub menu_y: i32,
    pub item_width: i32,
    /// Item width used below `compact_breakpoint`
    pub compact_item_width: i32,
    pub compact_breakpoint: i32,
    pub max_menu_fraction: f64,
    pub min_start_x: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            window_ids: Vec::new(),
            start_delay_ms: 3000,
            stagger_ms: 100,
            minimize_delay_ms: 500,
            resize_debounce_ms: 250,
            notice_ms: 3000,
            menu_y: 100,
            item_width: 200,
            compact_item_width: 150,
            compact_breakpoint: 768,
            max_menu_fraction: 0.85,
            min_start_x: 10,
        }
    }
}

impl LayoutConfig {
    pub fn with_windows<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.window_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_start_delay(mut self, delay_ms: u32) -> Self {
        self.start_delay_ms = delay_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.item_width <= 0 || self.compact_item_width <= 0 {
            return Err(ConfigError::Invalid("layout item widths must be positive".to_string()));
        }
        if self.compact_breakpoint <= 0 {
            return Err(ConfigError::Invalid(
                "layout.compact_breakpoint must be positive".to_string(),
            ));
        }
        if !(self.max_menu_fraction > 0.0 && self.max_menu_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.max_menu_fraction must be in (0, 1], got {}",
                self.max_menu_fraction
            )));
        }
        Ok(())
    }
}
