use shared_types::{Size, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlScriptElement};
use window_engine::DesktopConfig;

/// Used when the browser reports no usable viewport
pub const FALLBACK_VIEWPORT: Viewport = Size::new(1280, 720);

/// Id of the optional `<script type="application/json">` config block
pub const CONFIG_ELEMENT_ID: &str = "desktop-config";

/// Get the browser viewport dimensions
pub fn get_viewport_size() -> Viewport {
    current_viewport_size().unwrap_or(FALLBACK_VIEWPORT)
}

pub fn current_viewport_size() -> Option<Viewport> {
    let window = window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;

    if width > 0.0 && height > 0.0 {
        return Some(Size::new(width.round() as i32, height.round() as i32));
    }

    let document = window.document()?;
    let root = document.document_element()?;
    let width = root.client_width();
    let height = root.client_height();
    if width > 0 && height > 0 {
        Some(Size::new(width, height))
    } else {
        None
    }
}

/// Desktop configuration from the host page, or defaults.
pub fn load_desktop_config() -> DesktopConfig {
    parse_desktop_config(read_config_block().as_deref())
}

fn read_config_block() -> Option<String> {
    let document = window()?.document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    let script = element.dyn_into::<HtmlScriptElement>().ok()?;
    script.text().ok()
}

pub fn parse_desktop_config(raw: Option<&str>) -> DesktopConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DesktopConfig::default();
    };

    match DesktopConfig::from_json(raw) {
        Ok(config) => {
            dioxus_logger::tracing::info!(
                layout_windows = config.layout.window_ids.len(),
                "Loaded desktop config from host page"
            );
            config
        }
        Err(e) => {
            dioxus_logger::tracing::warn!("Ignoring desktop config block, using defaults: {}", e);
            DesktopConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_block_uses_defaults() {
        assert_eq!(parse_desktop_config(None), DesktopConfig::default());
        assert_eq!(parse_desktop_config(Some("  \n")), DesktopConfig::default());
    }

    #[test]
    fn valid_block_overrides_layout() {
        let config = parse_desktop_config(Some(
            r#"{"layout": {"window_ids": ["welcome-window"], "start_delay_ms": 500}}"#,
        ));
        assert_eq!(config.layout.window_ids, vec!["welcome-window".to_string()]);
        assert_eq!(config.layout.start_delay_ms, 500);
        assert_eq!(config.drag, DesktopConfig::default().drag);
    }

    #[test]
    fn malformed_or_invalid_block_falls_back() {
        assert_eq!(parse_desktop_config(Some("{not json")), DesktopConfig::default());
        assert_eq!(
            parse_desktop_config(Some(r#"{"layout": {"item_width": 0}}"#)),
            DesktopConfig::default()
        );
    }
}
