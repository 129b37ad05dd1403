//! Resolution of in-page fragment targets.

use ember_core::CategoryConfig;

/// Element id an in-page link points at: `#intro` -> `intro`.
///
/// Returns `None` for anything that is not a same-page fragment with an id,
/// including a bare `#`.
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// How a click on a same-page link is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorClick<'a> {
    /// Suppress the browser's own jump, even when no target exists.
    pub prevent_default: bool,
    /// Id to scroll to.
    pub target_id: Option<&'a str>,
}

pub fn anchor_click(href: &str) -> AnchorClick<'_> {
    AnchorClick {
        prevent_default: href.starts_with('#'),
        target_id: fragment_id(href),
    }
}

/// Inline `animation` value for a highlighted category section.
pub fn highlight_animation(config: &CategoryConfig) -> String {
    format!("highlightPulse {}ms ease-in-out", config.highlight_ms)
}

/// Element id to highlight when a categories page is opened with a fragment.
///
/// `hash` is the location hash including its leading `#` (empty when absent).
pub fn category_target<'a>(
    pathname: &str,
    hash: &'a str,
    config: &CategoryConfig,
) -> Option<&'a str> {
    if !pathname.contains(config.path_fragment.as_str()) {
        return None;
    }
    fragment_id(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#intro"), Some("intro"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("/about#team"), None);
    }

    #[test]
    fn test_anchor_click_always_prevents_jump() {
        assert_eq!(
            anchor_click("#missing-section"),
            AnchorClick {
                prevent_default: true,
                target_id: Some("missing-section"),
            }
        );
        assert_eq!(
            anchor_click("#"),
            AnchorClick {
                prevent_default: true,
                target_id: None,
            }
        );
    }

    #[test]
    fn test_highlight_animation_follows_config() {
        let mut config = CategoryConfig::default();
        assert_eq!(highlight_animation(&config), "highlightPulse 2000ms ease-in-out");
        config.highlight_ms = 500;
        assert_eq!(highlight_animation(&config), "highlightPulse 500ms ease-in-out");
    }

    #[test]
    fn test_category_target() {
        let config = CategoryConfig::default();
        assert_eq!(
            category_target("/categories/", "#rust", &config),
            Some("rust")
        );
        assert_eq!(category_target("/categories/", "", &config), None);
        assert_eq!(category_target("/blog/", "#rust", &config), None);
    }
}
