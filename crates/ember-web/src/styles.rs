//! Keyframe and helper stylesheets injected into `<head>`.

use std::cell::RefCell;

use ember_core::Rgb;
use web_sys::{Document, Element};

/// Injects each named stylesheet at most once per instance.
pub struct StyleInjector {
    document: Document,
    injected: RefCell<Vec<(&'static str, Element)>>,
}

impl StyleInjector {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            injected: RefCell::new(Vec::new()),
        }
    }

    pub fn inject(&self, name: &'static str, css: &str) {
        if self.injected.borrow().iter().any(|(n, _)| *n == name) {
            return;
        }
        let Some(head) = self.document.head() else {
            return;
        };
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        let _ = style.set_attribute("data-ember", name);
        style.set_text_content(Some(css));
        if head.append_child(&style).is_ok() {
            self.injected.borrow_mut().push((name, style));
        }
    }

    /// Remove everything this instance injected.
    pub fn remove_all(&self) {
        for (_, style) in self.injected.borrow_mut().drain(..) {
            style.remove();
        }
    }
}

pub fn reveal_css(class: &str) -> String {
    format!(
        ".{class} {{\n  opacity: 1 !important;\n  transform: translateY(0) !important;\n}}\n"
    )
}

pub const BLINK_CSS: &str = "@keyframes blink {\n  0%, 49% { border-color: var(--primary-color); }\n  50%, 100% { border-color: transparent; }\n}\n";

pub const RAINBOW_CSS: &str = "@keyframes rainbow {\n  0% { filter: hue-rotate(0deg); }\n  100% { filter: hue-rotate(360deg); }\n}\n";

pub const COLOR_PULSE_CSS: &str = "@keyframes colorPulse {\n  0%, 100% { filter: hue-rotate(0deg); }\n  50% { filter: hue-rotate(10deg); }\n}\n\n.logo-svg circle,\n.header__logo svg circle {\n  animation: colorPulse 4s ease-in-out infinite;\n}\n";

pub fn highlight_css(accent: Rgb) -> String {
    format!(
        "@keyframes highlightPulse {{\n  0%, 100% {{\n    box-shadow: 0 8px 30px rgba(0, 0, 0, 0.08);\n    border-color: {};\n  }}\n  50% {{\n    box-shadow: 0 12px 50px {};\n    border-color: {};\n  }}\n}}\n",
        accent.to_css(0.1),
        accent.to_css(0.4),
        accent.to_css(0.6),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_css_targets_class() {
        let css = reveal_css("animate-in");
        assert!(css.starts_with(".animate-in {"));
        assert!(css.contains("opacity: 1 !important;"));
    }

    #[test]
    fn test_highlight_css_uses_accent() {
        let css = highlight_css(Rgb::ACCENT);
        assert!(css.contains("@keyframes highlightPulse"));
        assert!(css.contains("rgba(249, 115, 22, 0.4)"));
        assert!(css.contains("rgba(249, 115, 22, 0.6)"));
    }
}
