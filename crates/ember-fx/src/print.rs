//! Body class toggled while the page is being printed.

use crate::element::ElementOps;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintMode {
    class: String,
}

impl PrintMode {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    pub fn before_print<E: ElementOps + ?Sized>(&self, body: &E) {
        body.add_class(&self.class);
    }

    pub fn after_print<E: ElementOps + ?Sized>(&self, body: &E) {
        body.remove_class(&self.class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockElement;

    #[test]
    fn test_print_toggle() {
        let mode = PrintMode::new("printing");
        let body = MockElement::default().with_class("theme-dark");

        mode.before_print(&body);
        assert!(body.has_class("printing"));
        mode.after_print(&body);
        assert!(!body.has_class("printing"));
        assert!(body.has_class("theme-dark"));
    }
}
