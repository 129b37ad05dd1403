//! Submit button feedback while a form is being sent.

use crate::element::ElementOps;

/// Attribute holding the label a busy button will be restored to.
pub const ORIGINAL_LABEL_ATTRIBUTE: &str = "data-original-text";

/// Disables a submit button and swaps its label until the page navigates
/// away or the fallback timer restores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFeedback {
    busy_label: String,
}

impl SubmitFeedback {
    pub fn new(busy_label: impl Into<String>) -> Self {
        Self {
            busy_label: busy_label.into(),
        }
    }

    /// Put `button` in the busy state and return its original label.
    ///
    /// A button that is already busy keeps the label remembered from the
    /// first submit, so a double submit cannot restore "Sending...".
    pub fn begin<E: ElementOps + ?Sized>(&self, button: &E) -> String {
        let original = match button.attribute(ORIGINAL_LABEL_ATTRIBUTE) {
            Some(label) if button.is_disabled() => label,
            _ => button.text(),
        };
        button.set_disabled(true);
        button.set_attribute(ORIGINAL_LABEL_ATTRIBUTE, &original);
        button.set_text(&self.busy_label);
        original
    }

    /// Re-enable `button` with its original label.
    pub fn restore<E: ElementOps + ?Sized>(&self, button: &E, original: &str) {
        button.set_disabled(false);
        button.set_text(original);
        button.set_style("background", "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockElement;

    #[test]
    fn test_begin_and_restore() {
        let feedback = SubmitFeedback::new("Sending...");
        let button = MockElement::default().with_text("Send message");
        button.set_style("background", "red");

        let original = feedback.begin(&button);
        assert_eq!(original, "Send message");
        assert!(button.is_disabled());
        assert_eq!(button.text(), "Sending...");
        assert_eq!(
            button.attribute(ORIGINAL_LABEL_ATTRIBUTE).as_deref(),
            Some("Send message")
        );

        feedback.restore(&button, &original);
        assert!(!button.is_disabled());
        assert_eq!(button.text(), "Send message");
        assert!(button.styles.borrow().get("background").is_none());
    }

    #[test]
    fn test_double_submit_keeps_first_label() {
        let feedback = SubmitFeedback::new("Sending...");
        let button = MockElement::default().with_text("Subscribe");

        feedback.begin(&button);
        let second = feedback.begin(&button);
        assert_eq!(second, "Subscribe");

        feedback.restore(&button, &second);
        assert_eq!(button.text(), "Subscribe");
    }
}
