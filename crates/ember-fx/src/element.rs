//! Minimal element interface the page effects are written against.

/// Attribute, class, text and inline-style access on a document element.
///
/// Methods take `&self` because DOM handles are shared references; failures
/// are swallowed by implementations, a missing effect is never an error.
pub trait ElementOps {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    /// Set an inline style property. An empty value removes it.
    fn set_style(&self, property: &str, value: &str);

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            self.set_attribute("disabled", "");
        } else {
            self.remove_attribute("disabled");
        }
    }

    fn is_disabled(&self) -> bool {
        self.attribute("disabled").is_some()
    }
}

/// What happens to a watched element when it scrolls into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Add a class (reveal animations).
    AddClass(String),
    /// Promote a deferred image source to `src` and drop the lazy marker.
    LoadImage {
        source_attribute: String,
        lazy_class: String,
    },
}

impl Reaction {
    pub fn apply<E: ElementOps + ?Sized>(&self, element: &E) {
        match self {
            Reaction::AddClass(class) => element.add_class(class),
            Reaction::LoadImage {
                source_attribute,
                lazy_class,
            } => {
                if let Some(source) = element.attribute(source_attribute) {
                    element.set_attribute("src", &source);
                }
                element.remove_class(lazy_class);
            }
        }
    }
}

/// Inline styles that keep a reveal target hidden until its class lands.
const HIDDEN_STYLES: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.6s ease, transform 0.6s ease"),
];

/// Hide `element` until a reveal reaction adds its class.
pub fn prepare_hidden<E: ElementOps + ?Sized>(element: &E) {
    for (property, value) in HIDDEN_STYLES {
        element.set_style(property, value);
    }
}

/// Undo [`prepare_hidden`], whether or not the element was revealed.
pub fn clear_hidden<E: ElementOps + ?Sized>(element: &E) {
    for (property, _) in HIDDEN_STYLES {
        element.set_style(property, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockElement;

    #[test]
    fn test_lazy_image_promotes_source() {
        let img = MockElement::default()
            .with_attribute("data-src", "/images/hero.webp")
            .with_class("lazy");
        let reaction = Reaction::LoadImage {
            source_attribute: "data-src".to_string(),
            lazy_class: "lazy".to_string(),
        };

        reaction.apply(&img);

        assert_eq!(img.attribute("src").as_deref(), Some("/images/hero.webp"));
        assert!(!img.has_class("lazy"));
    }

    #[test]
    fn test_lazy_image_without_source_keeps_src_unset() {
        let img = MockElement::default().with_class("lazy");
        Reaction::LoadImage {
            source_attribute: "data-src".to_string(),
            lazy_class: "lazy".to_string(),
        }
        .apply(&img);

        assert_eq!(img.attribute("src"), None);
        assert!(!img.has_class("lazy"));
    }

    #[test]
    fn test_add_class_reaction() {
        let card = MockElement::default();
        Reaction::AddClass("animate-in".to_string()).apply(&card);
        assert!(card.has_class("animate-in"));
    }

    #[test]
    fn test_clear_hidden_leaves_no_inline_styles() {
        let card = MockElement::default();
        prepare_hidden(&card);
        assert_eq!(card.styles.borrow().get("opacity").map(String::as_str), Some("0"));

        Reaction::AddClass("animate-in".to_string()).apply(&card);
        clear_hidden(&card);

        assert!(card.styles.borrow().is_empty());
        assert!(card.has_class("animate-in"));
    }

    #[test]
    fn test_clear_hidden_on_unrevealed_element() {
        let card = MockElement::default();
        prepare_hidden(&card);
        clear_hidden(&card);
        assert!(card.styles.borrow().is_empty());
    }

    #[test]
    fn test_disabled_roundtrip() {
        let button = MockElement::default();
        button.set_disabled(true);
        assert!(button.is_disabled());
        button.set_disabled(false);
        assert!(!button.is_disabled());
    }
}
