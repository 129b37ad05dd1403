//! Thin helpers over `web-sys` element access.

use ember_fx::ElementOps;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Borrowed element usable with the `ember-fx` effect models.
pub struct ElementRef<'a>(pub &'a Element);

impl ElementOps for ElementRef<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.0.remove_attribute(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            let style = element.style();
            if value.is_empty() {
                let _ = style.remove_property(property);
            } else {
                let _ = style.set_property(property, value);
            }
        }
    }
}

/// All elements matching `selector`. Invalid selectors match nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        log::debug!("invalid selector `{selector}`");
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First element matching `selector`, if any.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// The element children of `parent`, in document order.
pub fn children(parent: &Element) -> Vec<Element> {
    let collection = parent.children();
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

/// Set several inline style properties at once.
pub fn set_styles(element: &HtmlElement, properties: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in properties {
        let _ = style.set_property(property, value);
    }
}
