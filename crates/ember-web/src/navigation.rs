//! In-page anchor scrolling and category deep links.

use ember_fx::navigation::{anchor_click, category_target, highlight_animation};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::page::Page;
use crate::styles;

/// Smooth-scroll clicks on `href="#..."` links to their target.
pub fn smooth_anchors(page: &Page) -> Result<(), JsValue> {
    let document = page.document.clone();
    page.listen(&page.document, "click", move |event| {
        let Some(anchor) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|e| e.closest("a[href^=\"#\"]").ok().flatten())
        else {
            return;
        };
        let href = anchor.get_attribute("href").unwrap_or_default();
        let click = anchor_click(&href);
        if click.prevent_default {
            event.prevent_default();
        }
        if let Some(target) = click.target_id.and_then(|id| document.get_element_by_id(id)) {
            scroll_to(&target);
        }
    })
}

/// On category pages, scroll to and pulse the section named in the URL hash.
pub fn category_highlight(page: &Page) -> Result<(), JsValue> {
    let config = &page.config.categories;
    page.styles
        .inject("highlight", &styles::highlight_css(page.config.particles.color));

    let location = page.window.location();
    let pathname = location.pathname()?;
    let hash = location.hash()?;
    let Some(id) = category_target(&pathname, &hash, config) else {
        return Ok(());
    };
    let id = js_sys::decode_uri_component(id)
        .map(String::from)
        .unwrap_or_else(|_| id.to_string());

    let document = page.document.clone();
    let timers = page.timers.clone();
    let highlight_ms = config.highlight_ms;
    let animation = highlight_animation(config);
    page.timers.timeout(config.delay_ms, move || {
        let Some(target) = document.get_element_by_id(&id) else {
            log::debug!("category `{id}` not found");
            return;
        };
        scroll_to(&target);
        if let Some(element) = target.dyn_ref::<HtmlElement>() {
            let _ = element
                .style()
                .set_property("animation", &animation);
            let element = element.clone();
            let _ = timers.timeout(highlight_ms, move || {
                let _ = element.style().remove_property("animation");
            });
        }
    })?;
    Ok(())
}

fn scroll_to(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
