//! Submit feedback and focus effects for forms.

use ember_fx::form::SubmitFeedback;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::dom::{self, ElementRef};
use crate::page::Page;

const FIELD_SELECTOR: &str = "form input, form textarea";

pub fn install(page: &Page) -> Result<(), JsValue> {
    let config = &page.config.forms;
    let feedback = SubmitFeedback::new(config.busy_label.clone());
    let timers = page.timers.clone();
    let restore_after = config.restore_after_ms;

    page.listen(&page.document, "submit", move |event| {
        let Some(form) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some(button) = form.query_selector("button[type=\"submit\"]").ok().flatten() else {
            return;
        };
        let original = feedback.begin(&ElementRef(&button));
        let feedback = feedback.clone();
        let restored = timers.timeout(restore_after, move || {
            feedback.restore(&ElementRef(&button), &original);
        });
        if let Err(err) = restored {
            log::warn!("could not schedule button restore: {err:?}");
        }
    })?;

    if config.focus_effect {
        let accent = page.config.particles.color;
        let shadow = format!("0 4px 12px {}", accent.to_css(0.2));
        page.listen(&page.document, "focusin", move |event| {
            if let Some(field) = focused_field(&event) {
                dom::set_styles(
                    &field,
                    &[
                        ("transform", "scale(1.02)"),
                        ("box-shadow", shadow.as_str()),
                        ("transition", "all 0.3s ease"),
                    ],
                );
            }
        })?;
        page.listen(&page.document, "focusout", |event| {
            if let Some(field) = focused_field(&event) {
                dom::set_styles(&field, &[("transform", "scale(1)"), ("box-shadow", "none")]);
            }
        })?;
    }
    Ok(())
}

fn focused_field(event: &web_sys::Event) -> Option<HtmlElement> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    if !element.matches(FIELD_SELECTOR).unwrap_or(false) {
        return None;
    }
    element.dyn_into::<HtmlElement>().ok()
}
