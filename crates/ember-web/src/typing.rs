//! Typewriter reveal for long headings.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ember_fx::typing::Typewriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::dom;
use crate::page::Page;
use crate::styles;

const CURSOR_STYLES: [&str; 3] = ["border-right", "padding-right", "animation"];

/// A heading being typed out. [`TypingRun::finish`] shows the full text.
pub struct TypingRun {
    heading: HtmlElement,
    writer: Rc<RefCell<Typewriter>>,
}

impl TypingRun {
    pub fn finish(&self) {
        self.heading
            .set_text_content(Some(&self.writer.borrow().full_text()));
        clear_cursor(&self.heading);
    }
}

pub fn install(page: &Page) -> Result<Vec<TypingRun>, JsValue> {
    let config = &page.config.typing;
    let mut runs = Vec::new();

    for heading in dom::query_all(&page.document, &config.selector) {
        let Ok(heading) = heading.dyn_into::<HtmlElement>() else {
            continue;
        };
        let text = heading.text_content().unwrap_or_default();
        let Some(writer) = Typewriter::for_heading(&text, config.min_length) else {
            continue;
        };
        if runs.is_empty() {
            page.styles.inject("blink", styles::BLINK_CSS);
        }

        heading.set_text_content(Some(""));
        dom::set_styles(
            &heading,
            &[
                ("border-right", "2px solid var(--primary-color)"),
                ("padding-right", "5px"),
                ("animation", "blink 0.7s step-end infinite"),
            ],
        );

        let writer = Rc::new(RefCell::new(writer));
        schedule(page, &heading, &writer)?;
        runs.push(TypingRun { heading, writer });
    }
    Ok(runs)
}

fn schedule(
    page: &Page,
    heading: &HtmlElement,
    writer: &Rc<RefCell<Typewriter>>,
) -> Result<(), JsValue> {
    let timers = page.timers.clone();
    let heading = heading.clone();
    let writer = writer.clone();
    let char_delay = page.config.typing.char_delay_ms;

    page.timers.timeout(page.config.typing.start_delay_ms, move || {
        let handle = Rc::new(Cell::new(None));
        let tick = {
            let timers = timers.clone();
            let handle = handle.clone();
            move || match writer.borrow_mut().tick() {
                Some(visible) => heading.set_text_content(Some(&visible)),
                None => {
                    clear_cursor(&heading);
                    if let Some(id) = handle.get() {
                        timers.clear(id);
                    }
                }
            }
        };
        match timers.interval(char_delay, tick) {
            Ok(id) => handle.set(Some(id)),
            Err(err) => log::warn!("could not start typing animation: {err:?}"),
        }
    })?;
    Ok(())
}

fn clear_cursor(heading: &HtmlElement) {
    let style = heading.style();
    for property in CURSOR_STYLES {
        let _ = style.remove_property(property);
    }
}
