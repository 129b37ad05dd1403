//! Progress bar, back-to-top button and sticky header.
//!
//! All three share one scroll listener; bursts of scroll events are folded
//! into a single update on the next display refresh.

use std::cell::RefCell;
use std::rc::Rc;

use ember_core::ScrollConfig;
use ember_fx::{FrameGate, ScrollMetrics, ScrollView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;
use crate::page::Page;

/// Elements created for the scroll effects, removed again on stop.
pub struct ScrollEffects {
    window: Window,
    created: Vec<Element>,
    gate: Rc<RefCell<FrameGate>>,
    _update: Rc<Closure<dyn FnMut(f64)>>,
}

impl ScrollEffects {
    pub fn remove(&self) {
        if let Some(id) = self.gate.borrow_mut().cancel() {
            let _ = self.window.cancel_animation_frame(id);
        }
        for element in &self.created {
            element.remove();
        }
    }
}

pub fn install(page: &Page) -> Result<Option<ScrollEffects>, JsValue> {
    let config = &page.config.scroll;
    let Some(body) = page.document.body() else {
        return Ok(None);
    };

    let progress = if config.progress_enabled {
        let bar = page.document.create_element("div")?;
        bar.set_class_name(&config.progress_class);
        body.append_child(&bar)?;
        Some(bar.dyn_into::<HtmlElement>()?)
    } else {
        None
    };

    let button = if config.back_to_top_enabled {
        Some(back_to_top_button(page, &body, config)?)
    } else {
        None
    };

    let header = dom::query(&page.document, &config.header_selector);

    if progress.is_none() && button.is_none() && header.is_none() {
        return Ok(None);
    }

    let gate = Rc::new(RefCell::new(FrameGate::new()));
    let update = {
        let window = page.window.clone();
        let document = page.document.clone();
        let config = config.clone();
        let gate = gate.clone();
        let progress = progress.clone();
        let button = button.clone();
        Rc::new(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            let view = ScrollView::compute(&metrics(&window, &document), &config);
            if let Some(bar) = &progress {
                let _ = bar.style().set_property("width", &view.progress_width());
            }
            if let Some(button) = &button {
                let _ = button
                    .class_list()
                    .toggle_with_force(&config.visible_class, view.show_back_to_top);
            }
            if let Some(header) = &header {
                let _ = header
                    .class_list()
                    .toggle_with_force(&config.scrolled_class, view.header_scrolled);
            }
            gate.borrow_mut().release();
        }))
    };

    {
        let window = page.window.clone();
        let update = update.clone();
        let gate = gate.clone();
        page.listen(&page.window, "scroll", move |_| {
            if !gate.borrow_mut().request() {
                return;
            }
            match window.request_animation_frame((*update).as_ref().unchecked_ref()) {
                Ok(id) => gate.borrow_mut().scheduled(id),
                Err(_) => gate.borrow_mut().release(),
            }
        })?;
    }

    let mut created: Vec<Element> = Vec::new();
    created.extend(progress.map(Element::from));
    created.extend(button);
    Ok(Some(ScrollEffects {
        window: page.window.clone(),
        created,
        gate,
        _update: update,
    }))
}

fn back_to_top_button(
    page: &Page,
    body: &HtmlElement,
    config: &ScrollConfig,
) -> Result<Element, JsValue> {
    let button = page.document.create_element("button")?;
    button.set_class_name(&config.back_to_top_class);
    button.set_text_content(Some("↑"));
    button.set_attribute("aria-label", &config.back_to_top_label)?;
    body.append_child(&button)?;

    let window = page.window.clone();
    page.listen(&button, "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    })?;
    Ok(button)
}

fn metrics(window: &Window, document: &Document) -> ScrollMetrics {
    let root = document.document_element();
    ScrollMetrics {
        offset: window.scroll_y().unwrap_or(0.0),
        scroll_height: root.as_ref().map_or(0.0, |r| r.scroll_height() as f64),
        client_height: root.as_ref().map_or(0.0, |r| r.client_height() as f64),
    }
}
