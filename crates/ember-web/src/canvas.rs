//! Canvas overlay for the particle field.

use std::f64::consts::TAU;

use ember_core::{ParticleConfig, Rgb};
use ember_fx::{Stage, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::dom;

/// A 2D canvas layered over its container.
pub struct CanvasSurface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Match the canvas to the container's rendered size and return it.
    pub fn fit_to_container(&self) -> (f64, f64) {
        let width = self.container.offset_width().max(0) as u32;
        let height = self.container.offset_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width as f64, height as f64)
    }

    /// Take the canvas out of the document.
    pub fn detach(&self) {
        self.canvas.remove();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, alpha: f64) {
        self.context.begin_path();
        if self.context.arc(x, y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.context.set_fill_style_str(&color.to_css(alpha));
        self.context.fill();
    }

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
        alpha: f64,
    ) {
        self.context.begin_path();
        self.context.set_stroke_style_str(&color.to_css(alpha));
        self.context.set_line_width(width);
        self.context.move_to(from.0, from.1);
        self.context.line_to(to.0, to.1);
        self.context.stroke();
    }
}

/// Mounts canvases into a live document.
pub struct DomStage<'a> {
    document: &'a Document,
}

impl<'a> DomStage<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }
}

impl Stage for DomStage<'_> {
    type Surface = CanvasSurface;

    fn mount(
        &mut self,
        selector: &str,
        config: &ParticleConfig,
    ) -> Option<(CanvasSurface, f64, f64)> {
        let container = dom::query(self.document, selector)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let canvas = self
            .document
            .create_element("canvas")
            .ok()?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        // Nothing has touched the document up to here.
        let opacity = config.surface_opacity.to_string();
        dom::set_styles(
            &canvas,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("width", "100%"),
                ("height", "100%"),
                ("pointer-events", "none"),
                ("opacity", opacity.as_str()),
                ("z-index", "0"),
            ],
        );

        let position = container
            .style()
            .get_property_value("position")
            .unwrap_or_default();
        if position != "relative" && position != "absolute" {
            let _ = container.style().set_property("position", "relative");
        }

        let first = container.first_child();
        container.insert_before(&canvas, first.as_ref()).ok()?;

        let surface = CanvasSurface {
            container,
            canvas,
            context,
        };
        let (width, height) = surface.fit_to_container();
        Some((surface, width, height))
    }
}
