use web_sys::HtmlCanvasElement;

use crate::{error::Error, gl::GL, js};

/// Owns the canvas and its WebGL2 context.
///
/// The `Renderer` handles per-frame housekeeping (viewport, clearing); the
/// actual drawing is done by a [`Program`](crate::gl::Program) sharing the
/// same context.
#[derive(Debug)]
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    clear_color: (f32, f32, f32),
}

impl Renderer {
    /// Creates a new renderer by querying for a canvas element.
    ///
    /// # Parameters
    /// * `canvas_selector` - CSS selector for the canvas element (e.g., "canvas" or "#my-canvas")
    ///
    /// # Errors
    /// * `Error::Initialization` - canvas not found, or WebGL2 not supported
    pub fn create(canvas_selector: &str) -> Result<Self, Error> {
        let canvas = js::get_canvas_by_selector(canvas_selector)?;
        Self::create_with_canvas(canvas)
    }

    /// Creates a new renderer from an existing HTML canvas element.
    pub fn create_with_canvas(canvas: HtmlCanvasElement) -> Result<Self, Error> {
        let (width, height) = (canvas.width(), canvas.height());

        let gl = js::get_webgl2_context(&canvas)?;
        log::info!("WebGL2 context ready, canvas {width}x{height}");

        let mut renderer = Self { gl, canvas, clear_color: (0.0, 0.0, 0.0) };
        renderer.resize(width as _, height as _);
        Ok(renderer)
    }

    /// Sets the color used by [`Renderer::begin_frame`].
    pub fn clear_color(mut self, (r, g, b): (f32, f32, f32)) -> Self {
        self.clear_color = (r, g, b);
        self
    }

    /// Resizes the canvas and updates the viewport.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.gl.viewport(0, 0, width, height);
    }

    /// Clears the color and depth buffers. Components are in `[0.0, 1.0]`.
    pub fn clear(&self, r: f32, g: f32, b: f32) {
        self.gl.clear_color(r, g, b, 1.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    /// Begins a new rendering frame.
    pub fn begin_frame(&self) {
        let (r, g, b) = self.clear_color;
        self.clear(r, g, b);
    }

    /// Returns a reference to the WebGL2 rendering context.
    pub fn gl(&self) -> &GL {
        &self.gl
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the current canvas dimensions as `(width, height)` in pixels.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas.width() as i32, self.canvas.height() as i32)
    }
}
