mod driver;
mod program;
#[cfg(test)]
pub(crate) mod recording;
mod renderer;

pub use driver::*;
pub use program::*;
pub use renderer::*;

pub type GL = web_sys::WebGl2RenderingContext;
