mod error;
mod gl;

pub(crate) mod js;

pub mod app;
pub mod config;
pub mod logging;
pub mod runtime;

pub use gyre_math::{Mat4, Radians, Vec4};

pub use crate::{
    app::{App, SpinningTriangle},
    config::{RenderConfig, RotationAxis},
    error::Error,
    gl::{GlDriver, Program, Renderer, ShaderStage, UniformSlot, MODEL_MATRIX, POSITION_ATTRIB},
};
