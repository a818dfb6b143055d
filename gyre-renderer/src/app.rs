use log::{debug, info};

use crate::{
    config::{RenderConfig, RotationAxis},
    error::Error,
    gl::{GlDriver, Program},
};

/// Callbacks a host runtime drives once per frame.
///
/// `init` runs once before the first frame; afterwards every frame calls
/// `update` then `render` with the seconds elapsed since the previous frame.
/// `shutdown` runs once when the host is torn down.
pub trait App {
    /// # Errors
    /// Any error is fatal; the host must not start the frame loop.
    fn init(&mut self) -> Result<(), Error>;

    fn update(&mut self, dt: f32);

    fn render(&mut self, dt: f32);

    fn shutdown(&mut self) {}
}

/// A single triangle spinning about one axis.
///
/// The angle advances by a fixed step per `update` call, independent of the
/// frame time.
#[derive(Debug)]
pub struct SpinningTriangle<D: GlDriver> {
    gl: D,
    program: Option<Program<D>>,
    theta: f64,
    rotation_step: f64,
    rotation_axis: RotationAxis,
}

impl<D: GlDriver> SpinningTriangle<D> {
    pub const VERTEX_GLSL: &'static str = include_str!("../shaders/model.vert");
    pub const FRAGMENT_GLSL: &'static str = include_str!("../shaders/model.frag");

    /// Floats per vertex: homogeneous `x, y, z, w`.
    pub const STRIDE: usize = 4;

    #[rustfmt::skip]
    pub const VERTICES: [f32; 12] = [
    //    x     y    z    w
        -0.5, -0.5, 0.0, 1.0,
         0.5, -0.5, 0.0, 1.0,
         0.0,  0.7, 0.0, 1.0,
    ];

    pub fn new(gl: D, config: &RenderConfig) -> Self {
        Self {
            gl,
            program: None,
            theta: 0.0,
            rotation_step: config.rotation_step,
            rotation_axis: config.rotation_axis,
        }
    }

    /// Current rotation angle in radians.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn program(&self) -> Option<&Program<D>> {
        self.program.as_ref()
    }

    pub fn gl(&self) -> &D {
        &self.gl
    }
}

impl<D: GlDriver> App for SpinningTriangle<D> {
    fn init(&mut self) -> Result<(), Error> {
        let mut program = Program::create(&self.gl, Self::VERTEX_GLSL, Self::FRAGMENT_GLSL)?;
        program.set_vertices(&self.gl, &Self::VERTICES, Self::STRIDE)?;

        info!("triangle ready, spinning about {:?}", self.rotation_axis);
        self.program = Some(program);
        Ok(())
    }

    fn update(&mut self, _dt: f32) {
        self.theta += self.rotation_step;

        if let Some(program) = self.program.as_mut() {
            let model = self.rotation_axis.rotation(self.theta);
            program.set_model_matrix(&self.gl, &model);
        }
    }

    fn render(&mut self, _dt: f32) {
        if let Some(program) = self.program.as_ref() {
            program.render(&self.gl);
        }
    }

    fn shutdown(&mut self) {
        if let Some(program) = self.program.take() {
            program.dispose(&self.gl);
            debug!("triangle disposed after theta = {}", self.theta);
        }
    }
}
