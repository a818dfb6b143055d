use gyre_math::Mat4;
use log::{debug, error, info};

use crate::{
    error::Error,
    gl::{GlDriver, ShaderStage, UniformSlot},
};

/// Vertex attribute slot holding vertex positions; fixed by the shader.
pub const POSITION_ATTRIB: u32 = 0;

/// Uniform holding the model matrix; fixed by the shader.
pub const MODEL_MATRIX: UniformSlot = UniformSlot { location: 1, name: "u_model" };

/// A linked vertex + fragment shader pipeline and the single vertex buffer it
/// draws from.
///
/// A `Program` only exists in the linked state: [`Program::create`] either
/// returns a ready pipeline or an error. [`Program::dispose`] consumes it.
/// The vertex array and buffer are created by the first
/// [`Program::set_vertices`] call and reused afterwards.
#[derive(Debug)]
pub struct Program<D: GlDriver> {
    program: D::Program,
    vertex_shader: D::Shader,
    fragment_shader: D::Shader,
    model_location: D::UniformLocation,
    vertex_array: Option<D::VertexArray>,
    vertex_buffer: Option<D::Buffer>,
    vertex_count: i32,
    model: Mat4,
}

impl<D: GlDriver> Program<D> {
    /// Compiles both shader stages, links them, and sets the model matrix to
    /// identity.
    ///
    /// # Errors
    /// * `Error::Shader` - a stage failed to compile or the program failed to
    ///   link; the message carries the driver's info log.
    /// * `Error::Resource` - the model matrix uniform is missing from the
    ///   linked program.
    pub fn create(gl: &D, vertex_source: &str, fragment_source: &str) -> Result<Self, Error> {
        let program = gl.create_program().ok_or_else(Error::shader_program_creation_failed)?;

        let (vertex_shader, fragment_shader) =
            match attach_shaders(gl, &program, vertex_source, fragment_source) {
                Ok(shaders) => shaders,
                Err(e) => {
                    gl.delete_program(&program);
                    return Err(e);
                },
            };

        let model_location = match link(gl, &program)
            .and_then(|_| resolve_uniform(gl, &program, MODEL_MATRIX))
        {
            Ok(location) => location,
            Err(e) => {
                release_shaders(gl, &program, &vertex_shader, &fragment_shader);
                gl.delete_program(&program);
                return Err(e);
            },
        };
        info!("shader program linked");

        let mut shader = Self {
            program,
            vertex_shader,
            fragment_shader,
            model_location,
            vertex_array: None,
            vertex_buffer: None,
            vertex_count: 0,
            model: Mat4::identity(),
        };
        shader.set_model_matrix(gl, &Mat4::identity());

        Ok(shader)
    }

    /// Uploads vertex positions as static draw data.
    ///
    /// Each vertex is `stride` consecutive floats (1 to 4) read through
    /// attribute slot [`POSITION_ATTRIB`]. `stride` must divide
    /// `vertices.len()`; this is only checked in debug builds.
    ///
    /// # Errors
    /// * `Error::Resource` - the vertex array or buffer could not be created
    ///   on the first call.
    pub fn set_vertices(&mut self, gl: &D, vertices: &[f32], stride: usize) -> Result<(), Error> {
        debug_assert!((1..=4).contains(&stride), "stride must be 1..=4, was {stride}");
        debug_assert!(
            vertices.len() % stride == 0,
            "stride {stride} does not divide {} floats",
            vertices.len()
        );

        self.vertex_count = vertex_count(vertices.len(), stride);

        if self.vertex_array.is_none() {
            let vao = gl.create_vertex_array().ok_or_else(Error::vertex_array_creation_failed)?;
            debug!("created vertex array");
            self.vertex_array = Some(vao);
        }
        gl.bind_vertex_array(self.vertex_array.as_ref());

        if self.vertex_buffer.is_none() {
            let buffer = match gl.create_buffer() {
                Some(buffer) => buffer,
                None => {
                    gl.bind_vertex_array(None);
                    return Err(Error::buffer_creation_failed("vertex"));
                },
            };
            debug!("created vertex buffer");
            self.vertex_buffer = Some(buffer);
        }
        gl.bind_array_buffer(self.vertex_buffer.as_ref());
        gl.upload_static_f32(vertices);

        gl.vertex_attrib_f32(POSITION_ATTRIB, stride as i32);
        gl.bind_vertex_array(None);

        debug!("uploaded {} vertices", self.vertex_count);
        Ok(())
    }

    /// Replaces the model matrix uniform.
    ///
    /// The matrix is sent in its row-major layout with the driver's
    /// row-major (transpose) flag set.
    pub fn set_model_matrix(&mut self, gl: &D, model: &Mat4) {
        self.model = *model;

        self.bind(gl);
        gl.uniform_matrix4(&self.model_location, true, &self.model.data);
        self.unbind(gl);
    }

    pub fn bind(&self, gl: &D) {
        gl.use_program(Some(&self.program));
    }

    pub fn unbind(&self, gl: &D) {
        gl.use_program(None);
    }

    /// Draws the uploaded vertices as a triangle list.
    pub fn render(&self, gl: &D) {
        self.bind(gl);

        if let Some(vao) = self.vertex_array.as_ref() {
            gl.bind_vertex_array(Some(vao));
            gl.enable_vertex_attrib(POSITION_ATTRIB);

            gl.draw_triangles(0, self.vertex_count);

            gl.disable_vertex_attrib(POSITION_ATTRIB);
            gl.bind_vertex_array(None);
        }

        self.unbind(gl);
    }

    /// Releases all GPU resources owned by this program.
    pub fn dispose(self, gl: &D) {
        self.unbind(gl);

        release_shaders(gl, &self.program, &self.vertex_shader, &self.fragment_shader);
        gl.delete_program(&self.program);

        if let Some(buffer) = self.vertex_buffer.as_ref() {
            gl.delete_buffer(buffer);
        }
        if let Some(vao) = self.vertex_array.as_ref() {
            gl.delete_vertex_array(vao);
        }

        info!("shader program disposed");
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model
    }

    pub fn vertex_array(&self) -> Option<&D::VertexArray> {
        self.vertex_array.as_ref()
    }

    pub fn vertex_buffer(&self) -> Option<&D::Buffer> {
        self.vertex_buffer.as_ref()
    }
}

/// Compiles one stage and attaches it to `program`.
pub(crate) fn attach_shader<D: GlDriver>(
    gl: &D,
    program: &D::Program,
    source: &str,
    stage: ShaderStage,
) -> Result<D::Shader, Error> {
    let shader = gl.create_shader(stage).ok_or_else(|| Error::shader_creation_failed(stage))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl.compile_status(&shader) {
        let log = gl.shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(&shader);

        error!("{stage} shader failed to compile");
        return Err(Error::shader_compile_failed(stage, log));
    }

    gl.attach_shader(program, &shader);
    debug!("attached {stage} shader");

    Ok(shader)
}

fn attach_shaders<D: GlDriver>(
    gl: &D,
    program: &D::Program,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<(D::Shader, D::Shader), Error> {
    let vertex_shader = attach_shader(gl, program, vertex_source, ShaderStage::Vertex)?;

    match attach_shader(gl, program, fragment_source, ShaderStage::Fragment) {
        Ok(fragment_shader) => Ok((vertex_shader, fragment_shader)),
        Err(e) => {
            gl.detach_shader(program, &vertex_shader);
            gl.delete_shader(&vertex_shader);
            Err(e)
        },
    }
}

fn link<D: GlDriver>(gl: &D, program: &D::Program) -> Result<(), Error> {
    gl.link_program(program);

    if !gl.link_status(program) {
        let log = gl.program_info_log(program).unwrap_or_default();

        error!("shader program failed to link");
        return Err(Error::shader_link_failed(log));
    }

    Ok(())
}

/// Vertices in `len` floats, saturating at `i32::MAX`; overflow is only
/// checked in debug builds.
fn vertex_count(len: usize, stride: usize) -> i32 {
    let count = i32::try_from(len / stride);
    debug_assert!(count.is_ok(), "{} vertices exceed the draw call limit", len / stride);
    count.unwrap_or(i32::MAX)
}

fn resolve_uniform<D: GlDriver>(
    gl: &D,
    program: &D::Program,
    slot: UniformSlot,
) -> Result<D::UniformLocation, Error> {
    gl.uniform_location(program, slot)
        .ok_or_else(|| Error::uniform_location_failed(slot.name))
}

/// Detaches, then deletes, both stages.
fn release_shaders<D: GlDriver>(
    gl: &D,
    program: &D::Program,
    vertex_shader: &D::Shader,
    fragment_shader: &D::Shader,
) {
    gl.detach_shader(program, vertex_shader);
    gl.detach_shader(program, fragment_shader);

    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingDriver};

    const VERTEX_GLSL: &str = "vertex";
    const FRAGMENT_GLSL: &str = "fragment";

    #[rustfmt::skip]
    const TRIANGLE: [f32; 12] = [
        -0.5, -0.5, 0.0, 1.0,
         0.5, -0.5, 0.0, 1.0,
         0.0,  0.7, 0.0, 1.0,
    ];

    fn create(gl: &RecordingDriver) -> Program<RecordingDriver> {
        Program::create(gl, VERTEX_GLSL, FRAGMENT_GLSL).unwrap()
    }

    #[test]
    fn test_create_compiles_links_and_uploads_identity() {
        let gl = RecordingDriver::new();
        let program = create(&gl);

        assert_eq!(
            gl.calls(),
            vec![
                Call::CreateProgram(1),
                Call::CreateShader(ShaderStage::Vertex, 2),
                Call::ShaderSource(2),
                Call::CompileShader(2),
                Call::AttachShader { program: 1, shader: 2 },
                Call::CreateShader(ShaderStage::Fragment, 3),
                Call::ShaderSource(3),
                Call::CompileShader(3),
                Call::AttachShader { program: 1, shader: 3 },
                Call::LinkProgram(1),
                Call::UseProgram(Some(1)),
                Call::UniformMatrix4 {
                    location: MODEL_MATRIX.location,
                    row_major: true,
                    data: Mat4::identity().data,
                },
                Call::UseProgram(None),
            ]
        );
        assert_eq!(program.model_matrix(), &Mat4::identity());
        assert_eq!(program.vertex_count(), 0);
        assert!(program.vertex_array().is_none());
    }

    #[test]
    fn test_vertex_compile_failure_reports_log() {
        let gl = RecordingDriver::failing_compile(ShaderStage::Vertex, "0:1: syntax error");
        let err = Program::create(&gl, VERTEX_GLSL, FRAGMENT_GLSL).unwrap_err();

        assert!(matches!(err, Error::Shader(_)));
        let message = err.to_string();
        assert!(message.contains("vertex"), "{message}");
        assert!(message.contains("0:1: syntax error"), "{message}");

        // the failed shader is never attached, and nothing is leaked
        assert_eq!(gl.count(|c| matches!(c, Call::AttachShader { .. })), 0);
        assert!(gl.calls().contains(&Call::DeleteShader(2)));
        assert_eq!(gl.calls().last(), Some(&Call::DeleteProgram(1)));
        assert_eq!(gl.count(|c| matches!(c, Call::LinkProgram(_))), 0);
    }

    #[test]
    fn test_fragment_compile_failure_releases_vertex_stage() {
        let gl = RecordingDriver::failing_compile(ShaderStage::Fragment, "bad fragment");
        let err = Program::create(&gl, VERTEX_GLSL, FRAGMENT_GLSL).unwrap_err();

        assert!(err.to_string().contains("fragment shader:\nbad fragment"));

        let calls = gl.calls();
        let tail = &calls[calls.len() - 4..];
        assert_eq!(
            tail,
            &[
                Call::DeleteShader(3),
                Call::DetachShader { program: 1, shader: 2 },
                Call::DeleteShader(2),
                Call::DeleteProgram(1),
            ]
        );
    }

    #[test]
    fn test_link_failure_surfaces_program_log() {
        let gl = RecordingDriver::failing_link("vertex output v_color not read");
        let err = Program::create(&gl, VERTEX_GLSL, FRAGMENT_GLSL).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Shader error: Unable to link shader program:\nvertex output v_color not read"
        );
        assert_eq!(gl.count(|c| matches!(c, Call::DetachShader { .. })), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 2);
        assert_eq!(gl.calls().last(), Some(&Call::DeleteProgram(1)));
        assert_eq!(gl.count(|c| matches!(c, Call::UniformMatrix4 { .. })), 0);
    }

    #[test]
    fn test_missing_model_uniform_is_resource_error() {
        let gl = RecordingDriver::without_uniforms();
        let err = Program::create(&gl, VERTEX_GLSL, FRAGMENT_GLSL).unwrap_err();

        assert!(matches!(err, Error::Resource(_)));
        assert!(err.to_string().contains("u_model"));
        assert_eq!(gl.calls().last(), Some(&Call::DeleteProgram(1)));
    }

    #[test]
    fn test_set_vertices_counts_triangle_vertices() {
        let gl = RecordingDriver::new();
        let mut program = create(&gl);
        gl.clear_calls();

        program.set_vertices(&gl, &TRIANGLE, 4).unwrap();

        assert_eq!(program.vertex_count(), 3);
        assert_eq!(
            gl.calls(),
            vec![
                Call::CreateVertexArray(4),
                Call::BindVertexArray(Some(4)),
                Call::CreateBuffer(5),
                Call::BindArrayBuffer(Some(5)),
                Call::UploadStatic(TRIANGLE.to_vec()),
                Call::VertexAttrib { index: POSITION_ATTRIB, size: 4 },
                Call::BindVertexArray(None),
            ]
        );
    }

    #[test]
    fn test_set_vertices_reuses_vertex_array_and_buffer() {
        let gl = RecordingDriver::new();
        let mut program = create(&gl);

        program.set_vertices(&gl, &TRIANGLE, 4).unwrap();
        let (vao, vbo) = (program.vertex_array().copied(), program.vertex_buffer().copied());

        program.set_vertices(&gl, &TRIANGLE, 4).unwrap();
        program.set_vertices(&gl, &TRIANGLE[..8], 2).unwrap();

        assert_eq!(program.vertex_array().copied(), vao);
        assert_eq!(program.vertex_buffer().copied(), vbo);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateVertexArray(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateBuffer(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::UploadStatic(_))), 3);
        assert_eq!(program.vertex_count(), 4);
    }

    #[test]
    fn test_set_model_matrix_uploads_row_major() {
        let gl = RecordingDriver::new();
        let mut program = create(&gl);
        gl.clear_calls();

        let model = Mat4::translate(1.0, 2.0, 3.0);
        program.set_model_matrix(&gl, &model);

        assert_eq!(
            gl.calls(),
            vec![
                Call::UseProgram(Some(1)),
                Call::UniformMatrix4 { location: 1, row_major: true, data: model.data },
                Call::UseProgram(None),
            ]
        );
        assert_eq!(program.model_matrix(), &model);
    }

    #[test]
    fn test_render_binds_draws_and_unwinds_in_order() {
        let gl = RecordingDriver::new();
        let mut program = create(&gl);
        program.set_vertices(&gl, &TRIANGLE, 4).unwrap();
        gl.clear_calls();

        program.render(&gl);

        assert_eq!(
            gl.calls(),
            vec![
                Call::UseProgram(Some(1)),
                Call::BindVertexArray(Some(4)),
                Call::EnableAttrib(POSITION_ATTRIB),
                Call::DrawTriangles { first: 0, count: 3 },
                Call::DisableAttrib(POSITION_ATTRIB),
                Call::BindVertexArray(None),
                Call::UseProgram(None),
            ]
        );
    }

    #[test]
    fn test_render_without_vertices_only_binds() {
        let gl = RecordingDriver::new();
        let program = create(&gl);
        gl.clear_calls();

        program.render(&gl);

        assert_eq!(gl.calls(), vec![Call::UseProgram(Some(1)), Call::UseProgram(None)]);
    }

    #[test]
    fn test_dispose_unbinds_detaches_then_deletes() {
        let gl = RecordingDriver::new();
        let mut program = create(&gl);
        program.set_vertices(&gl, &TRIANGLE, 4).unwrap();
        gl.clear_calls();

        program.dispose(&gl);

        assert_eq!(
            gl.calls(),
            vec![
                Call::UseProgram(None),
                Call::DetachShader { program: 1, shader: 2 },
                Call::DetachShader { program: 1, shader: 3 },
                Call::DeleteShader(2),
                Call::DeleteShader(3),
                Call::DeleteProgram(1),
                Call::DeleteBuffer(5),
                Call::DeleteVertexArray(4),
            ]
        );
    }

    #[test]
    fn test_vertex_count_divides_by_stride() {
        assert_eq!(vertex_count(12, 4), 3);
        assert_eq!(vertex_count(12, 3), 4);
        assert_eq!(vertex_count(0, 2), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exceed the draw call limit")]
    fn test_vertex_count_overflow_panics_in_debug() {
        vertex_count(i32::MAX as usize + 1, 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "stride 3 does not divide 4 floats")]
    fn test_set_vertices_rejects_partial_vertex_in_debug() {
        let gl = RecordingDriver::new();
        let mut program = create(&gl);

        let _ = program.set_vertices(&gl, &[0.0, 1.0, 2.0, 3.0], 3);
    }

    #[test]
    fn test_program_debug_lists_handles() {
        let gl = RecordingDriver::new();
        let program = create(&gl);

        let formatted = format!("{program:?}");
        assert!(formatted.contains("model_location"), "{formatted}");
    }
}
