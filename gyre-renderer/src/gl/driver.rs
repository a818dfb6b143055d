use std::fmt;

use crate::gl::GL;

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A uniform shared between host code and shader source.
///
/// Drivers with explicit uniform locations use `location`; drivers that can
/// only look uniforms up by name (WebGL2) use `name`. Both must agree with
/// the declaration in the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSlot {
    pub location: u32,
    pub name: &'static str,
}

/// The subset of the graphics API a [`Program`](crate::gl::Program) drives.
///
/// Every call is synchronous and issued from the render thread. Handle types
/// are opaque driver objects; creation methods return `None` when the driver
/// is out of resources or the context is lost.
pub trait GlDriver {
    type Program: fmt::Debug;
    type Shader: fmt::Debug;
    type VertexArray: fmt::Debug;
    type Buffer: fmt::Debug;
    type UniformLocation: fmt::Debug;

    // shaders
    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    // programs
    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn detach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn use_program(&self, program: Option<&Self::Program>);
    fn delete_program(&self, program: &Self::Program);

    // uniforms
    fn uniform_location(
        &self,
        program: &Self::Program,
        slot: UniformSlot,
    ) -> Option<Self::UniformLocation>;
    fn uniform_matrix4(&self, location: &Self::UniformLocation, row_major: bool, data: &[f32; 16]);

    // vertex data
    fn create_vertex_array(&self) -> Option<Self::VertexArray>;
    fn bind_vertex_array(&self, vao: Option<&Self::VertexArray>);
    fn delete_vertex_array(&self, vao: &Self::VertexArray);
    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>);
    fn upload_static_f32(&self, data: &[f32]);
    fn delete_buffer(&self, buffer: &Self::Buffer);
    fn vertex_attrib_f32(&self, index: u32, size: i32);
    fn enable_vertex_attrib(&self, index: u32);
    fn disable_vertex_attrib(&self, index: u32);

    // drawing
    fn draw_triangles(&self, first: i32, count: i32);
}

impl GlDriver for GL {
    type Program = web_sys::WebGlProgram;
    type Shader = web_sys::WebGlShader;
    type VertexArray = web_sys::WebGlVertexArrayObject;
    type Buffer = web_sys::WebGlBuffer;
    type UniformLocation = web_sys::WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader> {
        GL::create_shader(self, stage.gl_enum())
    }

    fn shader_source(&self, shader: &Self::Shader, source: &str) {
        GL::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &Self::Shader) {
        GL::compile_shader(self, shader);
    }

    fn compile_status(&self, shader: &Self::Shader) -> bool {
        self.get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &Self::Shader) {
        GL::delete_shader(self, Some(shader));
    }

    fn create_program(&self) -> Option<Self::Program> {
        GL::create_program(self)
    }

    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader) {
        GL::attach_shader(self, program, shader);
    }

    fn detach_shader(&self, program: &Self::Program, shader: &Self::Shader) {
        GL::detach_shader(self, program, shader);
    }

    fn link_program(&self, program: &Self::Program) {
        GL::link_program(self, program);
    }

    fn link_status(&self, program: &Self::Program) -> bool {
        self.get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &Self::Program) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn use_program(&self, program: Option<&Self::Program>) {
        GL::use_program(self, program);
    }

    fn delete_program(&self, program: &Self::Program) {
        GL::delete_program(self, Some(program));
    }

    fn uniform_location(
        &self,
        program: &Self::Program,
        slot: UniformSlot,
    ) -> Option<Self::UniformLocation> {
        // GLSL ES 3.00 has no layout(location) for uniforms
        self.get_uniform_location(program, slot.name)
    }

    fn uniform_matrix4(&self, location: &Self::UniformLocation, row_major: bool, data: &[f32; 16]) {
        self.uniform_matrix4fv_with_f32_array(Some(location), row_major, data);
    }

    fn create_vertex_array(&self) -> Option<Self::VertexArray> {
        GL::create_vertex_array(self)
    }

    fn bind_vertex_array(&self, vao: Option<&Self::VertexArray>) {
        GL::bind_vertex_array(self, vao);
    }

    fn delete_vertex_array(&self, vao: &Self::VertexArray) {
        GL::delete_vertex_array(self, Some(vao));
    }

    fn create_buffer(&self) -> Option<Self::Buffer> {
        GL::create_buffer(self)
    }

    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>) {
        self.bind_buffer(GL::ARRAY_BUFFER, buffer);
    }

    fn upload_static_f32(&self, data: &[f32]) {
        // the view aliases wasm memory; nothing may allocate before the upload
        unsafe {
            let view = js_sys::Float32Array::view(data);
            self.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
        }
    }

    fn delete_buffer(&self, buffer: &Self::Buffer) {
        GL::delete_buffer(self, Some(buffer));
    }

    fn vertex_attrib_f32(&self, index: u32, size: i32) {
        self.vertex_attrib_pointer_with_i32(index, size, GL::FLOAT, false, 0, 0);
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.enable_vertex_attrib_array(index);
    }

    fn disable_vertex_attrib(&self, index: u32) {
        self.disable_vertex_attrib_array(index);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.draw_arrays(GL::TRIANGLES, first, count);
    }
}
