//! In-memory [`GlDriver`] that records every state-changing call.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use crate::gl::{GlDriver, ShaderStage, UniformSlot};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformMatrix4 { location: u32, row_major: bool, data: [f32; 16] },
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    UploadStatic(Vec<f32>),
    DeleteBuffer(u32),
    VertexAttrib { index: u32, size: i32 },
    EnableAttrib(u32),
    DisableAttrib(u32),
    DrawTriangles { first: i32, count: i32 },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingDriver {
    next_handle: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    stages: RefCell<HashMap<u32, ShaderStage>>,
    compile_failure: Option<(ShaderStage, String)>,
    link_failure: Option<String>,
    uniform_missing: bool,
}

impl RecordingDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fails compilation of `stage` with the given info log.
    pub(crate) fn failing_compile(stage: ShaderStage, log: &str) -> Self {
        Self { compile_failure: Some((stage, log.to_string())), ..Self::default() }
    }

    /// Fails linking with the given info log.
    pub(crate) fn failing_link(log: &str) -> Self {
        Self { link_failure: Some(log.to_string()), ..Self::default() }
    }

    /// Links fine but reports no active model uniform.
    pub(crate) fn without_uniforms() -> Self {
        Self { uniform_missing: true, ..Self::default() }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|&c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> u32 {
        let id = self.next_handle.get() + 1;
        self.next_handle.set(id);
        id
    }
}

impl GlDriver for RecordingDriver {
    type Program = u32;
    type Shader = u32;
    type VertexArray = u32;
    type Buffer = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        let id = self.handle();
        self.stages.borrow_mut().insert(id, stage);
        self.record(Call::CreateShader(stage, id));
        Some(id)
    }

    fn shader_source(&self, shader: &u32, _source: &str) {
        self.record(Call::ShaderSource(*shader));
    }

    fn compile_shader(&self, shader: &u32) {
        self.record(Call::CompileShader(*shader));
    }

    fn compile_status(&self, shader: &u32) -> bool {
        let stage = self.stages.borrow().get(shader).copied();
        match (&self.compile_failure, stage) {
            (Some((failing, _)), Some(stage)) => *failing != stage,
            _ => true,
        }
    }

    fn shader_info_log(&self, _shader: &u32) -> Option<String> {
        self.compile_failure.as_ref().map(|(_, log)| log.clone())
    }

    fn delete_shader(&self, shader: &u32) {
        self.record(Call::DeleteShader(*shader));
    }

    fn create_program(&self) -> Option<u32> {
        let id = self.handle();
        self.record(Call::CreateProgram(id));
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::AttachShader { program: *program, shader: *shader });
    }

    fn detach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::DetachShader { program: *program, shader: *shader });
    }

    fn link_program(&self, program: &u32) {
        self.record(Call::LinkProgram(*program));
    }

    fn link_status(&self, _program: &u32) -> bool {
        self.link_failure.is_none()
    }

    fn program_info_log(&self, _program: &u32) -> Option<String> {
        self.link_failure.clone()
    }

    fn use_program(&self, program: Option<&u32>) {
        self.record(Call::UseProgram(program.copied()));
    }

    fn delete_program(&self, program: &u32) {
        self.record(Call::DeleteProgram(*program));
    }

    fn uniform_location(&self, _program: &u32, slot: UniformSlot) -> Option<u32> {
        (!self.uniform_missing).then_some(slot.location)
    }

    fn uniform_matrix4(&self, location: &u32, row_major: bool, data: &[f32; 16]) {
        self.record(Call::UniformMatrix4 { location: *location, row_major, data: *data });
    }

    fn create_vertex_array(&self) -> Option<u32> {
        let id = self.handle();
        self.record(Call::CreateVertexArray(id));
        Some(id)
    }

    fn bind_vertex_array(&self, vao: Option<&u32>) {
        self.record(Call::BindVertexArray(vao.copied()));
    }

    fn delete_vertex_array(&self, vao: &u32) {
        self.record(Call::DeleteVertexArray(*vao));
    }

    fn create_buffer(&self) -> Option<u32> {
        let id = self.handle();
        self.record(Call::CreateBuffer(id));
        Some(id)
    }

    fn bind_array_buffer(&self, buffer: Option<&u32>) {
        self.record(Call::BindArrayBuffer(buffer.copied()));
    }

    fn upload_static_f32(&self, data: &[f32]) {
        self.record(Call::UploadStatic(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: &u32) {
        self.record(Call::DeleteBuffer(*buffer));
    }

    fn vertex_attrib_f32(&self, index: u32, size: i32) {
        self.record(Call::VertexAttrib { index, size });
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn disable_vertex_attrib(&self, index: u32) {
        self.record(Call::DisableAttrib(index));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangles { first, count });
    }
}
