use crate::gl::ShaderStage;

/// Error categories.
///
/// Every variant is fatal at startup: a pipeline that failed to compile,
/// link or allocate has nothing useful left to draw.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failed to initialize WebGL context or retrieve DOM elements.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Shader compilation, linking, or program creation errors.
    #[error("Shader error: {0}")]
    Shader(String),

    /// GPU resource creation or management errors.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Malformed runtime configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    // Initialization errors
    pub fn window_not_found() -> Self {
        Self::Initialization("Unable to retrieve window".to_string())
    }

    pub fn document_not_found() -> Self {
        Self::Initialization("Unable to retrieve document".to_string())
    }

    pub fn canvas_not_found() -> Self {
        Self::Initialization("Unable to retrieve canvas".to_string())
    }

    pub fn webgl_context_failed() -> Self {
        Self::Initialization("Failed to retrieve WebGL2 rendering context".to_string())
    }

    pub fn animation_frame_failed() -> Self {
        Self::Initialization("Failed to request animation frame".to_string())
    }

    pub fn event_listener_failed(event: &str) -> Self {
        Self::Initialization(format!("Failed to register {event} listener"))
    }

    pub fn logger_install_failed(detail: &str) -> Self {
        Self::Initialization(format!("Failed to install logger: {detail}"))
    }

    // Shader errors
    pub fn shader_creation_failed(stage: ShaderStage) -> Self {
        Self::Shader(format!("Failed to create {stage} shader"))
    }

    pub fn shader_compile_failed(stage: ShaderStage, log: String) -> Self {
        Self::Shader(format!("Error compiling {stage} shader:\n{log}"))
    }

    pub fn shader_program_creation_failed() -> Self {
        Self::Shader("Shader program creation failed".to_string())
    }

    pub fn shader_link_failed(log: String) -> Self {
        Self::Shader(format!("Unable to link shader program:\n{log}"))
    }

    // Resource errors
    pub fn buffer_creation_failed(buffer_type: &str) -> Self {
        Self::Resource(format!("Failed to create {buffer_type} buffer"))
    }

    pub fn vertex_array_creation_failed() -> Self {
        Self::Resource("Failed to create vertex array object".to_string())
    }

    pub fn uniform_location_failed(name: &str) -> Self {
        Self::Resource(format!("Failed to get uniform location: {name}"))
    }

    // Config errors
    pub fn config_parse_failed(message: String) -> Self {
        Self::Config(format!("Failed to parse config: {message}"))
    }
}
