use crate::backend::ShaderStage;

/// Failures while creating GPU resources.
///
/// A uniform missing from a program is never an error; setters skip it.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("GPU backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
