use thiserror::Error;

/// Failures raised by the triangle renderer.
///
/// Shader and link errors reflect static misconfiguration and are fatal to
/// initialization. `InvalidTriangleCount` and `BufferTooLarge` reject a single
/// request and leave the current scene in place.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The shader source failed to parse or validate.
    #[error("shader `{label}` failed to compile:\n{log}")]
    ShaderCompile { label: String, log: String },

    /// The stages compiled but their interface does not fit together.
    #[error("shader `{label}` failed to link: {reason}")]
    ProgramLink { label: String, reason: String },

    /// Zero triangles, or more than a draw call can address.
    #[error("invalid triangle count {0}")]
    InvalidTriangleCount(u64),

    /// A vertex buffer for the requested scene exceeds the device limit.
    #[error("{what} buffer needs {required} bytes but the device allows {limit}")]
    BufferTooLarge {
        what: &'static str,
        required: u64,
        limit: u64,
    },
}
