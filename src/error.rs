//! Errors raised while resolving a draw call that reads client memory.

use gl::types::{GLenum, GLsizei, GLuint};
use thiserror::Error;

/// Reasons a draw is dropped before it reaches the driver.
///
/// None of these leave the emulated state inconsistent. A shadow buffer may
/// already hold fresh data when the error is raised, which is harmless since
/// it is refreshed again on the next draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// An index or command array was expected in client memory but the
    /// pointer was null.
    #[error("client memory pointer is null")]
    MissingClientPointer,

    /// No indirect command buffer is bound and the indirect pointer is null.
    #[error("no indirect command source")]
    MissingIndirect,

    /// No parameter buffer is bound and the draw count pointer is null.
    #[error("no draw count source")]
    MissingDrawCount,

    /// The draw count resolved to a non-positive value.
    #[error("draw count {0} is not positive")]
    EmptyDrawCount(GLsizei),

    /// An indirect command carries an instance count of 0 or one too large
    /// to be meaningful.
    #[error("indirect command {draw} has invalid instance count {prim_count}")]
    InvalidInstanceCount { draw: usize, prim_count: GLuint },

    /// An instanced draw was issued with a non-positive instance count.
    #[error("instance count {0} is not positive")]
    InvalidPrimitiveCount(GLsizei),

    /// The driver refused to map a buffer for reading.
    #[error("failed to map buffer bound to 0x{target:X}")]
    MapFailed { target: GLenum },

    /// No vertex is referenced by the draw.
    #[error("draw references no vertices")]
    EmptyVertexRange,

    /// The client index arrays cover no bytes.
    #[error("client index arrays are empty")]
    EmptyIndexCoverage,

    /// The driver handed out buffer name 0.
    #[error("failed to allocate a temporary buffer for 0x{target:X}")]
    BufferAllocation { target: GLenum },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            DrawError::InvalidInstanceCount {
                draw: 2,
                prim_count: 0
            }
            .to_string(),
            "indirect command 2 has invalid instance count 0"
        );
        assert_eq!(
            DrawError::MapFailed { target: 0x8893 }.to_string(),
            "failed to map buffer bound to 0x8893"
        );
        assert_eq!(
            DrawError::EmptyDrawCount(-1).to_string(),
            "draw count -1 is not positive"
        );
    }
}
