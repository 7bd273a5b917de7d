//! Client-side vertex array emulation for OpenGL drivers.
//!
//! Keeps its own copy of vertex array, pixel store and client attribute
//! stack state, emulates vertex array objects on top of plain generic
//! attributes, and copies client memory vertex, index and indirect command
//! data into buffers before forwarding draw calls to a [`Driver`].

#![warn(clippy::all)]
#![allow(clippy::single_match)]

// Re-export dependencies.
pub use gl;

pub mod client_state;
pub mod context;
pub mod driver;
pub mod enums;
pub mod error;
pub mod format;
pub mod gl_driver;
pub mod gl_utils;
pub mod ppca;
pub mod recording;
pub mod vao;

pub use client_state::{PixelStore, VertexArray};
pub use context::{Capabilities, Context, Profile};
pub use driver::Driver;
pub use error::DrawError;
pub use gl_driver::GlDriver;
pub use ppca::Ppca;
pub use recording::{Call, RecordingDriver};
pub use vao::{DrawArraysCommand, DrawElementsCommand, Vao};
