//! GL enumerants used by the emulation layer.
//!
//! Compatibility profile and extension values are missing from the core
//! profile bindings of the `gl` crate, so every value is spelled out here.

#![allow(dead_code)]

use gl::types::{GLbitfield, GLenum};

// ----------------------------------------------------------------------------
// Component types

pub const BYTE: GLenum = 0x1400;
pub const UNSIGNED_BYTE: GLenum = 0x1401;
pub const SHORT: GLenum = 0x1402;
pub const UNSIGNED_SHORT: GLenum = 0x1403;
pub const INT: GLenum = 0x1404;
pub const UNSIGNED_INT: GLenum = 0x1405;
pub const FLOAT: GLenum = 0x1406;
pub const DOUBLE: GLenum = 0x140A;
pub const HALF_FLOAT: GLenum = 0x140B;
pub const FIXED: GLenum = 0x140C;
pub const INT_2_10_10_10_REV: GLenum = 0x8D9F;
pub const UNSIGNED_INT_2_10_10_10_REV: GLenum = 0x8368;
pub const UNSIGNED_INT_10F_11F_11F_REV: GLenum = 0x8C3B;
pub const BOOL: GLenum = 0x8B56;
pub const BGRA: GLenum = 0x80E1;

// ----------------------------------------------------------------------------
// Buffer targets and bindings

pub const ARRAY_BUFFER: GLenum = 0x8892;
pub const ELEMENT_ARRAY_BUFFER: GLenum = 0x8893;
pub const ARRAY_BUFFER_BINDING: GLenum = 0x8894;
pub const ELEMENT_ARRAY_BUFFER_BINDING: GLenum = 0x8895;
pub const PIXEL_PACK_BUFFER: GLenum = 0x88EB;
pub const PIXEL_UNPACK_BUFFER: GLenum = 0x88EC;
pub const PIXEL_PACK_BUFFER_BINDING: GLenum = 0x88ED;
pub const PIXEL_UNPACK_BUFFER_BINDING: GLenum = 0x88EF;
pub const DRAW_INDIRECT_BUFFER: GLenum = 0x8F3F;
pub const DRAW_INDIRECT_BUFFER_BINDING: GLenum = 0x8F43;
pub const PARAMETER_BUFFER: GLenum = 0x80EE;
pub const PARAMETER_BUFFER_BINDING: GLenum = 0x80EF;
pub const VERTEX_ARRAY_BINDING: GLenum = 0x85B5;

pub const STATIC_DRAW: GLenum = 0x88E4;
pub const DYNAMIC_DRAW: GLenum = 0x88E8;
pub const MAP_READ_BIT: GLbitfield = 0x0001;

// ----------------------------------------------------------------------------
// Primitive restart

pub const PRIMITIVE_RESTART: GLenum = 0x8F9D;
pub const PRIMITIVE_RESTART_INDEX: GLenum = 0x8F9E;
pub const PRIMITIVE_RESTART_FIXED_INDEX: GLenum = 0x8D69;

// ----------------------------------------------------------------------------
// Generic attribute queries and limits

pub const VERTEX_ATTRIB_ARRAY_ENABLED: GLenum = 0x8622;
pub const VERTEX_ATTRIB_ARRAY_SIZE: GLenum = 0x8623;
pub const VERTEX_ATTRIB_ARRAY_STRIDE: GLenum = 0x8624;
pub const VERTEX_ATTRIB_ARRAY_TYPE: GLenum = 0x8625;
pub const VERTEX_ATTRIB_ARRAY_POINTER: GLenum = 0x8645;
pub const VERTEX_ATTRIB_ARRAY_NORMALIZED: GLenum = 0x886A;
pub const VERTEX_ATTRIB_ARRAY_BUFFER_BINDING: GLenum = 0x889F;
pub const VERTEX_ATTRIB_ARRAY_INTEGER: GLenum = 0x88FD;
pub const VERTEX_ATTRIB_ARRAY_DIVISOR: GLenum = 0x88FE;
pub const MAX_VERTEX_ATTRIBS: GLenum = 0x8869;
pub const MAX_VERTEX_ATTRIB_BINDINGS: GLenum = 0x82DA;

// ----------------------------------------------------------------------------
// Legacy client arrays

pub const VERTEX_ARRAY: GLenum = 0x8074;
pub const NORMAL_ARRAY: GLenum = 0x8075;
pub const COLOR_ARRAY: GLenum = 0x8076;
pub const INDEX_ARRAY: GLenum = 0x8077;
pub const TEXTURE_COORD_ARRAY: GLenum = 0x8078;
pub const EDGE_FLAG_ARRAY: GLenum = 0x8079;
pub const FOG_COORD_ARRAY: GLenum = 0x8457;
pub const SECONDARY_COLOR_ARRAY: GLenum = 0x845E;

pub const TEXTURE0: GLenum = 0x84C0;
pub const CLIENT_ACTIVE_TEXTURE: GLenum = 0x84E1;

pub const V2F: GLenum = 0x2A20;
pub const V3F: GLenum = 0x2A21;
pub const C4UB_V2F: GLenum = 0x2A22;
pub const C4UB_V3F: GLenum = 0x2A23;
pub const C3F_V3F: GLenum = 0x2A24;
pub const N3F_V3F: GLenum = 0x2A25;
pub const C4F_N3F_V3F: GLenum = 0x2A26;
pub const T2F_V3F: GLenum = 0x2A27;
pub const T4F_V4F: GLenum = 0x2A28;
pub const T2F_C4UB_V3F: GLenum = 0x2A29;
pub const T2F_C3F_V3F: GLenum = 0x2A2A;
pub const T2F_N3F_V3F: GLenum = 0x2A2B;
pub const T2F_C4F_N3F_V3F: GLenum = 0x2A2C;
pub const T4F_C4F_N3F_V4F: GLenum = 0x2A2D;

// ----------------------------------------------------------------------------
// Client attribute stack

pub const CLIENT_PIXEL_STORE_BIT: GLbitfield = 0x0000_0001;
pub const CLIENT_VERTEX_ARRAY_BIT: GLbitfield = 0x0000_0002;
pub const CLIENT_ALL_ATTRIB_BITS: GLbitfield = 0xFFFF_FFFF;
pub const CLIENT_ATTRIB_STACK_DEPTH: GLenum = 0x0BB1;
pub const MAX_CLIENT_ATTRIB_STACK_DEPTH: GLenum = 0x0D3B;

// ----------------------------------------------------------------------------
// Pixel store

pub const UNPACK_SWAP_BYTES: GLenum = 0x0CF0;
pub const UNPACK_LSB_FIRST: GLenum = 0x0CF1;
pub const UNPACK_ROW_LENGTH: GLenum = 0x0CF2;
pub const UNPACK_SKIP_ROWS: GLenum = 0x0CF3;
pub const UNPACK_SKIP_PIXELS: GLenum = 0x0CF4;
pub const UNPACK_ALIGNMENT: GLenum = 0x0CF5;
pub const UNPACK_SKIP_IMAGES: GLenum = 0x806D;
pub const UNPACK_IMAGE_HEIGHT: GLenum = 0x806E;
pub const PACK_SWAP_BYTES: GLenum = 0x0D00;
pub const PACK_LSB_FIRST: GLenum = 0x0D01;
pub const PACK_ROW_LENGTH: GLenum = 0x0D02;
pub const PACK_SKIP_ROWS: GLenum = 0x0D03;
pub const PACK_SKIP_PIXELS: GLenum = 0x0D04;
pub const PACK_ALIGNMENT: GLenum = 0x0D05;
pub const PACK_SKIP_IMAGES: GLenum = 0x806B;
pub const PACK_IMAGE_HEIGHT: GLenum = 0x806C;

// ----------------------------------------------------------------------------
// Primitives

pub const POINTS: GLenum = 0x0000;
pub const LINES: GLenum = 0x0001;
pub const TRIANGLES: GLenum = 0x0004;
pub const TRIANGLE_STRIP: GLenum = 0x0005;

// ----------------------------------------------------------------------------
// Emulated limits

/// Generic vertex attributes tracked per vertex array object.
pub const MAX_ATTRIBS: usize = 16;
/// Vertex buffer binding points tracked per vertex array object.
pub const MAX_BINDINGS: usize = 16;
/// Texture coordinate units with their own client array.
pub const MAX_TEXTURE_COORDS: usize = 16;
/// Depth of the client attribute stack.
pub const MAX_CLIENT_ATTRIB_DEPTH: usize = 16;
