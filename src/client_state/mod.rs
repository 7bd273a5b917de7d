//! Shadow copies of the client side GL state that can be saved, restored and
//! replayed onto a driver.

#![allow(unsafe_code)]

mod pixel_store;
mod vertex_array;

pub use pixel_store::PixelStore;
pub use vertex_array::VertexArray;

use crate::{driver::Driver, enums::*, format::ArrayKind};
use gl::types::{GLenum, GLint, GLintptr, GLsizei, GLuint};
use std::os::raw::c_void;

// ----------------------------------------------------------------------------

/// One legacy fixed-function array: vertex, normal, color and friends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedArray {
    pub enabled: bool,
    pub buffer: GLuint,
    pub size: GLint,
    pub data_type: GLenum,
    pub stride: GLsizei,
    /// Client address, or offset into `buffer` when it is non-zero.
    pub pointer: usize,
}

impl NamedArray {
    pub fn new(kind: ArrayKind) -> Self {
        Self {
            enabled: false,
            buffer: 0,
            size: kind.default_size(),
            data_type: kind.default_type(),
            stride: 0,
            pointer: 0,
        }
    }

    fn same_source(&self, other: &NamedArray) -> bool {
        self.buffer == other.buffer
            && self.size == other.size
            && self.data_type == other.data_type
            && self.stride == other.stride
            && self.pointer == other.pointer
    }

    pub(crate) unsafe fn apply_enable<D: Driver>(&self, d: &mut D, kind: ArrayKind) {
        match kind {
            ArrayKind::TexCoord(unit) => {
                if self.enabled {
                    d.EnableClientStateiEXT(TEXTURE_COORD_ARRAY, unit as GLuint)
                } else {
                    d.DisableClientStateiEXT(TEXTURE_COORD_ARRAY, unit as GLuint)
                }
            }
            _ => {
                if self.enabled {
                    d.EnableClientState(kind.cap())
                } else {
                    d.DisableClientState(kind.cap())
                }
            }
        }
    }

    /// Issues the pointer call for `kind`. `ARRAY_BUFFER` must already name
    /// `self.buffer`.
    pub(crate) unsafe fn apply_pointer<D: Driver>(&self, d: &mut D, kind: ArrayKind) {
        let pointer = self.pointer as *const c_void;
        match kind {
            ArrayKind::Vertex => d.VertexPointer(self.size, self.data_type, self.stride, pointer),
            ArrayKind::Normal => d.NormalPointer(self.data_type, self.stride, pointer),
            ArrayKind::FogCoord => d.FogCoordPointer(self.data_type, self.stride, pointer),
            ArrayKind::Color => d.ColorPointer(self.size, self.data_type, self.stride, pointer),
            ArrayKind::SecondaryColor => {
                d.SecondaryColorPointer(self.size, self.data_type, self.stride, pointer)
            }
            ArrayKind::Index => d.IndexPointer(self.data_type, self.stride, pointer),
            ArrayKind::EdgeFlag => d.EdgeFlagPointer(self.stride, pointer),
            ArrayKind::TexCoord(unit) => d.MultiTexCoordPointerEXT(
                TEXTURE0 + unit as GLenum,
                self.size,
                self.data_type,
                self.stride,
                pointer,
            ),
        }
    }
}

// ----------------------------------------------------------------------------

/// A vertex buffer binding point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingPoint {
    pub buffer: GLuint,
    pub offset: GLintptr,
    pub stride: GLsizei,
    pub divisor: GLuint,
}

impl Default for BindingPoint {
    fn default() -> Self {
        Self {
            buffer: 0,
            offset: 0,
            stride: 16,
            divisor: 0,
        }
    }
}

impl BindingPoint {
    fn same_source(&self, other: &BindingPoint) -> bool {
        self.buffer == other.buffer && self.offset == other.offset && self.stride == other.stride
    }

    pub(crate) unsafe fn apply<D: Driver>(&self, d: &mut D, index: GLuint) {
        d.BindVertexBuffer(index, self.buffer, self.offset, self.stride);
        d.VertexBindingDivisor(index, self.divisor);
    }
}

// ----------------------------------------------------------------------------

/// A generic vertex attribute in the separate format/binding model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenericAttribute {
    pub enabled: bool,
    pub size: GLint,
    pub data_type: GLenum,
    pub relative_offset: GLuint,
    pub normalized: bool,
    pub is_integer: bool,
    pub is_long: bool,
    pub binding_index: GLuint,
}

impl GenericAttribute {
    pub fn new(index: GLuint) -> Self {
        Self {
            enabled: false,
            size: 4,
            data_type: FLOAT,
            relative_offset: 0,
            normalized: false,
            is_integer: false,
            is_long: false,
            binding_index: index,
        }
    }

    fn same_format(&self, other: &GenericAttribute) -> bool {
        self.size == other.size
            && self.data_type == other.data_type
            && self.relative_offset == other.relative_offset
            && self.normalized == other.normalized
            && self.is_integer == other.is_integer
            && self.is_long == other.is_long
    }

    pub(crate) unsafe fn apply_enable<D: Driver>(&self, d: &mut D, index: GLuint) {
        if self.enabled {
            d.EnableVertexAttribArray(index)
        } else {
            d.DisableVertexAttribArray(index)
        }
    }

    pub(crate) unsafe fn apply_format<D: Driver>(&self, d: &mut D, index: GLuint) {
        if self.is_integer {
            d.VertexAttribIFormat(index, self.size, self.data_type, self.relative_offset)
        } else if self.is_long {
            d.VertexAttribLFormat(index, self.size, self.data_type, self.relative_offset)
        } else {
            d.VertexAttribFormat(
                index,
                self.size,
                self.data_type,
                self.normalized as u8,
                self.relative_offset,
            )
        }
    }
}

// ----------------------------------------------------------------------------

pub(crate) unsafe fn enable<D: Driver>(d: &mut D, cap: GLenum, on: bool) {
    if on {
        d.Enable(cap)
    } else {
        d.Disable(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_defaults() {
        let normal = NamedArray::new(ArrayKind::Normal);
        assert_eq!((normal.size, normal.data_type), (3, FLOAT));
        let edge = NamedArray::new(ArrayKind::EdgeFlag);
        assert_eq!((edge.size, edge.data_type), (1, BOOL));
        let tex = NamedArray::new(ArrayKind::TexCoord(3));
        assert_eq!((tex.size, tex.data_type, tex.enabled), (4, FLOAT, false));
    }

    #[test]
    fn generic_defaults_bind_to_own_index() {
        let a = GenericAttribute::new(7);
        assert_eq!(a.binding_index, 7);
        assert_eq!((a.size, a.data_type), (4, FLOAT));
        assert_eq!(BindingPoint::default().stride, 16);
    }
}
