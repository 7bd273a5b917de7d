#![allow(unsafe_code)]

use crate::{driver::Driver, enums::*};
use gl::types::{GLenum, GLfloat, GLint, GLuint};

/// Pixel transfer parameters of `glPixelStore*` and the pack/unpack buffer
/// bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelStore {
    pub unpack_swap_bytes: bool,
    pub unpack_lsb_first: bool,
    pub unpack_image_height: GLint,
    pub unpack_skip_images: GLint,
    pub unpack_row_length: GLint,
    pub unpack_skip_rows: GLint,
    pub unpack_skip_pixels: GLint,
    pub unpack_alignment: GLint,
    pub pack_swap_bytes: bool,
    pub pack_lsb_first: bool,
    pub pack_image_height: GLint,
    pub pack_skip_images: GLint,
    pub pack_row_length: GLint,
    pub pack_skip_rows: GLint,
    pub pack_skip_pixels: GLint,
    pub pack_alignment: GLint,
    pub pixel_pack_buffer_binding: GLuint,
    pub pixel_unpack_buffer_binding: GLuint,
}

impl Default for PixelStore {
    fn default() -> Self {
        Self {
            unpack_swap_bytes: false,
            unpack_lsb_first: false,
            unpack_image_height: 0,
            unpack_skip_images: 0,
            unpack_row_length: 0,
            unpack_skip_rows: 0,
            unpack_skip_pixels: 0,
            unpack_alignment: 4,
            pack_swap_bytes: false,
            pack_lsb_first: false,
            pack_image_height: 0,
            pack_skip_images: 0,
            pack_row_length: 0,
            pack_skip_rows: 0,
            pack_skip_pixels: 0,
            pack_alignment: 4,
            pixel_pack_buffer_binding: 0,
            pixel_unpack_buffer_binding: 0,
        }
    }
}

/// Parameter names in the order they are replayed.
const PARAMETERS: [GLenum; 16] = [
    UNPACK_SWAP_BYTES,
    UNPACK_LSB_FIRST,
    UNPACK_IMAGE_HEIGHT,
    UNPACK_SKIP_IMAGES,
    UNPACK_ROW_LENGTH,
    UNPACK_SKIP_ROWS,
    UNPACK_SKIP_PIXELS,
    UNPACK_ALIGNMENT,
    PACK_SWAP_BYTES,
    PACK_LSB_FIRST,
    PACK_IMAGE_HEIGHT,
    PACK_SKIP_IMAGES,
    PACK_ROW_LENGTH,
    PACK_SKIP_ROWS,
    PACK_SKIP_PIXELS,
    PACK_ALIGNMENT,
];

impl PixelStore {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn swap(&mut self, other: &mut PixelStore) {
        std::mem::swap(self, other);
    }

    /// Current value of a pixel store parameter, booleans as 0 or 1.
    pub fn parameter(&self, pname: GLenum) -> Option<GLint> {
        Some(match pname {
            UNPACK_SWAP_BYTES => self.unpack_swap_bytes as GLint,
            UNPACK_LSB_FIRST => self.unpack_lsb_first as GLint,
            UNPACK_IMAGE_HEIGHT => self.unpack_image_height,
            UNPACK_SKIP_IMAGES => self.unpack_skip_images,
            UNPACK_ROW_LENGTH => self.unpack_row_length,
            UNPACK_SKIP_ROWS => self.unpack_skip_rows,
            UNPACK_SKIP_PIXELS => self.unpack_skip_pixels,
            UNPACK_ALIGNMENT => self.unpack_alignment,
            PACK_SWAP_BYTES => self.pack_swap_bytes as GLint,
            PACK_LSB_FIRST => self.pack_lsb_first as GLint,
            PACK_IMAGE_HEIGHT => self.pack_image_height,
            PACK_SKIP_IMAGES => self.pack_skip_images,
            PACK_ROW_LENGTH => self.pack_row_length,
            PACK_SKIP_ROWS => self.pack_skip_rows,
            PACK_SKIP_PIXELS => self.pack_skip_pixels,
            PACK_ALIGNMENT => self.pack_alignment,
            _ => return None,
        })
    }

    /// `glPixelStorei`. Unknown names are ignored.
    pub fn pixel_store_i(&mut self, pname: GLenum, param: GLint) {
        let flag = param != 0;
        match pname {
            UNPACK_SWAP_BYTES => self.unpack_swap_bytes = flag,
            UNPACK_LSB_FIRST => self.unpack_lsb_first = flag,
            UNPACK_IMAGE_HEIGHT => self.unpack_image_height = param,
            UNPACK_SKIP_IMAGES => self.unpack_skip_images = param,
            UNPACK_ROW_LENGTH => self.unpack_row_length = param,
            UNPACK_SKIP_ROWS => self.unpack_skip_rows = param,
            UNPACK_SKIP_PIXELS => self.unpack_skip_pixels = param,
            UNPACK_ALIGNMENT => self.unpack_alignment = param,
            PACK_SWAP_BYTES => self.pack_swap_bytes = flag,
            PACK_LSB_FIRST => self.pack_lsb_first = flag,
            PACK_IMAGE_HEIGHT => self.pack_image_height = param,
            PACK_SKIP_IMAGES => self.pack_skip_images = param,
            PACK_ROW_LENGTH => self.pack_row_length = param,
            PACK_SKIP_ROWS => self.pack_skip_rows = param,
            PACK_SKIP_PIXELS => self.pack_skip_pixels = param,
            PACK_ALIGNMENT => self.pack_alignment = param,
            _ => tracing::trace!("ignoring pixel store 0x{:X}", pname),
        }
    }

    /// `glPixelStoref`. The value is truncated toward zero.
    pub fn pixel_store_f(&mut self, pname: GLenum, param: GLfloat) {
        self.pixel_store_i(pname, param as GLint);
    }

    pub fn bind_buffer(&mut self, target: GLenum, buffer: GLuint) {
        match target {
            PIXEL_PACK_BUFFER => self.pixel_pack_buffer_binding = buffer,
            PIXEL_UNPACK_BUFFER => self.pixel_unpack_buffer_binding = buffer,
            _ => {}
        }
    }

    pub fn delete_buffers(&mut self, buffers: &[GLuint]) {
        for &buffer in buffers.iter().filter(|&&b| b != 0) {
            if self.pixel_pack_buffer_binding == buffer {
                self.pixel_pack_buffer_binding = 0;
            }
            if self.pixel_unpack_buffer_binding == buffer {
                self.pixel_unpack_buffer_binding = 0;
            }
        }
    }

    pub unsafe fn set<D: Driver>(&self, d: &mut D) {
        for &pname in PARAMETERS.iter() {
            if let Some(value) = self.parameter(pname) {
                d.PixelStorei(pname, value);
            }
        }
        d.BindBuffer(PIXEL_PACK_BUFFER, self.pixel_pack_buffer_binding);
        d.BindBuffer(PIXEL_UNPACK_BUFFER, self.pixel_unpack_buffer_binding);
    }

    /// Issues calls for the fields of `to` that differ from `self`, then
    /// takes on the state of `to`.
    pub unsafe fn transition<D: Driver>(&mut self, d: &mut D, to: &PixelStore) {
        for &pname in PARAMETERS.iter() {
            let (from, target) = (self.parameter(pname), to.parameter(pname));
            if from != target {
                if let Some(value) = target {
                    d.PixelStorei(pname, value);
                }
            }
        }
        if self.pixel_pack_buffer_binding != to.pixel_pack_buffer_binding {
            d.BindBuffer(PIXEL_PACK_BUFFER, to.pixel_pack_buffer_binding);
        }
        if self.pixel_unpack_buffer_binding != to.pixel_unpack_buffer_binding {
            d.BindBuffer(PIXEL_UNPACK_BUFFER, to.pixel_unpack_buffer_binding);
        }
        self.clone_from(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, RecordingDriver};

    #[test]
    fn defaults() {
        let ps = PixelStore::default();
        assert_eq!(ps.parameter(UNPACK_ALIGNMENT), Some(4));
        assert_eq!(ps.parameter(PACK_ALIGNMENT), Some(4));
        for &pname in PARAMETERS.iter().filter(|&&p| p != UNPACK_ALIGNMENT && p != PACK_ALIGNMENT) {
            assert_eq!(ps.parameter(pname), Some(0));
        }
        assert_eq!(ps.parameter(0x1234), None);
    }

    #[test]
    fn float_and_bool_parameters() {
        let mut ps = PixelStore::default();
        ps.pixel_store_f(UNPACK_ROW_LENGTH, 7.9);
        ps.pixel_store_i(PACK_SWAP_BYTES, 5);
        ps.pixel_store_f(PACK_LSB_FIRST, 0.5);
        assert_eq!(ps.unpack_row_length, 7);
        assert!(ps.pack_swap_bytes);
        assert!(!ps.pack_lsb_first);
    }

    #[test]
    fn buffer_bindings() {
        let mut ps = PixelStore::default();
        ps.bind_buffer(PIXEL_PACK_BUFFER, 3);
        ps.bind_buffer(PIXEL_UNPACK_BUFFER, 4);
        ps.bind_buffer(ARRAY_BUFFER, 5);
        assert_eq!((ps.pixel_pack_buffer_binding, ps.pixel_unpack_buffer_binding), (3, 4));

        ps.delete_buffers(&[0, 4]);
        assert_eq!((ps.pixel_pack_buffer_binding, ps.pixel_unpack_buffer_binding), (3, 0));
    }

    #[test]
    fn transition_emits_only_differences() {
        let mut current = PixelStore::default();
        let mut target = PixelStore::default();
        target.pixel_store_i(UNPACK_ALIGNMENT, 1);
        target.pixel_store_i(PACK_ROW_LENGTH, 64);
        target.bind_buffer(PIXEL_UNPACK_BUFFER, 8);

        let mut d = RecordingDriver::new();
        unsafe { current.transition(&mut d, &target) };
        assert_eq!(
            d.take_calls(),
            vec![
                Call::PixelStorei { pname: UNPACK_ALIGNMENT, param: 1 },
                Call::PixelStorei { pname: PACK_ROW_LENGTH, param: 64 },
                Call::BindBuffer { target: PIXEL_UNPACK_BUFFER, buffer: 8 },
            ]
        );
        assert_eq!(current, target);

        unsafe { current.transition(&mut d, &target) };
        assert!(d.calls().is_empty());
    }

    #[test]
    fn set_replays_everything() {
        let mut d = RecordingDriver::new();
        unsafe { PixelStore::default().set(&mut d) };
        assert_eq!(d.calls().len(), PARAMETERS.len() + 2);
    }
}
