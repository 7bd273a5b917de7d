#![allow(unsafe_code)]

use super::{enable, BindingPoint, GenericAttribute, NamedArray};
use crate::{
    driver::Driver,
    enums::*,
    format::{effective_stride, ArrayKind, InterleavedLayout, NAMED_ARRAY_COUNT},
};
use gl::types::{GLenum, GLint, GLintptr, GLsizei, GLuint};
use std::os::raw::c_void;

// ----------------------------------------------------------------------------

/// Client vertex array state of the default vertex array object, plus the
/// bindings that select it.
///
/// Array setters only touch the default object: while a vertex array object
/// is bound they are ignored, as are the `EXT` direct state access forms that
/// name a non-zero object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexArray {
    pub named: [NamedArray; NAMED_ARRAY_COUNT],
    pub bindings: [BindingPoint; MAX_BINDINGS],
    pub generic: [GenericAttribute; MAX_ATTRIBS],
    pub element_array_buffer_binding: GLuint,
    pub client_active_texture: GLenum,
    pub primitive_restart_fixed_index: bool,
    pub primitive_restart: bool,
    pub primitive_restart_index: GLuint,
    pub array_buffer_binding: GLuint,
    pub vertex_array_binding: GLuint,
}

impl Default for VertexArray {
    fn default() -> Self {
        let mut named = [NamedArray::new(ArrayKind::Vertex); NAMED_ARRAY_COUNT];
        for (slot, array) in named.iter_mut().enumerate() {
            if let Some(kind) = ArrayKind::from_slot(slot) {
                *array = NamedArray::new(kind);
            }
        }
        let mut generic = [GenericAttribute::new(0); MAX_ATTRIBS];
        for (index, attrib) in generic.iter_mut().enumerate() {
            *attrib = GenericAttribute::new(index as GLuint);
        }

        Self {
            named,
            bindings: [BindingPoint::default(); MAX_BINDINGS],
            generic,
            element_array_buffer_binding: 0,
            client_active_texture: TEXTURE0,
            primitive_restart_fixed_index: false,
            primitive_restart: false,
            primitive_restart_index: 0,
            array_buffer_binding: 0,
            vertex_array_binding: 0,
        }
    }
}

impl VertexArray {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn swap(&mut self, other: &mut VertexArray) {
        std::mem::swap(self, other);
    }

    pub fn named(&self, kind: ArrayKind) -> &NamedArray {
        &self.named[kind.slot()]
    }

    /// Texture unit selected by `glClientActiveTexture`, as an index.
    pub fn client_active_unit(&self) -> usize {
        self.client_active_texture.wrapping_sub(TEXTURE0) as usize
    }

    fn editable(&self, vaobj: GLuint) -> bool {
        vaobj == 0 && self.vertex_array_binding == 0
    }

    // ------------------------------------------------------------------------
    // Capabilities

    fn set_enable(&mut self, cap: GLenum, on: bool) {
        match cap {
            PRIMITIVE_RESTART => self.primitive_restart = on,
            PRIMITIVE_RESTART_FIXED_INDEX => self.primitive_restart_fixed_index = on,
            _ => {}
        }
    }

    pub fn enable(&mut self, cap: GLenum) {
        self.set_enable(cap, true);
    }

    pub fn disable(&mut self, cap: GLenum) {
        self.set_enable(cap, false);
    }

    /// `glEnablei` and `glEnableIndexedEXT`. The index is irrelevant for the
    /// tracked capabilities.
    pub fn enable_i(&mut self, cap: GLenum, _index: GLuint) {
        self.set_enable(cap, true);
    }

    pub fn disable_i(&mut self, cap: GLenum, _index: GLuint) {
        self.set_enable(cap, false);
    }

    fn set_client_state(&mut self, vaobj: GLuint, cap: GLenum, unit: usize, on: bool) {
        if !self.editable(vaobj) {
            return;
        }
        match ArrayKind::from_cap(cap, unit) {
            Some(kind) => self.named[kind.slot()].enabled = on,
            None => tracing::trace!("ignoring client state 0x{:X} for unit {}", cap, unit),
        }
    }

    pub fn enable_client_state(&mut self, cap: GLenum) {
        self.set_client_state(0, cap, self.client_active_unit(), true);
    }

    pub fn disable_client_state(&mut self, cap: GLenum) {
        self.set_client_state(0, cap, self.client_active_unit(), false);
    }

    /// `glEnableClientStateiEXT` and `glEnableClientStateIndexedEXT`.
    pub fn enable_client_state_i(&mut self, cap: GLenum, index: GLuint) {
        self.set_client_state(0, cap, index as usize, true);
    }

    pub fn disable_client_state_i(&mut self, cap: GLenum, index: GLuint) {
        self.set_client_state(0, cap, index as usize, false);
    }

    /// `glEnableVertexArrayEXT`. `TEXTUREi` names the coordinate array of
    /// unit `i`.
    pub fn enable_vertex_array_ext(&mut self, vaobj: GLuint, array: GLenum) {
        let (cap, unit) = Self::split_dsa_array(array, self.client_active_unit());
        self.set_client_state(vaobj, cap, unit, true);
    }

    pub fn disable_vertex_array_ext(&mut self, vaobj: GLuint, array: GLenum) {
        let (cap, unit) = Self::split_dsa_array(array, self.client_active_unit());
        self.set_client_state(vaobj, cap, unit, false);
    }

    fn split_dsa_array(array: GLenum, unit: usize) -> (GLenum, usize) {
        let texture = array.wrapping_sub(TEXTURE0) as usize;
        if texture < MAX_TEXTURE_COORDS {
            (TEXTURE_COORD_ARRAY, texture)
        } else {
            (array, unit)
        }
    }

    // ------------------------------------------------------------------------
    // Buffer and object bindings

    pub fn bind_buffer(&mut self, target: GLenum, buffer: GLuint) {
        match target {
            ARRAY_BUFFER => self.array_buffer_binding = buffer,
            ELEMENT_ARRAY_BUFFER if self.vertex_array_binding == 0 => {
                self.element_array_buffer_binding = buffer
            }
            _ => {}
        }
    }

    pub fn bind_vertex_array(&mut self, array: GLuint) {
        self.vertex_array_binding = array;
    }

    pub fn client_active_texture(&mut self, texture: GLenum) {
        let unit = texture.wrapping_sub(TEXTURE0) as usize;
        if unit < MAX_TEXTURE_COORDS {
            self.client_active_texture = texture;
        }
    }

    pub fn primitive_restart_index(&mut self, index: GLuint) {
        self.primitive_restart_index = index;
    }

    /// Forgets every reference to the deleted buffers.
    pub fn delete_buffers(&mut self, buffers: &[GLuint]) {
        for &buffer in buffers.iter().filter(|&&b| b != 0) {
            for named in self.named.iter_mut().filter(|n| n.buffer == buffer) {
                named.buffer = 0;
            }
            for binding in self.bindings.iter_mut().filter(|b| b.buffer == buffer) {
                binding.buffer = 0;
            }
            if self.element_array_buffer_binding == buffer {
                self.element_array_buffer_binding = 0;
            }
            if self.array_buffer_binding == buffer {
                self.array_buffer_binding = 0;
            }
        }
    }

    pub fn delete_vertex_arrays(&mut self, arrays: &[GLuint]) {
        if arrays
            .iter()
            .any(|&a| a != 0 && a == self.vertex_array_binding)
        {
            self.vertex_array_binding = 0;
        }
    }

    // ------------------------------------------------------------------------
    // Legacy arrays

    #[allow(clippy::too_many_arguments)]
    fn set_named(
        &mut self,
        vaobj: GLuint,
        kind: ArrayKind,
        buffer: GLuint,
        size: GLint,
        data_type: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        if !self.editable(vaobj) {
            return;
        }
        if !kind.accepts(size, data_type, stride) {
            tracing::trace!(
                "ignoring {:?} pointer: size {} type 0x{:X} stride {}",
                kind,
                size,
                data_type,
                stride
            );
            return;
        }
        let named = &mut self.named[kind.slot()];
        named.buffer = buffer;
        named.stride = stride;
        named.pointer = offset as usize;
        match kind {
            ArrayKind::Vertex
            | ArrayKind::Color
            | ArrayKind::SecondaryColor
            | ArrayKind::TexCoord(_) => {
                named.size = size;
                named.data_type = data_type;
            }
            ArrayKind::Normal | ArrayKind::FogCoord | ArrayKind::Index => {
                named.data_type = data_type;
            }
            ArrayKind::EdgeFlag => {}
        }
    }

    pub fn vertex_pointer(
        &mut self,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_vertex_offset_ext(0, buffer, size, ty, stride, pointer as GLintptr);
    }

    pub fn normal_pointer(&mut self, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_normal_offset_ext(0, buffer, ty, stride, pointer as GLintptr);
    }

    pub fn color_pointer(
        &mut self,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_color_offset_ext(0, buffer, size, ty, stride, pointer as GLintptr);
    }

    pub fn secondary_color_pointer(
        &mut self,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_secondary_color_offset_ext(
            0,
            buffer,
            size,
            ty,
            stride,
            pointer as GLintptr,
        );
    }

    pub fn index_pointer(&mut self, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_index_offset_ext(0, buffer, ty, stride, pointer as GLintptr);
    }

    pub fn edge_flag_pointer(&mut self, stride: GLsizei, pointer: *const c_void) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_edge_flag_offset_ext(0, buffer, stride, pointer as GLintptr);
    }

    pub fn fog_coord_pointer(&mut self, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_fog_coord_offset_ext(0, buffer, ty, stride, pointer as GLintptr);
    }

    /// Sets the coordinate array of the client active texture unit.
    pub fn tex_coord_pointer(
        &mut self,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_tex_coord_offset_ext(0, buffer, size, ty, stride, pointer as GLintptr);
    }

    pub fn multi_tex_coord_pointer_ext(
        &mut self,
        texunit: GLenum,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.vertex_array_multi_tex_coord_offset_ext(
            0,
            buffer,
            texunit,
            size,
            ty,
            stride,
            pointer as GLintptr,
        );
    }

    pub fn vertex_array_vertex_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_named(vaobj, ArrayKind::Vertex, buffer, size, ty, stride, offset);
    }

    pub fn vertex_array_normal_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_named(vaobj, ArrayKind::Normal, buffer, 3, ty, stride, offset);
    }

    pub fn vertex_array_color_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_named(vaobj, ArrayKind::Color, buffer, size, ty, stride, offset);
    }

    pub fn vertex_array_secondary_color_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_named(vaobj, ArrayKind::SecondaryColor, buffer, size, ty, stride, offset);
    }

    pub fn vertex_array_index_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_named(vaobj, ArrayKind::Index, buffer, 1, ty, stride, offset);
    }

    pub fn vertex_array_edge_flag_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_named(vaobj, ArrayKind::EdgeFlag, buffer, 1, BOOL, stride, offset);
    }

    pub fn vertex_array_fog_coord_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_named(vaobj, ArrayKind::FogCoord, buffer, 1, ty, stride, offset);
    }

    pub fn vertex_array_tex_coord_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        let unit = self.client_active_unit();
        if unit < MAX_TEXTURE_COORDS {
            self.set_named(vaobj, ArrayKind::TexCoord(unit), buffer, size, ty, stride, offset);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn vertex_array_multi_tex_coord_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        texunit: GLenum,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        let unit = texunit.wrapping_sub(TEXTURE0) as usize;
        if unit < MAX_TEXTURE_COORDS {
            self.set_named(vaobj, ArrayKind::TexCoord(unit), buffer, size, ty, stride, offset);
        }
    }

    /// Decodes one of the fixed interleaved layouts into the named arrays.
    pub fn interleaved_arrays(&mut self, format: GLenum, stride: GLsizei, pointer: *const c_void) {
        if self.vertex_array_binding != 0 || stride < 0 {
            return;
        }
        let layout = match InterleavedLayout::from_format(format) {
            Some(layout) => layout,
            None => return,
        };
        let stride = if stride == 0 { layout.stride } else { stride };
        let base = pointer as GLintptr;
        let buffer = self.array_buffer_binding;

        for kind in &[
            ArrayKind::EdgeFlag,
            ArrayKind::Index,
            ArrayKind::SecondaryColor,
            ArrayKind::FogCoord,
        ] {
            self.named[kind.slot()].enabled = false;
        }

        let unit = self.client_active_unit();
        if unit < MAX_TEXTURE_COORDS {
            let tex = ArrayKind::TexCoord(unit);
            if layout.tex_coord_size > 0 {
                self.named[tex.slot()].enabled = true;
                self.set_named(0, tex, buffer, layout.tex_coord_size, FLOAT, stride, base);
            } else {
                self.named[tex.slot()].enabled = false;
            }
        }

        if layout.color_size > 0 {
            self.named[ArrayKind::Color.slot()].enabled = true;
            let offset = base + layout.color_offset as GLintptr;
            self.set_named(
                0,
                ArrayKind::Color,
                buffer,
                layout.color_size,
                layout.color_type,
                stride,
                offset,
            );
        } else {
            self.named[ArrayKind::Color.slot()].enabled = false;
        }

        if layout.normal {
            self.named[ArrayKind::Normal.slot()].enabled = true;
            let offset = base + layout.normal_offset as GLintptr;
            self.set_named(0, ArrayKind::Normal, buffer, 3, FLOAT, stride, offset);
        } else {
            self.named[ArrayKind::Normal.slot()].enabled = false;
        }

        self.named[ArrayKind::Vertex.slot()].enabled = true;
        let offset = base + layout.vertex_offset as GLintptr;
        self.set_named(0, ArrayKind::Vertex, buffer, layout.vertex_size, FLOAT, stride, offset);
    }

    // ------------------------------------------------------------------------
    // Generic attributes

    fn attrib_mut(&mut self, vaobj: GLuint, index: GLuint) -> Option<&mut GenericAttribute> {
        if self.editable(vaobj) {
            self.generic.get_mut(index as usize)
        } else {
            None
        }
    }

    fn binding_mut(&mut self, index: GLuint) -> Option<&mut BindingPoint> {
        if self.editable(0) {
            self.bindings.get_mut(index as usize)
        } else {
            None
        }
    }

    pub fn enable_vertex_attrib_array(&mut self, index: GLuint) {
        if let Some(a) = self.attrib_mut(0, index) {
            a.enabled = true;
        }
    }

    pub fn disable_vertex_attrib_array(&mut self, index: GLuint) {
        if let Some(a) = self.attrib_mut(0, index) {
            a.enabled = false;
        }
    }

    pub fn enable_vertex_array_attrib_ext(&mut self, vaobj: GLuint, index: GLuint) {
        if let Some(a) = self.attrib_mut(vaobj, index) {
            a.enabled = true;
        }
    }

    pub fn disable_vertex_array_attrib_ext(&mut self, vaobj: GLuint, index: GLuint) {
        if let Some(a) = self.attrib_mut(vaobj, index) {
            a.enabled = false;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn set_format(
        &mut self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        relative_offset: GLuint,
        is_integer: bool,
        is_long: bool,
    ) {
        if let Some(a) = self.attrib_mut(0, index) {
            a.size = size;
            a.data_type = ty;
            a.relative_offset = relative_offset;
            a.normalized = normalized;
            a.is_integer = is_integer;
            a.is_long = is_long;
        }
    }

    pub fn vertex_attrib_format(
        &mut self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        relative_offset: GLuint,
    ) {
        self.set_format(index, size, ty, normalized, relative_offset, false, false);
    }

    pub fn vertex_attrib_i_format(
        &mut self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        relative_offset: GLuint,
    ) {
        self.set_format(index, size, ty, false, relative_offset, true, false);
    }

    pub fn vertex_attrib_l_format(
        &mut self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        relative_offset: GLuint,
    ) {
        self.set_format(index, size, ty, false, relative_offset, false, true);
    }

    pub fn vertex_attrib_binding(&mut self, index: GLuint, binding: GLuint) {
        if binding as usize >= MAX_BINDINGS {
            return;
        }
        if let Some(a) = self.attrib_mut(0, index) {
            a.binding_index = binding;
        }
    }

    pub fn bind_vertex_buffer(
        &mut self,
        index: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    ) {
        if let Some(b) = self.binding_mut(index) {
            b.buffer = buffer;
            b.offset = offset;
            b.stride = stride;
        }
    }

    /// `glBindVertexBuffers`. Without a buffer list the range is reset to
    /// its defaults.
    pub fn bind_vertex_buffers(
        &mut self,
        first: GLuint,
        count: GLsizei,
        buffers: Option<&[GLuint]>,
        offsets: &[GLintptr],
        strides: &[GLsizei],
    ) {
        let (first, count) = (first as usize, count.max(0) as usize);
        if !self.editable(0) || first + count > MAX_BINDINGS {
            return;
        }
        match buffers {
            None => {
                for b in &mut self.bindings[first..first + count] {
                    *b = BindingPoint::default();
                }
            }
            Some(buffers) => {
                if buffers.len() < count || offsets.len() < count || strides.len() < count {
                    return;
                }
                for i in 0..count {
                    let b = &mut self.bindings[first + i];
                    b.buffer = buffers[i];
                    b.offset = offsets[i];
                    b.stride = strides[i];
                }
            }
        }
    }

    pub fn vertex_binding_divisor(&mut self, index: GLuint, divisor: GLuint) {
        if let Some(b) = self.binding_mut(index) {
            b.divisor = divisor;
        }
    }

    /// The legacy divisor call ties attribute `index` to binding `index`.
    pub fn vertex_attrib_divisor(&mut self, index: GLuint, divisor: GLuint) {
        if index as usize >= MAX_ATTRIBS.min(MAX_BINDINGS) || !self.editable(0) {
            return;
        }
        self.generic[index as usize].binding_index = index;
        self.bindings[index as usize].divisor = divisor;
    }

    #[allow(clippy::too_many_arguments)]
    fn set_attrib_pointer(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        is_integer: bool,
        is_long: bool,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        if !self.editable(vaobj) || index as usize >= MAX_ATTRIBS.min(MAX_BINDINGS) {
            return;
        }
        self.set_format(index, size, ty, normalized, 0, is_integer, is_long);
        self.vertex_attrib_binding(index, index);
        self.bind_vertex_buffer(index, buffer, offset, effective_stride(size, ty, stride));
    }

    pub fn vertex_attrib_pointer(
        &mut self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.set_attrib_pointer(
            0,
            buffer,
            index,
            size,
            ty,
            normalized,
            false,
            false,
            stride,
            pointer as GLintptr,
        );
    }

    pub fn vertex_attrib_i_pointer(
        &mut self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.set_attrib_pointer(
            0,
            buffer,
            index,
            size,
            ty,
            false,
            true,
            false,
            stride,
            pointer as GLintptr,
        );
    }

    pub fn vertex_attrib_l_pointer(
        &mut self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let buffer = self.array_buffer_binding;
        self.set_attrib_pointer(
            0,
            buffer,
            index,
            size,
            ty,
            false,
            false,
            true,
            stride,
            pointer as GLintptr,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn vertex_array_vertex_attrib_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_attrib_pointer(
            vaobj,
            buffer,
            index,
            size,
            ty,
            normalized,
            false,
            false,
            stride,
            offset,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn vertex_array_vertex_attrib_i_offset_ext(
        &mut self,
        vaobj: GLuint,
        buffer: GLuint,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        offset: GLintptr,
    ) {
        self.set_attrib_pointer(vaobj, buffer, index, size, ty, false, true, false, stride, offset);
    }

    // ------------------------------------------------------------------------
    // Replay

    fn same_default_object(&self, other: &VertexArray) -> bool {
        self.named == other.named
            && self.bindings == other.bindings
            && self.generic == other.generic
            && self.element_array_buffer_binding == other.element_array_buffer_binding
            && self.client_active_texture == other.client_active_texture
            && self.primitive_restart_fixed_index == other.primitive_restart_fixed_index
            && self.primitive_restart == other.primitive_restart
            && self.primitive_restart_index == other.primitive_restart_index
            && self.array_buffer_binding == other.array_buffer_binding
    }

    /// Applies the complete state to the driver.
    ///
    /// Pointer calls for arrays without a buffer are skipped when the driver
    /// rejects client memory arrays.
    pub unsafe fn set<D: Driver>(&self, d: &mut D, allows_client_arrays: bool) {
        d.BindVertexArray(0);
        for (slot, named) in self.named.iter().enumerate() {
            let kind = match ArrayKind::from_slot(slot) {
                Some(kind) => kind,
                None => continue,
            };
            named.apply_enable(d, kind);
            d.BindBuffer(ARRAY_BUFFER, named.buffer);
            if allows_client_arrays || named.buffer != 0 {
                named.apply_pointer(d, kind);
            }
        }
        for (index, binding) in self.bindings.iter().enumerate() {
            binding.apply(d, index as GLuint);
        }
        for (index, attrib) in self.generic.iter().enumerate() {
            attrib.apply_enable(d, index as GLuint);
            attrib.apply_format(d, index as GLuint);
            d.VertexAttribBinding(index as GLuint, attrib.binding_index);
        }
        d.BindBuffer(ELEMENT_ARRAY_BUFFER, self.element_array_buffer_binding);
        d.ClientActiveTexture(self.client_active_texture);
        enable(d, PRIMITIVE_RESTART_FIXED_INDEX, self.primitive_restart_fixed_index);
        enable(d, PRIMITIVE_RESTART, self.primitive_restart);
        d.PrimitiveRestartIndex(self.primitive_restart_index);
        d.BindBuffer(ARRAY_BUFFER, self.array_buffer_binding);
        d.BindVertexArray(self.vertex_array_binding);
    }

    /// Moves the driver from `self` to `to`, issuing calls only for the
    /// fields that differ, and leaves `self` equal to `to`.
    pub unsafe fn transition<D: Driver>(
        &mut self,
        d: &mut D,
        to: &VertexArray,
        allows_client_arrays: bool,
    ) {
        let mut bound_vao = self.vertex_array_binding;

        if !self.same_default_object(to) {
            if bound_vao != 0 {
                d.BindVertexArray(0);
                bound_vao = 0;
            }
            let mut array_buffer = self.array_buffer_binding;

            for (slot, (from, target)) in self.named.iter().zip(to.named.iter()).enumerate() {
                let kind = match ArrayKind::from_slot(slot) {
                    Some(kind) => kind,
                    None => continue,
                };
                if from.enabled != target.enabled {
                    target.apply_enable(d, kind);
                }
                if !from.same_source(target) && (allows_client_arrays || target.buffer != 0) {
                    if array_buffer != target.buffer {
                        d.BindBuffer(ARRAY_BUFFER, target.buffer);
                        array_buffer = target.buffer;
                    }
                    target.apply_pointer(d, kind);
                }
            }

            for (index, (from, target)) in
                self.bindings.iter().zip(to.bindings.iter()).enumerate()
            {
                let index = index as GLuint;
                if !from.same_source(target) {
                    d.BindVertexBuffer(index, target.buffer, target.offset, target.stride);
                }
                if from.divisor != target.divisor {
                    d.VertexBindingDivisor(index, target.divisor);
                }
            }

            for (index, (from, target)) in self.generic.iter().zip(to.generic.iter()).enumerate() {
                let index = index as GLuint;
                if from.enabled != target.enabled {
                    target.apply_enable(d, index);
                }
                if !from.same_format(target) {
                    target.apply_format(d, index);
                }
                if from.binding_index != target.binding_index {
                    d.VertexAttribBinding(index, target.binding_index);
                }
            }

            if self.element_array_buffer_binding != to.element_array_buffer_binding {
                d.BindBuffer(ELEMENT_ARRAY_BUFFER, to.element_array_buffer_binding);
            }
            if self.client_active_texture != to.client_active_texture {
                d.ClientActiveTexture(to.client_active_texture);
            }
            if self.primitive_restart_fixed_index != to.primitive_restart_fixed_index {
                enable(d, PRIMITIVE_RESTART_FIXED_INDEX, to.primitive_restart_fixed_index);
            }
            if self.primitive_restart != to.primitive_restart {
                enable(d, PRIMITIVE_RESTART, to.primitive_restart);
            }
            if self.primitive_restart_index != to.primitive_restart_index {
                d.PrimitiveRestartIndex(to.primitive_restart_index);
            }
            if array_buffer != to.array_buffer_binding {
                d.BindBuffer(ARRAY_BUFFER, to.array_buffer_binding);
            }
        }

        if bound_vao != to.vertex_array_binding {
            d.BindVertexArray(to.vertex_array_binding);
        }
        self.clone_from(to);
    }
}

// ----------------------------------------------------------------------------
