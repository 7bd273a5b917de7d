//! Vertex array objects emulated on top of plain generic attributes.
//!
//! Every object is a table of attribute pointers. Binding an object replays
//! its table to the driver. Attributes sourced from client memory are given a
//! shadow buffer once; the draw entry points in [`draw`] refresh the shadow
//! contents before the real draw is issued.

#![allow(unsafe_code)]

mod coverage;
pub mod draw;

pub use coverage::{Block, MultiCoverage};
pub use draw::{DrawArraysCommand, DrawElementsCommand};

use crate::{
    context::{Context, Profile},
    driver::Driver,
    enums::*,
    format::{valid_attrib_pointer, ArrayKind, InterleavedLayout},
};
use gl::types::{GLboolean, GLenum, GLint, GLsizei, GLuint};
use std::{collections::HashMap, os::raw::c_void};

/// Names up to this value are handed out by counting up. Past it, names are
/// found by probing the table for holes.
const NAME_PROBE_THRESHOLD: GLuint = 0x8000_0000;

// ----------------------------------------------------------------------------

/// One generic attribute slot of an emulated object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Array {
    pub enabled: bool,
    /// Buffer the driver reads from: the application's buffer, or
    /// `shadow_buffer` for client memory.
    pub buffer: GLuint,
    pub shadow_buffer: GLuint,
    pub size: GLint,
    pub data_type: GLenum,
    pub normalized: bool,
    pub stride: GLsizei,
    /// Offset into `buffer`.
    pub pointer: usize,
    /// Client address uploaded into `shadow_buffer` at draw time.
    pub shadow_pointer: usize,
}

impl Array {
    const DEFAULT: Array = Array {
        enabled: false,
        buffer: 0,
        shadow_buffer: 0,
        size: 4,
        data_type: FLOAT,
        normalized: false,
        stride: 0,
        pointer: 0,
        shadow_pointer: 0,
    };

    /// Enabled and fed from client memory through its shadow buffer.
    pub fn is_shadowed(&self) -> bool {
        self.enabled
            && self.shadow_buffer != 0
            && self.buffer == self.shadow_buffer
            && self.shadow_pointer != 0
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An emulated vertex array object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Object {
    pub vertex_buffer: GLuint,
    pub index_buffer: GLuint,
    pub arrays: [Array; MAX_ATTRIBS],
}

impl Object {
    const DEFAULT: Object = Object {
        vertex_buffer: 0,
        index_buffer: 0,
        arrays: [Array::DEFAULT; MAX_ATTRIBS],
    };
}

impl Default for Object {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ----------------------------------------------------------------------------

/// Where the fixed-function arrays live among the generic attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttribMap {
    pub vertex: GLuint,
    pub normal: GLuint,
    pub color: GLuint,
    pub secondary_color: Option<GLuint>,
    pub fog_coord: Option<GLuint>,
    pub tex_coord_begin: GLuint,
    pub tex_coord_units: usize,
}

impl AttribMap {
    /// The conventional aliasing for 16 attributes, or a compressed layout
    /// without secondary color and fog for smaller implementations.
    pub fn for_attribs(max_vertex_attribs: usize) -> Self {
        if max_vertex_attribs >= 16 {
            Self {
                vertex: 0,
                normal: 2,
                color: 3,
                secondary_color: Some(4),
                fog_coord: Some(5),
                tex_coord_begin: 8,
                tex_coord_units: 8,
            }
        } else {
            Self {
                vertex: 0,
                normal: 1,
                color: 2,
                secondary_color: None,
                fog_coord: None,
                tex_coord_begin: 3,
                tex_coord_units: 5,
            }
        }
    }

    /// Attribute index of a legacy array. Index and edge flag arrays have no
    /// generic counterpart.
    pub fn index(&self, kind: ArrayKind) -> Option<GLuint> {
        match kind {
            ArrayKind::Vertex => Some(self.vertex),
            ArrayKind::Normal => Some(self.normal),
            ArrayKind::Color => Some(self.color),
            ArrayKind::SecondaryColor => self.secondary_color,
            ArrayKind::FogCoord => self.fog_coord,
            ArrayKind::TexCoord(unit) => {
                let unit = if unit >= self.tex_coord_units {
                    tracing::warn!(
                        "texture unit {} out of range, clamping to {}",
                        unit,
                        self.tex_coord_units - 1
                    );
                    self.tex_coord_units - 1
                } else {
                    unit
                };
                Some(self.tex_coord_begin + unit as GLuint)
            }
            ArrayKind::Index | ArrayKind::EdgeFlag => None,
        }
    }
}

// ----------------------------------------------------------------------------

/// The emulated object table of one context.
#[derive(Clone, Debug)]
pub struct Vao {
    objects: HashMap<GLuint, Object>,
    current: GLuint,
    /// Enabled attributes of the current object, one bit per index.
    enables: u32,
    /// Real object bound once on core profiles, where attribute state needs a
    /// bound VAO. Never visible to the application.
    core_vao: GLuint,
    max_name: GLuint,
    client_active_texture: GLenum,
    attrib_map: AttribMap,
    max_vertex_attribs: usize,
}

impl Default for Vao {
    fn default() -> Self {
        let mut objects = HashMap::new();
        objects.insert(0, Object::default());
        Self {
            objects,
            current: 0,
            enables: 0,
            core_vao: 0,
            max_name: 0,
            client_active_texture: TEXTURE0,
            attrib_map: AttribMap::for_attribs(MAX_ATTRIBS),
            max_vertex_attribs: MAX_ATTRIBS,
        }
    }
}

impl Vao {
    pub fn new<D: Driver>(ctx: &mut Context<D>, share_with: Option<&Vao>) -> Self {
        let mut vao = Self::default();
        vao.init(ctx, share_with);
        vao
    }

    /// Sets up the table for `ctx`, sharing the objects of `share_with` if
    /// the context joins a share group. Advertises vertex array object
    /// support on the context.
    pub fn init<D: Driver>(&mut self, ctx: &mut Context<D>, share_with: Option<&Vao>) {
        self.max_name = 0;
        self.client_active_texture = TEXTURE0;

        let reported = ctx.caps.max_vertex_attribs as usize;
        self.max_vertex_attribs = if reported >= MAX_ATTRIBS {
            MAX_ATTRIBS
        } else {
            reported.min(8)
        };
        self.attrib_map = AttribMap::for_attribs(self.max_vertex_attribs);

        if let Some(sibling) = share_with {
            self.objects = sibling.objects.clone();
            self.max_name = sibling.max_name;
        }
        self.objects.entry(0).or_default();

        self.core_vao = 0;
        if ctx.caps.profile == Profile::Core {
            let mut name = 0;
            unsafe { ctx.driver.GenVertexArrays(1, &mut name) };
            if name == 0 {
                tracing::warn!("failed to create the core profile vertex array object");
            } else {
                unsafe { ctx.driver.BindVertexArray(name) };
            }
            self.core_vao = name;
            self.max_name = self.max_name.max(1);
        }

        // Force the replay of object 0.
        self.current = GLuint::MAX;
        self.bind_vertex_array(ctx, 0);

        ctx.caps.arb_vertex_array_object = true;
    }

    fn current(&self) -> &Object {
        self.objects.get(&self.current).unwrap_or(&Object::DEFAULT)
    }

    fn current_mut(&mut self) -> &mut Object {
        self.objects.entry(self.current).or_default()
    }

    fn client_unit(&self) -> usize {
        (self.client_active_texture - TEXTURE0) as usize
    }

    pub fn object(&self, name: GLuint) -> Option<&Object> {
        self.objects.get(&name)
    }

    pub fn attrib_map(&self) -> &AttribMap {
        &self.attrib_map
    }

    pub fn max_vertex_attribs(&self) -> usize {
        self.max_vertex_attribs
    }

    // ------------------------------------------------------------------------
    // Object table

    /// `glBindVertexArray`. Names never generated are created on first bind.
    pub fn bind_vertex_array<D: Driver>(&mut self, ctx: &mut Context<D>, name: GLuint) {
        if name == self.current {
            return;
        }
        self.current = name;
        let object = *self.current_mut();
        self.max_name = self.max_name.max(name);

        let d = &mut ctx.driver;
        unsafe {
            d.BindBuffer(ARRAY_BUFFER, object.vertex_buffer);
            d.BindBuffer(ELEMENT_ARRAY_BUFFER, object.index_buffer);
        }

        let mut last_buffer = object.vertex_buffer;
        for (i, a) in object.arrays.iter().enumerate().take(self.max_vertex_attribs) {
            if a.buffer != last_buffer {
                unsafe { ctx.driver.BindBuffer(ARRAY_BUFFER, a.buffer) };
                last_buffer = a.buffer;
            }
            self.set_enabled(ctx, i as GLuint, a.enabled);
            unsafe {
                ctx.driver.VertexAttribPointer(
                    i as GLuint,
                    a.size,
                    a.data_type,
                    a.normalized as GLboolean,
                    a.stride,
                    a.pointer as *const c_void,
                )
            };
        }

        if last_buffer != object.vertex_buffer {
            unsafe { ctx.driver.BindBuffer(ARRAY_BUFFER, object.vertex_buffer) };
        }
    }

    /// `glGenVertexArrays`.
    pub fn gen_vertex_arrays(&mut self, n: usize) -> Vec<GLuint> {
        let mut names = Vec::with_capacity(n);
        if self.max_name < NAME_PROBE_THRESHOLD {
            for _ in 0..n {
                self.max_name += 1;
                self.objects.insert(self.max_name, Object::default());
                names.push(self.max_name);
            }
        } else {
            let mut name: GLuint = 1;
            while names.len() < n && name != GLuint::MAX {
                if name != self.core_vao && !self.objects.contains_key(&name) {
                    self.objects.insert(name, Object::default());
                    names.push(name);
                }
                name += 1;
            }
        }
        names
    }

    /// `glDeleteVertexArrays`. Frees the shadow buffers of every deleted
    /// object. Deleting the bound object binds object 0.
    pub fn delete_vertex_arrays<D: Driver>(&mut self, ctx: &mut Context<D>, names: &[GLuint]) {
        for &name in names {
            if name == 0 || name == self.core_vao {
                continue;
            }
            let object = match self.objects.remove(&name) {
                Some(object) => object,
                None => continue,
            };

            let shadows: Vec<GLuint> = object
                .arrays
                .iter()
                .map(|a| a.shadow_buffer)
                .filter(|&b| b != 0)
                .collect();
            if !shadows.is_empty() {
                unsafe {
                    ctx.driver
                        .DeleteBuffers(shadows.len() as GLsizei, shadows.as_ptr())
                };
            }

            if name == self.current {
                self.bind_vertex_array(ctx, 0);
            }
        }
    }

    /// `glIsVertexArray`.
    pub fn is_vertex_array(&self, name: GLuint) -> bool {
        name != 0 && self.objects.contains_key(&name)
    }

    /// Tracks `glBindBuffer` for the targets that belong to the object.
    pub fn shadow_buffer_binding(&mut self, target: GLenum, buffer: GLuint) {
        match target {
            ARRAY_BUFFER => self.current_mut().vertex_buffer = buffer,
            ELEMENT_ARRAY_BUFFER => self.current_mut().index_buffer = buffer,
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Generic attributes

    fn set_enabled<D: Driver>(&mut self, ctx: &mut Context<D>, index: GLuint, enabled: bool) {
        let i = index as usize;
        if i >= self.max_vertex_attribs {
            tracing::trace!("attribute index {} out of range", index);
            return;
        }
        self.current_mut().arrays[i].enabled = enabled;
        if enabled {
            self.enables |= 1 << i;
            unsafe { ctx.driver.EnableVertexAttribArray(index) };
        } else {
            self.enables &= !(1 << i);
            unsafe { ctx.driver.DisableVertexAttribArray(index) };
        }
    }

    pub fn enable_vertex_attrib_array<D: Driver>(&mut self, ctx: &mut Context<D>, index: GLuint) {
        self.set_enabled(ctx, index, true);
    }

    pub fn disable_vertex_attrib_array<D: Driver>(&mut self, ctx: &mut Context<D>, index: GLuint) {
        self.set_enabled(ctx, index, false);
    }

    /// `glVertexAttribPointer`.
    ///
    /// With no array buffer bound, `pointer` is a client address. The
    /// attribute is then pointed at offset 0 of its shadow buffer and the
    /// address is kept for the upload at draw time. A null client address is
    /// ignored.
    #[allow(clippy::too_many_arguments)]
    pub fn attrib_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        if ctx.in_begin_end() {
            return;
        }
        let i = index as usize;
        if i >= self.max_vertex_attribs || !valid_attrib_pointer(size, ty, normalized, stride) {
            tracing::trace!("ignoring attribute pointer for index {}", index);
            return;
        }

        let vertex_buffer = self.current().vertex_buffer;
        if vertex_buffer == 0 && pointer.is_null() {
            return;
        }

        let d = &mut ctx.driver;
        let a = &mut self.current_mut().arrays[i];
        if vertex_buffer == 0 && a.shadow_buffer == 0 {
            let mut name = 0;
            unsafe { d.GenBuffers(1, &mut name) };
            if name == 0 {
                tracing::warn!("failed to allocate a shadow buffer for attribute {}", index);
                return;
            }
            a.shadow_buffer = name;
        }

        a.size = size;
        a.data_type = ty;
        a.normalized = normalized;
        a.stride = stride;
        if vertex_buffer == 0 {
            a.buffer = a.shadow_buffer;
            a.pointer = 0;
            a.shadow_pointer = pointer as usize;
            unsafe { d.BindBuffer(ARRAY_BUFFER, a.shadow_buffer) };
        } else {
            a.buffer = vertex_buffer;
            a.pointer = pointer as usize;
            a.shadow_pointer = 0;
        }

        let a = *a;
        unsafe {
            d.VertexAttribPointer(
                index,
                a.size,
                a.data_type,
                a.normalized as GLboolean,
                a.stride,
                a.pointer as *const c_void,
            );
            if vertex_buffer == 0 {
                d.BindBuffer(ARRAY_BUFFER, 0);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Queries

    /// `glGetVertexAttribiv`. Attributes fed from client memory report no
    /// buffer.
    pub fn get_attrib(&self, index: GLuint, pname: GLenum) -> Option<GLint> {
        let a = self.current().arrays.get(index as usize)?;
        Some(match pname {
            VERTEX_ATTRIB_ARRAY_ENABLED => a.enabled as GLint,
            VERTEX_ATTRIB_ARRAY_BUFFER_BINDING if a.shadow_pointer != 0 => 0,
            VERTEX_ATTRIB_ARRAY_BUFFER_BINDING => a.buffer as GLint,
            VERTEX_ATTRIB_ARRAY_SIZE => a.size,
            VERTEX_ATTRIB_ARRAY_TYPE => a.data_type as GLint,
            VERTEX_ATTRIB_ARRAY_NORMALIZED => a.normalized as GLint,
            VERTEX_ATTRIB_ARRAY_STRIDE => a.stride,
            VERTEX_ATTRIB_ARRAY_DIVISOR => 0,
            _ => return None,
        })
    }

    /// `glGetVertexAttribPointerv`: the client address for client memory
    /// attributes, the buffer offset otherwise.
    pub fn get_attrib_pointer(&self, index: GLuint, pname: GLenum) -> Option<*const c_void> {
        if pname != VERTEX_ATTRIB_ARRAY_POINTER {
            return None;
        }
        let a = self.current().arrays.get(index as usize)?;
        let address = if a.shadow_pointer != 0 {
            a.shadow_pointer
        } else {
            a.pointer
        };
        Some(address as *const c_void)
    }

    pub fn get(&self, pname: GLenum) -> Option<GLint> {
        Some(match pname {
            VERTEX_ARRAY_BINDING => self.current as GLint,
            ARRAY_BUFFER_BINDING => self.current().vertex_buffer as GLint,
            ELEMENT_ARRAY_BUFFER_BINDING => self.current().index_buffer as GLint,
            _ => return None,
        })
    }

    // ------------------------------------------------------------------------
    // Fixed-function arrays, aliased onto generic attributes

    fn legacy_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        kind: ArrayKind,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        if ctx.in_begin_end() {
            return;
        }
        if !kind.accepts(size, ty, stride) {
            tracing::trace!("ignoring {:?} pointer of size {} type 0x{:X}", kind, size, ty);
            return;
        }
        match self.attrib_map.index(kind) {
            Some(index) => {
                self.attrib_pointer(ctx, index, size, ty, kind.normalized(), stride, pointer)
            }
            None => tracing::trace!("{:?} has no attribute", kind),
        }
    }

    pub fn vertex_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.legacy_pointer(ctx, ArrayKind::Vertex, size, ty, stride, pointer);
    }

    pub fn normal_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.legacy_pointer(ctx, ArrayKind::Normal, 3, ty, stride, pointer);
    }

    pub fn color_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.legacy_pointer(ctx, ArrayKind::Color, size, ty, stride, pointer);
    }

    pub fn secondary_color_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.legacy_pointer(ctx, ArrayKind::SecondaryColor, size, ty, stride, pointer);
    }

    pub fn fog_coord_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.legacy_pointer(ctx, ArrayKind::FogCoord, 1, ty, stride, pointer);
    }

    /// Texture coordinates of the client active unit.
    pub fn tex_coord_pointer<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        size: GLint,
        ty: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        let kind = ArrayKind::TexCoord(self.client_unit());
        self.legacy_pointer(ctx, kind, size, ty, stride, pointer);
    }

    pub fn client_active_texture<D: Driver>(&mut self, ctx: &mut Context<D>, texture: GLenum) {
        if ctx.in_begin_end() {
            return;
        }
        let unit = texture.wrapping_sub(TEXTURE0) as usize;
        if unit < MAX_ATTRIBS {
            self.client_active_texture = texture;
        } else {
            tracing::trace!("ignoring client active texture 0x{:X}", texture);
        }
    }

    fn client_state<D: Driver>(&mut self, ctx: &mut Context<D>, array: GLenum, enabled: bool) {
        if ctx.in_begin_end() {
            return;
        }
        let kind = ArrayKind::from_cap(array, self.client_unit());
        match kind.and_then(|k| self.attrib_map.index(k)) {
            Some(index) => self.set_enabled(ctx, index, enabled),
            None => tracing::trace!("ignoring client state 0x{:X}", array),
        }
    }

    pub fn enable_client_state<D: Driver>(&mut self, ctx: &mut Context<D>, array: GLenum) {
        self.client_state(ctx, array, true);
    }

    pub fn disable_client_state<D: Driver>(&mut self, ctx: &mut Context<D>, array: GLenum) {
        self.client_state(ctx, array, false);
    }

    /// `glInterleavedArrays`. Unknown formats are ignored.
    pub fn interleaved_arrays<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        format: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        if ctx.in_begin_end() {
            return;
        }
        let layout = match InterleavedLayout::from_format(format) {
            Some(layout) => layout,
            None => {
                tracing::trace!("unknown interleaved format 0x{:X}", format);
                return;
            }
        };
        let stride = if stride == 0 { layout.stride } else { stride };
        let at = |offset: usize| (pointer as usize + offset) as *const c_void;

        self.disable_client_state(ctx, SECONDARY_COLOR_ARRAY);
        self.disable_client_state(ctx, FOG_COORD_ARRAY);

        if layout.tex_coord_size > 0 {
            self.enable_client_state(ctx, TEXTURE_COORD_ARRAY);
            self.tex_coord_pointer(ctx, layout.tex_coord_size, FLOAT, stride, pointer);
        } else {
            self.disable_client_state(ctx, TEXTURE_COORD_ARRAY);
        }

        if layout.color_size > 0 {
            self.enable_client_state(ctx, COLOR_ARRAY);
            let color = at(layout.color_offset);
            self.color_pointer(ctx, layout.color_size, layout.color_type, stride, color);
        } else {
            self.disable_client_state(ctx, COLOR_ARRAY);
        }

        if layout.normal {
            self.enable_client_state(ctx, NORMAL_ARRAY);
            self.normal_pointer(ctx, FLOAT, stride, at(layout.normal_offset));
        } else {
            self.disable_client_state(ctx, NORMAL_ARRAY);
        }

        self.enable_client_state(ctx, VERTEX_ARRAY);
        self.vertex_pointer(ctx, layout.vertex_size, FLOAT, stride, at(layout.vertex_offset));
    }
}

// ----------------------------------------------------------------------------
