//! A [`Driver`] that records every state changing call and simulates just
//! enough of GL (names, bindings, buffer storage, enables) for the emulation
//! to be exercised without a context.

#![allow(unsafe_code)]

use crate::{driver::Driver, enums::*};
use gl::types::*;
use std::{
    collections::{HashMap, HashSet},
    os::raw::c_void,
    ptr, slice,
};

// ----------------------------------------------------------------------------

/// One recorded driver call. Pointers are kept as addresses, arrays behind
/// pointers are copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    GenBuffers { names: Vec<GLuint> },
    DeleteBuffers { names: Vec<GLuint> },
    BindBuffer { target: GLenum, buffer: GLuint },
    BufferData {
        target: GLenum,
        data: Vec<u8>,
        usage: GLenum,
    },
    MapBufferRange {
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
    },
    UnmapBuffer { target: GLenum },

    Enable { cap: GLenum },
    Disable { cap: GLenum },
    PrimitiveRestartIndex { index: GLuint },
    PixelStorei { pname: GLenum, param: GLint },

    GenVertexArrays { names: Vec<GLuint> },
    BindVertexArray { array: GLuint },

    EnableVertexAttribArray { index: GLuint },
    DisableVertexAttribArray { index: GLuint },
    VertexAttribPointer {
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: bool,
        stride: GLsizei,
        pointer: usize,
    },
    VertexAttribFormat {
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: bool,
        relative_offset: GLuint,
    },
    VertexAttribIFormat {
        index: GLuint,
        size: GLint,
        type_: GLenum,
        relative_offset: GLuint,
    },
    VertexAttribLFormat {
        index: GLuint,
        size: GLint,
        type_: GLenum,
        relative_offset: GLuint,
    },
    VertexAttribBinding { index: GLuint, binding: GLuint },
    BindVertexBuffer {
        binding: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    },
    VertexBindingDivisor { binding: GLuint, divisor: GLuint },

    EnableClientState { array: GLenum },
    DisableClientState { array: GLenum },
    EnableClientStateiEXT { array: GLenum, index: GLuint },
    DisableClientStateiEXT { array: GLenum, index: GLuint },
    VertexPointer {
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: usize,
    },
    NormalPointer {
        type_: GLenum,
        stride: GLsizei,
        pointer: usize,
    },
    ColorPointer {
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: usize,
    },
    SecondaryColorPointer {
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: usize,
    },
    IndexPointer {
        type_: GLenum,
        stride: GLsizei,
        pointer: usize,
    },
    EdgeFlagPointer { stride: GLsizei, pointer: usize },
    FogCoordPointer {
        type_: GLenum,
        stride: GLsizei,
        pointer: usize,
    },
    MultiTexCoordPointerEXT {
        texunit: GLenum,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: usize,
    },
    ClientActiveTexture { texture: GLenum },
    PushClientAttrib { mask: GLbitfield },
    PopClientAttrib,
    ClientAttribDefaultEXT { mask: GLbitfield },

    DrawArrays {
        mode: GLenum,
        first: GLint,
        count: GLsizei,
    },
    DrawArraysInstanced {
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instances: GLsizei,
    },
    DrawArraysInstancedBaseInstance {
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instances: GLsizei,
        base_instance: GLuint,
    },
    MultiDrawArrays {
        mode: GLenum,
        first: Vec<GLint>,
        count: Vec<GLsizei>,
    },
    DrawElements {
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
    },
    DrawElementsInstanced {
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
        instances: GLsizei,
    },
    DrawElementsInstancedBaseInstance {
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
        instances: GLsizei,
        base_instance: GLuint,
    },
    DrawElementsBaseVertex {
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
        base_vertex: GLint,
    },
    DrawElementsInstancedBaseVertex {
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
        instances: GLsizei,
        base_vertex: GLint,
    },
    DrawElementsInstancedBaseVertexBaseInstance {
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
        instances: GLsizei,
        base_vertex: GLint,
        base_instance: GLuint,
    },
    DrawRangeElements {
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
    },
    DrawRangeElementsBaseVertex {
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: usize,
        base_vertex: GLint,
    },
    MultiDrawElements {
        mode: GLenum,
        count: Vec<GLsizei>,
        type_: GLenum,
        indices: Vec<usize>,
    },
    MultiDrawElementsBaseVertex {
        mode: GLenum,
        count: Vec<GLsizei>,
        type_: GLenum,
        indices: Vec<usize>,
        base_vertex: Vec<GLint>,
    },

    DrawArraysIndirect { mode: GLenum, indirect: usize },
    DrawElementsIndirect {
        mode: GLenum,
        type_: GLenum,
        indirect: usize,
    },
    MultiDrawArraysIndirect {
        mode: GLenum,
        indirect: usize,
        draw_count: GLsizei,
        stride: GLsizei,
    },
    MultiDrawElementsIndirect {
        mode: GLenum,
        type_: GLenum,
        indirect: usize,
        draw_count: GLsizei,
        stride: GLsizei,
    },
    MultiDrawArraysIndirectCount {
        mode: GLenum,
        indirect: usize,
        draw_count: GLintptr,
        max_draw_count: GLsizei,
        stride: GLsizei,
    },
    MultiDrawElementsIndirectCount {
        mode: GLenum,
        type_: GLenum,
        indirect: usize,
        draw_count: GLintptr,
        max_draw_count: GLsizei,
        stride: GLsizei,
    },
}

impl Call {
    /// True for the calls that submit primitives.
    pub fn is_draw(&self) -> bool {
        use Call::*;
        matches!(
            self,
            DrawArrays { .. }
                | DrawArraysInstanced { .. }
                | DrawArraysInstancedBaseInstance { .. }
                | MultiDrawArrays { .. }
                | DrawElements { .. }
                | DrawElementsInstanced { .. }
                | DrawElementsInstancedBaseInstance { .. }
                | DrawElementsBaseVertex { .. }
                | DrawElementsInstancedBaseVertex { .. }
                | DrawElementsInstancedBaseVertexBaseInstance { .. }
                | DrawRangeElements { .. }
                | DrawRangeElementsBaseVertex { .. }
                | MultiDrawElements { .. }
                | MultiDrawElementsBaseVertex { .. }
                | DrawArraysIndirect { .. }
                | DrawElementsIndirect { .. }
                | MultiDrawArraysIndirect { .. }
                | MultiDrawElementsIndirect { .. }
                | MultiDrawArraysIndirectCount { .. }
                | MultiDrawElementsIndirectCount { .. }
        )
    }
}

// ----------------------------------------------------------------------------

/// Records calls and keeps a tiny simulated context.
///
/// Queries (`GetIntegerv`, `IsEnabled`, `GetBufferSubData`) are answered
/// from the simulated state and are not recorded.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    calls: Vec<Call>,
    next_buffer: GLuint,
    next_vertex_array: GLuint,
    bindings: HashMap<GLenum, GLuint>,
    buffers: HashMap<GLuint, Vec<u8>>,
    enabled: HashSet<GLenum>,
    restart_index: GLuint,
    vertex_array: GLuint,
    /// Hand out name 0 from the `Gen*` calls.
    pub fail_gen: bool,
    /// Make `MapBufferRange` return null.
    pub fail_map: bool,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// The recorded draw calls only.
    pub fn draws(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| c.is_draw()).collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Current contents of a live buffer.
    pub fn buffer_contents(&self, name: GLuint) -> Option<&[u8]> {
        self.buffers.get(&name).map(Vec::as_slice)
    }

    pub fn is_buffer(&self, name: GLuint) -> bool {
        self.buffers.contains_key(&name)
    }

    pub fn bound(&self, target: GLenum) -> GLuint {
        self.bindings.get(&target).copied().unwrap_or(0)
    }

    /// Stores `data` into buffer `name` and binds it to `target` without
    /// recording anything, for setting up a scenario.
    pub fn preload_buffer(&mut self, target: GLenum, name: GLuint, data: &[u8]) {
        self.next_buffer = self.next_buffer.max(name);
        self.buffers.insert(name, data.to_vec());
        self.bindings.insert(target, name);
    }

    /// Changes a capability without recording anything.
    pub fn preset_enabled(&mut self, cap: GLenum, enabled: bool) {
        if enabled {
            self.enabled.insert(cap);
        } else {
            self.enabled.remove(&cap);
        }
    }

    pub fn preset_restart_index(&mut self, index: GLuint) {
        self.restart_index = index;
    }

    fn record(&mut self, call: Call) {
        self.calls.push(call);
    }

    unsafe fn gen_names(
        next: &mut GLuint,
        fail: bool,
        n: GLsizei,
        out: *mut GLuint,
    ) -> Vec<GLuint> {
        let mut names = Vec::new();
        for i in 0..n.max(0) as usize {
            let name = if fail {
                0
            } else {
                *next += 1;
                *next
            };
            names.push(name);
            if !out.is_null() {
                *out.add(i) = name;
            }
        }
        names
    }

    fn binding_target(pname: GLenum) -> Option<GLenum> {
        Some(match pname {
            ARRAY_BUFFER_BINDING => ARRAY_BUFFER,
            ELEMENT_ARRAY_BUFFER_BINDING => ELEMENT_ARRAY_BUFFER,
            PIXEL_PACK_BUFFER_BINDING => PIXEL_PACK_BUFFER,
            PIXEL_UNPACK_BUFFER_BINDING => PIXEL_UNPACK_BUFFER,
            DRAW_INDIRECT_BUFFER_BINDING => DRAW_INDIRECT_BUFFER,
            PARAMETER_BUFFER_BINDING => PARAMETER_BUFFER,
            _ => return None,
        })
    }

    fn bound_storage(&mut self, target: GLenum) -> Option<&mut Vec<u8>> {
        let name = self.bound(target);
        self.buffers.get_mut(&name)
    }
}

unsafe fn copy_slice<T: Copy>(data: *const T, n: GLsizei) -> Vec<T> {
    if data.is_null() || n <= 0 {
        Vec::new()
    } else {
        slice::from_raw_parts(data, n as usize).to_vec()
    }
}

fn addr<T>(p: *const T) -> usize {
    p as usize
}

// ----------------------------------------------------------------------------

#[allow(non_snake_case)]
impl Driver for RecordingDriver {
    unsafe fn GenBuffers(&mut self, n: GLsizei, buffers: *mut GLuint) {
        let names = Self::gen_names(&mut self.next_buffer, self.fail_gen, n, buffers);
        for &name in &names {
            if name != 0 {
                self.buffers.insert(name, Vec::new());
            }
        }
        self.record(Call::GenBuffers { names });
    }

    unsafe fn DeleteBuffers(&mut self, n: GLsizei, buffers: *const GLuint) {
        let names = copy_slice(buffers, n);
        for name in &names {
            self.buffers.remove(name);
            for bound in self.bindings.values_mut() {
                if *bound == *name {
                    *bound = 0;
                }
            }
        }
        self.record(Call::DeleteBuffers { names });
    }

    unsafe fn BindBuffer(&mut self, target: GLenum, buffer: GLuint) {
        if buffer != 0 {
            self.buffers.entry(buffer).or_default();
        }
        self.bindings.insert(target, buffer);
        self.record(Call::BindBuffer { target, buffer });
    }

    unsafe fn BufferData(
        &mut self,
        target: GLenum,
        size: GLsizeiptr,
        data: *const c_void,
        usage: GLenum,
    ) {
        let size = size.max(0) as usize;
        let bytes = if data.is_null() {
            vec![0; size]
        } else {
            slice::from_raw_parts(data as *const u8, size).to_vec()
        };
        if let Some(storage) = self.bound_storage(target) {
            *storage = bytes.clone();
        }
        self.record(Call::BufferData {
            target,
            data: bytes,
            usage,
        });
    }

    unsafe fn GetBufferSubData(
        &mut self,
        target: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        data: *mut c_void,
    ) {
        if offset < 0 || size <= 0 || data.is_null() {
            return;
        }
        let (offset, size) = (offset as usize, size as usize);
        if let Some(storage) = self.bound_storage(target) {
            if offset + size <= storage.len() {
                ptr::copy_nonoverlapping(storage[offset..].as_ptr(), data as *mut u8, size);
            }
        }
    }

    unsafe fn MapBufferRange(
        &mut self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        _access: GLbitfield,
    ) -> *mut c_void {
        self.record(Call::MapBufferRange {
            target,
            offset,
            length,
        });
        if self.fail_map || offset < 0 || length <= 0 {
            return ptr::null_mut();
        }
        match self.bound_storage(target) {
            Some(storage) if offset as usize + length as usize <= storage.len() => {
                storage.as_mut_ptr().add(offset as usize) as *mut c_void
            }
            _ => ptr::null_mut(),
        }
    }

    unsafe fn UnmapBuffer(&mut self, target: GLenum) -> GLboolean {
        self.record(Call::UnmapBuffer { target });
        1
    }

    unsafe fn Enable(&mut self, cap: GLenum) {
        self.enabled.insert(cap);
        self.record(Call::Enable { cap });
    }

    unsafe fn Disable(&mut self, cap: GLenum) {
        self.enabled.remove(&cap);
        self.record(Call::Disable { cap });
    }

    unsafe fn IsEnabled(&mut self, cap: GLenum) -> GLboolean {
        self.enabled.contains(&cap) as GLboolean
    }

    unsafe fn GetIntegerv(&mut self, pname: GLenum, data: *mut GLint) {
        if data.is_null() {
            return;
        }
        *data = match pname {
            PRIMITIVE_RESTART_INDEX => self.restart_index as GLint,
            VERTEX_ARRAY_BINDING => self.vertex_array as GLint,
            _ => match Self::binding_target(pname) {
                Some(target) => self.bound(target) as GLint,
                None => 0,
            },
        };
    }

    unsafe fn PrimitiveRestartIndex(&mut self, index: GLuint) {
        self.restart_index = index;
        self.record(Call::PrimitiveRestartIndex { index });
    }

    unsafe fn PixelStorei(&mut self, pname: GLenum, param: GLint) {
        self.record(Call::PixelStorei { pname, param });
    }

    unsafe fn GenVertexArrays(&mut self, n: GLsizei, arrays: *mut GLuint) {
        let names = Self::gen_names(&mut self.next_vertex_array, self.fail_gen, n, arrays);
        self.record(Call::GenVertexArrays { names });
    }

    unsafe fn BindVertexArray(&mut self, array: GLuint) {
        self.vertex_array = array;
        self.record(Call::BindVertexArray { array });
    }

    unsafe fn EnableVertexAttribArray(&mut self, index: GLuint) {
        self.record(Call::EnableVertexAttribArray { index });
    }

    unsafe fn DisableVertexAttribArray(&mut self, index: GLuint) {
        self.record(Call::DisableVertexAttribArray { index });
    }

    unsafe fn VertexAttribPointer(
        &mut self,
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            type_,
            normalized: normalized != 0,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn VertexAttribFormat(
        &mut self,
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        relative_offset: GLuint,
    ) {
        self.record(Call::VertexAttribFormat {
            index,
            size,
            type_,
            normalized: normalized != 0,
            relative_offset,
        });
    }

    unsafe fn VertexAttribIFormat(
        &mut self,
        index: GLuint,
        size: GLint,
        type_: GLenum,
        relative_offset: GLuint,
    ) {
        self.record(Call::VertexAttribIFormat {
            index,
            size,
            type_,
            relative_offset,
        });
    }

    unsafe fn VertexAttribLFormat(
        &mut self,
        index: GLuint,
        size: GLint,
        type_: GLenum,
        relative_offset: GLuint,
    ) {
        self.record(Call::VertexAttribLFormat {
            index,
            size,
            type_,
            relative_offset,
        });
    }

    unsafe fn VertexAttribBinding(&mut self, index: GLuint, binding: GLuint) {
        self.record(Call::VertexAttribBinding { index, binding });
    }

    unsafe fn BindVertexBuffer(
        &mut self,
        binding: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    ) {
        self.record(Call::BindVertexBuffer {
            binding,
            buffer,
            offset,
            stride,
        });
    }

    unsafe fn VertexBindingDivisor(&mut self, binding: GLuint, divisor: GLuint) {
        self.record(Call::VertexBindingDivisor { binding, divisor });
    }

    unsafe fn EnableClientState(&mut self, array: GLenum) {
        self.record(Call::EnableClientState { array });
    }

    unsafe fn DisableClientState(&mut self, array: GLenum) {
        self.record(Call::DisableClientState { array });
    }

    unsafe fn EnableClientStateiEXT(&mut self, array: GLenum, index: GLuint) {
        self.record(Call::EnableClientStateiEXT { array, index });
    }

    unsafe fn DisableClientStateiEXT(&mut self, array: GLenum, index: GLuint) {
        self.record(Call::DisableClientStateiEXT { array, index });
    }

    unsafe fn VertexPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.record(Call::VertexPointer {
            size,
            type_,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn NormalPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
        self.record(Call::NormalPointer {
            type_,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn ColorPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.record(Call::ColorPointer {
            size,
            type_,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn SecondaryColorPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.record(Call::SecondaryColorPointer {
            size,
            type_,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn IndexPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
        self.record(Call::IndexPointer {
            type_,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn EdgeFlagPointer(&mut self, stride: GLsizei, pointer: *const c_void) {
        self.record(Call::EdgeFlagPointer {
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn FogCoordPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
        self.record(Call::FogCoordPointer {
            type_,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn MultiTexCoordPointerEXT(
        &mut self,
        texunit: GLenum,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        self.record(Call::MultiTexCoordPointerEXT {
            texunit,
            size,
            type_,
            stride,
            pointer: addr(pointer),
        });
    }

    unsafe fn ClientActiveTexture(&mut self, texture: GLenum) {
        self.record(Call::ClientActiveTexture { texture });
    }

    unsafe fn PushClientAttrib(&mut self, mask: GLbitfield) {
        self.record(Call::PushClientAttrib { mask });
    }

    unsafe fn PopClientAttrib(&mut self) {
        self.record(Call::PopClientAttrib);
    }

    unsafe fn ClientAttribDefaultEXT(&mut self, mask: GLbitfield) {
        self.record(Call::ClientAttribDefaultEXT { mask });
    }

    unsafe fn DrawArrays(&mut self, mode: GLenum, first: GLint, count: GLsizei) {
        self.record(Call::DrawArrays { mode, first, count });
    }

    unsafe fn DrawArraysInstanced(
        &mut self,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instances: GLsizei,
    ) {
        self.record(Call::DrawArraysInstanced {
            mode,
            first,
            count,
            instances,
        });
    }

    unsafe fn DrawArraysInstancedBaseInstance(
        &mut self,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instances: GLsizei,
        base_instance: GLuint,
    ) {
        self.record(Call::DrawArraysInstancedBaseInstance {
            mode,
            first,
            count,
            instances,
            base_instance,
        });
    }

    unsafe fn MultiDrawArrays(
        &mut self,
        mode: GLenum,
        first: *const GLint,
        count: *const GLsizei,
        draw_count: GLsizei,
    ) {
        self.record(Call::MultiDrawArrays {
            mode,
            first: copy_slice(first, draw_count),
            count: copy_slice(count, draw_count),
        });
    }

    unsafe fn DrawElements(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
    ) {
        self.record(Call::DrawElements {
            mode,
            count,
            type_,
            indices: addr(indices),
        });
    }

    unsafe fn DrawElementsInstanced(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instances: GLsizei,
    ) {
        self.record(Call::DrawElementsInstanced {
            mode,
            count,
            type_,
            indices: addr(indices),
            instances,
        });
    }

    unsafe fn DrawElementsInstancedBaseInstance(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instances: GLsizei,
        base_instance: GLuint,
    ) {
        self.record(Call::DrawElementsInstancedBaseInstance {
            mode,
            count,
            type_,
            indices: addr(indices),
            instances,
            base_instance,
        });
    }

    unsafe fn DrawElementsBaseVertex(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        base_vertex: GLint,
    ) {
        self.record(Call::DrawElementsBaseVertex {
            mode,
            count,
            type_,
            indices: addr(indices),
            base_vertex,
        });
    }

    unsafe fn DrawElementsInstancedBaseVertex(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instances: GLsizei,
        base_vertex: GLint,
    ) {
        self.record(Call::DrawElementsInstancedBaseVertex {
            mode,
            count,
            type_,
            indices: addr(indices),
            instances,
            base_vertex,
        });
    }

    unsafe fn DrawElementsInstancedBaseVertexBaseInstance(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instances: GLsizei,
        base_vertex: GLint,
        base_instance: GLuint,
    ) {
        self.record(Call::DrawElementsInstancedBaseVertexBaseInstance {
            mode,
            count,
            type_,
            indices: addr(indices),
            instances,
            base_vertex,
            base_instance,
        });
    }

    unsafe fn DrawRangeElements(
        &mut self,
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
    ) {
        self.record(Call::DrawRangeElements {
            mode,
            start,
            end,
            count,
            type_,
            indices: addr(indices),
        });
    }

    unsafe fn DrawRangeElementsBaseVertex(
        &mut self,
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        base_vertex: GLint,
    ) {
        self.record(Call::DrawRangeElementsBaseVertex {
            mode,
            start,
            end,
            count,
            type_,
            indices: addr(indices),
            base_vertex,
        });
    }

    unsafe fn MultiDrawElements(
        &mut self,
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        draw_count: GLsizei,
    ) {
        self.record(Call::MultiDrawElements {
            mode,
            count: copy_slice(count, draw_count),
            type_,
            indices: copy_slice(indices, draw_count).into_iter().map(addr).collect(),
        });
    }

    unsafe fn MultiDrawElementsBaseVertex(
        &mut self,
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        draw_count: GLsizei,
        base_vertex: *const GLint,
    ) {
        self.record(Call::MultiDrawElementsBaseVertex {
            mode,
            count: copy_slice(count, draw_count),
            type_,
            indices: copy_slice(indices, draw_count).into_iter().map(addr).collect(),
            base_vertex: copy_slice(base_vertex, draw_count),
        });
    }

    unsafe fn DrawArraysIndirect(&mut self, mode: GLenum, indirect: *const c_void) {
        self.record(Call::DrawArraysIndirect {
            mode,
            indirect: addr(indirect),
        });
    }

    unsafe fn DrawElementsIndirect(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
    ) {
        self.record(Call::DrawElementsIndirect {
            mode,
            type_,
            indirect: addr(indirect),
        });
    }

    unsafe fn MultiDrawArraysIndirect(
        &mut self,
        mode: GLenum,
        indirect: *const c_void,
        draw_count: GLsizei,
        stride: GLsizei,
    ) {
        self.record(Call::MultiDrawArraysIndirect {
            mode,
            indirect: addr(indirect),
            draw_count,
            stride,
        });
    }

    unsafe fn MultiDrawElementsIndirect(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
        draw_count: GLsizei,
        stride: GLsizei,
    ) {
        self.record(Call::MultiDrawElementsIndirect {
            mode,
            type_,
            indirect: addr(indirect),
            draw_count,
            stride,
        });
    }

    unsafe fn MultiDrawArraysIndirectCount(
        &mut self,
        mode: GLenum,
        indirect: *const c_void,
        draw_count: GLintptr,
        max_draw_count: GLsizei,
        stride: GLsizei,
    ) {
        self.record(Call::MultiDrawArraysIndirectCount {
            mode,
            indirect: addr(indirect),
            draw_count,
            max_draw_count,
            stride,
        });
    }

    unsafe fn MultiDrawElementsIndirectCount(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
        draw_count: GLintptr,
        max_draw_count: GLsizei,
        stride: GLsizei,
    ) {
        self.record(Call::MultiDrawElementsIndirectCount {
            mode,
            type_,
            indirect: addr(indirect),
            draw_count,
            max_draw_count,
            stride,
        });
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_are_simulated() {
        let mut d = RecordingDriver::new();
        let mut name = 0;
        unsafe {
            d.GenBuffers(1, &mut name);
            d.BindBuffer(ARRAY_BUFFER, name);
            let bytes = [1u8, 2, 3, 4];
            d.BufferData(ARRAY_BUFFER, 4, bytes.as_ptr() as *const c_void, DYNAMIC_DRAW);
        }
        assert_eq!(name, 1);
        assert_eq!(d.buffer_contents(1), Some(&[1u8, 2, 3, 4][..]));

        let mut value = 0;
        unsafe {
            d.GetIntegerv(ARRAY_BUFFER_BINDING, &mut value);
            d.DeleteBuffers(1, &name);
            assert!(!d.is_buffer(1));
        }
        assert_eq!(value, 1);
        assert_eq!(d.bound(ARRAY_BUFFER), 0);
    }

    #[test]
    fn map_returns_stored_bytes() {
        let mut d = RecordingDriver::new();
        d.preload_buffer(DRAW_INDIRECT_BUFFER, 7, &[9, 8, 7, 6]);
        unsafe {
            let p = d.MapBufferRange(DRAW_INDIRECT_BUFFER, 1, 2, MAP_READ_BIT) as *const u8;
            assert_eq!(*p, 8);
            assert_eq!(*p.add(1), 7);
            assert!(d.MapBufferRange(DRAW_INDIRECT_BUFFER, 3, 4, MAP_READ_BIT).is_null());
        }
    }

    #[test]
    fn failing_gen_hands_out_zero() {
        let mut d = RecordingDriver::new();
        d.fail_gen = true;
        let mut name = 5;
        unsafe { d.GenBuffers(1, &mut name) };
        assert_eq!(name, 0);
        assert_eq!(d.calls(), &[Call::GenBuffers { names: vec![0] }]);
    }
}
