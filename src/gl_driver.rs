//! [`Driver`] over the function pointers loaded by the `gl` crate.
//!
//! The `gl` crate only carries the core profile up to 4.5. Fixed-function
//! client state, the `EXT` entry points and the 4.6 indirect count draws are
//! loaded separately and may be missing, in which case calls to them do
//! nothing.

#![allow(unsafe_code)]

use crate::{
    context::{Capabilities, Profile},
    driver::Driver,
    gl_utils::{get_parameter_i32, get_parameter_string},
};
use gl::types::*;
use std::{mem, os::raw::c_void};

/// Check for OpenGL error and report it using `tracing::error`.
///
/// Only active in debug builds!
#[macro_export]
macro_rules! check_for_gl_error {
    () => {{
        if cfg!(debug_assertions) {
            $crate::gl_driver::check_for_gl_error_impl(file!(), line!(), "")
        }
    }};
    ($context: literal) => {{
        if cfg!(debug_assertions) {
            $crate::gl_driver::check_for_gl_error_impl(file!(), line!(), $context)
        }
    }};
}

/// Check for OpenGL error and report it using `tracing::error`.
///
/// WARNING: slow! Only use during setup!
///
/// ``` no_run
/// use glshim_vao::check_for_gl_error_even_in_release;
/// check_for_gl_error_even_in_release!();
/// check_for_gl_error_even_in_release!("while loading");
/// ```
#[macro_export]
macro_rules! check_for_gl_error_even_in_release {
    () => {{
        $crate::gl_driver::check_for_gl_error_impl(file!(), line!(), "")
    }};
    ($context: literal) => {{
        $crate::gl_driver::check_for_gl_error_impl(file!(), line!(), $context)
    }};
}

#[doc(hidden)]
pub fn check_for_gl_error_impl(file: &str, line: u32, context: &str) {
    let error_code = unsafe { gl::GetError() };
    if error_code != gl::NO_ERROR {
        let error_str = error_name(error_code);

        if context.is_empty() {
            tracing::error!(
                "GL error, at {}:{}: {} (0x{:X})",
                file,
                line,
                error_str,
                error_code,
            );
        } else {
            tracing::error!(
                "GL error, at {}:{} ({}): {} (0x{:X})",
                file,
                line,
                context,
                error_str,
                error_code,
            );
        }
    }
}

fn error_name(error_code: GLenum) -> &'static str {
    match error_code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        _ => "<unknown>",
    }
}

// ----------------------------------------------------------------------------

type ArrayFn = unsafe extern "system" fn(GLenum);
type IndexedArrayFn = unsafe extern "system" fn(GLenum, GLuint);
type SizedPointerFn = unsafe extern "system" fn(GLint, GLenum, GLsizei, *const c_void);
type TypedPointerFn = unsafe extern "system" fn(GLenum, GLsizei, *const c_void);
type EdgeFlagPointerFn = unsafe extern "system" fn(GLsizei, *const c_void);
type MultiTexCoordPointerFn =
    unsafe extern "system" fn(GLenum, GLint, GLenum, GLsizei, *const c_void);
type MaskFn = unsafe extern "system" fn(GLbitfield);
type PopFn = unsafe extern "system" fn();
type ArraysIndirectCountFn =
    unsafe extern "system" fn(GLenum, *const c_void, GLintptr, GLsizei, GLsizei);
type ElementsIndirectCountFn =
    unsafe extern "system" fn(GLenum, GLenum, *const c_void, GLintptr, GLsizei, GLsizei);

/// Entry points outside the core profile.
#[derive(Clone, Copy, Default)]
struct Compat {
    enable_client_state: Option<ArrayFn>,
    disable_client_state: Option<ArrayFn>,
    enable_client_state_indexed: Option<IndexedArrayFn>,
    disable_client_state_indexed: Option<IndexedArrayFn>,
    vertex_pointer: Option<SizedPointerFn>,
    color_pointer: Option<SizedPointerFn>,
    secondary_color_pointer: Option<SizedPointerFn>,
    normal_pointer: Option<TypedPointerFn>,
    index_pointer: Option<TypedPointerFn>,
    fog_coord_pointer: Option<TypedPointerFn>,
    edge_flag_pointer: Option<EdgeFlagPointerFn>,
    multi_tex_coord_pointer: Option<MultiTexCoordPointerFn>,
    client_active_texture: Option<ArrayFn>,
    push_client_attrib: Option<MaskFn>,
    pop_client_attrib: Option<PopFn>,
    client_attrib_default: Option<MaskFn>,
    multi_draw_arrays_indirect_count: Option<ArraysIndirectCountFn>,
    multi_draw_elements_indirect_count: Option<ElementsIndirectCountFn>,
}

unsafe fn load<T: Copy, F: FnMut(&'static str) -> *const c_void>(
    loader: &mut F,
    name: &'static str,
) -> Option<T> {
    let ptr = loader(name);
    if ptr.is_null() {
        tracing::debug!("{} is not available", name);
        None
    } else {
        Some(mem::transmute_copy::<*const c_void, T>(&ptr))
    }
}

macro_rules! call_compat {
    ($self:ident . $field:ident ( $($arg:expr),* )) => {
        match $self.compat.$field {
            Some(f) => f($($arg),*),
            None => tracing::trace!("skipping {}, not loaded", stringify!($field)),
        }
    };
}

/// The driver of the current GL context, through the `gl` crate's globals.
#[derive(Default)]
pub struct GlDriver {
    compat: Compat,
}

impl GlDriver {
    /// Loads the `gl` crate's function pointers and the compatibility entry
    /// points. The context must be current on the calling thread.
    pub fn load_with<F>(mut loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(|name| loader(name));
        let compat = unsafe {
            Compat {
                enable_client_state: load(&mut loader, "glEnableClientState"),
                disable_client_state: load(&mut loader, "glDisableClientState"),
                enable_client_state_indexed: load(&mut loader, "glEnableClientStateiEXT"),
                disable_client_state_indexed: load(&mut loader, "glDisableClientStateiEXT"),
                vertex_pointer: load(&mut loader, "glVertexPointer"),
                color_pointer: load(&mut loader, "glColorPointer"),
                secondary_color_pointer: load(&mut loader, "glSecondaryColorPointer"),
                normal_pointer: load(&mut loader, "glNormalPointer"),
                index_pointer: load(&mut loader, "glIndexPointer"),
                fog_coord_pointer: load(&mut loader, "glFogCoordPointer"),
                edge_flag_pointer: load(&mut loader, "glEdgeFlagPointer"),
                multi_tex_coord_pointer: load(&mut loader, "glMultiTexCoordPointerEXT"),
                client_active_texture: load(&mut loader, "glClientActiveTexture"),
                push_client_attrib: load(&mut loader, "glPushClientAttrib"),
                pop_client_attrib: load(&mut loader, "glPopClientAttrib"),
                client_attrib_default: load(&mut loader, "glClientAttribDefaultEXT"),
                multi_draw_arrays_indirect_count: load(
                    &mut loader,
                    "glMultiDrawArraysIndirectCount",
                )
                .or_else(|| load(&mut loader, "glMultiDrawArraysIndirectCountARB")),
                multi_draw_elements_indirect_count: load(
                    &mut loader,
                    "glMultiDrawElementsIndirectCount",
                )
                .or_else(|| load(&mut loader, "glMultiDrawElementsIndirectCountARB")),
            }
        };
        Self { compat }
    }

    /// Profile, vendor and attribute limit of the current context.
    pub fn capabilities(&self) -> Capabilities {
        let (version, vendor, profile_mask, max_attribs) = unsafe {
            (
                get_parameter_string(gl::VERSION).unwrap_or_default(),
                get_parameter_string(gl::VENDOR).unwrap_or_default(),
                get_parameter_i32(gl::CONTEXT_PROFILE_MASK),
                get_parameter_i32(gl::MAX_VERTEX_ATTRIBS),
            )
        };
        check_for_gl_error_even_in_release!("querying capabilities");

        let profile = profile_from(&version, profile_mask);
        tracing::debug!("GL {} ({:?}) from {}", version, profile, vendor);
        Capabilities::default()
            .with_profile(profile)
            .with_vendor(vendor)
            .with_max_vertex_attribs(max_attribs.max(0) as u32)
    }
}

fn profile_from(version: &str, profile_mask: GLint) -> Profile {
    if let Some(es) = version.strip_prefix("OpenGL ES") {
        if es.starts_with("-CM") || es.trim_start().starts_with("1.") {
            Profile::Es1
        } else {
            Profile::Es2
        }
    } else if profile_mask as GLenum & gl::CONTEXT_CORE_PROFILE_BIT != 0 {
        Profile::Core
    } else {
        Profile::Compatibility
    }
}

#[allow(non_snake_case)]
impl Driver for GlDriver {
    unsafe fn GenBuffers(&mut self, n: GLsizei, buffers: *mut GLuint) {
        gl::GenBuffers(n, buffers);
    }
    unsafe fn DeleteBuffers(&mut self, n: GLsizei, buffers: *const GLuint) {
        gl::DeleteBuffers(n, buffers);
    }
    unsafe fn BindBuffer(&mut self, target: GLenum, buffer: GLuint) {
        gl::BindBuffer(target, buffer);
    }
    unsafe fn BufferData(
        &mut self,
        target: GLenum,
        size: GLsizeiptr,
        data: *const c_void,
        usage: GLenum,
    ) {
        gl::BufferData(target, size, data, usage);
        check_for_gl_error!("BufferData");
    }
    unsafe fn GetBufferSubData(
        &mut self,
        target: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        data: *mut c_void,
    ) {
        gl::GetBufferSubData(target, offset, size, data);
    }
    unsafe fn MapBufferRange(
        &mut self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        let mapped = gl::MapBufferRange(target, offset, length, access);
        check_for_gl_error!("MapBufferRange");
        mapped
    }
    unsafe fn UnmapBuffer(&mut self, target: GLenum) -> GLboolean {
        gl::UnmapBuffer(target)
    }

    unsafe fn Enable(&mut self, cap: GLenum) {
        gl::Enable(cap);
    }
    unsafe fn Disable(&mut self, cap: GLenum) {
        gl::Disable(cap);
    }
    unsafe fn IsEnabled(&mut self, cap: GLenum) -> GLboolean {
        gl::IsEnabled(cap)
    }
    unsafe fn GetIntegerv(&mut self, pname: GLenum, data: *mut GLint) {
        gl::GetIntegerv(pname, data);
    }
    unsafe fn PrimitiveRestartIndex(&mut self, index: GLuint) {
        gl::PrimitiveRestartIndex(index);
    }
    unsafe fn PixelStorei(&mut self, pname: GLenum, param: GLint) {
        gl::PixelStorei(pname, param);
    }

    unsafe fn GenVertexArrays(&mut self, n: GLsizei, arrays: *mut GLuint) {
        gl::GenVertexArrays(n, arrays);
    }
    unsafe fn BindVertexArray(&mut self, array: GLuint) {
        gl::BindVertexArray(array);
    }

    unsafe fn EnableVertexAttribArray(&mut self, index: GLuint) {
        gl::EnableVertexAttribArray(index);
    }
    unsafe fn DisableVertexAttribArray(&mut self, index: GLuint) {
        gl::DisableVertexAttribArray(index);
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
        gl::VertexAttribPointer(index, size, type_, normalized, stride, pointer);
        check_for_gl_error!("VertexAttribPointer");
    }
    unsafe fn VertexAttribFormat(
        &mut self,
        attribindex: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        relativeoffset: GLuint,
    ) {
        gl::VertexAttribFormat(attribindex, size, type_, normalized, relativeoffset);
    }
    unsafe fn VertexAttribIFormat(
        &mut self,
        attribindex: GLuint,
        size: GLint,
        type_: GLenum,
        relativeoffset: GLuint,
    ) {
        gl::VertexAttribIFormat(attribindex, size, type_, relativeoffset);
    }
    unsafe fn VertexAttribLFormat(
        &mut self,
        attribindex: GLuint,
        size: GLint,
        type_: GLenum,
        relativeoffset: GLuint,
    ) {
        gl::VertexAttribLFormat(attribindex, size, type_, relativeoffset);
    }
    unsafe fn VertexAttribBinding(&mut self, attribindex: GLuint, bindingindex: GLuint) {
        gl::VertexAttribBinding(attribindex, bindingindex);
    }
    unsafe fn BindVertexBuffer(
        &mut self,
        bindingindex: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    ) {
        gl::BindVertexBuffer(bindingindex, buffer, offset, stride);
    }
    unsafe fn VertexBindingDivisor(&mut self, bindingindex: GLuint, divisor: GLuint) {
        gl::VertexBindingDivisor(bindingindex, divisor);
    }

    unsafe fn EnableClientState(&mut self, array: GLenum) {
        call_compat!(self.enable_client_state(array));
    }
    unsafe fn DisableClientState(&mut self, array: GLenum) {
        call_compat!(self.disable_client_state(array));
    }
    unsafe fn EnableClientStateiEXT(&mut self, array: GLenum, index: GLuint) {
        call_compat!(self.enable_client_state_indexed(array, index));
    }
    unsafe fn DisableClientStateiEXT(&mut self, array: GLenum, index: GLuint) {
        call_compat!(self.disable_client_state_indexed(array, index));
    }
    unsafe fn VertexPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        call_compat!(self.vertex_pointer(size, type_, stride, pointer));
    }
    unsafe fn NormalPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
        call_compat!(self.normal_pointer(type_, stride, pointer));
    }
    unsafe fn ColorPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        call_compat!(self.color_pointer(size, type_, stride, pointer));
    }
    unsafe fn SecondaryColorPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        call_compat!(self.secondary_color_pointer(size, type_, stride, pointer));
    }
    unsafe fn IndexPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
        call_compat!(self.index_pointer(type_, stride, pointer));
    }
    unsafe fn EdgeFlagPointer(&mut self, stride: GLsizei, pointer: *const c_void) {
        call_compat!(self.edge_flag_pointer(stride, pointer));
    }
    unsafe fn FogCoordPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
        call_compat!(self.fog_coord_pointer(type_, stride, pointer));
    }
    unsafe fn MultiTexCoordPointerEXT(
        &mut self,
        texunit: GLenum,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        call_compat!(self.multi_tex_coord_pointer(texunit, size, type_, stride, pointer));
    }
    unsafe fn ClientActiveTexture(&mut self, texture: GLenum) {
        call_compat!(self.client_active_texture(texture));
    }
    unsafe fn PushClientAttrib(&mut self, mask: GLbitfield) {
        call_compat!(self.push_client_attrib(mask));
    }
    unsafe fn PopClientAttrib(&mut self) {
        call_compat!(self.pop_client_attrib());
    }
    unsafe fn ClientAttribDefaultEXT(&mut self, mask: GLbitfield) {
        call_compat!(self.client_attrib_default(mask));
    }

    unsafe fn DrawArrays(&mut self, mode: GLenum, first: GLint, count: GLsizei) {
        gl::DrawArrays(mode, first, count);
        check_for_gl_error!("DrawArrays");
    }
    unsafe fn DrawArraysInstanced(
        &mut self,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instancecount: GLsizei,
    ) {
        gl::DrawArraysInstanced(mode, first, count, instancecount);
    }
    unsafe fn DrawArraysInstancedBaseInstance(
        &mut self,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instancecount: GLsizei,
        baseinstance: GLuint,
    ) {
        gl::DrawArraysInstancedBaseInstance(mode, first, count, instancecount, baseinstance);
    }
    unsafe fn MultiDrawArrays(
        &mut self,
        mode: GLenum,
        first: *const GLint,
        count: *const GLsizei,
        drawcount: GLsizei,
    ) {
        gl::MultiDrawArrays(mode, first, count, drawcount);
    }
    unsafe fn DrawElements(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
    ) {
        gl::DrawElements(mode, count, type_, indices);
        check_for_gl_error!("DrawElements");
    }
    unsafe fn DrawElementsInstanced(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
    ) {
        gl::DrawElementsInstanced(mode, count, type_, indices, instancecount);
    }
    unsafe fn DrawElementsInstancedBaseInstance(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        baseinstance: GLuint,
    ) {
        gl::DrawElementsInstancedBaseInstance(
            mode,
            count,
            type_,
            indices,
            instancecount,
            baseinstance,
        );
    }
    unsafe fn DrawElementsBaseVertex(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        basevertex: GLint,
    ) {
        gl::DrawElementsBaseVertex(mode, count, type_, indices, basevertex);
    }
    unsafe fn DrawElementsInstancedBaseVertex(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        basevertex: GLint,
    ) {
        gl::DrawElementsInstancedBaseVertex(mode, count, type_, indices, instancecount, basevertex);
    }
    unsafe fn DrawElementsInstancedBaseVertexBaseInstance(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        basevertex: GLint,
        baseinstance: GLuint,
    ) {
        gl::DrawElementsInstancedBaseVertexBaseInstance(
            mode,
            count,
            type_,
            indices,
            instancecount,
            basevertex,
            baseinstance,
        );
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
        gl::DrawRangeElements(mode, start, end, count, type_, indices);
    }
    unsafe fn DrawRangeElementsBaseVertex(
        &mut self,
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        basevertex: GLint,
    ) {
        gl::DrawRangeElementsBaseVertex(mode, start, end, count, type_, indices, basevertex);
    }
    unsafe fn MultiDrawElements(
        &mut self,
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        drawcount: GLsizei,
    ) {
        gl::MultiDrawElements(mode, count, type_, indices, drawcount);
    }
    unsafe fn MultiDrawElementsBaseVertex(
        &mut self,
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        drawcount: GLsizei,
        basevertex: *const GLint,
    ) {
        gl::MultiDrawElementsBaseVertex(mode, count, type_, indices, drawcount, basevertex);
    }

    unsafe fn DrawArraysIndirect(&mut self, mode: GLenum, indirect: *const c_void) {
        gl::DrawArraysIndirect(mode, indirect);
    }
    unsafe fn DrawElementsIndirect(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
    ) {
        gl::DrawElementsIndirect(mode, type_, indirect);
    }
    unsafe fn MultiDrawArraysIndirect(
        &mut self,
        mode: GLenum,
        indirect: *const c_void,
        drawcount: GLsizei,
        stride: GLsizei,
    ) {
        gl::MultiDrawArraysIndirect(mode, indirect, drawcount, stride);
    }
    unsafe fn MultiDrawElementsIndirect(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
        drawcount: GLsizei,
        stride: GLsizei,
    ) {
        gl::MultiDrawElementsIndirect(mode, type_, indirect, drawcount, stride);
    }
    unsafe fn MultiDrawArraysIndirectCount(
        &mut self,
        mode: GLenum,
        indirect: *const c_void,
        drawcount: GLintptr,
        maxdrawcount: GLsizei,
        stride: GLsizei,
    ) {
        call_compat!(self.multi_draw_arrays_indirect_count(
            mode,
            indirect,
            drawcount,
            maxdrawcount,
            stride
        ));
    }
    unsafe fn MultiDrawElementsIndirectCount(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
        drawcount: GLintptr,
        maxdrawcount: GLsizei,
        stride: GLsizei,
    ) {
        call_compat!(self.multi_draw_elements_indirect_count(
            mode,
            type_,
            indirect,
            drawcount,
            maxdrawcount,
            stride
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    static DRAW_COUNT_OFFSET: AtomicI32 = AtomicI32::new(0);

    extern "system" fn fake_arrays_indirect_count(
        _mode: GLenum,
        _indirect: *const c_void,
        drawcount: GLintptr,
        _maxdrawcount: GLsizei,
        _stride: GLsizei,
    ) {
        DRAW_COUNT_OFFSET.store(drawcount as i32, Ordering::SeqCst);
    }

    #[test]
    fn error_names() {
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(error_name(0x8031), "<unknown>");
    }

    #[test]
    fn indirect_count_falls_back_to_the_arb_name() {
        let mut requested = Vec::new();
        let mut driver = GlDriver::load_with(|name| {
            requested.push(name);
            if name == "glMultiDrawArraysIndirectCountARB" {
                fake_arrays_indirect_count as *const c_void
            } else {
                std::ptr::null()
            }
        });
        assert!(requested.contains(&"glMultiDrawArraysIndirectCount"));
        assert!(driver.compat.multi_draw_arrays_indirect_count.is_some());
        assert!(driver.compat.multi_draw_elements_indirect_count.is_none());

        unsafe {
            driver.MultiDrawArraysIndirectCount(gl::TRIANGLES, std::ptr::null(), 12, 4, 0);
            // Not loaded, so nothing happens.
            driver.MultiDrawElementsIndirectCount(
                gl::TRIANGLES,
                gl::UNSIGNED_SHORT,
                std::ptr::null(),
                12,
                4,
                0,
            );
            driver.EnableClientState(0x8074);
        }
        assert_eq!(DRAW_COUNT_OFFSET.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn profile_from_version_string() {
        assert_eq!(profile_from("OpenGL ES 3.2 Mesa 23.0", 0), Profile::Es2);
        assert_eq!(profile_from("OpenGL ES-CM 1.1", 0), Profile::Es1);
        assert_eq!(profile_from("OpenGL ES 1.1", 0), Profile::Es1);
        assert_eq!(
            profile_from("4.6 (Core Profile) Mesa", gl::CONTEXT_CORE_PROFILE_BIT as GLint),
            Profile::Core
        );
        assert_eq!(profile_from("4.6 (Compatibility Profile)", 2), Profile::Compatibility);
        assert_eq!(profile_from("2.1 Mesa", 0), Profile::Compatibility);
    }
}
