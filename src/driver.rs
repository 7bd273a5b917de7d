//! The GL entry points the emulation layer forwards to.
//!
//! Methods mirror the C API one to one, raw pointers included, so that an
//! implementation can hand them straight to a loaded function table. Only the
//! calls the emulation actually issues are listed.

use gl::types::*;
use std::os::raw::c_void;

/// Trait representing the underlying OpenGL implementation of one context.
#[allow(non_snake_case)]
pub trait Driver {
    // Buffer objects
    unsafe fn GenBuffers(&mut self, n: GLsizei, buffers: *mut GLuint);
    unsafe fn DeleteBuffers(&mut self, n: GLsizei, buffers: *const GLuint);
    unsafe fn BindBuffer(&mut self, target: GLenum, buffer: GLuint);
    unsafe fn BufferData(
        &mut self,
        target: GLenum,
        size: GLsizeiptr,
        data: *const c_void,
        usage: GLenum,
    );
    unsafe fn GetBufferSubData(
        &mut self,
        target: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        data: *mut c_void,
    );
    unsafe fn MapBufferRange(
        &mut self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void;
    unsafe fn UnmapBuffer(&mut self, target: GLenum) -> GLboolean;

    // Capabilities and queries
    unsafe fn Enable(&mut self, cap: GLenum);
    unsafe fn Disable(&mut self, cap: GLenum);
    unsafe fn IsEnabled(&mut self, cap: GLenum) -> GLboolean;
    unsafe fn GetIntegerv(&mut self, pname: GLenum, data: *mut GLint);
    unsafe fn PrimitiveRestartIndex(&mut self, index: GLuint);
    unsafe fn PixelStorei(&mut self, pname: GLenum, param: GLint);

    // Vertex array objects
    unsafe fn GenVertexArrays(&mut self, n: GLsizei, arrays: *mut GLuint);
    unsafe fn BindVertexArray(&mut self, array: GLuint);

    // Generic attributes
    unsafe fn EnableVertexAttribArray(&mut self, index: GLuint);
    unsafe fn DisableVertexAttribArray(&mut self, index: GLuint);
    unsafe fn VertexAttribPointer(
        &mut self,
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    );
    unsafe fn VertexAttribFormat(
        &mut self,
        attribindex: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        relativeoffset: GLuint,
    );
    unsafe fn VertexAttribIFormat(
        &mut self,
        attribindex: GLuint,
        size: GLint,
        type_: GLenum,
        relativeoffset: GLuint,
    );
    unsafe fn VertexAttribLFormat(
        &mut self,
        attribindex: GLuint,
        size: GLint,
        type_: GLenum,
        relativeoffset: GLuint,
    );
    unsafe fn VertexAttribBinding(&mut self, attribindex: GLuint, bindingindex: GLuint);
    unsafe fn BindVertexBuffer(
        &mut self,
        bindingindex: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    );
    unsafe fn VertexBindingDivisor(&mut self, bindingindex: GLuint, divisor: GLuint);

    // Legacy client state
    unsafe fn EnableClientState(&mut self, array: GLenum);
    unsafe fn DisableClientState(&mut self, array: GLenum);
    unsafe fn EnableClientStateiEXT(&mut self, array: GLenum, index: GLuint);
    unsafe fn DisableClientStateiEXT(&mut self, array: GLenum, index: GLuint);
    unsafe fn VertexPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    );
    unsafe fn NormalPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void);
    unsafe fn ColorPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    );
    unsafe fn SecondaryColorPointer(
        &mut self,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    );
    unsafe fn IndexPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void);
    unsafe fn EdgeFlagPointer(&mut self, stride: GLsizei, pointer: *const c_void);
    unsafe fn FogCoordPointer(&mut self, type_: GLenum, stride: GLsizei, pointer: *const c_void);
    unsafe fn MultiTexCoordPointerEXT(
        &mut self,
        texunit: GLenum,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    );
    unsafe fn ClientActiveTexture(&mut self, texture: GLenum);
    unsafe fn PushClientAttrib(&mut self, mask: GLbitfield);
    unsafe fn PopClientAttrib(&mut self);
    unsafe fn ClientAttribDefaultEXT(&mut self, mask: GLbitfield);

    // Direct draws
    unsafe fn DrawArrays(&mut self, mode: GLenum, first: GLint, count: GLsizei);
    unsafe fn DrawArraysInstanced(
        &mut self,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instancecount: GLsizei,
    );
    unsafe fn DrawArraysInstancedBaseInstance(
        &mut self,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instancecount: GLsizei,
        baseinstance: GLuint,
    );
    unsafe fn MultiDrawArrays(
        &mut self,
        mode: GLenum,
        first: *const GLint,
        count: *const GLsizei,
        drawcount: GLsizei,
    );
    unsafe fn DrawElements(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
    );
    unsafe fn DrawElementsInstanced(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
    );
    unsafe fn DrawElementsInstancedBaseInstance(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        baseinstance: GLuint,
    );
    unsafe fn DrawElementsBaseVertex(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        basevertex: GLint,
    );
    unsafe fn DrawElementsInstancedBaseVertex(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        basevertex: GLint,
    );
    unsafe fn DrawElementsInstancedBaseVertexBaseInstance(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        basevertex: GLint,
        baseinstance: GLuint,
    );
    unsafe fn DrawRangeElements(
        &mut self,
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
    );
    unsafe fn DrawRangeElementsBaseVertex(
        &mut self,
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        basevertex: GLint,
    );
    unsafe fn MultiDrawElements(
        &mut self,
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        drawcount: GLsizei,
    );
    unsafe fn MultiDrawElementsBaseVertex(
        &mut self,
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        drawcount: GLsizei,
        basevertex: *const GLint,
    );

    // Indirect draws
    unsafe fn DrawArraysIndirect(&mut self, mode: GLenum, indirect: *const c_void);
    unsafe fn DrawElementsIndirect(&mut self, mode: GLenum, type_: GLenum, indirect: *const c_void);
    unsafe fn MultiDrawArraysIndirect(
        &mut self,
        mode: GLenum,
        indirect: *const c_void,
        drawcount: GLsizei,
        stride: GLsizei,
    );
    unsafe fn MultiDrawElementsIndirect(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
        drawcount: GLsizei,
        stride: GLsizei,
    );
    unsafe fn MultiDrawArraysIndirectCount(
        &mut self,
        mode: GLenum,
        indirect: *const c_void,
        drawcount: GLintptr,
        maxdrawcount: GLsizei,
        stride: GLsizei,
    );
    unsafe fn MultiDrawElementsIndirectCount(
        &mut self,
        mode: GLenum,
        type_: GLenum,
        indirect: *const c_void,
        drawcount: GLintptr,
        maxdrawcount: GLsizei,
        stride: GLsizei,
    );
}
