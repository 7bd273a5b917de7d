//! Thin helpers over the `gl` crate for querying a live context and for the
//! demo's shader setup.

#![allow(unsafe_code)]

use gl::{
    types::{GLchar, GLenum, GLint, GLuint},
    INFO_LOG_LENGTH, LINK_STATUS,
};

/// `glGetString`, `None` when the driver returns null or non UTF-8 text.
pub unsafe fn get_parameter_string(parameter: GLenum) -> Option<String> {
    let raw_ptr = gl::GetString(parameter);
    if raw_ptr.is_null() {
        tracing::warn!(
            "Get parameter string 0x{:X} failed. Maybe your GL context version is too outdated.",
            parameter
        );
        return None;
    }
    std::ffi::CStr::from_ptr(raw_ptr as *const GLchar)
        .to_str()
        .ok()
        .map(str::to_owned)
}

pub unsafe fn get_parameter_i32(parameter: GLenum) -> i32 {
    let mut value = 0;
    gl::GetIntegerv(parameter, &mut value);
    value
}

pub unsafe fn compile_shader(shader_type: GLenum, source: &str) -> Result<GLuint, String> {
    let shader = gl::CreateShader(shader_type);
    if shader == 0 {
        return Err(format!("failed to create shader of type 0x{:X}", shader_type));
    }
    gl::ShaderSource(
        shader,
        1,
        &(source.as_ptr() as *const GLchar),
        &(source.len() as GLint),
    );
    gl::CompileShader(shader);

    let mut status = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    if status == 1 {
        Ok(shader)
    } else {
        let log = info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog);
        gl::DeleteShader(shader);
        Err(log)
    }
}

pub unsafe fn link_program<T: IntoIterator<Item = GLuint>>(shaders: T) -> Result<GLuint, String> {
    let program = gl::CreateProgram();
    if program == 0 {
        return Err("failed to create program".to_owned());
    }
    for shader in shaders {
        gl::AttachShader(program, shader);
    }
    gl::LinkProgram(program);

    let mut status = 0;
    gl::GetProgramiv(program, LINK_STATUS, &mut status);
    if status == 1 {
        Ok(program)
    } else {
        let log = info_log(program, gl::GetProgramiv, gl::GetProgramInfoLog);
        gl::DeleteProgram(program);
        Err(log)
    }
}

unsafe fn info_log(
    object: GLuint,
    get_iv: unsafe fn(GLuint, GLenum, *mut GLint),
    get_log: unsafe fn(GLuint, i32, *mut i32, *mut GLchar),
) -> String {
    let mut length = 0;
    get_iv(object, INFO_LOG_LENGTH, &mut length);
    if length <= 0 {
        return String::new();
    }
    let mut log = vec![0u8; length as usize];
    get_log(object, length, &mut length, log.as_mut_ptr() as *mut GLchar);
    log.truncate(length.max(0) as usize);
    String::from_utf8_lossy(&log).into_owned()
}
