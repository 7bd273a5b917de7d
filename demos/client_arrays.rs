//! Draws a spinning quad whose vertices and indices live in client memory,
//! on a core profile context that has no client arrays of its own.
//!
//! `cargo run --example client_arrays --features demo`

use glshim_vao::{enums, gl, gl_utils, Context, GlDriver, Vao};
use sdl2::{
    event::Event,
    keyboard::Keycode,
    video::{GLProfile, SwapInterval},
};
use std::{os::raw::c_void, time::Instant};

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 600;

const VS_SRC: &str = r#"
#version 330 core
layout(location = 0) in vec2 a_pos;
layout(location = 1) in vec4 a_color;
out vec4 v_color;
void main() {
    v_color = a_color;
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

const FS_SRC: &str = r#"
#version 330 core
in vec4 v_color;
out vec4 f_color;
void main() {
    f_color = v_color;
}
"#;

fn main() -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let gl_attr = video_subsystem.gl_attr();
    gl_attr.set_context_profile(GLProfile::Core);
    gl_attr.set_context_version(3, 3);
    gl_attr.set_double_buffer(true);

    let window = video_subsystem
        .window("Demo: client arrays on a core context", SCREEN_WIDTH, SCREEN_HEIGHT)
        .opengl()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;

    // Create a window context
    let _gl_context = window.gl_create_context()?;
    video_subsystem.gl_set_swap_interval(SwapInterval::VSync)?;

    let driver = GlDriver::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
    let caps = driver.capabilities();
    println!("{:?} context from {}", caps.profile, caps.vendor);
    let mut ctx = Context::new(driver, caps);
    let mut vao = Vao::new(&mut ctx, None);

    let program = unsafe {
        let vs = gl_utils::compile_shader(gl::VERTEX_SHADER, VS_SRC)?;
        let fs = gl_utils::compile_shader(gl::FRAGMENT_SHADER, FS_SRC)?;
        gl_utils::link_program(vec![vs, fs])?
    };

    let colors: [u8; 16] = [
        255, 64, 64, 255, //
        64, 255, 64, 255, //
        64, 64, 255, 255, //
        255, 255, 64, 255,
    ];
    let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
    let mut positions = [0f32; 8];

    vao.attrib_pointer(
        &mut ctx,
        1,
        4,
        enums::UNSIGNED_BYTE,
        true,
        0,
        colors.as_ptr() as *const c_void,
    );
    vao.enable_vertex_attrib_array(&mut ctx, 0);
    vao.enable_vertex_attrib_array(&mut ctx, 1);

    let start_time = Instant::now();
    let mut event_pump = sdl_context.event_pump()?;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
        }

        let angle = start_time.elapsed().as_secs_f32();
        for (i, corner) in positions.chunks_exact_mut(2).enumerate() {
            let a = angle + i as f32 * std::f32::consts::FRAC_PI_2;
            corner[0] = 0.6 * a.cos();
            corner[1] = 0.6 * a.sin();
        }
        // Same shadow buffer every frame, the contents are copied at draw time.
        vao.attrib_pointer(
            &mut ctx,
            0,
            2,
            enums::FLOAT,
            false,
            0,
            positions.as_ptr() as *const c_void,
        );

        unsafe {
            gl::ClearColor(0.1, 0.1, 0.1, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::UseProgram(program);
        }

        let drawn = unsafe {
            vao.draw_elements(
                &mut ctx,
                enums::TRIANGLES,
                indices.len() as i32,
                enums::UNSIGNED_SHORT,
                indices.as_ptr() as *const c_void,
            )
        };
        if let Err(err) = drawn {
            eprintln!("draw skipped: {}", err);
        }
        glshim_vao::check_for_gl_error!("frame");

        window.gl_swap_window();
    }

    unsafe { gl::DeleteProgram(program) };
    Ok(())
}
