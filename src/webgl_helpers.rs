// Helper functions for dealing with shaders, buffers and uniform lookups.
// Failures come back as strings holding the GL info log, for the renderer
// to propagate up to the JS caller.

use web_sys::{WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlShader, WebGlUniformLocation};

pub fn compile_shader(
    context: &WebGlRenderingContext,
    shader_type: u32,
    source: &str,
) -> Result<WebGlShader, String> {
    let shader = context
        .create_shader(shader_type)
        .ok_or_else(|| String::from("Unable to create shader object"))?;
    context.shader_source(&shader, source);
    context.compile_shader(&shader);

    if context
        .get_shader_parameter(&shader, WebGlRenderingContext::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = context
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| String::from("Unknown error creating shader"));
        context.delete_shader(Some(&shader));
        Err(log)
    }
}

pub fn link_program(
    context: &WebGlRenderingContext,
    vertex_shader: &WebGlShader,
    fragment_shader: &WebGlShader,
) -> Result<WebGlProgram, String> {
    let program = context
        .create_program()
        .ok_or_else(|| String::from("Unable to create program object"))?;
    context.attach_shader(&program, vertex_shader);
    context.attach_shader(&program, fragment_shader);
    context.link_program(&program);

    if context
        .get_program_parameter(&program, WebGlRenderingContext::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(context
            .get_program_info_log(&program)
            .unwrap_or_else(|| String::from("Unknown error creating program object")))
    }
}

// Compile both stages and link them in one go. The shader objects are only
// needed until the link, so they are flagged for deletion either way; a
// linked program keeps them alive until it is deleted itself
pub fn build_program(
    context: &WebGlRenderingContext,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<WebGlProgram, String> {
    let vertex_shader = compile_shader(context, WebGlRenderingContext::VERTEX_SHADER, vertex_source)
        .map_err(|log| format!("vertex shader: {}", log))?;
    let fragment_shader =
        match compile_shader(context, WebGlRenderingContext::FRAGMENT_SHADER, fragment_source) {
            Ok(shader) => shader,
            Err(log) => {
                context.delete_shader(Some(&vertex_shader));
                return Err(format!("fragment shader: {}", log));
            }
        };
    let program = link_program(context, &vertex_shader, &fragment_shader);
    context.delete_shader(Some(&vertex_shader));
    context.delete_shader(Some(&fragment_shader));
    program
}

/// Creates an ARRAY_BUFFER and fills it once with `data`.
pub fn static_f32_buffer(context: &WebGlRenderingContext, data: &[f32]) -> Result<WebGlBuffer, String> {
    let buffer = context
        .create_buffer()
        .ok_or_else(|| String::from("failed to create buffer"))?;
    context.bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&buffer));
    // The view points straight into wasm memory, so nothing may allocate
    // between creating it and handing it to GL
    unsafe {
        let array = js_sys::Float32Array::view(data);
        context.buffer_data_with_array_buffer_view(
            WebGlRenderingContext::ARRAY_BUFFER,
            &array,
            WebGlRenderingContext::STATIC_DRAW,
        );
    }
    Ok(buffer)
}

pub fn uniform_location(
    context: &WebGlRenderingContext,
    program: &WebGlProgram,
    name: &str,
) -> Result<WebGlUniformLocation, String> {
    context
        .get_uniform_location(program, name)
        .ok_or_else(|| format!("failed to get {} uniform location", name))
}

pub fn attrib_location(
    context: &WebGlRenderingContext,
    program: &WebGlProgram,
    name: &str,
) -> Result<u32, String> {
    let location = context.get_attrib_location(program, name);
    if location < 0 {
        Err(format!("Invalid attribute location for {}", name))
    } else {
        Ok(location as u32)
    }
}
