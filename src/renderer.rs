// Renderer struct that handles WebGl calls: owns the Phong shader program,
// the unit sphere vertex/normal buffers, and the camera and lighting used
// to draw every particle as a shaded sphere.

use crate::camera::{normal_matrix, Camera, SceneLighting};
use crate::color::Color;
use crate::simulation::SphereSink;
use crate::sphere::SphereMesh;
use crate::webgl_helpers;
use wasm_bindgen::JsCast;
use web_sys::{WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlUniformLocation};
extern crate nalgebra_glm as glm;
use glm::TMat4;

const SPHERE_VERTEX_SHADER: &str = r#"
    attribute vec3 aVertexPosition;
    attribute vec3 aVertexNormal;

    uniform mat4 uMVMatrix;
    uniform mat4 uPMatrix;
    uniform mat3 uNMatrix;

    varying vec3 vPosition;
    varying vec3 vNormal;

    void main() {
        vec4 eyePosition = uMVMatrix * vec4(aVertexPosition, 1.0);
        vPosition = eyePosition.xyz / eyePosition.w;
        vNormal = normalize(uNMatrix * aVertexNormal);
        gl_Position = uPMatrix * eyePosition;
    }
"#;

const SPHERE_FRAGMENT_SHADER: &str = r#"
    precision mediump float;

    uniform vec3 uLightPosition;
    uniform vec3 uAmbientLightColor;
    uniform vec3 uDiffuseLightColor;
    uniform vec3 uSpecularLightColor;

    uniform vec3 uAmbientMatColor;
    uniform vec3 uDiffuseMatColor;
    uniform vec3 uSpecularMatColor;
    uniform float uShininess;

    varying vec3 vPosition;
    varying vec3 vNormal;

    void main() {
        vec3 normal = normalize(vNormal);
        vec3 toLight = normalize(uLightPosition - vPosition);
        float diffuse = max(dot(normal, toLight), 0.0);

        vec3 reflected = normalize(reflect(-toLight, normal));
        vec3 toEye = normalize(-vPosition);
        float specular = pow(max(dot(reflected, toEye), 0.0), uShininess);

        gl_FragColor = vec4(uAmbientLightColor * uAmbientMatColor
                          + uDiffuseLightColor * uDiffuseMatColor * diffuse
                          + uSpecularLightColor * uSpecularMatColor * specular, 1.0);
    }
"#;

struct Uniforms {
    model_view: WebGlUniformLocation,
    projection: WebGlUniformLocation,
    normal: WebGlUniformLocation,
    light_position: WebGlUniformLocation,
    ambient_light: WebGlUniformLocation,
    diffuse_light: WebGlUniformLocation,
    specular_light: WebGlUniformLocation,
    ambient_material: WebGlUniformLocation,
    diffuse_material: WebGlUniformLocation,
    specular_material: WebGlUniformLocation,
    shininess: WebGlUniformLocation,
}

impl Uniforms {
    fn locate(context: &WebGlRenderingContext, program: &WebGlProgram) -> Result<Self, String> {
        let get = |name: &str| webgl_helpers::uniform_location(context, program, name);
        Ok(Uniforms {
            model_view: get("uMVMatrix")?,
            projection: get("uPMatrix")?,
            normal: get("uNMatrix")?,
            light_position: get("uLightPosition")?,
            ambient_light: get("uAmbientLightColor")?,
            diffuse_light: get("uDiffuseLightColor")?,
            specular_light: get("uSpecularLightColor")?,
            ambient_material: get("uAmbientMatColor")?,
            diffuse_material: get("uDiffuseMatColor")?,
            specular_material: get("uSpecularMatColor")?,
            shininess: get("uShininess")?,
        })
    }
}

pub struct Renderer {
    pub context: WebGlRenderingContext,
    pub camera: Camera,
    pub lighting: SceneLighting,
    pub clear_color: [f32; 4],
    pub view_mat: TMat4<f32>,
    pub projection_mat: TMat4<f32>,
    sphere_shader: WebGlProgram,
    uniforms: Uniforms,
    sphere_position_buffer: WebGlBuffer,
    sphere_normal_buffer: WebGlBuffer,
    position_attrib: u32,
    normal_attrib: u32,
    sphere_vertex_count: i32,
    width: i32,
    height: i32,
}

impl Renderer {
    // Grabs the WebGl context from the canvas, builds the shader program and
    // uploads the sphere mesh once; every particle reuses those buffers
    pub fn new(canvas: &web_sys::HtmlCanvasElement) -> Result<Self, String> {
        let context = canvas
            .get_context("webgl")
            .map_err(|_| String::from("canvas.getContext threw"))?
            .ok_or_else(|| String::from("Failed to create WebGL context"))?
            .dyn_into::<WebGlRenderingContext>()
            .map_err(|_| String::from("context is not a WebGlRenderingContext"))?;

        let sphere_shader =
            webgl_helpers::build_program(&context, SPHERE_VERTEX_SHADER, SPHERE_FRAGMENT_SHADER)?;
        let uniforms = Uniforms::locate(&context, &sphere_shader)?;
        let position_attrib = webgl_helpers::attrib_location(&context, &sphere_shader, "aVertexPosition")?;
        let normal_attrib = webgl_helpers::attrib_location(&context, &sphere_shader, "aVertexNormal")?;

        let mesh = SphereMesh::default();
        let sphere_position_buffer = webgl_helpers::static_f32_buffer(&context, &mesh.positions)?;
        let sphere_normal_buffer = webgl_helpers::static_f32_buffer(&context, &mesh.normals)?;

        context.enable(WebGlRenderingContext::DEPTH_TEST);

        let camera = Camera::default();
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;
        let aspect = width as f32 / height.max(1) as f32;

        Ok(Renderer {
            view_mat: camera.view_matrix(),
            projection_mat: camera.projection_matrix(aspect),
            context,
            camera,
            lighting: SceneLighting::default(),
            clear_color: [0.1, 0.1, 0.2, 1.0],
            sphere_shader,
            uniforms,
            sphere_position_buffer,
            sphere_normal_buffer,
            position_attrib,
            normal_attrib,
            sphere_vertex_count: mesh.vertex_count() as i32,
            width,
            height,
        })
    }

    pub fn sphere_triangle_count(&self) -> i32 {
        self.sphere_vertex_count / 3
    }

    pub fn clear_screen(&self) {
        let [r, g, b, a] = self.clear_color;
        self.context.clear_color(r, g, b, a);
        self.context
            .clear(WebGlRenderingContext::COLOR_BUFFER_BIT | WebGlRenderingContext::DEPTH_BUFFER_BIT);
    }

    // Per-frame state shared by every sphere: viewport, program, mesh
    // attributes, camera and lights
    pub fn begin_frame(&mut self) {
        self.context.viewport(0, 0, self.width, self.height);
        self.clear_screen();
        self.context.use_program(Some(&self.sphere_shader));

        self.bind_attribute(&self.sphere_position_buffer, self.position_attrib);
        self.bind_attribute(&self.sphere_normal_buffer, self.normal_attrib);

        self.view_mat = self.camera.view_matrix();
        self.context.uniform_matrix4fv_with_f32_array(
            Some(&self.uniforms.projection),
            false,
            self.projection_mat.as_slice(),
        );

        let light = self.lighting.light_in_eye_space(&self.view_mat);
        let u = &self.uniforms;
        self.context.uniform3fv_with_f32_array(Some(&u.light_position), light.as_slice());
        self.context
            .uniform3fv_with_f32_array(Some(&u.ambient_light), self.lighting.ambient.as_slice());
        self.context
            .uniform3fv_with_f32_array(Some(&u.diffuse_light), self.lighting.diffuse.as_slice());
        self.context
            .uniform3fv_with_f32_array(Some(&u.specular_light), self.lighting.specular.as_slice());
        self.context.uniform3fv_with_f32_array(
            Some(&u.diffuse_material),
            self.lighting.material_diffuse.as_slice(),
        );
        self.context.uniform3fv_with_f32_array(
            Some(&u.specular_material),
            self.lighting.material_specular.as_slice(),
        );
        self.context.uniform1f(Some(&u.shininess), self.lighting.shininess);
    }

    fn bind_attribute(&self, buffer: &WebGlBuffer, location: u32) {
        self.context
            .bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(buffer));
        self.context.vertex_attrib_pointer_with_i32(
            location,
            3,
            WebGlRenderingContext::FLOAT,
            false,
            0,
            0,
        );
        self.context.enable_vertex_attrib_array(location);
    }
}

impl SphereSink for Renderer {
    fn draw_unit_sphere(&mut self, transform: &glm::Mat4, color: Color) {
        let model_view = self.view_mat * transform;
        let normal = normal_matrix(&model_view);
        let u = &self.uniforms;
        self.context
            .uniform_matrix4fv_with_f32_array(Some(&u.model_view), false, model_view.as_slice());
        self.context
            .uniform_matrix3fv_with_f32_array(Some(&u.normal), false, normal.as_slice());
        self.context
            .uniform3fv_with_f32_array(Some(&u.ambient_material), &color.as_array());
        self.context
            .draw_arrays(WebGlRenderingContext::TRIANGLES, 0, self.sphere_vertex_count);
    }
}
