// Fixed look-at camera and the scene's single point light

extern crate nalgebra_glm as glm;
use glm::{Mat3, Mat4, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub view_dir: Vec3,
    pub up: Vec3,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            eye: glm::vec3(0.0, -3.0, 120.0),
            view_dir: glm::vec3(0.0, 0.0, -1.0),
            up: glm::vec3(0.0, 1.0, 0.0),
            fov_deg: 90.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        let target = self.eye + self.view_dir;
        glm::look_at(&self.eye, &target, &self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        glm::perspective(aspect, self.fov_deg.to_radians(), self.near, self.far)
    }
}

/// Normal matrix for a model-view transform: inverse transpose of its upper 3x3.
pub fn normal_matrix(model_view: &Mat4) -> Mat3 {
    glm::inverse_transpose(glm::mat4_to_mat3(model_view))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneLighting {
    /// World space position.
    pub light_position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Diffuse and specular material color shared by every sphere; ambient
    /// comes from the particle's own color.
    pub material_diffuse: Vec3,
    pub material_specular: Vec3,
    pub shininess: f32,
}

impl Default for SceneLighting {
    fn default() -> Self {
        SceneLighting {
            light_position: glm::vec3(1.0, 1.0, 50.0),
            ambient: glm::vec3(1.0, 1.0, 1.0),
            diffuse: glm::vec3(1.0, 1.0, 1.0),
            specular: glm::vec3(1.0, 1.0, 1.0),
            material_diffuse: glm::vec3(0.0, 0.9, 0.5),
            material_specular: glm::vec3(0.0, 0.9, 0.5),
            shininess: 23.0,
        }
    }
}

impl SceneLighting {
    /// Light position in eye space for the given view.
    pub fn light_in_eye_space(&self, view: &Mat4) -> Vec3 {
        let p = self.light_position;
        let eye = view * glm::vec4(p.x, p.y, p.z, 1.0);
        glm::vec3(eye.x, eye.y, eye.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate nalgebra_glm as glm;

    fn approx(a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < 1e-4
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        let eye = view * glm::vec4(0.0, -3.0, 120.0, 1.0);
        assert!(approx(&glm::vec3(eye.x, eye.y, eye.z), &glm::vec3(0.0, 0.0, 0.0)));
        // world origin sits straight ahead, down -z
        let origin = view * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!(approx(&glm::vec3(origin.x, origin.y, origin.z), &glm::vec3(0.0, 3.0, -120.0)));
    }

    #[test]
    fn light_follows_view() {
        let lighting = SceneLighting::default();
        let light = lighting.light_in_eye_space(&Camera::default().view_matrix());
        assert!(approx(&light, &glm::vec3(1.0, 4.0, -70.0)));
    }

    #[test]
    fn normal_matrix_undoes_uniform_scale() {
        let m = glm::scaling(&glm::vec3(2.0, 2.0, 2.0));
        let n = normal_matrix(&m);
        assert!((n[(0, 0)] - 0.5).abs() < 1e-6);
        assert!(n[(0, 1)].abs() < 1e-6);
    }

    #[test]
    fn projection_keeps_boundary_in_view() {
        let camera = Camera::default();
        let clip = camera.projection_matrix(1.0) * camera.view_matrix() * glm::vec4(50.0, 50.0, 50.0, 1.0);
        let ndc = glm::vec3(clip.x, clip.y, clip.z) / clip.w;
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && ndc.z.abs() <= 1.0);
    }
}
