// Unit sphere mesh built by recursively subdividing a tetrahedron and pushing
// every new vertex out onto the sphere. Output is a flat triangle soup
// (x, y, z per vertex) with matching per-vertex normals, ready for
// gl.drawArrays(TRIANGLES).

extern crate nalgebra_glm as glm;
use glm::Vec3;

pub struct SphereMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl SphereMesh {
    pub const DEFAULT_SUBDIVISIONS: u32 = 6;

    pub fn new(subdivisions: u32) -> Self {
        let triangles = 4 * 4usize.pow(subdivisions);
        let mut mesh = SphereMesh {
            positions: Vec::with_capacity(triangles * 9),
            normals: Vec::with_capacity(triangles * 9),
        };
        let a = glm::vec3(0.0f32, 0.0, -1.0);
        let b = glm::vec3(0.0f32, 0.942809, 0.333333).normalize();
        let c = glm::vec3(-0.816497f32, -0.471405, 0.333333).normalize();
        let d = glm::vec3(0.816497f32, -0.471405, 0.333333).normalize();
        mesh.divide_triangle(&a, &b, &c, subdivisions);
        mesh.divide_triangle(&d, &c, &b, subdivisions);
        mesh.divide_triangle(&a, &d, &b, subdivisions);
        mesh.divide_triangle(&a, &c, &d, subdivisions);
        mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    fn divide_triangle(&mut self, a: &Vec3, b: &Vec3, c: &Vec3, depth: u32) {
        if depth == 0 {
            for v in &[a, b, c] {
                // on a unit sphere the normal is the position
                self.positions.extend_from_slice(&[v.x, v.y, v.z]);
                self.normals.extend_from_slice(&[v.x, v.y, v.z]);
            }
            return;
        }
        let ab = glm::mix(a, b, 0.5).normalize();
        let ac = glm::mix(a, c, 0.5).normalize();
        let bc = glm::mix(b, c, 0.5).normalize();
        self.divide_triangle(a, &ab, &ac, depth - 1);
        self.divide_triangle(&ab, b, &bc, depth - 1);
        self.divide_triangle(&bc, c, &ac, depth - 1);
        self.divide_triangle(&ab, &bc, &ac, depth - 1);
    }
}

impl Default for SphereMesh {
    fn default() -> Self {
        SphereMesh::new(SphereMesh::DEFAULT_SUBDIVISIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate nalgebra_glm as glm;

    #[test]
    fn triangle_count_grows_by_four() {
        assert_eq!(SphereMesh::new(0).triangle_count(), 4);
        assert_eq!(SphereMesh::new(2).triangle_count(), 64);
        let mesh = SphereMesh::default();
        assert_eq!(mesh.triangle_count(), 16384);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        let mesh = SphereMesh::new(3);
        for v in mesh.positions.chunks(3) {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_are_not_degenerate() {
        let mesh = SphereMesh::new(1);
        for tri in mesh.positions.chunks(9) {
            let a = glm::vec3(tri[0], tri[1], tri[2]);
            let b = glm::vec3(tri[3], tri[4], tri[5]);
            let c = glm::vec3(tri[6], tri[7], tri[8]);
            let n = (b - a).cross(&(c - a));
            let centroid = (a + b + c) / 3.0;
            assert!(n.dot(&centroid) != 0.0);
        }
    }
}
