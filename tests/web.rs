//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;
use webgl_sphere_particles::SphereCanvas;
use webgl_sphere_particles::config::{GravityMode, SimConfig};
use webgl_sphere_particles::simulation::Simulation;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn entropy_seeded_spawns_stay_in_bounds() {
    let config = SimConfig::default();
    let b = config.boundary;
    let mut sim = Simulation::new(config);
    for t in 0..100 {
        sim.spawn(t as f64);
    }
    for p in sim.particles() {
        for axis in 0..3 {
            assert!(p.position[axis].abs() <= 0.9 * b);
        }
    }
}

#[wasm_bindgen_test]
fn frames_then_reset() {
    let mut sim = Simulation::new(SimConfig::default());
    sim.spawn(0.0);
    sim.set_gravity_mode(GravityMode::Gravity);
    for frame in 0..120 {
        sim.step(frame as f64 * 16.0);
    }
    assert_eq!(sim.instances().len(), 1);
    sim.reset();
    assert!(sim.particles().is_empty());
}

#[wasm_bindgen_test]
fn canvas_builds_shaders_and_draws_spheres() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(240);

    let mut spheres = SphereCanvas::new(&canvas).unwrap();
    assert!(spheres.gravity_enabled());
    spheres.spawn_particle(0.0);
    spheres.spawn_particle(8.0);
    spheres.update(16.0);
    spheres.render().unwrap();
    assert_eq!(spheres.particle_count(), 2);

    spheres.reset_particles();
    assert_eq!(spheres.particle_count(), 0);
    spheres.render().unwrap();
}
