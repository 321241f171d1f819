mod utils;
pub mod camera;
pub mod color;
pub mod config;
pub mod integrator;
pub mod particle;
pub mod renderer;
pub mod simulation;
pub mod sphere;
pub mod store;
mod webgl_helpers;

use config::{GravityMode, SimConfig};
use renderer::Renderer;
use simulation::Simulation;
use wasm_bindgen::prelude::*;
use web_sys::console;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Scoped console timer, only started when profiling is switched on
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }

    pub fn start_if(enabled: bool, name: &'a str) -> Option<Timer<'a>> {
        if enabled {
            Some(Timer::new(name))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Everything the page's JS holds on to. Input handlers and the
// requestAnimationFrame callback all call into this one object, so the
// particle store only ever has one writer.
#[wasm_bindgen]
pub struct SphereCanvas {
    simulation: Simulation,
    renderer: Renderer,
    profiling: bool,
}

#[wasm_bindgen]
impl SphereCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: &web_sys::HtmlCanvasElement) -> Result<SphereCanvas, JsValue> {
        let renderer = Renderer::new(canvas).map_err(|e| JsValue::from_str(&e))?;
        console::log_1(
            &format!("Generated {} sphere triangles", renderer.sphere_triangle_count()).into(),
        );
        let mut simulation = Simulation::new(SimConfig::default());
        simulation.set_gravity_mode(GravityMode::Gravity);
        Ok(SphereCanvas {
            simulation,
            renderer,
            profiling: false,
        })
    }

    // `now` is a monotonic timestamp in milliseconds (performance.now())
    pub fn spawn_particle(&mut self, now: f64) {
        let _timer = Timer::start_if(self.profiling, "SphereCanvas::spawn_particle");
        self.simulation.spawn(now);
    }

    pub fn reset_particles(&mut self) {
        console::log_1(&format!("Clearing {} particles", self.simulation.particles().len()).into());
        self.simulation.reset();
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        let mode = if enabled {
            GravityMode::Gravity
        } else {
            GravityMode::Space
        };
        if mode != self.simulation.gravity_mode() {
            console::log_1(&format!("Gravity mode: {:?}", mode).into());
        }
        self.simulation.set_gravity_mode(mode);
    }

    pub fn gravity_enabled(&self) -> bool {
        self.simulation.gravity_mode() == GravityMode::Gravity
    }

    /// Steps every particle to `now`; returns how many are resting on the floor.
    pub fn update(&mut self, now: f64) -> u32 {
        let _timer = Timer::start_if(self.profiling, "SphereCanvas::update()");
        self.simulation.step(now).resting as u32
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let _timer = Timer::start_if(self.profiling, "SphereCanvas::render");
        self.renderer.begin_frame();
        self.simulation.draw(&mut self.renderer);
        match self.renderer.context.get_error() {
            web_sys::WebGlRenderingContext::NO_ERROR => Ok(()),
            code => Err(JsValue::from_str(&format!("WebGL error 0x{:x}", code))),
        }
    }

    pub fn particle_count(&self) -> u32 {
        self.simulation.particles().len() as u32
    }

    pub fn set_profiling(&mut self, enabled: bool) {
        self.profiling = enabled;
    }
}
