//! Frustum culling demo
//!
//! Orbits a camera around a random scene and logs how many shapes survive
//! culling each frame. Pass a `.toml` or `.ron` file to override the
//! defaults:
//!
//! ```text
//! RUST_LOG=debug cargo run -p cull_demo -- demo.toml
//! ```

use std::error::Error;

use math_kernel::foundation::logging;
use math_kernel::prelude::*;
use serde::{Deserialize, Serialize};

mod scene;

use scene::{Scene, SceneConfig};

/// Errors that stop the demo
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Camera or projection setup failed
    #[error("math error: {0}")]
    Math(#[from] MathError),
}

/// Camera path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position
    pub eye: Vec3,
    /// Point the camera orbits and looks at
    pub target: Vec3,
    /// World up direction
    pub up: Vec3,
    /// Orbit step around the world Y axis
    pub orbit_degrees_per_frame: f32,
    /// Number of frames to simulate
    pub frames: u32,
}

impl CameraConfig {
    /// Eye position after `frame` orbit steps
    fn eye_at(&self, frame: u32) -> Vec3 {
        #[allow(clippy::cast_precision_loss)]
        let angle = numeric::deg_to_rad(self.orbit_degrees_per_frame * frame as f32);
        self.target + Quaternion::rotation_y(angle).rotate(self.eye - self.target)
    }

    /// Frame at which the view direction lines up with `up`, if any
    fn first_degenerate_frame(&self) -> Option<u32> {
        (0..self.frames.max(1)).find(|&frame| {
            let offset = self.eye_at(frame) - self.target;
            let tolerance = 1e-6 * offset.length() * self.up.length();
            let sine_scaled = offset.cross(&self.up).length();
            !(sine_scaled > tolerance && sine_scaled.is_finite())
        })
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, -80.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            orbit_degrees_per_frame: 15.0,
            frames: 24,
        }
    }
}

/// Everything the demo reads from its config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Kernel settings
    pub kernel: KernelConfig,
    /// Camera path
    pub camera: CameraConfig,
    /// Scene population
    pub scene: SceneConfig,
}

impl Config for DemoConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.kernel.validate()?;
        if self.camera.eye == self.camera.target {
            return Err(ConfigError::Invalid("camera eye and target coincide".to_string()));
        }
        if let Some(frame) = self.camera.first_degenerate_frame() {
            return Err(ConfigError::Invalid(format!(
                "camera looks along its up vector at frame {frame}"
            )));
        }
        if !(self.scene.extent.is_finite() && self.scene.extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scene extent must be positive, got {}",
                self.scene.extent
            )));
        }
        Ok(())
    }
}

/// Per-frame culling results
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct FrameStats {
    visible: usize,
    culled: usize,
    unsupported: usize,
    visible_bounds: usize,
}

fn cull_frame(frustum: &ViewFrustum, scene: &Scene, mask: PlaneMask) -> FrameStats {
    let mut stats = FrameStats::default();
    for primitive in &scene.primitives {
        match frustum.visible_primitive(primitive, mask) {
            Ok(true) => stats.visible += 1,
            Ok(false) => stats.culled += 1,
            Err(_) => stats.unsupported += 1,
        }
    }
    stats.visible_bounds = frustum.cull(&scene.bounds, mask).count();
    stats
}

fn run(config: &DemoConfig) -> Result<(), DemoError> {
    let scene = Scene::generate(&config.scene, config.kernel.numeric.seed);
    let mask = config.kernel.culling.effective_mask();
    let camera = &config.camera;

    log::info!(
        "Culling {} primitives over {} frames (mask {:?})",
        scene.primitives.len(),
        camera.frames,
        mask
    );

    for frame in 0..camera.frames {
        let eye = camera.eye_at(frame);
        let view = Mat4::look_at_lh(eye, camera.target, camera.up)?;
        let frustum = config.kernel.projection.build_frustum(&view)?;
        let orientation = EulerAngle::from_matrix4(&view, EulerAngleMode::InertialToObject);

        let stats = cull_frame(&frustum, &scene, mask);
        log::info!(
            "Frame {frame:3}: heading {:7.1} deg, {} visible, {} culled, {} unsupported, {} bounding spheres visible",
            numeric::rad_to_deg(orientation.heading),
            stats.visible,
            stats.culled,
            stats.unsupported,
            stats.visible_bounds
        );
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_with_level(logging::LevelFilter::Info);

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            DemoConfig::load_from_file(&path).map_err(DemoError::from)?
        }
        None => {
            let config = DemoConfig::default();
            config.validate().map_err(DemoError::from)?;
            config
        }
    };

    run(&config)?;
    log::info!("Done");
    Ok(())
}
