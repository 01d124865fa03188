//! Random scene of bounding volumes

use math_kernel::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How the scene is populated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of shapes to scatter
    pub object_count: usize,
    /// Shapes are placed in a cube of this half-size around the origin
    pub extent: f32,
    /// Largest semi-axis length of any shape
    pub max_size: f32,
    /// Every n-th shape is a cylinder; 0 for none
    pub cylinder_every: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            object_count: 500,
            extent: 60.0,
            max_size: 3.0,
            cylinder_every: 100,
        }
    }
}

/// Shapes to cull each frame
pub struct Scene {
    /// Every shape, in creation order
    pub primitives: Vec<Primitive>,
    /// Bounding spheres of the same shapes, for the fast path
    pub bounds: Vec<Sphere>,
}

impl Scene {
    /// Scatter shapes reproducibly from `seed`
    pub fn generate(config: &SceneConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut primitives = Vec::with_capacity(config.object_count);
        let mut bounds = Vec::with_capacity(config.object_count);

        for index in 0..config.object_count {
            let center = Vec3::new(
                numeric::random_in_range(&mut rng, -config.extent, config.extent),
                numeric::random_in_range(&mut rng, -config.extent, config.extent),
                numeric::random_in_range(&mut rng, -config.extent, config.extent),
            );
            let primitive = if config.cylinder_every > 0 && index % config.cylinder_every == 0 {
                random_cylinder(&mut rng, center, config.max_size)
            } else {
                random_shape(&mut rng, center, config.max_size)
            };
            bounds.push(bounding_sphere(&primitive));
            primitives.push(primitive);
        }

        log::debug!("Generated {} primitives (seed {seed})", primitives.len());
        Self { primitives, bounds }
    }
}

fn random_size(rng: &mut StdRng, max_size: f32) -> f32 {
    numeric::random_in_range(rng, 0.1, max_size.max(0.1))
}

/// Orthonormal frame with a random orientation
fn random_frame(rng: &mut StdRng) -> [Vec3; 3] {
    let rotation = Quaternion::from_axis_angle(
        numeric::random_unit_vector(rng),
        numeric::random_in_range(rng, 0.0, constants::TAU),
    );
    [
        rotation.rotate(Vec3::new(1.0, 0.0, 0.0)),
        rotation.rotate(Vec3::new(0.0, 1.0, 0.0)),
        rotation.rotate(Vec3::new(0.0, 0.0, 1.0)),
    ]
}

fn random_shape(rng: &mut StdRng, center: Vec3, max_size: f32) -> Primitive {
    let [a, b, c] = random_frame(rng);
    match rng.gen_range(0..4) {
        0 => Sphere::new(center, random_size(rng, max_size)).into(),
        1 => Circle::new(center, c, random_size(rng, max_size)).into(),
        2 => {
            let long = random_size(rng, max_size);
            let short = numeric::random_in_range(rng, 0.05, long);
            Ellipse::new(center, a, long, b, short).into()
        }
        _ => Ellipsoid::new(
            center,
            [a, b, c],
            [random_size(rng, max_size), random_size(rng, max_size), random_size(rng, max_size)],
        )
        .into(),
    }
}

fn random_cylinder(rng: &mut StdRng, center: Vec3, max_size: f32) -> Primitive {
    let axis = numeric::random_unit_vector(rng);
    Cylinder::new(center, axis, random_size(rng, max_size), random_size(rng, max_size) * 2.0).into()
}

/// Smallest sphere around the shape's center that encloses it
fn bounding_sphere(primitive: &Primitive) -> Sphere {
    let radius = match primitive {
        Primitive::Sphere(s) => s.radius,
        Primitive::Circle(c) => c.radius,
        Primitive::Ellipse(e) => e.long_axis_length.max(e.short_axis_length),
        Primitive::Ellipsoid(e) => e.lengths.iter().copied().fold(0.0, f32::max),
        Primitive::Cylinder(c) => c.radius.hypot(c.height * 0.5),
    };
    Sphere::new(primitive.center(), radius)
}
