use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Rgb, Scene, Triangle};

/// Upper bound (exclusive) of the per-axis offset between a triangle's
/// anchor vertex and its other two vertices.
pub const MAX_VERTEX_OFFSET: f32 = 0.05;

/// Generates `count` random triangles from `rng`.
///
/// Each triangle:
/// - anchor vertex uniform in `[0, 1) x [0, 1)`
/// - two more vertices at anchor + offset, offset uniform in
///   `[0, MAX_VERTEX_OFFSET)` per axis
/// - one color, each channel uniform in `[0, 1]`, shared by all three vertices
///
/// The output depends only on `count` and the RNG stream.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Scene {
    let mut scene = Scene::with_capacity(count);

    for _ in 0..count {
        let x = rng.gen_range(0.0..1.0f32);
        let y = rng.gen_range(0.0..1.0f32);

        let mut near = || {
            [
                x + rng.gen_range(0.0..MAX_VERTEX_OFFSET),
                y + rng.gen_range(0.0..MAX_VERTEX_OFFSET),
            ]
        };
        let b = near();
        let c = near();

        let color = Rgb::new(
            rng.gen_range(0.0..=1.0),
            rng.gen_range(0.0..=1.0),
            rng.gen_range(0.0..=1.0),
        );

        scene.push(Triangle {
            vertices: [[x, y], b, c],
            color,
        });
    }

    scene
}

/// Scene source owning its RNG stream.
///
/// Seeded generators replay the same sequence of scenes; unseeded ones draw
/// their seed from OS entropy.
#[derive(Debug, Clone)]
pub struct SceneGenerator {
    rng: StdRng,
}

impl SceneGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Produces the next scene of `count` triangles.
    pub fn generate(&mut self, count: usize) -> Scene {
        generate(count, &mut self.rng)
    }
}

impl Default for SceneGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}
