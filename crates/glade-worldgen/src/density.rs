//! Continuous vegetation density fields over multi-octave simplex noise.
//!
//! A density field is a pure function of world position: identical
//! coordinates and seed always yield identical output, regardless of call
//! order or thread. Placement rules consume only the sign and magnitude of
//! the returned value.

use glam::I64Vec3;
use noise::{NoiseFn, Simplex};

/// The coherent-noise primitive consumed by density fields.
///
/// `sample` composites `octaves` layers of noise at `(x, y, z)`: each
/// successive octave doubles the frequency and scales the amplitude by
/// `persistence`. Implementations must be pure.
pub trait OctaveNoise: Send + Sync {
    /// Fractal noise value at `(x, y, z)`.
    fn sample(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64;
}

/// Fractal Brownian motion over simplex noise.
pub struct SimplexOctaves {
    noise: Simplex,
}

impl SimplexOctaves {
    /// Create the primitive for a world seed.
    pub fn new(seed: u64) -> Self {
        Self {
            noise: Simplex::new(seed as u32),
        }
    }
}

impl OctaveNoise for SimplexOctaves {
    fn sample(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..octaves {
            total += self
                .noise
                .get([x * frequency, y * frequency, z * frequency])
                * amplitude;
            frequency *= 2.0;
            amplitude *= persistence;
        }

        total
    }
}

/// A density field: one parameterization of the octave-noise primitive,
/// sampled at scaled world coordinates.
pub struct DensityField {
    noise: Box<dyn OctaveNoise>,
    /// Uniform scale applied to each world axis before sampling.
    coordinate_scale: f64,
    octaves: u32,
    persistence: f64,
}

impl DensityField {
    /// A field with explicit parameters over the given noise primitive.
    pub fn new(
        noise: Box<dyn OctaveNoise>,
        coordinate_scale: f64,
        octaves: u32,
        persistence: f64,
    ) -> Self {
        Self {
            noise,
            coordinate_scale,
            octaves,
            persistence,
        }
    }

    /// The grass eligibility field: coordinates scaled by 0.8, 8 octaves,
    /// persistence 0.5.
    pub fn grass(world_seed: u64) -> Self {
        Self::new(Box::new(SimplexOctaves::new(world_seed)), 0.8, 8, 0.5)
    }

    /// The forest eligibility field: coordinates scaled by 0.04, 16 octaves,
    /// persistence 0.5. Shares the grass field's noise primitive seed; the
    /// coarser scale gives forests their own, much broader spatial pattern.
    pub fn forest(world_seed: u64) -> Self {
        Self::new(Box::new(SimplexOctaves::new(world_seed)), 0.04, 16, 0.5)
    }

    /// Density at an integer world position.
    pub fn sample(&self, pos: I64Vec3) -> f64 {
        let p = pos.as_dvec3() * self.coordinate_scale;
        self.noise
            .sample(p.x, p.y, p.z, self.octaves, self.persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_same_seed_same_coord_is_deterministic() {
        let field_a = DensityField::grass(42);
        let field_b = DensityField::grass(42);
        let pos = I64Vec3::new(100, 60, -200);
        assert!(
            (field_a.sample(pos) - field_b.sample(pos)).abs() < EPSILON,
            "Same seed + same coord must produce identical density"
        );
    }

    #[test]
    fn test_different_seeds_produce_different_density() {
        let field_a = DensityField::grass(1);
        let field_b = DensityField::grass(999);
        let pos = I64Vec3::new(500, 40, 500);
        assert!(
            (field_a.sample(pos) - field_b.sample(pos)).abs() > EPSILON,
            "Different seeds should produce different density"
        );
    }

    #[test]
    fn test_grass_field_matches_manual_fbm() {
        let seed = 7;
        let field = DensityField::grass(seed);
        let primitive = SimplexOctaves::new(seed);
        let pos = I64Vec3::new(12, 34, 56);
        let expected = primitive.sample(12.0 * 0.8, 34.0 * 0.8, 56.0 * 0.8, 8, 0.5);
        assert!(
            (field.sample(pos) - expected).abs() < EPSILON,
            "grass field must be the primitive sampled at 0.8-scaled coordinates"
        );
    }

    #[test]
    fn test_forest_field_matches_manual_fbm() {
        let seed = 7;
        let field = DensityField::forest(seed);
        let primitive = SimplexOctaves::new(seed);
        let pos = I64Vec3::new(12, 34, 56);
        let expected = primitive.sample(12.0 * 0.04, 34.0 * 0.04, 56.0 * 0.04, 16, 0.5);
        assert!(
            (field.sample(pos) - expected).abs() < EPSILON,
            "forest field must be the primitive sampled at 0.04-scaled coordinates"
        );
    }

    #[test]
    fn test_zero_persistence_keeps_only_first_octave() {
        let primitive = SimplexOctaves::new(42);
        let single = primitive.sample(1.5, 2.5, 3.5, 1, 0.5);
        let collapsed = primitive.sample(1.5, 2.5, 3.5, 6, 0.0);
        assert!(
            (single - collapsed).abs() < EPSILON,
            "With zero persistence only the first octave contributes"
        );
    }

    #[test]
    fn test_octaves_add_bounded_contributions() {
        let primitive = SimplexOctaves::new(42);
        // Geometric amplitude sum: 8 octaves at persistence 0.5 < 2.0 total.
        for i in 0..100 {
            let x = i as f64 * 3.7;
            let v = primitive.sample(x, 0.0, -x, 8, 0.5);
            assert!(
                v.abs() < 2.0,
                "fBm with unit base amplitude must stay within the geometric bound, got {v}"
            );
        }
    }

    #[test]
    fn test_sampling_is_pure_across_threads() {
        let field = std::sync::Arc::new(DensityField::forest(123));
        let pos = I64Vec3::new(64, 48, -32);
        let expected = field.sample(pos);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let field = std::sync::Arc::clone(&field);
                std::thread::spawn(move || field.sample(pos))
            })
            .collect();

        for handle in handles {
            let got = handle.join().unwrap();
            assert!(
                (got - expected).abs() < EPSILON,
                "Density sampling must be referentially transparent across threads"
            );
        }
    }
}
