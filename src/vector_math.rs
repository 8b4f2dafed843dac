//! Small vector helpers used by the camera tracker.
use glam::Vec3;
use rand::Rng;

/// Projects `direction` onto the ground plane and normalises it.
///
/// Returns `Vec3::ZERO` when the direction is vertical or not finite.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use lanehop::vector_math::flatten_to_ground;
///
/// let flat = flatten_to_ground(Vec3::new(3.0, 7.0, 4.0));
/// assert!((flat - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
/// assert_eq!(flatten_to_ground(Vec3::Y), Vec3::ZERO);
/// ```
#[must_use]
pub fn flatten_to_ground(direction: Vec3) -> Vec3 {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if !flat.is_finite() {
        return Vec3::ZERO;
    }
    flat.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Vector projection of `vector` onto `axis`.
///
/// `axis` need not be normalised. A zero-length axis yields `Vec3::ZERO`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use lanehop::vector_math::project_onto;
///
/// let projected = project_onto(Vec3::new(2.0, 5.0, -1.0), Vec3::new(0.0, 2.0, 0.0));
/// assert_eq!(projected, Vec3::new(0.0, 5.0, 0.0));
/// ```
#[must_use]
pub fn project_onto(vector: Vec3, axis: Vec3) -> Vec3 {
    let length_squared = axis.length_squared();
    if length_squared <= f32::EPSILON {
        return Vec3::ZERO;
    }
    axis * (vector.dot(axis) / length_squared)
}

/// Uniformly samples a point inside the unit sphere by rejection.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn flatten_rejects_nan() {
        assert_eq!(flatten_to_ground(Vec3::new(f32::NAN, 0.0, 1.0)), Vec3::ZERO);
    }

    #[test]
    fn projection_onto_zero_axis_is_zero() {
        assert_eq!(project_onto(Vec3::ONE, Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn sphere_samples_stay_inside() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..256 {
            assert!(random_in_unit_sphere(&mut rng).length() <= 1.0 + 1e-6);
        }
    }
}
