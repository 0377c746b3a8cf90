//! Conversion between affine transform matrices and separated
//! position/rotation/scale parts.
//!
//! Two families of objects meet here. Matrix-backed records (trigger volumes,
//! ties, shrubs, sound instances, environment transitions) keep the on-disk
//! matrix as source of truth and derive parts from it; mobies keep the parts
//! and compose a matrix on demand.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::error::{Error, Result};
use crate::objects::ObjectKind;

/// Splits an affine matrix into translation, rotation and per-axis scale.
///
/// The rotation comes from the orthonormalized 3x3 block, the scale from the
/// axis lengths. The `w_axis.w` element is deliberately ignored rather than
/// normalized: several record families carry a non-1.0 sentinel there, and it
/// must survive on the stored matrix untouched.
///
/// Fails when the matrix contains NaN or infinite components, which is what
/// garbage bytes decode to; callers treat that as a fatal section error.
pub fn decompose(matrix: Mat4, kind: ObjectKind, index: usize) -> Result<(Vec3, Quat, Vec3)> {
    if !matrix.x_axis.is_finite()
        || !matrix.y_axis.is_finite()
        || !matrix.z_axis.is_finite()
        || !matrix.w_axis.is_finite()
    {
        return Err(Error::MalformedMatrix { kind, index });
    }
    let (scale, rotation, position) = matrix.to_scale_rotation_translation();
    Ok((position, rotation, scale))
}

/// Builds the transform matrix for separated parts.
///
/// In the game's row-vector convention this is `Scale * Rotation *
/// Translation`, which is exactly what [`Mat4::from_scale_rotation_translation`]
/// produces for glam's column-vector convention. The order matters: swapping
/// it rotates objects about the world origin instead of their own centre and
/// breaks round-trip fidelity for every placement family.
pub fn compose(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, position)
}

/// [`compose`] for placement objects, folding the referenced mesh's fixed
/// model size into the authored scalar scale before the scale matrix is
/// built.
pub fn compose_placement(position: Vec3, rotation: Quat, scale: f32, model_size: f32) -> Mat4 {
    compose(position, rotation, Vec3::splat(scale * model_size))
}

/// Decodes the three on-disk Euler angles into a quaternion.
pub fn quat_from_euler(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::ZYX, angles.z, angles.y, angles.x)
}

/// Recomputes Euler angles from a live quaternion at encode time.
///
/// Rotations may have been mutated through quaternion tool operations since
/// decode, so a cached Euler triple is never reused.
pub fn euler_from_quat(rotation: Quat) -> Vec3 {
    let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_mat4_close(a: Mat4, b: Mat4) {
        assert!(
            a.abs_diff_eq(b, 1e-5),
            "matrices differ:\n{:?}\n{:?}",
            a,
            b
        );
    }

    #[test]
    fn compose_then_decompose_is_identity() -> crate::error::Result<()> {
        let position = Vec3::new(120.5, -3.25, 40.0);
        let rotation = Quat::from_euler(EulerRot::ZYX, 0.4, -1.1, 2.0);
        let scale = Vec3::new(2.0, 0.5, 1.25);

        let m = compose(position, rotation, scale);
        let (p, r, s) = decompose(m, ObjectKind::Cuboid, 0)?;

        assert!(p.abs_diff_eq(position, 1e-5));
        assert!(s.abs_diff_eq(scale, 1e-5));
        // q and -q encode the same rotation.
        assert!(r.abs_diff_eq(rotation, 1e-5) || r.abs_diff_eq(-rotation, 1e-5));
        Ok(())
    }

    #[test]
    fn decompose_then_compose_is_identity() -> crate::error::Result<()> {
        let m = compose(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(0.75),
            Vec3::splat(3.0),
        );
        let (p, r, s) = decompose(m, ObjectKind::Sphere, 0)?;
        assert_mat4_close(compose(p, r, s), m);
        Ok(())
    }

    #[test]
    fn decompose_rejects_nan() {
        let mut m = Mat4::IDENTITY;
        m.x_axis.x = f32::NAN;
        assert!(matches!(
            decompose(m, ObjectKind::Cylinder, 3),
            Err(crate::error::Error::MalformedMatrix {
                kind: ObjectKind::Cylinder,
                index: 3,
            })
        ));
    }

    #[test]
    fn model_size_scales_the_whole_matrix() {
        let m = compose_placement(Vec3::ZERO, Quat::IDENTITY, 2.0, 1.5);
        assert_mat4_close(m, Mat4::from_scale(Vec3::splat(3.0)));
    }

    #[test]
    fn euler_bridge_round_trips_canonical_angles() {
        let angles = Vec3::new(0.25, -0.5, 1.0);
        let q = quat_from_euler(angles);
        assert!(euler_from_quat(q).abs_diff_eq(angles, 1e-5));

        assert_eq!(euler_from_quat(quat_from_euler(Vec3::ZERO)), Vec3::ZERO);
    }
}
