//! Shrub records: small static decoration placements.

use glam::Mat4;
use tracing::debug;

use crate::catalog::{ModelCatalog, ModelEntry};
use crate::error::Result;
use crate::math::RgbSlot;
use crate::objects::{MatrixTransform, ObjectKind};
use crate::{raw, transform};

/// A decoration mesh placement. Same 0x70 layout in all four releases:
/// transform matrix at 0x00, then model id, draw distance, ambient color,
/// light index and a few unidentified ints.
///
/// As with ties, the on-disk matrix is the encode source; it is only
/// recomposed when the transform is mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Shrub {
    pub transform: MatrixTransform,
    pub model_id: i32,
    pub model: Option<ModelEntry>,
    pub draw_distance: f32,
    pub color: RgbSlot,
    pub light: i32,
    /// Unidentified ints at 0x48/0x4C/0x60/0x64/0x68/0x6C.
    pub unknowns: [i32; 6],
}

impl Shrub {
    pub const LEN: usize = 0x70;

    pub fn read(block: &[u8], index: usize, models: &ModelCatalog) -> Result<Shrub> {
        let buf = &block[index * Shrub::LEN..(index + 1) * Shrub::LEN];

        let matrix = raw::read_mat4(buf, 0x00);

        let model_id = raw::read_i32(buf, 0x40);
        let model = models.get(model_id);
        if model.is_none() {
            debug!(model_id, index, "shrub model id missing from catalog");
        }

        Ok(Shrub {
            transform: MatrixTransform::from_matrix(matrix, ObjectKind::Shrub, index)?,
            model_id,
            model,
            draw_distance: raw::read_f32(buf, 0x44),
            color: RgbSlot::from_raw([
                raw::read_i32(buf, 0x50),
                raw::read_i32(buf, 0x54),
                raw::read_i32(buf, 0x58),
            ]),
            light: raw::read_i32(buf, 0x5C),
            unknowns: [
                raw::read_i32(buf, 0x48),
                raw::read_i32(buf, 0x4C),
                raw::read_i32(buf, 0x60),
                raw::read_i32(buf, 0x64),
                raw::read_i32(buf, 0x68),
                raw::read_i32(buf, 0x6C),
            ],
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; Shrub::LEN];

        raw::write_mat4(&mut out, 0x00, self.transform.matrix());

        raw::write_i32(&mut out, 0x40, self.model_id);
        raw::write_f32(&mut out, 0x44, self.draw_distance);
        raw::write_i32(&mut out, 0x48, self.unknowns[0]);
        raw::write_i32(&mut out, 0x4C, self.unknowns[1]);
        let [r, g, b] = self.color.raw();
        raw::write_i32(&mut out, 0x50, r);
        raw::write_i32(&mut out, 0x54, g);
        raw::write_i32(&mut out, 0x58, b);
        raw::write_i32(&mut out, 0x5C, self.light);
        raw::write_i32(&mut out, 0x60, self.unknowns[2]);
        raw::write_i32(&mut out, 0x64, self.unknowns[3]);
        raw::write_i32(&mut out, 0x68, self.unknowns[4]);
        raw::write_i32(&mut out, 0x6C, self.unknowns[5]);

        out
    }

    /// Render transform with the mesh's model size folded in.
    pub fn transform_matrix(&self) -> Mat4 {
        let model_size = self.model.map_or(1.0, |m| m.size);
        transform::compose(
            self.transform.position(),
            self.transform.rotation(),
            self.transform.scale() * model_size,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Rgb;
    use glam::{Quat, Vec3};
    use pretty_assertions::assert_eq;

    #[test]
    fn arbitrary_rotation_round_trips_byte_exact() -> Result<()> {
        let mut bytes = vec![0u8; Shrub::LEN];
        raw::write_mat4(
            &mut bytes,
            0x00,
            transform::compose(
                Vec3::new(8.0, 8.0, 1.0),
                Quat::from_rotation_z(0.3),
                Vec3::new(0.9, 1.1, 1.3),
            ),
        );
        raw::write_i32(&mut bytes, 0x40, 42);
        raw::write_f32(&mut bytes, 0x44, 80.0);
        raw::write_i32(&mut bytes, 0x50, 10);
        raw::write_i32(&mut bytes, 0x54, 20);
        raw::write_i32(&mut bytes, 0x58, 30);
        raw::write_i32(&mut bytes, 0x5C, 2);

        let shrub = Shrub::read(&bytes, 0, &ModelCatalog::new())?;
        assert_eq!(shrub.draw_distance, 80.0);
        assert_eq!(shrub.color.get(), Some(Rgb::new(10, 20, 30)));
        assert_eq!(shrub.to_bytes(), bytes);
        Ok(())
    }
}
