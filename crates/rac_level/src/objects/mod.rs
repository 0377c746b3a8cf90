//! The level object records and their codecs.
//!
//! Each kind is a plain struct with a `read` constructor and a `to_bytes`
//! encoder; the closed [`LevelObject`] enum is what section-level code
//! dispatches over. Codecs are stateless: every decode/encode call is pure
//! given its inputs, and the only cross-record state is the read-only
//! catalogs.

use glam::{Mat4, Quat, Vec3};

use crate::error::Result;
use crate::game::Game;
use crate::{raw, transform};

mod camera;
mod env;
mod grind_path;
mod language;
mod level_variables;
mod light;
mod moby;
mod shrub;
mod sound;
mod spline;
mod tie;
mod volume;

pub use camera::GameCamera;
pub use env::{EnvSample, EnvTransition};
pub use grind_path::GrindPath;
pub use language::LanguageData;
pub use level_variables::LevelVariables;
pub use light::{DirectionalLight, PointLight};
pub use moby::Moby;
pub use shrub::Shrub;
pub use sound::SoundInstance;
pub use spline::{Spline, SplineVertex};
pub use tie::Tie;
pub use volume::{Cuboid, Cylinder, Sphere, Type0C};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every record family this crate can decode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    Moby,
    Tie,
    Shrub,
    GameCamera,
    Spline,
    Cuboid,
    Sphere,
    Cylinder,
    Type0C,
    SoundInstance,
    DirectionalLight,
    PointLight,
    EnvSample,
    EnvTransition,
    GrindPath,
    LanguageData,
    LevelVariables,
}

impl ObjectKind {
    /// The fixed record length for this kind under the given game, or `None`
    /// for the variable-length families (splines, language data, level
    /// variables).
    pub fn fixed_len(self, game: Game) -> Option<usize> {
        match self {
            ObjectKind::Moby => Some(Moby::len(game)),
            ObjectKind::Tie => Some(Tie::LEN),
            ObjectKind::Shrub => Some(Shrub::LEN),
            ObjectKind::GameCamera => Some(GameCamera::LEN),
            ObjectKind::Cuboid
            | ObjectKind::Sphere
            | ObjectKind::Cylinder
            | ObjectKind::Type0C => Some(ZoneRecord::LEN),
            ObjectKind::SoundInstance => Some(SoundInstance::LEN),
            ObjectKind::DirectionalLight => Some(DirectionalLight::LEN),
            ObjectKind::PointLight => Some(PointLight::len(game)),
            ObjectKind::EnvSample => Some(EnvSample::len(game)),
            ObjectKind::EnvTransition => Some(EnvTransition::LEN),
            ObjectKind::GrindPath => Some(GrindPath::LEN),
            ObjectKind::Spline | ObjectKind::LanguageData | ObjectKind::LevelVariables => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectKind::Moby => "moby",
            ObjectKind::Tie => "tie",
            ObjectKind::Shrub => "shrub",
            ObjectKind::GameCamera => "game camera",
            ObjectKind::Spline => "spline",
            ObjectKind::Cuboid => "cuboid",
            ObjectKind::Sphere => "sphere",
            ObjectKind::Cylinder => "cylinder",
            ObjectKind::Type0C => "type 0C",
            ObjectKind::SoundInstance => "sound instance",
            ObjectKind::DirectionalLight => "directional light",
            ObjectKind::PointLight => "point light",
            ObjectKind::EnvSample => "env sample",
            ObjectKind::EnvTransition => "env transition",
            ObjectKind::GrindPath => "grind path",
            ObjectKind::LanguageData => "language data",
            ObjectKind::LevelVariables => "level variables",
        };
        f.write_str(name)
    }
}

/// A transform whose source of truth is the 4x4 matrix read from disk.
///
/// The decomposed position/rotation/scale are derived, never authoritative.
/// All mutation goes through [`translate`](Self::translate),
/// [`rotate`](Self::rotate), [`scale_by`](Self::scale_by) or the `set_*`
/// methods, each of which updates the matrix first and re-derives the parts.
/// The `w_axis.w` element may carry a non-1.0 sentinel from the source
/// record; it is never normalized and re-encodes byte-identically.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTransform {
    matrix: Mat4,
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl MatrixTransform {
    pub fn from_matrix(matrix: Mat4, kind: ObjectKind, index: usize) -> Result<MatrixTransform> {
        let (position, rotation, scale) = transform::decompose(matrix, kind, index)?;
        Ok(MatrixTransform {
            matrix,
            position,
            rotation,
            scale,
        })
    }

    pub fn identity() -> MatrixTransform {
        MatrixTransform {
            matrix: Mat4::IDENTITY,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.matrix.w_axis.x += delta.x;
        self.matrix.w_axis.y += delta.y;
        self.matrix.w_axis.z += delta.z;
        self.recompute_from_matrix();
    }

    /// Rotates about the object's own centre.
    pub fn rotate(&mut self, delta: Quat) {
        let rotation = (delta * self.rotation).normalize();
        self.rebuild_matrix(self.position, rotation, self.scale);
    }

    pub fn scale_by(&mut self, factor: Vec3) {
        self.rebuild_matrix(self.position, self.rotation, self.scale * factor);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.matrix.w_axis.x = position.x;
        self.matrix.w_axis.y = position.y;
        self.matrix.w_axis.z = position.z;
        self.recompute_from_matrix();
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rebuild_matrix(self.position, rotation, self.scale);
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.rebuild_matrix(self.position, self.rotation, scale);
    }

    /// Rebuilds the matrix from parts, carrying the raw sentinel over.
    fn rebuild_matrix(&mut self, position: Vec3, rotation: Quat, scale: Vec3) {
        let sentinel = self.matrix.w_axis.w;
        self.matrix = transform::compose(position, rotation, scale);
        self.matrix.w_axis.w = sentinel;
        self.recompute_from_matrix();
    }

    fn recompute_from_matrix(&mut self) {
        let (scale, rotation, position) = self.matrix.to_scale_rotation_translation();
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
    }
}

/// The shared body of the two-matrix record families: a transform matrix at
/// 0x00 and its inverse at 0x40.
///
/// The inverse is preserved verbatim from the source bytes and only
/// recomputed when the transform itself is mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRecord {
    transform: MatrixTransform,
    inverse: Mat4,
}

impl ZoneRecord {
    pub const LEN: usize = 0x80;

    pub fn read(block: &[u8], index: usize, kind: ObjectKind) -> Result<ZoneRecord> {
        let offset = index * ZoneRecord::LEN;
        let matrix = raw::read_mat4(block, offset);
        let inverse = raw::read_mat4(block, offset + 0x40);
        Ok(ZoneRecord {
            transform: MatrixTransform::from_matrix(matrix, kind, index)?,
            inverse,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; ZoneRecord::LEN];
        raw::write_mat4(&mut out, 0x00, self.transform.matrix());
        raw::write_mat4(&mut out, 0x40, self.inverse);
        out
    }

    pub fn transform(&self) -> &MatrixTransform {
        &self.transform
    }

    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.transform.translate(delta);
        self.refresh_inverse();
    }

    pub fn rotate(&mut self, delta: Quat) {
        self.transform.rotate(delta);
        self.refresh_inverse();
    }

    pub fn scale_by(&mut self, factor: Vec3) {
        self.transform.scale_by(factor);
        self.refresh_inverse();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.set_position(position);
        self.refresh_inverse();
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.set_rotation(rotation);
        self.refresh_inverse();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.set_scale(scale);
        self.refresh_inverse();
    }

    fn refresh_inverse(&mut self) {
        self.inverse = self.transform.matrix().inverse();
    }
}

/// Any decoded record, tagged by kind.
///
/// This is the closed set section codecs dispatch over; there is no open
/// class hierarchy behind it.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelObject {
    Moby(Moby),
    Tie(Tie),
    Shrub(Shrub),
    GameCamera(GameCamera),
    Spline(Spline),
    Cuboid(Cuboid),
    Sphere(Sphere),
    Cylinder(Cylinder),
    Type0C(Type0C),
    SoundInstance(SoundInstance),
    DirectionalLight(DirectionalLight),
    PointLight(PointLight),
    EnvSample(EnvSample),
    EnvTransition(EnvTransition),
    GrindPath(GrindPath),
    LanguageData(LanguageData),
    LevelVariables(LevelVariables),
}

impl LevelObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            LevelObject::Moby(_) => ObjectKind::Moby,
            LevelObject::Tie(_) => ObjectKind::Tie,
            LevelObject::Shrub(_) => ObjectKind::Shrub,
            LevelObject::GameCamera(_) => ObjectKind::GameCamera,
            LevelObject::Spline(_) => ObjectKind::Spline,
            LevelObject::Cuboid(_) => ObjectKind::Cuboid,
            LevelObject::Sphere(_) => ObjectKind::Sphere,
            LevelObject::Cylinder(_) => ObjectKind::Cylinder,
            LevelObject::Type0C(_) => ObjectKind::Type0C,
            LevelObject::SoundInstance(_) => ObjectKind::SoundInstance,
            LevelObject::DirectionalLight(_) => ObjectKind::DirectionalLight,
            LevelObject::PointLight(_) => ObjectKind::PointLight,
            LevelObject::EnvSample(_) => ObjectKind::EnvSample,
            LevelObject::EnvTransition(_) => ObjectKind::EnvTransition,
            LevelObject::GrindPath(_) => ObjectKind::GrindPath,
            LevelObject::LanguageData(_) => ObjectKind::LanguageData,
            LevelObject::LevelVariables(_) => ObjectKind::LevelVariables,
        }
    }

    /// Encodes this record for the given game.
    ///
    /// Fixed-size kinds assert that their output matches the expected record
    /// length; producing anything else is a codec bug, never something to
    /// truncate or pad over.
    pub fn encode(&self, game: Game) -> Result<Vec<u8>> {
        let bytes = match self {
            LevelObject::Moby(o) => o.to_bytes(game),
            LevelObject::Tie(o) => o.to_bytes(),
            LevelObject::Shrub(o) => o.to_bytes(),
            LevelObject::GameCamera(o) => o.to_bytes()?,
            LevelObject::Spline(o) => o.to_bytes()?,
            LevelObject::Cuboid(o) => o.to_bytes(),
            LevelObject::Sphere(o) => o.to_bytes(),
            LevelObject::Cylinder(o) => o.to_bytes(),
            LevelObject::Type0C(o) => o.to_bytes(),
            LevelObject::SoundInstance(o) => o.to_bytes(),
            LevelObject::DirectionalLight(o) => o.to_bytes()?,
            LevelObject::PointLight(o) => o.to_bytes(game),
            LevelObject::EnvSample(o) => o.to_bytes(game),
            LevelObject::EnvTransition(o) => o.to_bytes(),
            LevelObject::GrindPath(o) => o.to_bytes()?,
            LevelObject::LanguageData(o) => o.to_bytes(),
            LevelObject::LevelVariables(o) => o.to_bytes(game),
        };
        if let Some(expected) = self.kind().fixed_len(game) {
            assert_eq!(
                bytes.len(),
                expected,
                "{} record encoded to {} bytes, layout says {expected}",
                self.kind(),
                bytes.len(),
            );
        }
        Ok(bytes)
    }
}
