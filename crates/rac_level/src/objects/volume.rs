//! Trigger volume records: cuboids, spheres, cylinders and the unidentified
//! Type0C family.
//!
//! All four share the same 0x80-byte body (transform matrix + inverse), so
//! they wrap [`ZoneRecord`] and only differ in kind tag. The distinction
//! matters to the editor (and to which section the record lives in), not to
//! the codec.

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::objects::{ObjectKind, ZoneRecord};

macro_rules! volume_record {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(pub ZoneRecord);

        impl $name {
            pub const LEN: usize = ZoneRecord::LEN;

            pub fn read(block: &[u8], index: usize) -> Result<$name> {
                Ok($name(ZoneRecord::read(block, index, $kind)?))
            }

            pub fn to_bytes(&self) -> Vec<u8> {
                self.0.to_bytes()
            }
        }

        impl Deref for $name {
            type Target = ZoneRecord;

            fn deref(&self) -> &ZoneRecord {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut ZoneRecord {
                &mut self.0
            }
        }
    };
}

volume_record!(
    /// An axis-oblique box volume; used for triggers and camera regions.
    Cuboid,
    ObjectKind::Cuboid
);

volume_record!(
    /// A spherical volume; the matrix scale carries the radius.
    Sphere,
    ObjectKind::Sphere
);

volume_record!(
    /// A cylindrical volume.
    Cylinder,
    ObjectKind::Cylinder
);

volume_record!(
    /// An unidentified two-matrix record; preserved without interpretation.
    Type0C,
    ObjectKind::Type0C
);
