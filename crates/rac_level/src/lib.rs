//! # Level Object Format Documentation
//!
//! This crate provides utilities to decode, edit, and re-encode the binary level
//! object records used by the PS3-era *Ratchet & Clank* games (RAC1, RAC2, RAC3,
//! and *Deadlocked*). A level's gameplay data is a series of homogeneous
//! sections, each holding a list of fixed-size or variable-size records of one
//! object family.
//!
//! ## Section Structure
//!
//! Section framing (counts and block offsets) is supplied by the caller; this
//! crate operates on the record blocks themselves. Most families use one
//! fixed-size record layout per game version. The moby table below shows the
//! extent of the per-version drift this crate absorbs:
//!
//! | Family            | RAC1  | RAC2  | RAC3  | Deadlocked |
//! |-------------------|-------|-------|-------|------------|
//! | Moby              | 0x78  | 0x88  | 0x88  | 0x70       |
//! | Tie               | 0x70  | 0x70  | 0x70  | 0x70       |
//! | Shrub             | 0x70  | 0x70  | 0x70  | 0x70       |
//! | Game camera       | 0x20  | 0x20  | 0x20  | 0x20       |
//! | Volume (4 kinds)  | 0x80  | 0x80  | 0x80  | 0x80       |
//! | Sound instance    | 0x90  | 0x90  | 0x90  | 0x90       |
//! | Directional light | 0x40  | 0x40  | 0x40  | 0x40       |
//! | Point light       | 0x20  | 0x10  | 0x10  | 0x10       |
//! | Env sample        | 0x20  | 0x10  | 0x10  | 0x10       |
//! | Env transition    | 0xA0  | 0xA0  | 0xA0  | 0xA0       |
//! | Grind path        | 0x20  | 0x20  | 0x20  | 0x20       |
//!
//! Splines, language data, and the level variables record are variable-length;
//! their lengths are discovered while walking the section.
//!
//! ## Placement Records
//!
//! Ties, shrubs, volumes, sound instances, and env transitions store a 4x4
//! affine transform as 16 little-endian floats (some followed by the
//! precomputed inverse). The matrix is the source of truth: decode derives
//! position, rotation, and scale from it, and any mutation rebuilds the matrix
//! before re-deriving. The last element sometimes carries a non-1.0 value from
//! the game's tooling; it is preserved verbatim so untouched records re-encode
//! byte-identically.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte values
//! - **Round trip**: `encode(decode(bytes)) == bytes` for every record family,
//!   including unidentified fields and trailing bytes
//!
//! ## Example
//!
//! ```no_run
//! use rac_level::{decode_section, Catalogs, Game, ObjectKind};
//!
//! # fn main() -> rac_level::Result<()> {
//! let bytes = std::fs::read("mobies.bin")?;
//! let catalogs = Catalogs::default();
//! let mobies = decode_section(ObjectKind::Moby, &bytes, 12, Game::Rac2, &catalogs)?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod game;
pub mod level;
pub mod math;
pub mod objects;
pub mod raw;
pub mod transform;

pub use catalog::{Catalogs, ModelCatalog, ModelEntry, TextureCatalog};
pub use error::{Error, Result};
pub use game::Game;
pub use level::{decode_section, encode_section, Level};
pub use objects::{LevelObject, ObjectKind};
