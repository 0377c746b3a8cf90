//! Little-endian primitive reads and writes at explicit byte offsets.
//!
//! Record codecs in this crate address fields by offset into a shared record
//! buffer rather than streaming through a cursor, because field layouts are
//! specified as offset tables that differ per game release.
//!
//! All helpers panic when `offset + width` runs past the buffer. Callers
//! validate section lengths against the expected record count before looping,
//! so an out-of-range access here is a programming error, not a decode
//! failure.

use byteorder::{ByteOrder, LittleEndian};
use glam::{Mat4, Vec3, Vec4};

pub fn read_u8(buf: &[u8], offset: usize) -> u8 {
    buf[offset]
}

pub fn read_i16(buf: &[u8], offset: usize) -> i16 {
    LittleEndian::read_i16(&buf[offset..offset + 2])
}

pub fn read_u16(buf: &[u8], offset: usize) -> u16 {
    LittleEndian::read_u16(&buf[offset..offset + 2])
}

pub fn read_i32(buf: &[u8], offset: usize) -> i32 {
    LittleEndian::read_i32(&buf[offset..offset + 4])
}

pub fn read_u32(buf: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&buf[offset..offset + 4])
}

pub fn read_f32(buf: &[u8], offset: usize) -> f32 {
    LittleEndian::read_f32(&buf[offset..offset + 4])
}

pub fn read_vec3(buf: &[u8], offset: usize) -> Vec3 {
    Vec3::new(
        read_f32(buf, offset),
        read_f32(buf, offset + 4),
        read_f32(buf, offset + 8),
    )
}

pub fn read_vec4(buf: &[u8], offset: usize) -> Vec4 {
    Vec4::new(
        read_f32(buf, offset),
        read_f32(buf, offset + 4),
        read_f32(buf, offset + 8),
        read_f32(buf, offset + 12),
    )
}

/// Reads 16 consecutive floats as an affine transform.
///
/// The games store row-major matrices for a row-vector convention, with the
/// translation in floats 12..14 and float 15 carrying a sentinel that is not
/// always 1.0. Reading the same 16 floats into glam's column-major,
/// column-vector [`Mat4`] yields the equivalent transform with the sentinel
/// landing in `w_axis.w`, so no element shuffling happens here and the
/// sentinel survives a round trip untouched.
pub fn read_mat4(buf: &[u8], offset: usize) -> Mat4 {
    let mut floats = [0.0f32; 16];
    LittleEndian::read_f32_into(&buf[offset..offset + 64], &mut floats);
    Mat4::from_cols_array(&floats)
}

pub fn write_u8(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

pub fn write_i16(buf: &mut [u8], offset: usize, value: i16) {
    LittleEndian::write_i16(&mut buf[offset..offset + 2], value);
}

pub fn write_u16(buf: &mut [u8], offset: usize, value: u16) {
    LittleEndian::write_u16(&mut buf[offset..offset + 2], value);
}

pub fn write_i32(buf: &mut [u8], offset: usize, value: i32) {
    LittleEndian::write_i32(&mut buf[offset..offset + 4], value);
}

pub fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    LittleEndian::write_u32(&mut buf[offset..offset + 4], value);
}

pub fn write_f32(buf: &mut [u8], offset: usize, value: f32) {
    LittleEndian::write_f32(&mut buf[offset..offset + 4], value);
}

pub fn write_vec3(buf: &mut [u8], offset: usize, value: Vec3) {
    write_f32(buf, offset, value.x);
    write_f32(buf, offset + 4, value.y);
    write_f32(buf, offset + 8, value.z);
}

pub fn write_vec4(buf: &mut [u8], offset: usize, value: Vec4) {
    write_f32(buf, offset, value.x);
    write_f32(buf, offset + 4, value.y);
    write_f32(buf, offset + 8, value.z);
    write_f32(buf, offset + 12, value.w);
}

/// Inverse of [`read_mat4`].
pub fn write_mat4(buf: &mut [u8], offset: usize, value: Mat4) {
    LittleEndian::write_f32_into(&value.to_cols_array(), &mut buf[offset..offset + 64]);
}
