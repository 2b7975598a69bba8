//! Minimal JPEG files for tests: SOI, one APP1 Exif segment holding a
//! big-endian TIFF with IFD0 -> Exif IFD -> DateTimeOriginal, then EOI.

use std::fs;
use std::path::Path;

const EXIF_IFD_POINTER: u16 = 0x8769;
const DATE_TIME_ORIGINAL: u16 = 0x9003;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

pub fn write_jpeg_with_capture_time(path: &Path, timestamp: &str) {
    fs::write(path, jpeg_with_capture_time(timestamp)).expect("write jpeg fixture");
}

pub fn write_jpeg_without_exif(path: &Path) {
    fs::write(path, [0xFF, 0xD8, 0xFF, 0xD9]).expect("write plain jpeg fixture");
}

pub fn jpeg_with_capture_time(timestamp: &str) -> Vec<u8> {
    let tiff = tiff_with_capture_time(timestamp);
    let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("segment fits in u16");

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

fn tiff_with_capture_time(timestamp: &str) -> Vec<u8> {
    let mut ascii = timestamp.as_bytes().to_vec();
    ascii.push(0);
    // values of 4 bytes or less would be stored inline instead of at an offset
    assert!(ascii.len() > 4, "fixture timestamp too short");
    let count = u32::try_from(ascii.len()).expect("count fits in u32");

    // header(8) + IFD0(2 + 12 + 4) = 26 -> Exif IFD(2 + 12 + 4) = 44 -> string
    let exif_ifd_offset: u32 = 26;
    let string_offset: u32 = 44;

    let mut out = Vec::new();
    out.extend_from_slice(b"MM");
    out.extend_from_slice(&42u16.to_be_bytes());
    out.extend_from_slice(&8u32.to_be_bytes());

    out.extend_from_slice(&1u16.to_be_bytes());
    push_entry(&mut out, EXIF_IFD_POINTER, TYPE_LONG, 1, exif_ifd_offset);
    out.extend_from_slice(&0u32.to_be_bytes());

    out.extend_from_slice(&1u16.to_be_bytes());
    push_entry(&mut out, DATE_TIME_ORIGINAL, TYPE_ASCII, count, string_offset);
    out.extend_from_slice(&0u32.to_be_bytes());

    assert_eq!(out.len(), string_offset as usize);
    out.extend_from_slice(&ascii);
    out
}

fn push_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_be_bytes());
    out.extend_from_slice(&kind.to_be_bytes());
    out.extend_from_slice(&count.to_be_bytes());
    out.extend_from_slice(&value.to_be_bytes());
}
