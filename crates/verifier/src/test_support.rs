//! Fixture builders for package tests.
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only.

use crate::archive::Entry;
use crate::report::Reporter;
use crate::verdict::{EntryFinding, PackageVerdict};
use aixverify_common::layout::{ICON_PNG, MAIN_WASM, PAYLOAD_DIR, SOURCE_JSON};
use aixverify_common::Error;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Minimal wasm module header.
pub const WASM_HEADER: &[u8] = b"\0asm\x01\0\0\0";

/// Encode an image as PNG.
pub fn encode_png(image: DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// A fully opaque RGBA PNG.
pub fn opaque_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([30, 144, 255, 255]));
    encode_png(DynamicImage::ImageRgba8(image))
}

/// An RGBA PNG with a single pixel at `(x, y)` carrying `alpha`.
pub fn png_with_transparent_pixel(width: u32, height: u32, x: u32, y: u32, alpha: u8) -> Vec<u8> {
    let mut image = RgbaImage::from_pixel(width, height, Rgba([30, 144, 255, 255]));
    image.put_pixel(x, y, Rgba([30, 144, 255, alpha]));
    encode_png(DynamicImage::ImageRgba8(image))
}

/// A source descriptor that satisfies the schema.
pub fn valid_source_json() -> Vec<u8> {
    serde_json::json!({
        "info": {
            "id": "en.example",
            "lang": "en",
            "name": "Example",
            "version": 3,
            "url": "https://example.com",
            "nsfw": 1
        },
        "listings": [{ "name": "Latest" }]
    })
    .to_string()
    .into_bytes()
}

/// A settings descriptor that satisfies the schema.
pub fn valid_settings_json() -> Vec<u8> {
    serde_json::json!([
        { "type": "switch", "key": "nsfw", "title": "Show NSFW", "default": false }
    ])
    .to_string()
    .into_bytes()
}

/// A settings descriptor whose only item lacks its required `key`.
pub fn settings_missing_key_json() -> Vec<u8> {
    serde_json::json!([{ "type": "switch", "title": "Show NSFW" }])
        .to_string()
        .into_bytes()
}

/// A filters descriptor that satisfies the schema.
pub fn valid_filters_json() -> Vec<u8> {
    serde_json::json!([
        { "type": "title" },
        { "type": "sort", "name": "Sort", "options": ["Latest", "Popular"] }
    ])
    .to_string()
    .into_bytes()
}

/// Builds package archives on disk.
///
/// Entries are written in insertion order, starting with the `Payload/`
/// directory marker.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    entries: Vec<(String, Option<Vec<u8>>)>,
    compression: CompressionMethod,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![(PAYLOAD_DIR.to_string(), None)],
            compression: CompressionMethod::Deflated,
        }
    }

    /// A package that passes verification: payload, 128x128 opaque icon and
    /// a valid source descriptor.
    pub fn valid() -> Self {
        Self::new()
            .file(MAIN_WASM, WASM_HEADER)
            .file(ICON_PNG, &opaque_png(128, 128))
            .file(SOURCE_JSON, &valid_source_json())
    }

    pub fn file(mut self, name: &str, content: &[u8]) -> Self {
        self.entries.push((name.to_string(), Some(content.to_vec())));
        self
    }

    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push((name.to_string(), None));
        self
    }

    /// Drop every entry with the given name.
    pub fn without(mut self, name: &str) -> Self {
        self.entries.retain(|(n, _)| n != name);
        self
    }

    /// Store entries uncompressed, so their bytes appear verbatim on disk.
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    pub fn write_to(&self, path: &Path) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(self.compression);

        for (name, content) in &self.entries {
            match content {
                Some(bytes) => {
                    zip.start_file(name.as_str(), options).unwrap();
                    zip.write_all(bytes).unwrap();
                }
                None => {
                    zip.add_directory(name.as_str(), options).unwrap();
                }
            }
        }

        zip.finish().unwrap();
    }

    /// Write the package as `dir/name` and return its path.
    pub fn build(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        self.write_to(&path);
        path
    }
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip one bit inside the first occurrence of `content` in the file at
/// `path`. Used on stored entries to break their checksum.
pub fn corrupt_in_place(path: &Path, content: &[u8]) {
    let mut bytes = std::fs::read(path).unwrap();
    let start = bytes
        .windows(content.len())
        .position(|window| window == content)
        .expect("content not found in archive");
    bytes[start + content.len() / 2] ^= 0x01;
    std::fs::write(path, bytes).unwrap();
}

/// A single-entry archive whose central directory claims, through a zip64
/// extra field, that the stored entry is `declared_size` bytes long. The
/// CRC is left at zero so reading the entry fails once the real data ends.
pub fn oversized_entry_archive(name: &str, data: &[u8], declared_size: u64) -> Vec<u8> {
    const DOS_DATE: u16 = 0x21;
    let name_len = name.len() as u16;
    let data_len = data.len() as u32;

    let mut bytes = Vec::new();

    // Local file header.
    bytes.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
    bytes.extend_from_slice(&45u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&DOS_DATE.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(&name_len.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(name.as_bytes());
    bytes.extend_from_slice(data);

    // Central directory.
    let central_offset = bytes.len() as u32;
    bytes.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
    bytes.extend_from_slice(&45u16.to_le_bytes());
    bytes.extend_from_slice(&45u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&DOS_DATE.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(&name_len.to_le_bytes());
    bytes.extend_from_slice(&12u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(name.as_bytes());
    bytes.extend_from_slice(&0x0001u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(&declared_size.to_le_bytes());
    let central_size = bytes.len() as u32 - central_offset;

    // End of central directory.
    bytes.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&central_size.to_le_bytes());
    bytes.extend_from_slice(&central_offset.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());

    bytes
}

/// Reporter that records events as plain strings.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn package_started(&mut self, path: &Path) {
        self.events.push(format!("start {}", path.display()));
    }

    fn open_failed(&mut self, path: &Path, _error: &Error) {
        self.events.push(format!("open-failed {}", path.display()));
    }

    fn entry(&mut self, entry: &Entry) {
        self.events.push(format!("entry {}", entry.display_name()));
    }

    fn finding(&mut self, entry: &Entry, _finding: &EntryFinding) {
        self.events.push(format!("finding {}", entry.display_name()));
    }

    fn package_finished(&mut self, path: &Path, verdict: &PackageVerdict) {
        let status = if verdict.passed() { "pass" } else { "fail" };
        self.events
            .push(format!("finish {} {}", path.display(), status));
    }
}
