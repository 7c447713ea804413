#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use bearvision::artifact::{ARTIFACT_MAGIC, ARTIFACT_VERSION};

/// Serializes an artifact container with the given header and weight payload.
pub fn encode_artifact(backend: &str, edge: u32, labels: &[&str], weights: &[f32]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_u32::<LittleEndian>(ARTIFACT_MAGIC).unwrap();
    buf.write_u32::<LittleEndian>(ARTIFACT_VERSION).unwrap();
    write_string(&mut buf, backend);
    buf.write_u32::<LittleEndian>(edge).unwrap();
    buf.write_u32::<LittleEndian>(labels.len() as u32).unwrap();
    for label in labels {
        write_string(&mut buf, label);
    }
    for w in weights {
        buf.write_f32::<LittleEndian>(*w).unwrap();
    }
    buf
}

/// Weight rows where class `c` responds to RGB channel `c`, zero bias.
pub fn channel_rows(edge: u32, classes: usize) -> Vec<f32> {
    let features = 3 * (edge as usize) * (edge as usize);
    let mut rows = Vec::with_capacity(classes * (features + 1));
    for class in 0..classes {
        for i in 0..features {
            rows.push(if i % 3 == class { 1.0 } else { 0.0 });
        }
        rows.push(0.0); // bias
    }
    rows
}

/// Encodes a solid-color PNG of the given dimensions.
pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.write_u32::<LittleEndian>(s.len() as u32).unwrap();
    buf.extend_from_slice(s.as_bytes());
}
