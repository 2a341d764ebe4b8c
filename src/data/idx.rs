//! Loader for the IDX files MNIST ships in.
//!
//! # Image file layout
//! ```text
//! bytes  0-3:   magic 2051  (big-endian u32)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (big-endian u32)
//! bytes 12-15:  cols        (big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # Label file layout
//! ```text
//! bytes  0-3:   magic 2049  (big-endian u32)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index
//! ```

use std::path::Path;

use log::info;

use crate::data::in_memory::InMemoryDataset;
use crate::data::provider::DatasetProvider;
use crate::error::{Error, Result};

pub const IMAGE_MAGIC: u32 = 2051;
pub const LABEL_MAGIC: u32 = 2049;

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Parses an image/label IDX pair. Pixels are divided by 255 so every input
/// lies in [0, 1]; label bytes are used directly as class indices.
pub fn parse_idx_pair(
    image_bytes: &[u8],
    label_bytes: &[u8],
    n_classes: usize,
) -> Result<InMemoryDataset> {
    if image_bytes.len() < 16 {
        return Err(Error::InvalidData(format!(
            "IDX image file too short: expected at least 16 header bytes, got {}",
            image_bytes.len()
        )));
    }
    let magic = read_u32(image_bytes, 0);
    if magic != IMAGE_MAGIC {
        return Err(Error::InvalidData(format!(
            "IDX image file: magic number {magic} is not {IMAGE_MAGIC}"
        )));
    }

    let n_items = read_u32(image_bytes, 4) as usize;
    let rows = read_u32(image_bytes, 8) as usize;
    let cols = read_u32(image_bytes, 12) as usize;

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidData(format!(
            "IDX image file: rows * cols overflows usize (rows={rows}, cols={cols})"
        ))
    })?;
    let data_len = n_items.checked_mul(n_pixels).ok_or_else(|| {
        Error::InvalidData(format!(
            "IDX image file: {n_items} items of {n_pixels} pixels overflows usize"
        ))
    })?;
    if image_bytes.len() - 16 < data_len {
        return Err(Error::InvalidData(format!(
            "IDX image file too short: header declares {n_items} items of {rows}x{cols} pixels \
             ({data_len} data bytes), but only {} follow the header",
            image_bytes.len() - 16
        )));
    }

    if label_bytes.len() < 8 {
        return Err(Error::InvalidData(format!(
            "IDX label file too short: expected at least 8 header bytes, got {}",
            label_bytes.len()
        )));
    }
    let magic = read_u32(label_bytes, 0);
    if magic != LABEL_MAGIC {
        return Err(Error::InvalidData(format!(
            "IDX label file: magic number {magic} is not {LABEL_MAGIC}"
        )));
    }
    let label_count = read_u32(label_bytes, 4) as usize;
    if label_count != n_items {
        return Err(Error::InvalidData(format!(
            "IDX file mismatch: image file declares {n_items} items but label file declares {label_count}"
        )));
    }
    if label_bytes.len() - 8 < n_items {
        return Err(Error::InvalidData(format!(
            "IDX label file too short: header declares {n_items} labels but only {} follow the header",
            label_bytes.len() - 8
        )));
    }

    let inputs = if n_pixels == 0 {
        vec![Vec::new(); n_items]
    } else {
        image_bytes[16..16 + data_len]
            .chunks_exact(n_pixels)
            .map(|chunk| chunk.iter().map(|&px| px as f64 / 255.0).collect())
            .collect()
    };
    let labels = label_bytes[8..8 + n_items]
        .iter()
        .map(|&class| Some(class as usize))
        .collect();

    InMemoryDataset::new(inputs, labels, n_classes)
}

/// Reads and parses an image/label IDX pair from disk.
pub fn load_idx_pair(
    image_path: impl AsRef<Path>,
    label_path: impl AsRef<Path>,
    n_classes: usize,
) -> Result<InMemoryDataset> {
    let image_path = image_path.as_ref();
    let label_path = label_path.as_ref();
    let image_bytes = std::fs::read(image_path)?;
    let label_bytes = std::fs::read(label_path)?;
    let dataset = parse_idx_pair(&image_bytes, &label_bytes, n_classes)?;
    info!(
        "loaded {} examples of {} features from {}",
        dataset.len(),
        dataset.input_size(),
        image_path.display()
    );
    Ok(dataset)
}
