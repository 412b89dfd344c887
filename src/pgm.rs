//! Binary PGM (`P5`) export of a frame's luma plane.
//!
//! The file is the minimal Netpbm graymap: an ASCII header
//! `P5\n<width> <height>\n255\n` followed by `height` rows of `width` bytes.
//! Decoded planes usually carry row padding (stride > width); only the
//! first `width` bytes of each row are written.
//!
//! # Example
//!
//! ```
//! use lumadump::{Plane, pgm};
//!
//! // 2x2 image stored with a stride of 4.
//! let data = [10, 20, 0, 0, 30, 40, 0, 0];
//! let plane = Plane { data: &data, stride: 4 };
//!
//! let mut out = Vec::new();
//! pgm::write_gray_frame(&mut out, plane, 2, 2).unwrap();
//! assert_eq!(out, b"P5\n2 2\n255\n\x0a\x14\x1e\x28");
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    backend::{DecodedFrame, Plane},
    error::DumpError,
};

/// Largest sample value written in the header.
pub const MAX_SAMPLE_VALUE: u8 = 255;

/// Build `<directory>/<stem>-<number>.pgm`.
pub fn frame_path(directory: &Path, stem: &str, number: u64) -> PathBuf {
    directory.join(format!("{stem}-{number}.pgm"))
}

/// Length in bytes of the header for a `width` x `height` image.
pub fn header_len(width: u32, height: u32) -> usize {
    format!("P5\n{width} {height}\n{MAX_SAMPLE_VALUE}\n").len()
}

/// Check that `plane` holds `height` rows of at least `width` bytes.
fn check_plane(plane: &Plane<'_>, width: usize, height: usize) -> Result<(), DumpError> {
    if height == 0 || width == 0 {
        return Ok(());
    }
    if plane.stride < width {
        return Err(DumpError::InvalidPlane(format!(
            "stride {} is smaller than width {width}",
            plane.stride
        )));
    }
    let required = (height - 1) * plane.stride + width;
    if plane.data.len() < required {
        return Err(DumpError::InvalidPlane(format!(
            "plane holds {} bytes but {width}x{height} with stride {} needs {required}",
            plane.data.len(),
            plane.stride
        )));
    }
    Ok(())
}

/// Write `plane` as a binary PGM image to `writer`.
///
/// Row `i` is read from `plane.data[i * stride..i * stride + width]`.
///
/// # Errors
///
/// [`DumpError::InvalidPlane`] if the plane is too small for the geometry,
/// [`DumpError::IoError`] if writing fails.
pub fn write_gray_frame<W: Write>(
    writer: &mut W,
    plane: Plane<'_>,
    width: u32,
    height: u32,
) -> Result<(), DumpError> {
    let row_len = width as usize;
    let rows = height as usize;
    check_plane(&plane, row_len, rows)?;

    write!(writer, "P5\n{width} {height}\n{MAX_SAMPLE_VALUE}\n")?;

    // An empty image is header only, whatever the stride.
    if row_len == 0 || rows == 0 {
        return Ok(());
    }
    for row in plane.data.chunks(plane.stride).take(rows) {
        writer.write_all(&row[..row_len])?;
    }
    Ok(())
}

/// Save the luma plane of `frame` to `path`.
///
/// # Errors
///
/// [`DumpError::OutputOpen`] if the file cannot be created (for example
/// when the output directory does not exist), plus anything
/// [`write_gray_frame`] returns.
pub fn save_gray_frame(path: &Path, frame: &DecodedFrame<'_>) -> Result<(), DumpError> {
    let plane = frame
        .luma()
        .ok_or_else(|| DumpError::InvalidPlane(format!("frame {} has no planes", frame.number)))?;
    check_plane(&plane, frame.width as usize, frame.height as usize)?;

    let file = File::create(path).map_err(|source| DumpError::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_gray_frame(&mut writer, plane, frame.width, frame.height)?;
    writer.flush()?;

    log::debug!(
        "Wrote {}x{} frame {} to {}",
        frame.width,
        frame.height,
        frame.number,
        path.display()
    );
    Ok(())
}
