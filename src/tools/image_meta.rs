//! Image metadata inspection and removal.
//!
//! The tool works at the container level: it walks JPEG segments or PNG
//! chunks and drops the ones that carry embedded metadata (EXIF, XMP, ICC,
//! comments, text chunks). Pixel data is copied through untouched, which is
//! the same effect a decode/re-encode pass has. Inspection is deliberately
//! coarse: a presence flag per file, not a parsed tag table.

use crate::error::Error;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const PNG_METADATA_CHUNKS: &[&[u8; 4]] = &[b"tEXt", b"zTXt", b"iTXt", b"eXIf", b"tIME"];

/// Container formats the tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Coarse inspection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataReport {
    pub format: ImageFormat,
    pub has_metadata: bool,
}

/// Report whether the image carries embedded metadata.
pub fn inspect(bytes: &[u8]) -> Result<MetadataReport, Error> {
    match detect_format(bytes)? {
        ImageFormat::Jpeg => {
            let mut found = false;
            walk_jpeg(bytes, |marker, _| {
                if is_jpeg_metadata_marker(marker) {
                    found = true;
                }
            })?;
            Ok(MetadataReport {
                format: ImageFormat::Jpeg,
                has_metadata: found,
            })
        }
        ImageFormat::Png => {
            let mut found = false;
            walk_png(bytes, |chunk_type, _| {
                if is_png_metadata_chunk(chunk_type) {
                    found = true;
                }
            })?;
            Ok(MetadataReport {
                format: ImageFormat::Png,
                has_metadata: found,
            })
        }
    }
}

/// Rewrite the image without its metadata segments.
pub fn strip(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    match detect_format(bytes)? {
        ImageFormat::Jpeg => {
            let mut out = Vec::with_capacity(bytes.len());
            out.extend_from_slice(&bytes[..2]);
            walk_jpeg(bytes, |marker, segment| {
                if !is_jpeg_metadata_marker(marker) {
                    out.extend_from_slice(segment);
                }
            })?;
            Ok(out)
        }
        ImageFormat::Png => {
            let mut out = Vec::with_capacity(bytes.len());
            out.extend_from_slice(PNG_SIGNATURE);
            walk_png(bytes, |chunk_type, chunk| {
                if !is_png_metadata_chunk(chunk_type) {
                    out.extend_from_slice(chunk);
                }
            })?;
            Ok(out)
        }
    }
}

fn detect_format(bytes: &[u8]) -> Result<ImageFormat, Error> {
    if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xD8 {
        Ok(ImageFormat::Jpeg)
    } else if bytes.len() >= PNG_SIGNATURE.len() && &bytes[..PNG_SIGNATURE.len()] == PNG_SIGNATURE {
        Ok(ImageFormat::Png)
    } else {
        Err(Error::tool("unsupported image format"))
    }
}

fn is_jpeg_metadata_marker(marker: u8) -> bool {
    // APP1..APP15 carry EXIF/XMP/ICC; COM carries free-form comments.
    // APP0 (JFIF) stays: decoders expect it.
    (0xE1..=0xEF).contains(&marker) || marker == 0xFE
}

fn is_png_metadata_chunk(chunk_type: &[u8]) -> bool {
    PNG_METADATA_CHUNKS.iter().any(|name| *name == chunk_type)
}

/// Walk JPEG segments after SOI, handing each (marker, raw segment bytes)
/// to the callback. Entropy-coded data from SOS on is passed through as one
/// final pseudo-segment with marker `0xDA`.
fn walk_jpeg(bytes: &[u8], mut visit: impl FnMut(u8, &[u8])) -> Result<(), Error> {
    let mut pos = 2;

    while pos + 1 < bytes.len() {
        if bytes[pos] != 0xFF {
            return Err(Error::tool("corrupt JPEG segment marker"));
        }
        let marker = bytes[pos + 1];

        // Standalone markers carry no length.
        if marker == 0xD9 || marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            visit(marker, &bytes[pos..pos + 2]);
            pos += 2;
            continue;
        }

        // Start of scan: the rest of the stream is image data.
        if marker == 0xDA {
            visit(marker, &bytes[pos..]);
            return Ok(());
        }

        if pos + 4 > bytes.len() {
            return Err(Error::tool("truncated JPEG segment"));
        }
        let length = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        let end = pos + 2 + length;
        if length < 2 || end > bytes.len() {
            return Err(Error::tool("truncated JPEG segment"));
        }

        visit(marker, &bytes[pos..end]);
        pos = end;
    }

    Ok(())
}

/// Walk PNG chunks after the signature, handing each (type, raw chunk
/// bytes including length and CRC) to the callback.
fn walk_png(bytes: &[u8], mut visit: impl FnMut(&[u8], &[u8])) -> Result<(), Error> {
    let mut pos = PNG_SIGNATURE.len();

    while pos < bytes.len() {
        if pos + 8 > bytes.len() {
            return Err(Error::tool("truncated PNG chunk header"));
        }
        let length =
            u32::from_be_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
                as usize;
        let end = pos + 8 + length + 4;
        if end > bytes.len() {
            return Err(Error::tool("truncated PNG chunk"));
        }

        let chunk_type = &bytes[pos + 4..pos + 8];
        visit(chunk_type, &bytes[pos..end]);

        if chunk_type == b"IEND" {
            return Ok(());
        }
        pos = end;
    }

    Ok(())
}
