//! Content-type detection from a file's leading bytes.
//!
//! Implements the WHATWG MIME sniffing table (the one browsers use): the
//! first matching signature wins, then plain text if no binary control
//! bytes are present, then `application/octet-stream`.

use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::error::{CaptionBotError, Result};

/// Number of leading bytes considered when sniffing.
pub const SNIFF_LEN: usize = 512;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

enum Signature {
    /// Case-insensitive HTML tag after optional whitespace, terminated by
    /// a space or `>`.
    Html(&'static [u8]),
    Masked {
        mask: &'static [u8],
        pattern: &'static [u8],
        skip_ws: bool,
        content_type: &'static str,
    },
    Exact(&'static [u8], &'static str),
    Mp4,
    Text,
}

const fn exact(sig: &'static [u8], content_type: &'static str) -> Signature {
    Signature::Exact(sig, content_type)
}

const fn masked(
    mask: &'static [u8],
    pattern: &'static [u8],
    content_type: &'static str,
) -> Signature {
    Signature::Masked {
        mask,
        pattern,
        skip_ws: false,
        content_type,
    }
}

const HTML: &str = "text/html; charset=utf-8";

static SIGNATURES: &[Signature] = &[
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<SCRIPT"),
    Signature::Html(b"<IFRAME"),
    Signature::Html(b"<H1"),
    Signature::Html(b"<DIV"),
    Signature::Html(b"<FONT"),
    Signature::Html(b"<TABLE"),
    Signature::Html(b"<A"),
    Signature::Html(b"<STYLE"),
    Signature::Html(b"<TITLE"),
    Signature::Html(b"<B"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<BR"),
    Signature::Html(b"<P"),
    Signature::Html(b"<!--"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        pattern: b"<?xml",
        skip_ws: true,
        content_type: "text/xml; charset=utf-8",
    },
    exact(b"%PDF-", "application/pdf"),
    exact(b"%!PS-Adobe-", "application/postscript"),
    // Byte order marks
    masked(b"\xFF\xFF\x00\x00", b"\xFE\xFF\x00\x00", "text/plain; charset=utf-16be"),
    masked(b"\xFF\xFF\x00\x00", b"\xFF\xFE\x00\x00", "text/plain; charset=utf-16le"),
    masked(b"\xFF\xFF\xFF\x00", b"\xEF\xBB\xBF\x00", TEXT_PLAIN),
    // Images
    exact(b"\x00\x00\x01\x00", "image/x-icon"),
    exact(b"\x00\x00\x02\x00", "image/x-icon"),
    exact(b"BM", "image/bmp"),
    exact(b"GIF87a", "image/gif"),
    exact(b"GIF89a", "image/gif"),
    masked(
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        b"RIFF\x00\x00\x00\x00WEBPVP",
        "image/webp",
    ),
    exact(b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    exact(b"\xFF\xD8\xFF", "image/jpeg"),
    // Audio and video
    masked(
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        b"FORM\x00\x00\x00\x00AIFF",
        "audio/aiff",
    ),
    masked(b"\xFF\xFF\xFF", b"ID3", "audio/mpeg"),
    masked(b"\xFF\xFF\xFF\xFF\xFF", b"OggS\x00", "application/ogg"),
    masked(
        b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF",
        b"MThd\x00\x00\x00\x06",
        "audio/midi",
    ),
    masked(
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        b"RIFF\x00\x00\x00\x00AVI ",
        "video/avi",
    ),
    masked(
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        b"RIFF\x00\x00\x00\x00WAVE",
        "audio/wave",
    ),
    Signature::Mp4,
    exact(b"\x1A\x45\xDF\xA3", "video/webm"),
    // Fonts
    masked(
        b"\xFF\xFF\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\xFF\xFF",
        b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00LP",
        "application/vnd.ms-fontobject",
    ),
    exact(b"\x00\x01\x00\x00", "font/ttf"),
    exact(b"OTTO", "font/otf"),
    exact(b"ttcf", "font/collection"),
    exact(b"wOFF", "font/woff"),
    exact(b"wOF2", "font/woff2"),
    // Archives
    exact(b"\x1F\x8B\x08", "application/x-gzip"),
    exact(b"PK\x03\x04", "application/zip"),
    exact(b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    exact(b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    exact(b"\x00\x61\x73\x6D", "application/wasm"),
    Signature::Text,
];

fn is_ws(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

fn is_tag_terminator(b: u8) -> bool {
    b == b' ' || b == b'>'
}

fn is_binary(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

fn skip_ws(data: &[u8]) -> &[u8] {
    let start = data.iter().position(|&b| !is_ws(b)).unwrap_or(data.len());
    &data[start..]
}

fn match_html(data: &[u8], tag: &[u8]) -> bool {
    let data = skip_ws(data);
    if data.len() < tag.len() + 1 {
        return false;
    }
    let prefix_matches = tag.iter().zip(data).all(|(&t, &d)| {
        if t.is_ascii_uppercase() {
            d & 0xDF == t
        } else {
            d == t
        }
    });
    prefix_matches && is_tag_terminator(data[tag.len()])
}

fn match_masked(data: &[u8], mask: &[u8], pattern: &[u8], skip: bool) -> bool {
    let data = if skip { skip_ws(data) } else { data };
    if mask.len() != pattern.len() || data.len() < pattern.len() {
        return false;
    }
    pattern
        .iter()
        .zip(mask)
        .zip(data)
        .all(|((&p, &m), &d)| d & m == p)
}

fn match_mp4(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if data.len() < box_size || box_size % 4 != 0 || &data[4..8] != b"ftyp" {
        return false;
    }
    // Brands start at offset 8; offset 12 is the minor version.
    (8..box_size)
        .step_by(4)
        .filter(|&st| st != 12)
        .any(|st| st + 3 <= box_size && &data[st..st + 3] == b"mp4")
}

fn match_text(data: &[u8]) -> bool {
    !data.iter().any(|&b| is_binary(b))
}

impl Signature {
    fn content_type(&self, data: &[u8]) -> Option<&'static str> {
        match *self {
            Signature::Html(tag) => match_html(data, tag).then_some(HTML),
            Signature::Masked {
                mask,
                pattern,
                skip_ws,
                content_type,
            } => match_masked(data, mask, pattern, skip_ws).then_some(content_type),
            Signature::Exact(sig, content_type) => data.starts_with(sig).then_some(content_type),
            Signature::Mp4 => match_mp4(data).then_some("video/mp4"),
            Signature::Text => match_text(data).then_some(TEXT_PLAIN),
        }
    }
}

/// Classify a byte prefix. Only the first [`SNIFF_LEN`] bytes are examined.
///
/// Never fails: unrecognized content falls back to `application/octet-stream`.
///
/// ```
/// use captionbot::sniff_content_type;
///
/// assert_eq!(sniff_content_type(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), "image/png");
/// assert_eq!(sniff_content_type(b"\xFF\xD8\xFF\xE0"), "image/jpeg");
/// assert_eq!(sniff_content_type(&[0u8, 1, 2, 3, 4]), "application/octet-stream");
/// ```
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];
    SIGNATURES
        .iter()
        .find_map(|sig| sig.content_type(data))
        .unwrap_or(OCTET_STREAM)
}

/// Detect the MIME type of a file by reading at most its first 512 bytes.
///
/// Files shorter than 512 bytes are sniffed on whatever is available.
///
/// # Errors
///
/// Returns [`CaptionBotError::Io`] if the file cannot be opened or read.
pub async fn detect_content_type(path: impl AsRef<Path>) -> Result<&'static str> {
    let path = path.as_ref();
    let io_err = |source| CaptionBotError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::open(path).await.map_err(io_err)?;
    let mut buf = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut buf)
        .await
        .map_err(io_err)?;

    Ok(sniff_content_type(&buf))
}
