//! Image selection to embedded payload.
//!
//! Reads a picked file fully into memory and encodes it as a `data:` URL
//! suitable for the record's `image` field.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ImageResult<T> = Result<T, ImageError>;

#[derive(Debug)]
pub enum ImageError {
    Io { path: PathBuf, source: std::io::Error },
    UnsupportedType(PathBuf),
    Empty(PathBuf),
}

impl Display for ImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read image `{}`: {source}", path.display())
            }
            Self::UnsupportedType(path) => {
                write!(f, "unsupported image type for `{}`", path.display())
            }
            Self::Empty(path) => write!(f, "image file `{}` is empty", path.display()),
        }
    }
}

impl Error for ImageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Returns the mime type implied by the file extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Encodes raw image bytes as a `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Reads `path` into memory and returns it as a `data:` URL.
pub fn load_image_data_url(path: impl AsRef<Path>) -> ImageResult<String> {
    let path = path.as_ref();
    let Some(mime) = mime_for_path(path) else {
        warn!("event=image_load module=image status=error error_code=unsupported_type");
        return Err(ImageError::UnsupportedType(path.to_path_buf()));
    };

    let bytes = std::fs::read(path).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ImageError::Empty(path.to_path_buf()));
    }

    info!(
        "event=image_load module=image status=ok mime={} bytes={}",
        mime,
        bytes.len()
    );
    Ok(encode_data_url(mime, &bytes))
}

/// Maps an empty image selection to "no image".
pub fn normalize_image(value: Option<String>) -> Option<String> {
    value.filter(|image| !image.trim().is_empty())
}
