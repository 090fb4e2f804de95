//! Image intake for dish pictures.
//!
//! Files larger than [`MAX_IMAGE_BYTES`] or without an `image/*` MIME type are
//! refused before anything is encoded. Accepted files become a self-describing
//! `data:<mime>;base64,<payload>` string.

use crate::{
    core::dish::ImageData,
    errors::{ImageError, Result},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;
use tracing::debug;

/// Size ceiling for dish pictures (2 MiB).
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Checks size and MIME type without touching the payload.
///
/// # Errors
/// Returns [`ImageError::TooLarge`] or [`ImageError::NotAnImage`].
pub fn check_image(size: u64, mime: &str) -> std::result::Result<(), ImageError> {
    if !mime.starts_with("image/") {
        return Err(ImageError::NotAnImage {
            mime: mime.to_string(),
        });
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Encodes an in-memory picture after checking it.
///
/// # Errors
/// Returns an [`ImageError`] if the picture is refused.
pub fn encode_image(bytes: &[u8], mime: &str) -> std::result::Result<ImageData, ImageError> {
    check_image(bytes.len() as u64, mime)?;
    Ok(ImageData::Inline(format!(
        "data:{mime};base64,{}",
        STANDARD.encode(bytes)
    )))
}

/// MIME type guessed from a file extension.
#[must_use]
pub fn mime_from_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Reads a picture from disk. The size is checked from metadata before the file
/// is read.
///
/// # Errors
/// Returns an error if the file cannot be read or is refused.
pub async fn read_image_file(path: &Path) -> Result<ImageData> {
    let mime = mime_from_path(path);
    let size = tokio::fs::metadata(path).await?.len();
    check_image(size, &mime)?;

    let bytes = tokio::fs::read(path).await?;
    debug!("Encoded {} byte {} image from {:?}", bytes.len(), mime, path);
    Ok(encode_image(&bytes, &mime)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use std::io::Write;

    #[test]
    fn test_encode_png() {
        let image = encode_image(&[0x89, b'P', b'N', b'G'], "image/png").unwrap();
        assert_eq!(image, ImageData::Inline("data:image/png;base64,iVBORw==".to_string()));
    }

    #[test]
    fn test_rejects_non_image() {
        let result = encode_image(b"%PDF", "application/pdf");
        assert!(matches!(result, Err(ImageError::NotAnImage { .. })));
    }

    #[test]
    fn test_size_ceiling() {
        assert!(check_image(MAX_IMAGE_BYTES, "image/jpeg").is_ok());
        assert_eq!(
            check_image(MAX_IMAGE_BYTES + 1, "image/jpeg"),
            Err(ImageError::TooLarge {
                size: MAX_IMAGE_BYTES + 1,
                limit: MAX_IMAGE_BYTES
            })
        );
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("dosa.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("menu.pdf")), "application/octet-stream");
        assert_eq!(mime_from_path(Path::new("noext")), "application/octet-stream");
        assert_eq!(mime_from_path(Path::new("thali.tiff")), "image/tiff");
    }

    #[tokio::test]
    async fn test_read_image_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tea.png");
        std::fs::File::create(&path)?.write_all(b"abc")?;

        let image = read_image_file(&path).await?;
        assert_eq!(image.as_wire(), "data:image/png;base64,YWJj");

        let scan = dir.path().join("menu-card.tiff");
        std::fs::File::create(&scan)?.write_all(b"II*")?;
        let image = read_image_file(&scan).await?;
        assert!(image.as_wire().starts_with("data:image/tiff;base64,"));

        let bad = dir.path().join("menu.txt");
        std::fs::File::create(&bad)?.write_all(b"abc")?;
        let result = read_image_file(&bad).await;
        assert!(matches!(result, Err(Error::Image(ImageError::NotAnImage { .. }))));
        Ok(())
    }
}
