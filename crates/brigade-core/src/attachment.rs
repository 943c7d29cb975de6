//! Image attachments for user messages.

use crate::error::CoreError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use brigade_llm::Part;
use brigade_protocol::ImageRef;
use log::debug;
use std::path::Path;

/// An encoded image ready to travel with a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub name: String,
    pub mime_type: String,
    /// Base64 (standard alphabet) encoded bytes.
    pub data: String,
}

impl ImageInput {
    /// Read and encode an image file. The MIME type comes from the
    /// extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let mime_type = mime_type_for(path).ok_or_else(|| {
            CoreError::Attachment(format!(
                "unsupported image type: {} (use png, jpeg, webp, gif or heic)",
                path.display()
            ))
        })?;
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        debug!(
            "loaded image attachment (name={}, mime_type={}, bytes={})",
            name,
            mime_type,
            bytes.len()
        );
        Self::from_bytes(name, mime_type, &bytes)
    }

    /// Encode raw image bytes.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::Attachment("image is empty".to_string()));
        }
        Ok(Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Transcript reference; the encoded bytes are not kept.
    pub fn image_ref(&self) -> ImageRef {
        ImageRef {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
        }
    }

    pub(crate) fn to_part(&self) -> Part {
        Part::inline_data(self.mime_type.clone(), self.data.clone())
    }
}

fn mime_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_and_encodes_file() {
        let temp = TempDir::new().expect("tmp");
        let path = temp.path().join("Invoice.JPG");
        std::fs::write(&path, b"hello").expect("write");

        let image = ImageInput::from_path(&path).await.expect("image");
        assert_eq!(image.name, "Invoice.JPG");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "aGVsbG8=");
        assert_eq!(
            image.image_ref(),
            ImageRef {
                name: "Invoice.JPG".to_string(),
                mime_type: "image/jpeg".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn rejects_unknown_extension() {
        let err = ImageInput::from_path("notes.txt").await.unwrap_err();
        assert!(matches!(err, CoreError::Attachment(_)));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let temp = TempDir::new().expect("tmp");
        let err = ImageInput::from_path(temp.path().join("gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn empty_bytes_are_rejected() {
        assert!(ImageInput::from_bytes("a.png", "image/png", &[]).is_err());
    }
}
