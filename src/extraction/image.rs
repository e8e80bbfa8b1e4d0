use crate::error::{PathfinderError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Bitmap types the extraction service accepts
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/heic",
    "image/heif",
];

/// Raw image bytes as uploaded by the shopper
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    bytes: Vec<u8>,
    mime_type: String,
}

/// Image ready to be sent to the extraction service
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Base64 (standard alphabet) of the original bytes
    pub data: String,
}

impl ImageInput {
    /// Validate an upload.
    ///
    /// When the declared type is missing or generic the type is sniffed from
    /// the leading bytes.
    pub fn new(bytes: Vec<u8>, declared_type: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(PathfinderError::Validation("Image is required".to_string()));
        }

        let declared = declared_type
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty() && t != "application/octet-stream");

        let mime_type = match declared {
            Some(t) => normalize_mime(&t),
            None => sniff_mime(&bytes)
                .ok_or_else(|| {
                    PathfinderError::Validation("Unrecognized image format".to_string())
                })?
                .to_string(),
        };

        if !SUPPORTED_IMAGE_TYPES.contains(&mime_type.as_str()) {
            return Err(PathfinderError::Validation(format!(
                "Unsupported image type: {}",
                mime_type
            )));
        }

        Ok(ImageInput { bytes, mime_type })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hand back the validated bytes and MIME type
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.mime_type)
    }

    /// Encode for transmission. Consumes the input so the raw buffer is
    /// released as soon as the encoded copy exists.
    pub fn encode(self) -> EncodedImage {
        let data = STANDARD.encode(&self.bytes);
        EncodedImage {
            mime_type: self.mime_type,
            data,
        }
    }
}

impl EncodedImage {
    /// `data:` URL form used by chat-style APIs
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

fn normalize_mime(mime: &str) -> String {
    // Drop parameters such as "; charset=binary"
    let base = mime.split(';').next().unwrap_or(mime).trim();
    match base {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        other => other.to_string(),
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
