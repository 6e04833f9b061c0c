//! Company letter attachment.
//!
//! Only the filename is kept. The same extension check applies whether the
//! file came from the picker or was dropped onto the form, and the type is
//! judged by extension alone.

use std::fmt;
use std::path::Path;

use mime::Mime;
use serde::{Deserialize, Serialize};

/// How the user supplied the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentSource {
    Picker,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentRejected {
    EmptyName,
    UnsupportedType { filename: String },
}

impl fmt::Display for AttachmentRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentRejected::EmptyName => f.write_str("no file selected"),
            AttachmentRejected::UnsupportedType { filename } => {
                write!(f, "{filename} is not a PDF, JPEG or PNG file")
            }
        }
    }
}

impl std::error::Error for AttachmentRejected {}

fn accepted(m: &Mime) -> bool {
    *m == mime::APPLICATION_PDF || *m == mime::IMAGE_JPEG || *m == mime::IMAGE_PNG
}

/// Returns the trimmed bare filename if its extension is pdf, jpeg/jpg or png.
///
/// Any directory part is dropped so only the name itself is retained.
pub fn check_letter(filename: &str) -> Result<String, AttachmentRejected> {
    let name = Path::new(filename.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if name.is_empty() {
        return Err(AttachmentRejected::EmptyName);
    }
    match mime_guess::from_path(&name).first() {
        Some(m) if accepted(&m) => Ok(name),
        _ => Err(AttachmentRejected::UnsupportedType { filename: name }),
    }
}
