mod local_fs;

pub use local_fs::LocalFileStorage;

use crate::errors::ApiError;
use async_trait::async_trait;
use mime::Mime;

/// A flat namespace of files addressed by name.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Stores `bytes` under `file_name`, replacing any previous file.
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ApiError>;
    async fn get(&self, file_name: &str) -> Result<(Vec<u8>, Mime), ApiError>;
    /// Names of every stored file, in backend enumeration order.
    async fn list(&self) -> Result<Vec<String>, ApiError>;
}

fn content_type_for(file_name: &str) -> Mime {
    mime_guess::from_path(file_name).first_or_octet_stream()
}

/// Rejects dotfiles and anything that could escape the flat namespace.
///
/// In-progress uploads live in dotfiles, so they are never addressable.
fn is_plain_file_name(file_name: &str) -> bool {
    !file_name.is_empty() && !file_name.starts_with('.') && !file_name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("abc.jpg"), mime::IMAGE_JPEG);
        assert_eq!(content_type_for("abc.png"), mime::IMAGE_PNG);
        assert_eq!(content_type_for("abc"), mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn plain_file_names() {
        assert!(is_plain_file_name("abc.jpg"));
        assert!(is_plain_file_name("a.b.jpg"));
        assert!(!is_plain_file_name(".hidden"));
        assert!(!is_plain_file_name(".abc.jpg.tmp"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("../secret"));
        assert!(!is_plain_file_name("a\\b"));
    }
}
