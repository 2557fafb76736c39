use crate::error::Result;
use bytes::Bytes;
use std::fmt;
use std::path::Path;

/// A file picked or dropped by the user.
///
/// The MIME type is whatever the source declared for the file. For files read
/// from disk it is guessed from the extension; the bytes are never sniffed.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: Bytes::from(data),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path).first_or_octet_stream();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!(
            "Loaded {} ({} bytes, declared as {})",
            name,
            data.len(),
            mime_type
        );

        Ok(Self::new(name, mime_type.essence_str(), data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}

// Payloads can be hundreds of megabytes; keep them out of debug output.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_video_detection() {
        assert!(SelectedFile::new("a.mp4", "video/mp4", vec![]).is_video());
        assert!(SelectedFile::new("a.webm", "video/webm", vec![]).is_video());
        assert!(!SelectedFile::new("a.png", "image/png", vec![]).is_video());
        assert!(!SelectedFile::new("a", "", vec![]).is_video());
        // prefix match only, no normalisation
        assert!(!SelectedFile::new("a", "Video/mp4", vec![]).is_video());
    }

    #[test]
    fn test_clone_shares_payload() {
        let file = SelectedFile::new("a.mp4", "video/mp4", vec![9; 1024]);
        let copy = file.clone();
        assert_eq!(file.data.as_ptr(), copy.data.as_ptr());
    }

    #[tokio::test]
    async fn test_from_path_uses_extension() {
        let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        file.write_all(b"not really a video").unwrap();

        let selected = SelectedFile::from_path(file.path()).await.unwrap();
        assert_eq!(selected.mime_type, "video/mp4");
        assert_eq!(selected.size(), 18);
        assert!(selected.name.ends_with(".mp4"));
    }

    #[tokio::test]
    async fn test_from_path_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".zzq").tempfile().unwrap();
        let selected = SelectedFile::from_path(file.path()).await.unwrap();
        assert_eq!(selected.mime_type, "application/octet-stream");
        assert!(!selected.is_video());
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = SelectedFile::from_path("/definitely/not/here.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::GuideError::Io(_)));
    }
}
