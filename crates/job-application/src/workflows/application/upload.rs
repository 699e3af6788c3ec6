use std::path::Path;

use super::domain::ResumeFile;

/// Extensions the resume picker offers.
pub const ACCEPTED_RESUME_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "rtf"];

/// Value for the file input's `accept` attribute.
pub const RESUME_ACCEPT_ATTRIBUTE: &str = ".pdf,.doc,.docx,.txt,.rtf";

/// Largest resume recorded; bigger files are skipped.
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

/// Reasons an uploaded resume is not recorded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejected {
    #[error("resume '{file_name}' has no file extension")]
    MissingExtension { file_name: String },
    #[error("resume '{file_name}' is not one of pdf, doc, docx, txt, rtf")]
    UnsupportedType { file_name: String },
    #[error("resume '{file_name}' is {size_bytes} bytes, over the 10 MiB limit")]
    TooLarge { file_name: String, size_bytes: u64 },
}

/// Turn an uploaded file into resume metadata.
///
/// An empty file name means the picker was left untouched and yields `Ok(None)`.
pub fn accept_resume(
    file_name: &str,
    size_bytes: u64,
) -> Result<Option<ResumeFile>, UploadRejected> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Ok(None);
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| UploadRejected::MissingExtension {
            file_name: file_name.to_string(),
        })?;

    if !ACCEPTED_RESUME_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadRejected::UnsupportedType {
            file_name: file_name.to_string(),
        });
    }

    if size_bytes > MAX_RESUME_BYTES {
        return Err(UploadRejected::TooLarge {
            file_name: file_name.to_string(),
            size_bytes,
        });
    }

    let guessed: Option<mime::Mime> = mime_guess::from_ext(&extension).first();
    let content_type = guessed.map(|mime| mime.essence_str().to_string());

    Ok(Some(ResumeFile {
        name: file_name.to_string(),
        size_bytes,
        content_type,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_listed_extensions_case_insensitively() {
        let resume = accept_resume("Jane_Doe_CV.PDF", 48_213)
            .expect("pdf accepted")
            .expect("file recorded");
        assert_eq!(resume.name, "Jane_Doe_CV.PDF");
        assert_eq!(resume.size_bytes, 48_213);
        assert_eq!(resume.content_type.as_deref(), Some("application/pdf"));

        for name in ["cv.doc", "cv.docx", "cv.txt", "cv.rtf"] {
            assert!(accept_resume(name, 1).expect("accepted").is_some(), "{name}");
        }
    }

    #[test]
    fn empty_picker_records_nothing() {
        assert_eq!(accept_resume("", 0), Ok(None));
        assert_eq!(accept_resume("   ", 0), Ok(None));
    }

    #[test]
    fn rejects_other_types() {
        assert!(matches!(
            accept_resume("portrait.png", 10),
            Err(UploadRejected::UnsupportedType { .. })
        ));
        assert!(matches!(
            accept_resume("README", 10),
            Err(UploadRejected::MissingExtension { .. })
        ));
    }

    #[test]
    fn rejects_files_over_the_size_limit() {
        assert!(accept_resume("cv.pdf", MAX_RESUME_BYTES)
            .expect("at the limit")
            .is_some());
        assert_eq!(
            accept_resume("cv.pdf", MAX_RESUME_BYTES + 1),
            Err(UploadRejected::TooLarge {
                file_name: "cv.pdf".to_string(),
                size_bytes: MAX_RESUME_BYTES + 1,
            })
        );
    }
}
