use std::fs;
use std::io;
use std::path::Path;

use career_core::ResumeFile;

/// MIME type derived from the file extension, the way a browser file picker reports it.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("rtf") => "application/rtf",
        _ => "application/octet-stream",
    }
}

/// Describe a local file for upload without reading its content.
pub fn inspect_resume(path: &Path) -> io::Result<ResumeFile> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    Ok(ResumeFile {
        path: path.to_path_buf(),
        mime_type: mime_for_file_name(&file_name).to_string(),
        file_name,
        size_bytes: meta.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(mime_for_file_name("CV.PDF"), "application/pdf");
        assert_eq!(mime_for_file_name("cv.txt"), "text/plain");
        assert_eq!(mime_for_file_name("resume"), "application/octet-stream");
    }

    #[test]
    fn inspects_size_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        fs::write(&path, b"%PDF-1.4 demo").unwrap();

        let file = inspect_resume(&path).unwrap();
        assert_eq!(file.file_name, "resume.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.size_bytes, 13);
    }

    #[test]
    fn directories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(inspect_resume(dir.path()).is_err());
    }
}
