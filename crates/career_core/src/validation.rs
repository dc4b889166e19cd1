//! Checks performed before any request leaves the client.

use std::fmt;

use crate::{AuthMode, ResumeFile};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;
pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeRejection {
    NotPdf,
    TooLarge,
}

impl fmt::Display for ResumeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeRejection::NotPdf => write!(f, "Please upload a PDF file"),
            ResumeRejection::TooLarge => write!(f, "File size must be less than 10MB"),
        }
    }
}

/// Type is checked before size, so a large non-PDF reports the type.
pub fn validate_resume(file: &ResumeFile) -> Result<(), ResumeRejection> {
    if file.mime_type != PDF_MIME_TYPE {
        return Err(ResumeRejection::NotPdf);
    }
    if file.size_bytes > MAX_RESUME_BYTES {
        return Err(ResumeRejection::TooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRejection {
    MissingField(&'static str),
    PasswordTooShort,
}

impl fmt::Display for FormRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormRejection::MissingField(field) => write!(f, "Please enter your {field}"),
            FormRejection::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            ),
        }
    }
}

pub fn validate_login_form(
    mode: AuthMode,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<(), FormRejection> {
    if mode == AuthMode::Register && full_name.trim().is_empty() {
        return Err(FormRejection::MissingField("full name"));
    }
    if email.trim().is_empty() {
        return Err(FormRejection::MissingField("email"));
    }
    if password.is_empty() {
        return Err(FormRejection::MissingField("password"));
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(FormRejection::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(mime: &str, size: u64) -> ResumeFile {
        ResumeFile {
            path: PathBuf::from("cv.bin"),
            file_name: "cv.bin".to_string(),
            mime_type: mime.to_string(),
            size_bytes: size,
        }
    }

    #[test]
    fn exactly_ten_megabytes_is_accepted() {
        assert_eq!(validate_resume(&file(PDF_MIME_TYPE, MAX_RESUME_BYTES)), Ok(()));
        assert_eq!(
            validate_resume(&file(PDF_MIME_TYPE, MAX_RESUME_BYTES + 1)),
            Err(ResumeRejection::TooLarge)
        );
    }

    #[test]
    fn type_is_reported_before_size() {
        assert_eq!(
            validate_resume(&file("text/plain", MAX_RESUME_BYTES * 2)),
            Err(ResumeRejection::NotPdf)
        );
    }

    #[test]
    fn full_name_only_required_when_registering() {
        assert_eq!(
            validate_login_form(AuthMode::SignIn, "a@b.c", "secret1", ""),
            Ok(())
        );
        assert_eq!(
            validate_login_form(AuthMode::Register, "a@b.c", "secret1", "  "),
            Err(FormRejection::MissingField("full name"))
        );
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            validate_login_form(AuthMode::SignIn, "a@b.c", "12345", ""),
            Err(FormRejection::PasswordTooShort)
        );
    }
}
