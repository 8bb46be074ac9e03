use std::path::PathBuf;

use thiserror::Error;

use crate::state::notification::Notification;

pub const PDF_MIME: &str = "application/pdf";

/// Failures a screen can surface to the user.
///
/// Only the file-related kinds are produced today. The remaining kinds are the
/// contract the backend collaborators report through once they talk to a real
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("expected application/pdf, got {mime}")]
    InvalidFileType { mime: String },

    #[error("cannot read {}", .path.display())]
    FileUnavailable { path: PathBuf },

    #[error("network request failed: {0}")]
    Network(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("could not parse document: {0}")]
    Parse(String),
}

impl AppError {
    /// The toast shown for this error.
    pub fn notification(&self) -> Notification {
        match self {
            AppError::InvalidFileType { .. } => {
                Notification::destructive("Invalid file type", "Please upload a PDF file.")
            }
            AppError::FileUnavailable { path } => Notification::destructive(
                "File not found",
                format!("Could not open {}.", path.display()),
            ),
            AppError::Network(detail) => Notification::destructive("Network error", detail.clone()),
            AppError::Authentication(detail) => {
                Notification::destructive("Authentication failed", detail.clone())
            }
            AppError::Parse(detail) => {
                Notification::destructive("Could not read syllabus", detail.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::notification::NotificationKind;

    #[test]
    fn test_invalid_file_type_notification() {
        let err = AppError::InvalidFileType {
            mime: "text/plain".to_string(),
        };
        let toast = err.notification();
        assert_eq!(toast.title, "Invalid file type");
        assert_eq!(toast.description, "Please upload a PDF file.");
        assert_eq!(toast.kind, NotificationKind::Destructive);
        assert!(err.to_string().contains("text/plain"));
    }

    #[test]
    fn test_every_kind_maps_to_destructive_toast() {
        let errors = [
            AppError::FileUnavailable {
                path: PathBuf::from("/missing.pdf"),
            },
            AppError::Network("timed out".to_string()),
            AppError::Authentication("bad password".to_string()),
            AppError::Parse("no units found".to_string()),
        ];
        for err in errors {
            assert_eq!(err.notification().kind, NotificationKind::Destructive);
        }
    }
}
