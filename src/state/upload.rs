use std::path::{Path, PathBuf};

use crate::backend::ExtractedUnit;
use crate::error::{AppError, PDF_MIME};
use crate::state::expand::ExpandSet;

/// Map a file extension to the MIME type a browser file picker would report.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("txt") | Some("md") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Clean up a path pasted by a terminal drag and drop: surrounding quotes,
/// `file://` URLs and backslash-escaped spaces.
pub fn normalize_dropped_path(raw: &str) -> PathBuf {
    let mut s = raw.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
        }
    }
    let s = s.strip_prefix("file://").unwrap_or(s);
    PathBuf::from(s.replace("\\ ", " "))
}

/// The single file chosen for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub mime: String,
}

impl FileHandle {
    /// Inspect a path the way the file input would: type first, then the
    /// file itself.
    pub fn inspect(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let mime = mime_for(path);
        if mime != PDF_MIME {
            return Err(AppError::InvalidFileType {
                mime: mime.to_string(),
            });
        }

        let metadata = std::fs::metadata(path).map_err(|_| AppError::FileUnavailable {
            path: path.to_path_buf(),
        })?;
        if !metadata.is_file() {
            return Err(AppError::FileUnavailable {
                path: path.to_path_buf(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
            mime: mime.to_string(),
        })
    }

    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase {
    NoFile,
    FileSelected {
        file: FileHandle,
        processing: bool,
    },
    Processed {
        file: FileHandle,
        units: Vec<ExtractedUnit>,
        expanded: ExpandSet<usize>,
    },
}

/// State of the syllabus upload screen
#[derive(Debug, Clone)]
pub struct UploadState {
    phase: UploadPhase,
    path_input: String,
    unit_cursor: usize,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            phase: UploadPhase::NoFile,
            path_input: String::new(),
            unit_cursor: 0,
        }
    }
}

impl UploadState {
    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn file(&self) -> Option<&FileHandle> {
        match &self.phase {
            UploadPhase::NoFile => None,
            UploadPhase::FileSelected { file, .. } | UploadPhase::Processed { file, .. } => {
                Some(file)
            }
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, UploadPhase::FileSelected { processing: true, .. })
    }

    pub fn units(&self) -> &[ExtractedUnit] {
        match &self.phase {
            UploadPhase::Processed { units, .. } => units,
            _ => &[],
        }
    }

    pub fn is_unit_expanded(&self, index: usize) -> bool {
        match &self.phase {
            UploadPhase::Processed { expanded, .. } => expanded.is_expanded(&index),
            _ => false,
        }
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn handle_input(&mut self, c: char) {
        self.path_input.push(c);
    }

    pub fn backspace(&mut self) {
        self.path_input.pop();
    }

    /// Picker path: take whatever was typed into the path field.
    pub fn choose_typed_path(&mut self) -> Result<(), AppError> {
        let path = normalize_dropped_path(&self.path_input);
        self.choose_path(&path.to_string_lossy())?;
        self.path_input.clear();
        Ok(())
    }

    /// Drop path: a path pasted into the terminal.
    pub fn choose_path(&mut self, raw: &str) -> Result<(), AppError> {
        let file = FileHandle::inspect(normalize_dropped_path(raw))?;
        self.select_file(file)
    }

    /// Replace the current file wholesale. Non-PDF files are rejected and
    /// leave the state untouched.
    pub fn select_file(&mut self, file: FileHandle) -> Result<(), AppError> {
        if file.mime != PDF_MIME {
            tracing::warn!(name = %file.name, mime = %file.mime, "rejected upload");
            return Err(AppError::InvalidFileType { mime: file.mime });
        }
        tracing::info!(name = %file.name, size = file.size, "syllabus selected");
        self.phase = UploadPhase::FileSelected {
            file,
            processing: false,
        };
        self.unit_cursor = 0;
        Ok(())
    }

    /// Start processing the selected file. Only valid once, from an idle
    /// selection.
    pub fn begin_processing(&mut self) -> Option<FileHandle> {
        match &mut self.phase {
            UploadPhase::FileSelected { file, processing } if !*processing => {
                *processing = true;
                Some(file.clone())
            }
            _ => None,
        }
    }

    /// Reveal the extracted units, first one open. Ignored unless processing.
    pub fn finish_processing(&mut self, units: Vec<ExtractedUnit>) -> bool {
        let file = match &self.phase {
            UploadPhase::FileSelected {
                file,
                processing: true,
            } => file.clone(),
            _ => return false,
        };
        self.phase = UploadPhase::Processed {
            file,
            units,
            expanded: ExpandSet::with_open([0]),
        };
        self.unit_cursor = 0;
        true
    }

    /// Back to the selected file after a failed processing call.
    pub fn processing_failed(&mut self) {
        if let UploadPhase::FileSelected { processing, .. } = &mut self.phase {
            *processing = false;
        }
    }

    pub fn cancel(&mut self) {
        self.phase = UploadPhase::NoFile;
        self.path_input.clear();
        self.unit_cursor = 0;
    }

    pub fn unit_cursor(&self) -> usize {
        self.unit_cursor
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let count = self.units().len();
        if count == 0 {
            return;
        }
        self.unit_cursor = if forward {
            (self.unit_cursor + 1).min(count - 1)
        } else {
            self.unit_cursor.saturating_sub(1)
        };
    }

    pub fn toggle_unit(&mut self, index: usize) {
        if let UploadPhase::Processed { expanded, units, .. } = &mut self.phase {
            if index < units.len() {
                expanded.toggle(index);
            }
        }
    }

    pub fn toggle_unit_at_cursor(&mut self) {
        self.toggle_unit(self.unit_cursor);
    }
}
