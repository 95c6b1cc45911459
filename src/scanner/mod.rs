use crate::error::{Result, VistoriaError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Audio,
}

impl MediaKind {
    fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Photo => PHOTO_EXTENSIONS,
            MediaKind::Audio => AUDIO_EXTENSIONS,
        }
    }

    /// 拡張子が対象形式か（大文字小文字を区別しない）
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .map(|ext| self.extensions().iter().any(|&e| e == ext))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl MediaFile {
    fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            file_name,
        }
    }
}

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "ogg", "webm"];

/// フォルダ直下の写真・音声を収集（ファイル名順）
pub fn scan_folder(folder: &Path, kind: MediaKind) -> Result<Vec<MediaFile>> {
    if !folder.exists() {
        return Err(VistoriaError::FolderNotFound(folder.display().to_string()));
    }

    let mut files: Vec<MediaFile> = WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && kind.matches(e.path()))
        .map(|e| MediaFile::from_path(e.path()))
        .collect();

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// 引数のパスを展開（フォルダは中身、ファイルは指定順のまま）
pub fn collect_media(paths: &[PathBuf], kind: MediaKind) -> Result<Vec<MediaFile>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(scan_folder(path, kind)?);
        } else if path.is_file() {
            files.push(MediaFile::from_path(path));
        } else {
            return Err(VistoriaError::FileNotFound(path.display().to_string()));
        }
    }
    Ok(files)
}
