//! Folder classification of object keys by file extension.
//!
//! A caller-supplied key such as `photo.png` is placed under
//! `<folder>/<YYYY>/<MM>/photo.png`, where the folder is picked from a
//! fixed extension table and defaults to `others`.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Kind of file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// Raster images.
    Image,
    /// Video containers.
    Video,
    /// Audio files.
    Audio,
    /// Office documents and plain text.
    Doc,
    /// Source code.
    Code,
    /// Compressed archives.
    Archive,
    /// Structured configuration files.
    Config,
    /// Font files.
    Font,
    /// Database dumps and files.
    Database,
    /// Installers and binaries.
    Executable,
    /// E-books.
    Ebook,
    /// Everything else.
    Other,
}

const TABLE: &[(FileCategory, &[&str])] = &[
    (FileCategory::Image, &["jpg", "jpeg", "png", "gif", "bmp", "webp"]),
    (
        FileCategory::Video,
        &["mp4", "avi", "mov", "flv", "wmv", "mkv", "rmvb", "rm", "3gp", "f4v"],
    ),
    (
        FileCategory::Audio,
        &["mp3", "wav", "wma", "ogg", "ape", "flac", "aac", "m4a"],
    ),
    (
        FileCategory::Doc,
        &[
            "doc", "docs", "docx", "xls", "xlsx", "xlxs", "csv", "pdf", "txt", "ppt", "pptx",
            "md",
        ],
    ),
    (
        FileCategory::Code,
        &["py", "js", "java", "c", "cpp", "go", "php", "html", "css", "sh"],
    ),
    (FileCategory::Archive, &["zip", "rar", "7z", "tar", "gz", "bz2"]),
    (
        FileCategory::Config,
        &["json", "yml", "yaml", "xml", "ini", "conf"],
    ),
    (FileCategory::Font, &["ttf", "otf", "woff", "woff2"]),
    (
        FileCategory::Database,
        &["sql", "db", "dbf", "mdb", "pdb", "sqlitedb"],
    ),
    (FileCategory::Executable, &["exe", "msi", "apk", "ipa", "dmg"]),
    (
        FileCategory::Ebook,
        &["epub", "mobi", "azw", "azw3", "azw4", "kf8", "kf7"],
    ),
];

impl FileCategory {
    /// Look up the category of an extension (without the dot).
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        TABLE
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map_or(Self::Other, |(category, _)| *category)
    }

    /// Category of an object key, `Other` when it has no extension.
    #[must_use]
    pub fn of_key(key: &str) -> Self {
        extension_of(key).map_or(Self::Other, Self::from_extension)
    }

    /// Top-level folder objects of this category are stored under.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
            Self::Audio => "audios",
            Self::Doc => "docs",
            Self::Code => "codes",
            Self::Archive => "archives",
            Self::Config => "configs",
            Self::Font => "fonts",
            Self::Database => "databases",
            Self::Executable => "executables",
            Self::Ebook => "ebooks",
            Self::Other => "others",
        }
    }
}

/// Text after the final `.` of the last path segment.
#[must_use]
pub fn extension_of(key: &str) -> Option<&str> {
    let name = key.rsplit('/').next().unwrap_or(key);
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// `<folder>/<YYYY>/<MM>/` for the given folder and instant.
#[must_use]
pub fn dated_prefix(folder: &str, now: DateTime<Utc>) -> String {
    format!("{folder}/{:04}/{:02}/", now.year(), now.month())
}

/// Place `key` under its category folder and the current year and month.
#[must_use]
pub fn classified_key(key: &str, now: DateTime<Utc>) -> String {
    let folder = FileCategory::of_key(key).folder();
    format!("{}{}", dated_prefix(folder, now), key.trim_start_matches('/'))
}
