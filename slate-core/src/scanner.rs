use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::card::CardSet;
use crate::content::Page;

#[derive(Debug)]
pub enum ScanError {
    IoError(std::io::Error),
    InvalidPath(PathBuf),
    UnsupportedFormat(PathBuf),
    Json(PathBuf, serde_json::Error),
    Toml(PathBuf, toml::de::Error),
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::IoError(err)
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::IoError(e) => write!(f, "IO error: {}", e),
            ScanError::InvalidPath(p) => write!(f, "Invalid path: {}", p.display()),
            ScanError::UnsupportedFormat(p) => {
                write!(f, "Unsupported content format (expected .json or .toml): {}", p.display())
            }
            ScanError::Json(p, e) => write!(f, "JSON error in {}: {}", p.display(), e),
            ScanError::Toml(p, e) => write!(f, "TOML error in {}: {}", p.display(), e),
        }
    }
}

impl std::error::Error for ScanError {}

/// Pages and card sets read from one or more content files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteContent {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub card_sets: Vec<CardSet>,
}

impl SiteContent {
    pub fn merge(&mut self, other: SiteContent) {
        self.pages.extend(other.pages);
        self.card_sets.extend(other.card_sets);
    }
}

/// Reads a single content file, or every `.json`/`.toml` file under a
/// directory in path order.
pub struct ContentScanner {
    source: PathBuf,
}

impl ContentScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: path.as_ref().to_path_buf(),
        }
    }

    pub fn scan(&self) -> Result<SiteContent, ScanError> {
        tracing::info!(source = %self.source.display(), "Scanning content");

        if self.source.is_file() {
            return parse_content_file(&self.source);
        }
        if !self.source.is_dir() {
            return Err(ScanError::InvalidPath(self.source.clone()));
        }

        let mut content = SiteContent::default();
        for file in get_all_content_files(&self.source) {
            tracing::debug!(file = %file.display(), "Reading content file");
            content.merge(parse_content_file(&file)?);
        }

        Ok(content)
    }
}

pub fn parse_content_file(path: &Path) -> Result<SiteContent, ScanError> {
    let data = std::fs::read_to_string(path)?;

    match get_extension(path).as_str() {
        "json" => serde_json::from_str(&data).map_err(|e| ScanError::Json(path.to_path_buf(), e)),
        "toml" => toml::from_str(&data).map_err(|e| ScanError::Toml(path.to_path_buf(), e)),
        _ => Err(ScanError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn get_all_content_files<P: AsRef<Path>>(path: P) -> Vec<PathBuf> {
    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && matches!(get_extension(e.path()).as_str(), "json" | "toml"))
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn get_extension(path: &Path) -> String {
    match path.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBlock;

    const ABOUT_JSON: &str = r#"{
        "pages": [{
            "id": 2, "title": "About Us", "slug": "/about",
            "content": [{"id": 3, "type": "list", "ordered": false, "items": ["Item 1"]}]
        }]
    }"#;

    const HOME_TOML: &str = r#"
        [[pages]]
        id = 1
        title = "Homepage"
        slug = "/"

        [[pages.content]]
        type = "heading"
        level = 1
        content = "Welcome"

        [[card_sets]]
        page = "/"
        records = [{ name = "The Godfather", year = 1972 }]
    "#;

    #[test]
    fn test_scans_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("site.json");
        std::fs::write(&file, ABOUT_JSON).unwrap();

        let content = ContentScanner::new(&file).scan().unwrap();
        assert_eq!(content.pages.len(), 1);
        assert_eq!(content.pages[0].content[0], ContentBlock::list(false, ["Item 1"]).with_id(3));
    }

    #[test]
    fn test_scans_directory_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-about.json"), ABOUT_JSON).unwrap();
        std::fs::write(dir.path().join("a-home.toml"), HOME_TOML).unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let content = ContentScanner::new(dir.path()).scan().unwrap();
        let slugs: Vec<&str> = content.pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/", "/about"]);
        assert_eq!(content.card_sets.len(), 1);
        assert_eq!(content.card_sets[0].records[0].len(), 2);
    }

    #[test]
    fn test_missing_source_is_invalid_path() {
        let err = ContentScanner::new("/no/such/content").scan().unwrap_err();
        assert!(matches!(err, ScanError::InvalidPath(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("site.yaml");
        std::fs::write(&file, "pages: []").unwrap();

        let err = ContentScanner::new(&file).scan().unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.json");
        std::fs::write(&file, "{ not json").unwrap();

        let err = ContentScanner::new(&file).scan().unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
