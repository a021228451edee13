use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::models::Digest;
use super::render::render_markdown;
use crate::Result;

pub const DIGEST_PREFIX: &str = "digest-";
pub const DIGEST_SUFFIX: &str = ".md";

/// `digest-YYYYMMDD.md`
pub fn digest_file_name(date: NaiveDate) -> String {
    format!("{}{}{}", DIGEST_PREFIX, date.format("%Y%m%d"), DIGEST_SUFFIX)
}

impl Digest {
    /// Render and write the digest into `dir`, creating it if needed
    pub fn write_to(&self, dir: &Path, title: &str, window_hours: u32) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(digest_file_name(self.date()));
        std::fs::write(&path, render_markdown(self, title, window_hours))?;
        tracing::info!(path = %path.display(), items = self.len(), "Wrote digest");
        Ok(path)
    }
}

/// The lexicographically-last `digest-*.md` in `dir`, which with the dated
/// naming scheme is the most recent one.
pub fn find_latest_digest(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut latest: Option<(String, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(DIGEST_PREFIX) || !name.ends_with(DIGEST_SUFFIX) {
            continue;
        }
        if latest.as_ref().map(|(best, _)| name > *best).unwrap_or(true) {
            latest = Some((name, entry.path()));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestItem;

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(digest_file_name(date), "digest-20260105.md");
    }

    #[test]
    fn test_write_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let digest = Digest::new(
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            vec![DigestItem {
                source: "A".to_string(),
                title: "T".to_string(),
                link: "https://a.example.com".to_string(),
                summary: None,
            }],
        );

        let path = digest.write_to(&dir, "AI 每日快讯", 24).unwrap();
        assert_eq!(path, dir.join("digest-20261018.md"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("[T](<https://a.example.com>)"));
    }

    #[test]
    fn test_find_latest() {
        let tmp = tempfile::tempdir().unwrap();
        for name in [
            "digest-20261016.md",
            "digest-20261018.md",
            "digest-20261017.md",
            "notes.md",
            "digest-20261019.txt",
        ] {
            std::fs::write(tmp.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(tmp.path().join("digest-20991231.md")).unwrap();

        let latest = find_latest_digest(tmp.path()).unwrap().unwrap();
        assert_eq!(latest, tmp.path().join("digest-20261018.md"));
    }

    #[test]
    fn test_find_latest_empty_or_missing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("readme.md"), "x").unwrap();
        assert_eq!(find_latest_digest(tmp.path()).unwrap(), None);
        assert_eq!(find_latest_digest(&tmp.path().join("absent")).unwrap(), None);
    }
}
