// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filesystem gallery store.
//
// Writes straight into `<pictures>/<album>/` and optionally asks a
// `MediaScanner` to index the new file. This is the pre-Android-10 path
// (public Pictures directory plus a scan broadcast) and the desktop path.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use sharebridge_core::error::Result;
use tracing::{info, instrument, warn};

use crate::traits::{GalleryStore, MediaScanner};

pub struct DirectoryGallery {
    album_dir: PathBuf,
    scanner: Option<Arc<dyn MediaScanner>>,
}

impl DirectoryGallery {
    /// Store files in `pictures_root/album`.
    pub fn new(pictures_root: impl Into<PathBuf>, album: &str) -> Self {
        Self {
            album_dir: pictures_root.into().join(album),
            scanner: None,
        }
    }

    /// Notify `scanner` after every write.
    pub fn with_scanner(mut self, scanner: Arc<dyn MediaScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    pub fn album_dir(&self) -> &std::path::Path {
        &self.album_dir
    }
}

impl GalleryStore for DirectoryGallery {
    #[instrument(skip(self, png), fields(bytes = png.len(), dir = %self.album_dir.display()))]
    fn persist_png(&self, png: &[u8], file_name: &str) -> Result<String> {
        std::fs::create_dir_all(&self.album_dir)?;
        let path = self.album_dir.join(file_name);
        // Never replace an image already in the album.
        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(png)?;
        file.sync_all()?;

        // The file is already saved; a failed scan only delays it showing up.
        if let Some(scanner) = &self.scanner {
            if let Err(e) = scanner.scan_file(&path) {
                warn!(path = %path.display(), error = %e, "media scan request failed");
            }
        }

        info!(path = %path.display(), "image written to gallery directory");
        Ok(path.to_string_lossy().into_owned())
    }

    fn strategy(&self) -> &'static str {
        "directory"
    }
}

/// A gallery entry that exists before its bytes are written, such as a
/// MediaStore row inserted as pending.
pub trait PendingEntry {
    fn write(&mut self, png: &[u8]) -> Result<()>;
    /// Make the finished entry visible.
    fn publish(&mut self) -> Result<()>;
    /// Remove the entry after a failed write or publish.
    fn discard(&mut self) -> Result<()>;
}

/// Write and publish `entry`, discarding it if either step fails. The
/// returned error is always the one from the failed step.
pub fn commit_entry(entry: &mut impl PendingEntry, png: &[u8]) -> Result<()> {
    let outcome = entry.write(png).and_then(|()| entry.publish());
    if outcome.is_err() {
        if let Err(e) = entry.discard() {
            warn!(error = %e, "could not remove unfinished gallery entry");
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use sharebridge_core::ShareError;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingScanner {
        scanned: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl MediaScanner for RecordingScanner {
        fn scan_file(&self, path: &Path) -> Result<()> {
            self.scanned.lock().push(path.to_path_buf());
            if self.fail {
                return Err(ShareError::Platform("broadcast refused".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn creates_album_and_returns_absolute_path() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), "Album");

        let locator = gallery.persist_png(b"png-bytes", "a_1.png").unwrap();

        let expected = gallery.album_dir().join("a_1.png");
        assert_eq!(gallery.album_dir(), root.path().join("Album"));
        assert_eq!(locator, expected.to_string_lossy());
        assert_eq!(std::fs::read(&expected).unwrap(), b"png-bytes");
    }

    #[test]
    fn notifies_scanner_with_written_path() {
        let root = tempfile::tempdir().unwrap();
        let scanner = Arc::new(RecordingScanner::default());
        let gallery = DirectoryGallery::new(root.path(), "Album").with_scanner(scanner.clone());

        gallery.persist_png(b"x", "b.png").unwrap();

        assert_eq!(
            scanner.scanned.lock().as_slice(),
            &[root.path().join("Album").join("b.png")]
        );
    }

    #[test]
    fn scanner_failure_does_not_fail_the_save() {
        let root = tempfile::tempdir().unwrap();
        let scanner = Arc::new(RecordingScanner {
            fail: true,
            ..Default::default()
        });
        let gallery = DirectoryGallery::new(root.path(), "Album").with_scanner(scanner);

        assert!(gallery.persist_png(b"x", "c.png").is_ok());
    }

    #[test]
    fn existing_file_is_never_overwritten() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), "Album");
        gallery.persist_png(b"first", "same.png").unwrap();

        let err = gallery.persist_png(b"second", "same.png").unwrap_err();
        assert!(matches!(
            err,
            ShareError::Io(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists
        ));
        let kept = std::fs::read(gallery.album_dir().join("same.png")).unwrap();
        assert_eq!(kept, b"first");
    }

    #[derive(Default)]
    struct ScriptedEntry {
        fail_write: bool,
        fail_publish: bool,
        steps: Vec<&'static str>,
    }

    impl PendingEntry for ScriptedEntry {
        fn write(&mut self, _png: &[u8]) -> Result<()> {
            self.steps.push("write");
            if self.fail_write {
                return Err(ShareError::Platform("disk full".into()));
            }
            Ok(())
        }

        fn publish(&mut self) -> Result<()> {
            self.steps.push("publish");
            if self.fail_publish {
                return Err(ShareError::Platform("update refused".into()));
            }
            Ok(())
        }

        fn discard(&mut self) -> Result<()> {
            self.steps.push("discard");
            Ok(())
        }
    }

    #[test]
    fn committed_entry_is_published_and_kept() {
        let mut entry = ScriptedEntry::default();
        commit_entry(&mut entry, b"png").unwrap();
        assert_eq!(entry.steps, ["write", "publish"]);
    }

    #[test]
    fn failed_write_discards_the_entry() {
        let mut entry = ScriptedEntry {
            fail_write: true,
            ..Default::default()
        };
        let err = commit_entry(&mut entry, b"png").unwrap_err();
        assert!(matches!(err, ShareError::Platform(ref m) if m == "disk full"));
        assert_eq!(entry.steps, ["write", "discard"]);
    }

    #[test]
    fn failed_publish_discards_the_entry() {
        let mut entry = ScriptedEntry {
            fail_publish: true,
            ..Default::default()
        };
        assert!(commit_entry(&mut entry, b"png").is_err());
        assert_eq!(entry.steps, ["write", "publish", "discard"]);
    }
}
