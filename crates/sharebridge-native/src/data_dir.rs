// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop directory resolution for the stub bridge.

use std::path::PathBuf;

/// Root of the user's pictures collection.
///
/// On Android the public Pictures directory comes from the platform instead;
/// this is only used by desktop/CI builds.
pub fn pictures_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_PICTURES_DIR") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join("Pictures");
    }
    // Last resort
    std::env::temp_dir()
}

/// Directory holding staged share files, created if needed.
pub fn share_cache_dir(name: &str) -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(name);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
