//! Moving finished input files to their destination directory

use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Moves `source` into `dest_dir`, returning the new path
///
/// The move is a single `rename`, so the file is never visible in both
/// directories. If the destination already holds a file with the same name,
/// a `_<YYYYMMDDHHMMSS>` suffix (plus a counter if needed) is added before
/// the extension. The destination directory is created if absent.
///
/// # Errors
///
/// Returns the I/O error if the directory cannot be created or the rename
/// fails (for example when `dest_dir` is on another filesystem).
pub fn move_into(source: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;

    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", source.display()),
        )
    })?;

    // Assumes a single writer per destination directory: `rename` replaces
    // an existing target on Unix, so a file created between the existence
    // check and the rename would be overwritten.
    let target = available_path(dest_dir, Path::new(file_name));
    fs::rename(source, &target)?;
    Ok(target)
}

fn available_path(dest_dir: &Path, file_name: &Path) -> PathBuf {
    let candidate = dest_dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file_name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stamp = Local::now().format("%Y%m%d%H%M%S");

    let stamped = dest_dir.join(format!("{stem}_{stamp}{extension}"));
    if !stamped.exists() {
        return stamped;
    }

    let mut counter = 1u32;
    loop {
        let numbered = dest_dir.join(format!("{stem}_{stamp}_{counter}{extension}"));
        if !numbered.exists() {
            return numbered;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_into_creates_destination() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("wells.csv");
        fs::write(&source, "WellId\n").unwrap();

        let dest = dir.path().join("processed");
        let moved = move_into(&source, &dest).unwrap();

        assert_eq!(moved, dest.join("wells.csv"));
        assert!(moved.exists());
        assert!(!source.exists());
    }

    #[test]
    fn test_move_into_name_collision() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("processed");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("wells.csv"), "old").unwrap();

        let source = dir.path().join("wells.csv");
        fs::write(&source, "new").unwrap();

        let moved = move_into(&source, &dest).unwrap();
        assert_ne!(moved, dest.join("wells.csv"));

        let name = moved.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("wells_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(fs::read_to_string(&moved).unwrap(), "new");
        assert_eq!(fs::read_to_string(dest.join("wells.csv")).unwrap(), "old");
    }

    #[test]
    fn test_repeated_collisions_keep_every_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("error");

        let mut moved = Vec::new();
        for content in ["first", "second", "third"] {
            let source = dir.path().join("wells.csv");
            fs::write(&source, content).unwrap();
            moved.push(move_into(&source, &dest).unwrap());
        }

        moved.sort();
        moved.dedup();
        assert_eq!(moved.len(), 3);
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 3);
        assert_eq!(fs::read_to_string(dest.join("wells.csv")).unwrap(), "first");
    }

    #[test]
    fn test_move_into_missing_source() {
        let dir = TempDir::new().unwrap();
        let result = move_into(&dir.path().join("absent.csv"), &dir.path().join("out"));
        assert!(result.is_err());
    }
}
