use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;

/// Recursively list the files under `root` whose extension names a known
/// image format.
///
/// The result preserves directory-entry order, so it is deterministic within
/// a run but not sorted. A missing or unreadable `root` is an error; a
/// directory without any images yields an empty list, which callers must
/// treat as "nothing to analyse".
pub fn find_images(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    collect_images(root, &mut images)?;
    Ok(images)
}

fn collect_images(dir: &Path, images: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_images(&path, images)?;
        } else if is_image(&path) {
            images.push(path);
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn finds_images_recursively() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("notes.txt"));
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("b.jpg"));

        let mut found = find_images(dir.path()).unwrap();
        found.sort();
        assert_eq!(found, vec![dir.path().join("a.png"), sub.join("b.jpg")]);
    }

    #[test]
    fn non_image_extensions_yield_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("data.csv"));
        touch(&dir.path().join("readme.md"));

        assert!(find_images(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(find_images(&gone).is_err());
    }

    #[test]
    fn scan_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["one.png", "two.tiff", "three.bmp"] {
            touch(&dir.path().join(name));
        }
        let first = find_images(dir.path()).unwrap();
        let second = find_images(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
