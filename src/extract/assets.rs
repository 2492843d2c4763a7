//! Asset collection
//!
//! Gathers every downloaded image/PDF file from the mirror into one flat
//! asset directory, renaming on basename collision.

use std::path::{Path, PathBuf};

/// File extensions treated as collectable assets (matched case-insensitively)
pub const ASSET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "pdf"];

/// Copies all asset files found under `pages_root` into `assets_root`
///
/// The destination directory is created if absent. When two assets share a
/// basename, later copies get `_1`, `_2`, ... appended before the extension.
///
/// # Returns
///
/// The number of files copied.
pub fn collect_assets(pages_root: &Path, assets_root: &Path) -> std::io::Result<usize> {
    std::fs::create_dir_all(assets_root)?;

    let mut copied = 0;
    let mut pending = vec![pages_root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if is_asset(&path) {
                let dest = unique_destination(assets_root, &path);
                std::fs::copy(&path, &dest)?;
                tracing::debug!("collected {} -> {}", path.display(), dest.display());
                copied += 1;
            }
        }
    }

    Ok(copied)
}

fn is_asset(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Picks a non-colliding destination path for a source file
fn unique_destination(assets_root: &Path, source: &Path) -> PathBuf {
    let file_name = source.file_name().unwrap_or_default();
    let direct = assets_root.join(file_name);
    if !direct.exists() {
        return direct;
    }

    let stem = source
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let extension = source.extension().map(|e| e.to_string_lossy().into_owned());

    let mut counter = 1;
    loop {
        let candidate = match &extension {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let dest = assets_root.join(candidate);
        if !dest.exists() {
            return dest;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collects_assets_recursively() {
        let mirror = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();

        write(&mirror.path().join("img/a.png"), "a");
        write(&mirror.path().join("products/widget/photo.jpg"), "p");
        write(&mirror.path().join("index.html"), "<html></html>");

        let copied = collect_assets(mirror.path(), assets.path()).unwrap();

        assert_eq!(copied, 2);
        assert!(assets.path().join("a.png").exists());
        assert!(assets.path().join("photo.jpg").exists());
        assert!(!assets.path().join("index.html").exists());
    }

    #[test]
    fn test_collision_appends_counter() {
        let mirror = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();

        write(&mirror.path().join("one/logo.png"), "first");
        write(&mirror.path().join("two/logo.png"), "second");
        write(&mirror.path().join("three/logo.png"), "third");

        let copied = collect_assets(mirror.path(), assets.path()).unwrap();

        assert_eq!(copied, 3);
        assert!(assets.path().join("logo.png").exists());
        assert!(assets.path().join("logo_1.png").exists());
        assert!(assets.path().join("logo_2.png").exists());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let mirror = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();

        write(&mirror.path().join("scan.PDF"), "pdf");
        write(&mirror.path().join("photo.JPg"), "jpg");

        let copied = collect_assets(mirror.path(), assets.path()).unwrap();
        assert_eq!(copied, 2);
    }

    #[test]
    fn test_non_assets_are_left_behind() {
        let mirror = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();

        write(&mirror.path().join("style.css"), "css");
        write(&mirror.path().join("page.html"), "html");
        write(&mirror.path().join("noext"), "raw");

        let copied = collect_assets(mirror.path(), assets.path()).unwrap();
        assert_eq!(copied, 0);
    }
}
