//! Image reference resolution.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ImageRef;

/// Resolve a referenced path against an optional base directory.
pub fn resolve_path(raw: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(raw);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

/// Read the intrinsic pixel size of an image file.
///
/// Fails with [`Error::ImageNotFound`] when no regular file exists at
/// `path`, and with [`Error::ImageDecode`] when the header is unreadable.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    if !path.is_file() {
        return Err(Error::ImageNotFound(path.to_path_buf()));
    }
    Ok(image::image_dimensions(path)?)
}

/// Build an [`ImageRef`] for a file, scaled to `max_width`.
pub fn load_image_ref(path: PathBuf, alt_text: &str, max_width: f32) -> Result<ImageRef> {
    let (width, height) = probe_dimensions(&path)?;
    log::debug!(
        "Resolved image {} ({}x{} px)",
        path.display(),
        width,
        height
    );
    Ok(ImageRef::new(path, alt_text, width, height).fit_to_width(max_width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_path("figures/erd.png", Some(Path::new("/report")));
        assert_eq!(resolved, PathBuf::from("/report/figures/erd.png"));

        let unchanged = resolve_path("figures/erd.png", None);
        assert_eq!(unchanged, PathBuf::from("figures/erd.png"));
    }

    #[test]
    fn test_resolve_absolute_path_ignores_base() {
        let resolved = resolve_path("/abs/erd.png", Some(Path::new("/report")));
        assert_eq!(resolved, PathBuf::from("/abs/erd.png"));
    }

    #[test]
    fn test_probe_missing_file() {
        let result = probe_dimensions(Path::new("does/not/exist.png"));
        assert!(matches!(result, Err(Error::ImageNotFound(_))));
    }

    #[test]
    fn test_probe_directory_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let result = probe_dimensions(dir.path());
        assert!(matches!(result, Err(Error::ImageNotFound(_))));
    }

    #[test]
    fn test_load_image_ref_scales() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbImage::from_pixel(1000, 250, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let img = load_image_ref(path, "Wide", 500.0).unwrap();
        assert_eq!(img.pixel_width, 1000);
        assert_eq!(img.width, 500.0);
        assert_eq!(img.height, 125.0);
    }

    #[test]
    fn test_load_image_ref_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        let result = load_image_ref(path, "", 504.0);
        assert!(result.is_err());
        assert!(!matches!(result, Err(Error::ImageNotFound(_))));
    }
}
