//! Texture set loading for the hero scene.
//!
//! Loading is all-or-nothing: the set resolves only when every image has
//! decoded and uploaded; the first failure aborts startup with an error
//! naming the offending path. No partial scene is ever constructed from a
//! partially-loaded set.

use std::path::Path;

use image::RgbaImage;

use crate::error::PlumeError;
use crate::gpu::{GpuTexture, RenderContext};

/// File names of the three hero textures, relative to the asset directory.
pub const DISH_BASE_FILE: &str = "hero_plate.png";
/// Shadow quad texture file name.
pub const DISH_SHADOW_FILE: &str = "hero_shadow.png";
/// Steam point-sprite texture file name.
pub const STEAM_FILE: &str = "hero_steam.jpg";

/// The three decoded-and-uploaded textures the scene is built from.
///
/// Immutable once loaded; owned by the scene for the session's lifetime.
pub struct TextureSet {
    /// Plate quad texture (alpha-cut dish photograph).
    pub dish_base: GpuTexture,
    /// Soft shadow rendered behind and below the plate.
    pub dish_shadow: GpuTexture,
    /// Grayscale wisp sprite sampled by the steam shader.
    pub steam: GpuTexture,
}

impl TextureSet {
    /// Load all three hero textures from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PlumeError::AssetLoad`] carrying the first failing path.
    pub fn load(
        context: &RenderContext,
        dir: &Path,
    ) -> Result<Self, PlumeError> {
        let dish_base = load_texture(context, &dir.join(DISH_BASE_FILE))?;
        let dish_shadow = load_texture(context, &dir.join(DISH_SHADOW_FILE))?;
        let steam = load_texture(context, &dir.join(STEAM_FILE))?;
        log::info!("texture set loaded from {}", dir.display());

        Ok(Self {
            dish_base,
            dish_shadow,
            steam,
        })
    }
}

fn load_texture(
    context: &RenderContext,
    path: &Path,
) -> Result<GpuTexture, PlumeError> {
    let image = decode_rgba(path)?;
    let label = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("texture");
    Ok(GpuTexture::from_image(
        &context.device,
        &context.queue,
        &image,
        label,
    ))
}

/// Decode an image file to RGBA8.
///
/// Split from GPU upload so the failure path is testable without a device.
///
/// # Errors
///
/// Returns [`PlumeError::AssetLoad`] if the file cannot be read or decoded.
pub fn decode_rgba(path: &Path) -> Result<RgbaImage, PlumeError> {
    let decoded = image::open(path).map_err(|e| PlumeError::AssetLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(decoded.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_with_the_path() {
        let path = Path::new("definitely/not/here/hero_plate.png");
        let err = decode_rgba(path).unwrap_err();
        match err {
            PlumeError::AssetLoad { path, .. } => {
                assert!(path.ends_with("hero_plate.png"));
            }
            other => panic!("expected AssetLoad, got {other:?}"),
        }
    }

    #[test]
    fn valid_image_decodes_to_rgba() {
        let dir = std::env::temp_dir();
        let path = dir.join("plume_test_2x2.png");
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([200, 40, 10, 255]));
        img.save(&path).unwrap();

        let decoded = decode_rgba(&path).unwrap();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [200, 40, 10, 255]);

        std::fs::remove_file(&path).ok();
    }
}
