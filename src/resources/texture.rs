use image::{DynamicImage, Rgba, RgbaImage};

use crate::{data_structures::texture::Texture, resources::load_binary};

/// Edge length of the generated fallback sprite.
pub const FALLBACK_SPRITE_SIZE: u32 = 32;

/// A soft four-pointed cross on a transparent background, the shape of the
/// star sprite.
pub fn cross_sprite(size: u32) -> RgbaImage {
    let size = size.max(3);
    let center = (size - 1) as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = (x as f32 - center).abs() / center;
        let dy = (y as f32 - center).abs() / center;
        // arms are one pixel wide and fade towards the edges
        let horizontal = if (y as f32 - center).abs() <= 0.5 { 1.0 - dx } else { 0.0 };
        let vertical = if (x as f32 - center).abs() <= 0.5 { 1.0 - dy } else { 0.0 };
        let core = (1.0 - (dx * dx + dy * dy).sqrt() * 4.0).max(0.0);
        let alpha = horizontal.max(vertical).max(core).clamp(0.0, 1.0);
        Rgba([255, 255, 255, (alpha * 255.0).round() as u8])
    })
}

/// Load the star sprite, or generate one when the file is missing or broken.
pub async fn load_sprite(device: &wgpu::Device, queue: &wgpu::Queue, file_name: &str) -> Texture {
    let loaded = match load_binary(file_name).await {
        Ok(bytes) => Texture::from_bytes(device, queue, &bytes, file_name),
        Err(e) => Err(e),
    };
    loaded.unwrap_or_else(|e| {
        log::warn!("star sprite {} unavailable ({}), using a generated cross", file_name, e);
        let img = DynamicImage::ImageRgba8(cross_sprite(FALLBACK_SPRITE_SIZE));
        Texture::from_image(device, queue, &img, Some("generated_cross_sprite"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_is_opaque_in_the_middle_and_clear_in_the_corners() {
        let sprite = cross_sprite(33);
        assert_eq!(sprite.get_pixel(16, 16)[3], 255);
        assert_eq!(sprite.get_pixel(0, 0)[3], 0);
        assert_eq!(sprite.get_pixel(32, 32)[3], 0);
        assert!(sprite.get_pixel(8, 16)[3] > 0);
        assert_eq!(sprite.get_pixel(8, 16), sprite.get_pixel(16, 8));
    }

    #[test]
    fn shipped_sprite_matches_the_generated_cross() {
        let default = crate::config::SceneConfig::default().stars.sprite;
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join(&default);
        let bytes = std::fs::read(&path).unwrap();
        let shipped = image::load_from_memory(&bytes).unwrap().to_rgba8();

        let generated = cross_sprite(FALLBACK_SPRITE_SIZE);
        assert_eq!(shipped.dimensions(), generated.dimensions());
        for (a, b) in shipped.pixels().zip(generated.pixels()) {
            assert_eq!(a.0[..3], b.0[..3]);
            assert!(a[3].abs_diff(b[3]) <= 1, "{:?} vs {:?}", a, b);
        }
    }
}
