//! Sprite measurements supplied by the asset loader
//!
//! The simulation never touches image files. Whoever loads the art hands over
//! the scaled sizes and opaque-pixel masks here, and the simulation refers back
//! to the art through `ImageRef` when it builds a frame snapshot.

use serde::{Deserialize, Serialize};

use super::mask::Mask;
use crate::Settings;
use crate::consts::GLIDER_FRAMES;

/// Number of pillar art variants
pub const PILLAR_VARIANTS: usize = 4;

/// Which piece of art a renderer should draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImageRef {
    /// Double-wide background tile
    Background,
    /// Double-wide ground strip
    Ground,
    /// Glider animation frame, rotated counter-clockwise by `angle` degrees
    Glider { frame: usize, angle: f32 },
    /// Pillar art, mirrored vertically when hanging from the top
    Pillar { variant: usize, flipped: bool },
    /// Floating stone
    Stone,
}

/// Pre-measured art for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assets {
    /// Size of the background surface (already doubled for wrap-around)
    pub background_size: (u32, u32),
    /// Ground strip mask (already doubled for wrap-around)
    pub ground: Mask,
    /// Glider animation frames at glider scale
    pub glider_frames: [Mask; GLIDER_FRAMES],
    /// Pillar variants at world scale (obstacle scale factor not yet applied)
    pub pillars: [Mask; PILLAR_VARIANTS],
    /// Stone at world scale (stone and obstacle scale not yet applied)
    pub stone: Mask,
    /// Height of the game-over menu image
    pub menu_height: f32,
}

impl Assets {
    /// Placeholder shapes sized for the configured window, for headless runs and tests
    pub fn placeholder(settings: &Settings) -> Self {
        let w = settings.window_width.max(1.0) as u32;
        let h = settings.window_height.max(1.0) as u32;
        let tile_w = w * 6 / 5;

        // Ground is a strip with a bumpy top edge
        let ground_h = (h / 7).max(8);
        let ground = Mask::from_fn(tile_w * 2, ground_h, |x, y| y >= (x / 16) % 3);

        let glider_frames = [
            Mask::ellipse(44, 30),
            Mask::from_fn(44, 30, |x, y| {
                let dx = (x as f32 + 0.5 - 22.0) / 22.0;
                let dy = (y as f32 + 0.5 - 15.0) / 12.0;
                dx * dx + dy * dy <= 1.0 || ((8..30).contains(&x) && y >= 25)
            }),
            Mask::from_fn(44, 30, |x, y| {
                let dx = (x as f32 + 0.5 - 22.0) / 22.0;
                let dy = (y as f32 + 0.5 - 15.0) / 12.0;
                dx * dx + dy * dy <= 1.0 || ((8..30).contains(&x) && y <= 4)
            }),
        ];

        let pillar_h = h * 2 / 5;
        let pillars = [
            Mask::filled(70, pillar_h),
            Mask::filled(76, pillar_h + 40),
            // Tapered spike
            Mask::from_fn(80, pillar_h + 20, move |x, y| {
                let half = 40.0 * y as f32 / (pillar_h + 20) as f32;
                (x as f32 + 0.5 - 40.0).abs() <= half.max(6.0)
            }),
            Mask::filled(64, pillar_h - 30),
        ];

        Self {
            background_size: (tile_w * 2, h),
            ground,
            glider_frames,
            pillars,
            stone: Mask::ellipse(110, 100),
            menu_height: 150.0,
        }
    }

    /// Ground strip dimensions
    pub fn ground_size(&self) -> (u32, u32) {
        self.ground.size()
    }

    /// Pillar mask by variant (out-of-range variants use the last one)
    pub fn pillar(&self, variant: usize) -> &Mask {
        &self.pillars[variant.min(PILLAR_VARIANTS - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_fits_window() {
        let settings = Settings::default();
        let assets = Assets::placeholder(&settings);
        assert_eq!(assets.background_size.1, 800);
        // Doubled tiles are wider than the window so wrap is seamless
        assert!(assets.background_size.0 as f32 >= 2.0 * settings.window_width);
        assert!(assets.ground.width() as f32 >= 2.0 * settings.window_width);
        assert!(assets.glider_frames.iter().all(|f| f.count() > 0));
    }

    #[test]
    fn test_pillar_variant_clamped() {
        let assets = Assets::placeholder(&Settings::default());
        assert_eq!(assets.pillar(99), &assets.pillars[PILLAR_VARIANTS - 1]);
    }
}
