//! Pixel-precise collision shapes
//!
//! A `Mask` records which pixels of a sprite are opaque. Two masks collide when
//! any opaque pixel of one lands on an opaque pixel of the other, which is what
//! gives the glider its non-rectangular hitbox against pillars and stones.

use serde::{Deserialize, Serialize};

/// Alpha values above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// Pixel count, widened before multiplying so large boxes cannot overflow `u32`
fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Bit grid of opaque pixels (row-major)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// An empty (fully transparent) mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; area(width, height)],
        }
    }

    /// A fully opaque rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; area(width, height)],
        }
    }

    /// Build a mask by evaluating `solid(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, solid: impl Fn(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// An ellipse inscribed in the given box
    pub fn ellipse(width: u32, height: u32) -> Self {
        let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    /// Build a mask from one alpha byte per pixel. Returns None if the buffer size is wrong.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Option<Self> {
        if alpha.len() != area(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > ALPHA_THRESHOLD).collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the pixel is opaque (out-of-bounds pixels are transparent)
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[y as usize * self.width as usize + x as usize] = solid;
        }
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Test overlap with `other` placed at `offset` relative to this mask's top-left
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (self.width as i32).min(ox + other.width as i32);
        let y1 = (self.height as i32).min(oy + other.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - ox, y - oy) {
                    return true;
                }
            }
        }
        false
    }

    /// Mirror top-to-bottom
    pub fn flipped_vertical(&self) -> Self {
        let h = self.height as i32;
        Self::from_fn(self.width, self.height, |x, y| self.get(x as i32, h - 1 - y as i32))
    }

    /// Nearest-neighbour resample by `factor` (dimensions truncate to whole pixels)
    pub fn scaled(&self, factor: f32) -> Self {
        if factor == 1.0 {
            return self.clone();
        }
        let w = (self.width as f32 * factor).max(0.0) as u32;
        let h = (self.height as f32 * factor).max(0.0) as u32;
        Self::from_fn(w, h, |x, y| {
            let sx = (x as f32 / factor) as i32;
            let sy = (y as f32 / factor) as i32;
            self.get(sx, sy)
        })
    }

    /// Rotate counter-clockwise on screen by `degrees`, growing the box to fit
    pub fn rotated(&self, degrees: f32) -> Self {
        if degrees == 0.0 {
            return self.clone();
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        // Trim float noise so a quarter turn of 40x10 stays 10x40
        let fit = |v: f32| (v - 1e-3).ceil().max(0.0) as u32;
        let new_w = fit(w * cos.abs() + h * sin.abs());
        let new_h = fit(w * sin.abs() + h * cos.abs());

        // Map each destination pixel centre back into the source (screen y points down)
        Self::from_fn(new_w, new_h, |x, y| {
            let dx = x as f32 + 0.5 - new_w as f32 / 2.0;
            let dy = y as f32 + 0.5 - new_h as f32 / 2.0;
            let sx = dx * cos - dy * sin + w / 2.0;
            let sy = dx * sin + dy * cos + h / 2.0;
            self.get(sx.floor() as i32, sy.floor() as i32)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_rectangles() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(5, 5);
        assert!(a.overlaps(&b, (8, 8)));
        assert!(a.overlaps(&b, (-4, -4)));
        assert!(!a.overlaps(&b, (10, 0)));
        assert!(!a.overlaps(&b, (-5, 3)));
    }

    #[test]
    fn test_overlap_ignores_transparent_corners() {
        // Two ellipses whose boxes touch diagonally but whose bodies don't
        let a = Mask::ellipse(20, 20);
        let b = Mask::ellipse(20, 20);
        assert!(!a.overlaps(&b, (17, 17)));
        assert!(a.overlaps(&b, (10, 0)));
    }

    #[test]
    fn test_from_alpha_threshold() {
        let m = Mask::from_alpha(2, 2, &[0, 255, 127, 128]).unwrap();
        assert!(!m.get(0, 0));
        assert!(m.get(1, 0));
        assert!(!m.get(0, 1));
        assert!(m.get(1, 1));
        assert!(Mask::from_alpha(2, 2, &[0, 0, 0]).is_none());
    }

    #[test]
    fn test_flip_vertical() {
        let m = Mask::from_fn(3, 4, |_, y| y == 0);
        let f = m.flipped_vertical();
        assert!(f.get(1, 3));
        assert!(!f.get(1, 0));
        assert_eq!(f.count(), 3);
    }

    #[test]
    fn test_scaled_dimensions() {
        let m = Mask::filled(50, 30).scaled(0.8);
        assert_eq!(m.size(), (40, 24));
        assert_eq!(m.count(), 40 * 24);
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        let m = Mask::ellipse(17, 9);
        assert_eq!(m.rotated(0.0), m);
    }

    #[test]
    fn test_rotation_quarter_turn_swaps_dimensions() {
        let m = Mask::filled(40, 10);
        let r = m.rotated(90.0);
        assert_eq!(r.size(), (10, 40));
        let area = r.count() as i32;
        assert!((area - 400).abs() <= 40, "area after rotation: {}", area);
    }

    #[test]
    fn test_rotation_grows_box() {
        let r = Mask::filled(40, 10).rotated(-30.0);
        assert!(r.width() > 40 || r.height() > 10);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_area_does_not_overflow_u32() {
        assert_eq!(area(70_000, 70_000), 4_900_000_000);
    }

    #[test]
    fn test_wide_mask_indexes_far_corner() {
        let mut m = Mask::new(100_000, 2);
        m.set(99_999, 1, true);
        assert!(m.get(99_999, 1));
        assert_eq!(m.count(), 1);
    }
}
