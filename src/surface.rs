// The consumer side: a picture that gets lifted and brightened by the touch texture.
// Visual: moving the pointer over the window raises a glowing wake in the image.
//
// CPU stand-in for the GPU vertex/fragment pair this texture feeds:
//   vertex:   position.z += touch
//   fragment: colour = base * 2 * (touch + 0.5)

use crate::config::SurfaceSection;
use crate::error::Error;
use crate::texture::TouchTexture;
use crate::types::FrameBuffer;
use image::imageops::FilterType;
use std::path::Path;

pub struct Surface {
    base: FrameBuffer,
    displacement: f32, // pixels of lift at touch = 1
    brightness: f32,
}

/// Window pixel -> normalized surface coordinates (y grows upward).
pub fn pointer_to_uv(mx: f32, my: f32, width: usize, height: usize) -> (f32, f32) {
    (mx / width as f32, 1.0 - my / height as f32)
}

impl Surface {
    pub fn new(base: FrameBuffer, displacement: f32, brightness: f32) -> Self {
        Self { base, displacement, brightness }
    }

    /// Build from the [surface] table: the configured image, or the procedural grid.
    pub fn from_config(cfg: &SurfaceSection, width: usize, height: usize) -> Result<Self, Error> {
        let base = match &cfg.image {
            Some(path) => load_base(path, width, height)?,
            None => procedural_base(width, height),
        };
        Ok(Self::new(base, cfg.displacement, cfg.brightness))
    }

    pub fn width(&self) -> usize {
        self.base.width
    }

    pub fn height(&self) -> usize {
        self.base.height
    }

    /// Render the lifted, touch-shaded surface into `out` (same size as the base).
    pub fn shade(&self, touch: &TouchTexture, out: &mut FrameBuffer) -> Result<(), Error> {
        if out.width != self.base.width || out.height != self.base.height {
            return Err(Error::Surface(format!(
                "shade: surface is {}x{}, screen is {}x{}",
                self.base.width, self.base.height, out.width, out.height
            )));
        }
        let (w, h) = (self.base.width, self.base.height);
        if w == 0 || h == 0 {
            return Ok(());
        }

        for y in 0..h {
            for x in 0..w {
                let (u, v) = pointer_to_uv(x as f32 + 0.5, y as f32 + 0.5, w, h);

                // Lifted points show what sits a little lower on the surface.
                let lift = touch.sample(u, v) * self.displacement;
                let sy = ((y as f32 + lift).round() as usize).min(h - 1);
                let (su, sv) = pointer_to_uv(x as f32 + 0.5, sy as f32 + 0.5, w, h);
                let t = touch.sample(su, sv);

                let gain = self.brightness * (t + 0.5);
                out.pixels[y * w + x] = scale_rgb(self.base.pixels[sy * w + x], gain);
            }
        }
        Ok(())
    }
}

#[inline]
fn scale_rgb(px: u32, gain: f32) -> u32 {
    let ch = |shift: u32| {
        let c = ((px >> shift) & 0xFF) as f32 * gain;
        c.round().clamp(0.0, 255.0) as u32
    };
    (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

/// Decode any format `image` understands and stretch it to the window.
fn load_base(path: &Path, width: usize, height: usize) -> Result<FrameBuffer, Error> {
    let img = image::open(path).map_err(|e| Error::Image(format!("{}: {e}", path.display())))?;
    let rgb = img
        .resize_exact(width as u32, height as u32, FilterType::Triangle)
        .to_rgb8();
    let pixels = rgb
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    Ok(FrameBuffer { width, height, pixels })
}

/// Soft diagonal gradient with faint grid lines, kept at half brightness so
/// the resting shade (touch = 0) shows it at its natural level.
pub fn procedural_base(width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let fx = x as f32 / width.max(1) as f32;
            let fy = y as f32 / height.max(1) as f32;
            let mut r = 40.0 + 50.0 * fx;
            let mut g = 30.0 + 40.0 * fy;
            let mut b = 70.0 + 40.0 * (1.0 - fx);
            if x % 32 == 0 || y % 32 == 0 {
                r += 18.0;
                g += 18.0;
                b += 18.0;
            }
            fb.pixels[y * width + x] = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        }
    }
    fb
}
