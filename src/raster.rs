// Software drawing into the grayscale touch texture.
// Visual effects provided here:
// 1) A soft white dot with a solid-ish core and a feathered rim.
// 2) Bilinear lookups so consumers can read the texture like a GPU sampler.

use image::{GrayImage, Luma};

/// Fraction of the radius that is drawn at full strength.
pub const CORE_SHARE: f32 = 0.25;
/// Opacity of the white core (the dot never fully saturates on its own).
pub const PEAK_ALPHA: f32 = 0.35;

/// Fill the whole texture with opaque black.
pub fn clear(img: &mut GrayImage) {
    for p in img.pixels_mut() {
        *p = Luma([0]);
    }
}

/// Source-over a gray sample `value` (0..255) of opacity `alpha` onto `dst`.
#[inline]
fn over(dst: u8, value: f32, alpha: f32) -> u8 {
    let out = value * alpha + dst as f32 * (1.0 - alpha);
    out.round().clamp(0.0, 255.0) as u8
}

/// Stamp a radial-gradient dot centred at pixel-space (cx, cy).
/// Inside CORE_SHARE * radius: white at PEAK_ALPHA. From there to `radius`
/// colour and opacity each fall linearly to transparent black, unpremultiplied
/// like a canvas gradient, so brightness falls off as (1 - t)^2.
/// Visual: overlapping dots pile up into brighter streaks.
pub fn stamp_soft_dot(img: &mut GrayImage, cx: f32, cy: f32, radius: f32) {
    // Zero/negative/NaN radius: nothing to draw.
    if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() {
        return;
    }
    let (w, h) = (img.width() as f32, img.height() as f32);

    // Scan only the clipped bounding box; dots outside the texture are skipped.
    let x0 = (cx - radius).floor().max(0.0);
    let y0 = (cy - radius).floor().max(0.0);
    let x1 = (cx + radius).ceil().min(w);
    let y1 = (cy + radius).ceil().min(h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let inner = radius * CORE_SHARE;
    let band = radius - inner;
    let r2 = radius * radius;

    for y in (y0 as u32)..(y1 as u32) {
        for x in (x0 as u32)..(x1 as u32) {
            // Sample at the pixel centre, like a canvas fill.
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d2 = dx * dx + dy * dy;
            if d2 > r2 {
                continue;
            }
            let d = d2.sqrt();
            let t = if d <= inner { 0.0 } else { (d - inner) / band };
            let keep = 1.0 - t;
            let alpha = PEAK_ALPHA * keep;
            if alpha <= 0.0 {
                continue;
            }
            let p = img.get_pixel_mut(x, y);
            p.0[0] = over(p.0[0], 255.0 * keep, alpha);
        }
    }
}

/// Bilinear sample in uv space, clamp-to-edge, result in [0,1].
/// v = 0 is the bottom row (GPU texture convention), matching how points are drawn.
pub fn sample_bilinear(img: &GrayImage, u: f32, v: f32) -> f32 {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return 0.0;
    }
    let fx = (u * w as f32 - 0.5).clamp(0.0, (w - 1) as f32);
    let fy = ((1.0 - v) * h as f32 - 0.5).clamp(0.0, (h - 1) as f32);
    let (ix, iy) = (fx.floor() as u32, fy.floor() as u32);
    let (tx, ty) = (fx - ix as f32, fy - iy as f32);
    let (jx, jy) = ((ix + 1).min(w - 1), (iy + 1).min(h - 1));

    let at = |x: u32, y: u32| img.get_pixel(x, y).0[0] as f32 / 255.0;
    let top = at(ix, iy) * (1.0 - tx) + at(jx, iy) * tx;
    let bottom = at(ix, jy) * (1.0 - tx) + at(jx, jy) * tx;
    top * (1.0 - ty) + bottom * ty
}
