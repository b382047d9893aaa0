// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the shaded surface you move the pointer over.
// 2) A small debug overlay that mirrors the raw touch texture.
// 3) A crosshair that follows your mouse.
// 4) A tiny 5x7 bitmap font to render HUD text on top of the surface.

use crate::error::Error;
use crate::types::{gray_to_rgb, FrameBuffer};
use image::GrayImage;
use minifb::{Key, KeyRepeat, MouseMode, Scale, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create the main demo window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None while the pointer is outside.
    /// Visual: None is what makes the trail blank when you leave the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// Visual: when pressed, the trail is wiped (same as leaving the window).
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    // we write the current texture to disk in main.
    pub fn s_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }
}

/* ---------- Debug overlay: the raw texture in its own little window ---------- */

/// Mirrors the touch texture, doubled in size so single pixels are visible.
pub struct DebugOverlay {
    window: Window,
    frame: FrameBuffer,
}

impl DebugOverlay {
    pub fn new(size: usize) -> Result<Self, Error> {
        let options = WindowOptions { scale: Scale::X2, ..WindowOptions::default() };
        let window = Window::new("touchTexture", size, size, options)
            .map_err(|e| Error::WindowInit(format!("debug overlay: {e}")))?;
        Ok(Self { window, frame: FrameBuffer::new(size, size) })
    }

    /// Visual: the overlay shows exactly what a shader would sample this frame.
    pub fn mirror(&mut self, texture: &GrayImage) -> Result<(), Error> {
        blit_gray(texture, &mut self.frame);
        self.window
            .update_with_buffer(&self.frame.pixels, self.frame.width, self.frame.height)
            .map_err(|e| Error::WindowUpdate(format!("debug overlay: {e}")))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }
}

/// Nearest-neighbour copy of a grayscale image into a (possibly larger) frame.
pub fn blit_gray(src: &GrayImage, dst: &mut FrameBuffer) {
    let (sw, sh) = (src.width() as usize, src.height() as usize);
    if sw == 0 || sh == 0 {
        return;
    }
    for y in 0..dst.height {
        let sy = y * sh / dst.height;
        for x in 0..dst.width {
            let sx = x * sw / dst.width;
            let v = src.get_pixel(sx as u32, sy as u32).0[0];
            dst.pixels[y * dst.width + x] = gray_to_rgb(v);
        }
    }
}

/* ---------- Software drawing: pixels, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) follows your mouse.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (ASCII subset for "PTS 12 | FPS: 60.0 | SAVED") ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (shadow, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + shadow, y + ry as i32 + shadow, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn blit_scales_up_nearest() {
        let mut src = GrayImage::new(2, 2);
        src.put_pixel(1, 0, Luma([200]));
        let mut fb = FrameBuffer::new(4, 4);
        blit_gray(&src, &mut fb);
        assert_eq!(fb.pixels[2], gray_to_rgb(200));
        assert_eq!(fb.pixels[3], gray_to_rgb(200));
        assert_eq!(fb.pixels[4 + 3], gray_to_rgb(200));
        assert_eq!(fb.pixels[0], 0);
        assert_eq!(fb.pixels[15], 0);
    }

    #[test]
    fn crosshair_clips_at_edges() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_crosshair(&mut fb, 0, 0, 12, 0x00_FF_00_00);
        assert_eq!(fb.pixels[0], 0x00_FF_00_00);
        assert_eq!(fb.pixels[5], 0x00_FF_00_00); // on the horizontal arm
        assert_eq!(fb.pixels[1], 0); // centre gap
    }

    #[test]
    fn hud_text_draws_known_glyphs_only() {
        let mut fb = FrameBuffer::new(64, 10);
        draw_text_5x7(&mut fb, 0, 0, "~", 0x00_FF_FF_FF);
        assert!(fb.pixels.iter().all(|&p| p == 0));
        draw_text_5x7(&mut fb, 0, 0, "PTS 1", 0x00_FF_FF_FF);
        assert!(fb.pixels.iter().any(|&p| p == 0x00_FF_FF_FF));
    }
}
