// Core types shared by the trail, the rasterizer and the windows.

/// One recorded pointer sample.
/// Visual: a soft white dot that fades in, then slowly fades out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f32,     // normalized surface x (0 = left edge)
    pub y: f32,     // normalized surface y (0 = bottom edge, grows upward)
    pub age: u32,   // number of update() calls survived
    pub force: f32, // [0,1], speed proxy from distance to the previous sample
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Pack an 8-bit intensity as a gray 0x00RRGGBB pixel.
#[inline]
pub fn gray_to_rgb(v: u8) -> u32 {
    let v = v as u32;
    (v << 16) | (v << 8) | v
}
