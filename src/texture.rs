// The touch texture: trail + rasterizer + the grayscale image a renderer samples.
//
// Frame loop, driven entirely by the caller:
//   add_touch() on every pointer move (any number per frame)
//   update()    once per rendered frame
//   reset()     when the pointer leaves the surface
// After update() the image is "dirty"; the renderer reads it, then acknowledge()s.

use crate::config::TouchOptions;
use crate::deferred::{DeferredQueue, TaskHandle};
use crate::draw::DebugOverlay;
use crate::envelope;
use crate::error::Error;
use crate::raster;
use crate::trail::Trail;
use crate::types::TouchPoint;
use image::GrayImage;
use std::path::Path;

/// Work that runs at the end of the current update().
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    EnableDrawing,
}

pub struct TouchTexture {
    options: TouchOptions,
    trail: Trail,
    image: GrayImage, // owned; consumers only borrow it
    needs_update: bool,
    version: u64,
    can_draw: bool,
    deferred: DeferredQueue<Deferred>,
    pending_enable: Option<TaskHandle>,
    overlay: Option<DebugOverlay>,
}

impl TouchTexture {
    /// Validate options and allocate the texture (opaque black).
    /// With `debug` set, the overlay window must open or construction fails.
    pub fn new(options: TouchOptions) -> Result<Self, Error> {
        options.validate()?;
        let overlay = if options.debug {
            Some(DebugOverlay::new(options.size as usize)?)
        } else {
            None
        };
        log::debug!(
            "touch texture: size={} max_age={} radius={} debug={}",
            options.size,
            options.max_age,
            options.radius,
            options.debug
        );

        let mut texture = Self {
            options,
            trail: Trail::new(),
            image: GrayImage::new(options.size, options.size),
            needs_update: false,
            version: 0,
            can_draw: true,
            deferred: DeferredQueue::new(),
            pending_enable: None,
            overlay,
        };
        texture.mark_dirty();
        Ok(texture)
    }

    /// Record a pointer sample in normalized surface space.
    /// Out-of-range coordinates are fine; their dots land off the texture.
    pub fn add_touch(&mut self, x: f32, y: f32) {
        self.trail.add_touch(x, y);
    }

    /// Per-frame step: clear, age, evict, redraw, mark dirty.
    /// Right after a reset() the frame stays black and nothing ages.
    pub fn update(&mut self) {
        raster::clear(&mut self.image);

        if self.can_draw {
            let evicted = self.trail.age_and_evict(self.options.max_age);
            for point in self.trail.points() {
                draw_touch(&mut self.image, &self.options, point);
            }
            log::trace!(
                "touch texture: {} points drawn, {} evicted",
                self.trail.len(),
                evicted
            );
        }

        self.mark_dirty();
        self.mirror_to_overlay();
        self.run_deferred();
    }

    /// Drop the whole trail and blank the next frame.
    /// Drawing comes back once the next update() has finished; a second reset
    /// before then replaces the pending re-enable instead of stacking another.
    pub fn reset(&mut self) {
        self.trail.clear();
        self.can_draw = false;
        raster::clear(&mut self.image);
        self.mark_dirty();

        if let Some(stale) = self.pending_enable.take() {
            self.deferred.cancel(stale);
        }
        self.pending_enable = Some(self.deferred.schedule(Deferred::EnableDrawing));
        log::debug!("touch texture: reset, drawing suspended for one frame");
    }

    fn mark_dirty(&mut self) {
        self.needs_update = true;
        self.version = self.version.wrapping_add(1);
    }

    fn run_deferred(&mut self) {
        for task in self.deferred.drain() {
            match task {
                Deferred::EnableDrawing => self.can_draw = true,
            }
        }
        self.pending_enable = None;
    }

    fn mirror_to_overlay(&mut self) {
        let Some(mut overlay) = self.overlay.take() else {
            return;
        };
        if !overlay.is_open() {
            log::debug!("touch texture: debug overlay closed");
            return;
        }
        match overlay.mirror(&self.image) {
            Ok(()) => self.overlay = Some(overlay),
            Err(e) => log::warn!("touch texture: dropping debug overlay: {e}"),
        }
    }

    /* ---------------- consumer side ---------------- */

    /// True when the image changed since the last acknowledge().
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// The renderer has uploaded/sampled this frame.
    pub fn acknowledge(&mut self) {
        self.needs_update = false;
    }

    /// Bumped every time the image is marked dirty.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Bilinear read in uv space (v = 0 at the bottom), result in [0,1].
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        raster::sample_bilinear(&self.image, u, v)
    }

    /// Write the current texture to disk; format follows the file extension.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), Error> {
        self.image
            .save(path)
            .map_err(|e| Error::Image(format!("{}: {e}", path.display())))
    }

    /* ---------------- inspection ---------------- */

    pub fn options(&self) -> &TouchOptions {
        &self.options
    }

    pub fn points(&self) -> &[TouchPoint] {
        self.trail.points()
    }

    pub fn is_drawing_enabled(&self) -> bool {
        self.can_draw
    }

    pub fn has_debug_overlay(&self) -> bool {
        self.overlay.is_some()
    }
}

/// Draw one trail point as a soft dot sized by its intensity.
/// Normalized y grows upward, pixel y grows downward.
fn draw_touch(image: &mut GrayImage, options: &TouchOptions, point: &TouchPoint) {
    let size = options.size as f32;
    let px = point.x * size;
    let py = (1.0 - point.y) * size;
    let intensity = envelope::intensity(point, options.max_age);
    let radius = size * options.radius * intensity;
    raster::stamp_soft_dot(image, px, py, radius);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(max_age: u32) -> TouchTexture {
        let options = TouchOptions { size: 32, max_age, radius: 0.5, debug: false };
        TouchTexture::new(options).unwrap()
    }

    fn lit(t: &TouchTexture) -> usize {
        t.image().pixels().filter(|p| p.0[0] > 0).count()
    }

    #[test]
    fn invalid_options_fail_at_construction() {
        let bad = TouchOptions { radius: 0.0, ..Default::default() };
        assert!(matches!(TouchTexture::new(bad), Err(Error::InvalidRadius(_))));
        let bad = TouchOptions { size: 0, ..Default::default() };
        assert!(matches!(TouchTexture::new(bad), Err(Error::InvalidSize(_))));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn debug_overlay_without_a_display_fails_construction() {
        let headless = std::env::var_os("DISPLAY").is_none()
            && std::env::var_os("WAYLAND_DISPLAY").is_none();
        if !headless {
            return;
        }
        let options = TouchOptions { debug: true, ..Default::default() };
        let result = TouchTexture::new(options);
        assert!(result.is_err(), "no texture may be handed out without its overlay");
        assert!(matches!(result, Err(Error::WindowInit(_))));
    }

    #[test]
    fn options_are_kept_as_given() {
        let t = texture(7);
        assert_eq!(t.options(), &TouchOptions { size: 32, max_age: 7, radius: 0.5, debug: false });
    }

    #[test]
    fn starts_black_and_dirty() {
        let t = texture(10);
        assert!(t.needs_update());
        assert_eq!(t.version(), 1);
        assert_eq!(lit(&t), 0);
        assert!(!t.has_debug_overlay());
    }

    #[test]
    fn moving_pointer_leaves_a_mark() {
        let mut t = texture(10);
        t.add_touch(0.5, 0.5);
        t.add_touch(0.6, 0.5);
        for _ in 0..3 {
            t.update();
        }
        assert!(lit(&t) > 0);
        // Brightest near the second point: x = 0.6 * 32, y = 16.
        assert!(t.sample(0.6, 0.5) > 0.0);
    }

    #[test]
    fn repeated_reset_keeps_a_single_pending_reenable() {
        let mut t = texture(10);
        t.reset();
        let first = t.pending_enable.unwrap();
        t.reset();
        let second = t.pending_enable.unwrap();
        assert_ne!(first, second);
        assert!(!t.deferred.is_pending(first));
        assert_eq!(t.deferred.len(), 1);

        t.update();
        assert!(t.is_drawing_enabled());
        assert!(t.pending_enable.is_none());
        assert!(t.deferred.is_empty());
    }

    #[test]
    fn acknowledge_clears_only_the_flag() {
        let mut t = texture(10);
        t.acknowledge();
        assert!(!t.needs_update());
        let v = t.version();
        t.update();
        assert!(t.needs_update());
        assert_eq!(t.version(), v + 1);
    }

    #[test]
    fn snapshot_round_trips_through_png() {
        let mut t = texture(10);
        t.add_touch(0.2, 0.2);
        t.add_touch(0.4, 0.4);
        for _ in 0..3 {
            t.update();
        }
        let path = std::env::temp_dir().join(format!("touch_snapshot_{}.png", std::process::id()));
        t.save_snapshot(&path).unwrap();
        let back = image::open(&path).unwrap().to_luma8();
        let _ = std::fs::remove_file(&path);
        assert_eq!(back.as_raw(), t.image().as_raw());
    }

    #[test]
    fn snapshot_to_unknown_format_is_an_image_error() {
        let t = texture(10);
        let path = std::env::temp_dir().join("touch_snapshot.not_a_format");
        assert!(matches!(t.save_snapshot(&path), Err(Error::Image(_))));
    }
}
