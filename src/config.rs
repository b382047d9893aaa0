// Construction options for the touch texture, plus the demo's touch.toml.
//
// TouchOptions is what the library needs; DemoConfig is only read by the
// binary and converts its [texture] table into validated TouchOptions.

use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed at construction, never changed afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchOptions {
    pub size: u32,    // texture side in pixels
    pub max_age: u32, // frames a point survives
    pub radius: f32,  // fraction of `size` used as max dot radius
    pub debug: bool,  // mirror the texture into a small window
}

impl Default for TouchOptions {
    fn default() -> Self {
        Self { size: 128, max_age: 120, radius: 0.2, debug: false }
    }
}

impl TouchOptions {
    /// Reject options that would silently produce a blank texture.
    pub fn validate(&self) -> Result<(), Error> {
        if self.size == 0 {
            return Err(Error::InvalidSize("size must be > 0".into()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 || self.radius > 1.0 {
            return Err(Error::InvalidRadius(format!(
                "radius must be in (0, 1], got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/* ------------------------------ touch.toml ------------------------------ */

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub texture: TextureSection,
    pub window: WindowSection,
    pub surface: SurfaceSection,
}

/// Signed on purpose: a negative value in the file must be reported, not wrapped.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TextureSection {
    pub size: i64,
    pub max_age: i64,
    pub radius: f32,
    pub debug: bool,
}

impl Default for TextureSection {
    fn default() -> Self {
        let o = TouchOptions::default();
        Self { size: o.size as i64, max_age: o.max_age as i64, radius: o.radius, debug: o.debug }
    }
}

impl TextureSection {
    pub fn to_options(&self) -> Result<TouchOptions, Error> {
        if self.size <= 0 || self.size > u32::MAX as i64 {
            return Err(Error::InvalidSize(format!("size must be in 1..=u32::MAX, got {}", self.size)));
        }
        if self.max_age < 0 || self.max_age > u32::MAX as i64 {
            return Err(Error::InvalidMaxAge(format!("max_age must be >= 0, got {}", self.max_age)));
        }
        let options = TouchOptions {
            size: self.size as u32,
            max_age: self.max_age as u32,
            radius: self.radius,
            debug: self.debug,
        };
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub width: usize,
    pub height: usize,
}

impl Default for WindowSection {
    // Same aspect as the 1808x2400 photo the surface was designed around.
    fn default() -> Self {
        Self { width: 452, height: 600 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SurfaceSection {
    pub image: Option<PathBuf>, // base picture; procedural grid when absent
    pub displacement: f32,      // pixels of lift at full touch intensity
    pub brightness: f32,        // base colour multiplier before touch shading
}

impl Default for SurfaceSection {
    fn default() -> Self {
        Self { image: None, displacement: 24.0, brightness: 2.0 }
    }
}

/// Parse a touch.toml document.
pub fn parse_config(text: &str) -> Result<DemoConfig, Error> {
    toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
}

/// Load touch.toml from `path`; a missing file means "use defaults".
pub fn load_config(path: &Path) -> Result<DemoConfig, Error> {
    if !path.exists() {
        log::info!("{} not found, using default configuration", path.display());
        return Ok(DemoConfig::default());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
    parse_config(&text)
}
