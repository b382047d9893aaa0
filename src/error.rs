// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    InvalidSize(String),   // Texture side length was zero
    InvalidMaxAge(String), // Trail lifetime was negative (config file)
    InvalidRadius(String), // Radius fraction outside (0, 1]
    WindowInit(String),    // Creating a window (demo or debug overlay) failed
    WindowUpdate(String),  // Updating the window buffer failed
    Config(String),        // Reading/parsing touch.toml failed
    Surface(String),       // Shading the surface into the screen buffer failed
    Image(String),         // Loading the surface image or saving a snapshot failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize(s) => write!(f, "Invalid texture size: {s}"),
            Error::InvalidMaxAge(s) => write!(f, "Invalid max age: {s}"),
            Error::InvalidRadius(s) => write!(f, "Invalid radius: {s}"),
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
            Error::Surface(s) => write!(f, "Surface error: {s}"),
            Error::Image(s) => write!(f, "Image error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
