//! huecheck - color and contrast checks for UI screenshots
//!
//! Decodes PNG screenshots, crops the elements listed in a manifest and
//! measures them with `color-probe`.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod config;
pub mod error;
pub mod imaging;
pub mod inspect;
