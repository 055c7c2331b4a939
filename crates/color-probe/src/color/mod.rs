//! Color types and conversions
//!
//! - [`Color`]: gamma-encoded sRGB with straight alpha, the value type every
//!   other module works with
//! - [`Xyz`]: CIE XYZ tristimulus values against D65
//! - [`Lab`]: CIE L*a*b*, the space the perceptual distances operate in
//! - [`Rgb8`]: an 8-bit opaque color used as a histogram key by the palette
//!   extractor
//!
//! Conversions are plain `From` impls and never fail:
//!
//! ```
//! use color_probe::{Color, Lab};
//!
//! let lab = Lab::from(Color::WHITE);
//! assert!((lab.l - 100.0).abs() < 0.01);
//! ```

mod lab;
mod rgb8;
mod rgba;
mod xyz;

pub use lab::Lab;
pub use rgb8::Rgb8;
pub use rgba::Color;
pub use xyz::{Xyz, D65_WHITE};
