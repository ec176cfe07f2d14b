//! Waveform path synthesis
//!
//! Turns bucket envelopes into one closed contour: the top edge runs left to
//! right through each bucket's maximum, the bottom edge runs back right to
//! left through each minimum. The view box is `buckets x 100`, with the
//! sample value range mapped onto the 0-100 vertical axis (0 = loudest
//! positive value).

use crate::audio::types::{ContainerHeader, SampleSummary};
use crate::error::{Error, Result};
use std::fmt::Write as _;

/// Fixed image height in user units
pub const VIEW_HEIGHT: u32 = 100;

/// Vertical midpoint where the contour starts and ends
const BASELINE: u32 = VIEW_HEIGHT / 2;

/// Value range representable at a given bit depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    pub min_possible: f64,
    pub max_possible: f64,
    pub range: f64,
}

impl SampleRange {
    /// `range = 2^bits`, `min = -range / 2`, `max = -min - 1`
    pub fn for_bits(bits_per_sample: u16) -> Result<Self> {
        let range = 2f64.powi(bits_per_sample as i32);
        if range == 0.0 || !range.is_finite() {
            return Err(Error::InvalidRange(format!(
                "cannot map {}-bit samples onto the view",
                bits_per_sample
            )));
        }
        let min_possible = -range / 2.0;
        Ok(Self {
            min_possible,
            max_possible: -min_possible - 1.0,
            range,
        })
    }

    /// Vertical coordinate for a sample value, rounded half away from zero
    fn y(&self, value: i16) -> f64 {
        (VIEW_HEIGHT as f64 / self.range * (self.max_possible - value as f64)).round()
    }
}

/// Build the `d` attribute of the waveform path.
///
/// Buckets with a zero minimum or maximum are left out entirely; their
/// horizontal slot is still reserved.
pub fn synthesize_path(bits_per_sample: u16, waveform: &[SampleSummary]) -> Result<String> {
    let range = SampleRange::for_bits(bits_per_sample)?;

    let mut top = String::new();
    let mut bottom = Vec::with_capacity(waveform.len());

    for (x, summary) in waveform.iter().enumerate() {
        if summary.is_silent() {
            continue;
        }
        let _ = write!(top, "L{} {}", x, range.y(summary.max));
        bottom.push((x, range.y(summary.min)));
    }

    let mut path = format!("M0 {}", BASELINE);
    path.push_str(&top);
    for (x, y) in bottom.iter().rev() {
        let _ = write!(path, "L{} {}", x, y);
    }
    let _ = write!(path, "L0 {} Z", BASELINE);

    Ok(path)
}

/// Render the waveform as a complete SVG document
pub fn render_svg(header: &ContainerHeader, waveform: &[SampleSummary]) -> Result<String> {
    let path = synthesize_path(header.bits_per_sample, waveform)?;

    Ok(format!(
        r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="{width}px" height="{height}px" preserveAspectRatio="none">
    <defs>
        <linearGradient id="gradient" x1="0%" y1="0%" x2="0%" y2="100%">
            <stop offset="0%" style="stop-color:rgb(0,0,0);stop-opacity:1"/>
            <stop offset="50%" style="stop-color:rgb(50,50,50);stop-opacity:1"/>
            <stop offset="100%" style="stop-color:rgb(0,0,0);stop-opacity:1"/>
        </linearGradient>
    </defs>
    <path d="{path}" fill="url(#gradient)"/>
</svg>"#,
        width = waveform.len(),
        height = VIEW_HEIGHT,
        path = path
    ))
}
