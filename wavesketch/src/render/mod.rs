//! Vector rendering of decimated waveforms

pub mod svg;

pub use svg::{render_svg, synthesize_path, SampleRange, VIEW_HEIGHT};
