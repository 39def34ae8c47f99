//! Rendering pipeline: member list -> render plan -> paint commands -> PNG.

pub mod collate;
pub mod layout;
pub mod paint;
pub mod raster;

pub use layout::{compute_render_plan, LayoutOptions, RenderPlan};

/// Encoded image produced by a rasterizer.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}
