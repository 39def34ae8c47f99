//! Fixed-size PNG export of the logo grid.

use crate::member::Member;
use crate::rendering::layout::{compute_render_plan, LayoutOptions};
use crate::rendering::paint::build_display_list;
use crate::rendering::raster::Rasterizer;
use crate::{FixedSize, Mode, Ratio, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Export pixel size for a ratio: 1600x900 landscape, 1500x1500 square.
pub fn export_size(ratio: Ratio) -> FixedSize {
    match ratio {
        Ratio::Landscape => FixedSize::new(1600, 900),
        Ratio::Square => FixedSize::new(1500, 1500),
    }
}

/// What to export and where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub ratio: Ratio,
    pub mode: Mode,
    pub size: FixedSize,
    pub file_name: String,
}

impl ExportRequest {
    pub fn new(ratio: Ratio, mode: Mode) -> Self {
        Self {
            ratio,
            mode,
            size: export_size(ratio),
            file_name: format!("bfc-members-{}-{}.png", ratio, mode),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl ExportedImage {
    /// Write the PNG into `dir`, returning the full path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png_data)?;
        Ok(path)
    }

    /// Hex SHA-256 of the encoded PNG.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

/// Lay out `members` at the request's fixed size and rasterize it.
pub fn export<R: Rasterizer + ?Sized>(
    members: &[Member],
    request: &ExportRequest,
    base_url: &str,
    rasterizer: &R,
) -> Result<ExportedImage> {
    let opts = LayoutOptions {
        ratio: request.ratio,
        mode: request.mode,
        fixed_size: Some(request.size),
        base_url: base_url.to_string(),
    };
    let plan = compute_render_plan(members, &opts);
    let commands = build_display_list(&plan);
    log::debug!(
        "Rasterizing {} ({} commands, scale {})",
        request.file_name,
        commands.len(),
        plan.scale
    );
    let shot = rasterizer.rasterize(request.size.width, request.size.height, &commands)?;

    Ok(ExportedImage {
        file_name: request.file_name.clone(),
        width: shot.width,
        height: shot.height,
        png_data: shot.png_data,
    })
}
