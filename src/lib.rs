//! BFC Logo Grid
//!
//! Core logic behind the BFC member logo dashboard: turning a member list
//! into a render plan, editing tier assignments through drag gestures, and
//! exporting fixed-size PNG renders of the grid.
//!
//! # Features
//!
//! - **Layout Engine**: tiered or alphabetical arrangement, scaled for export
//! - **Tier Editor**: drag-and-drop state machine with canonical save order
//! - **Export**: fixed-size PNG output through a pluggable [`rendering::raster::Rasterizer`]
//! - **Remote** (default feature): GitHub persistence and embedded data loading
//!
//! # Example
//!
//! ```
//! use bfc_logo_grid::member::Member;
//! use bfc_logo_grid::rendering::layout::{compute_render_plan, LayoutOptions};
//! use bfc_logo_grid::Mode;
//!
//! let members = vec![
//!     Member::new("A", "industry"),
//!     Member::new("B", "founding").founding(true),
//! ];
//! let opts = LayoutOptions { mode: Mode::Alphabetical, ..Default::default() };
//! let plan = compute_render_plan(&members, &opts);
//! assert_eq!(plan.member_names(), vec!["B", "A"]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub use error::{Error, Result};

pub mod member;
pub use member::{Member, MemberList, MembersDocument, Tier};

pub mod rendering;

pub mod editor;
pub use editor::TierEditor;

pub mod export;

pub mod embed;

pub mod dashboard;
pub use dashboard::Dashboard;

// GitHub contents API persistence
#[cfg(feature = "remote")]
pub mod persist;

// Async fire-and-await wrappers around the blocking collaborators
pub mod async_api;

/// Layout aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ratio {
    /// 16:9
    #[default]
    Landscape,
    /// 1:1
    Square,
}

impl Ratio {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ratio::Landscape => "landscape",
            Ratio::Square => "square",
        }
    }

    /// Aspect ratio as `(width, height)` used when no fixed size is given.
    pub fn aspect(&self) -> (u32, u32) {
        match self {
            Ratio::Landscape => (16, 9),
            Ratio::Square => (1, 1),
        }
    }

    /// Lenient parse used for embed attributes; unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "landscape" => Some(Ratio::Landscape),
            "square" => Some(Ratio::Square),
            _ => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrangement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Grouped by sponsorship tier
    #[default]
    Tiered,
    /// Flat, founding members first then by name
    Alphabetical,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Tiered => "tiered",
            Mode::Alphabetical => "alphabetical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tiered" => Some(Mode::Tiered),
            "alphabetical" => Some(Mode::Alphabetical),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed pixel size for export rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedSize {
    pub width: u32,
    pub height: u32,
}

impl FixedSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Configuration for the dashboard
///
/// The defaults point at the public BFC deployment. `base_url` is the prefix
/// used to resolve relative logo paths in previews and exports; the dashboard
/// serves logos next to its own page so the default is empty.
///
/// # Examples
///
/// ```
/// let cfg = bfc_logo_grid::GridConfig::default();
/// assert!(cfg.host_url.starts_with("https://"));
/// assert!(cfg.base_url.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Where the embeddable script and `members.json` are hosted
    pub host_url: String,
    /// Prefix for relative logo paths
    pub base_url: String,
    /// Directory exports are written to
    pub export_dir: std::path::PathBuf,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            host_url: "https://nward21.github.io/bfc-member-collage-logos".to_string(),
            base_url: String::new(),
            export_dir: std::path::PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert!(config.host_url.ends_with("bfc-member-collage-logos"));
        assert_eq!(config.export_dir, std::path::PathBuf::from("."));
    }

    #[test]
    fn ratio_and_mode_parse_leniently() {
        assert_eq!(Ratio::parse("square"), Some(Ratio::Square));
        assert_eq!(Ratio::parse("portrait"), None);
        assert_eq!(Mode::parse("alphabetical"), Some(Mode::Alphabetical));
        assert_eq!(Ratio::Landscape.aspect(), (16, 9));
        assert_eq!(Mode::default(), Mode::Tiered);
    }
}
