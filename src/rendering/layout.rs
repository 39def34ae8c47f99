//! Layout engine: member list + display options -> render plan.
//!
//! Pure and infallible. Nothing here mutates the member list.

use crate::member::{Member, Tier};
use crate::rendering::collate::locale_cmp;
use crate::{FixedSize, Mode, Ratio};
use serde::Serialize;

/// Design width that all base measurements refer to.
pub const REFERENCE_WIDTH: f64 = 1000.0;

/// Size-dependent layout parameters in pixels.
///
/// [`LayoutMetrics::BASE`] holds the design values at scale 1; every
/// rendered value is `base * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutMetrics {
    pub padding: f64,
    pub section_gap: f64,
    pub label_font_size: f64,
    pub label_letter_spacing: f64,
    pub label_margin: f64,
    pub label_padding: f64,
    pub grid_min_cell_width: f64,
    pub grid_row_gap: f64,
    pub grid_column_gap: f64,
    pub row_flow_row_gap: f64,
    pub row_flow_column_gap: f64,
    pub logo_max_height: f64,
    pub logo_max_width: f64,
    pub large_logo_max_height: f64,
    pub large_logo_max_width: f64,
    pub placeholder_font_size: f64,
}

impl LayoutMetrics {
    pub const BASE: LayoutMetrics = LayoutMetrics {
        padding: 40.0,
        section_gap: 32.0,
        label_font_size: 14.0,
        label_letter_spacing: 2.0,
        label_margin: 16.0,
        label_padding: 8.0,
        grid_min_cell_width: 150.0,
        grid_row_gap: 24.0,
        grid_column_gap: 16.0,
        row_flow_row_gap: 24.0,
        row_flow_column_gap: 40.0,
        logo_max_height: 40.0,
        logo_max_width: 120.0,
        large_logo_max_height: 48.0,
        large_logo_max_width: 144.0,
        placeholder_font_size: 14.0,
    };

    pub fn scaled(scale: f64) -> Self {
        let b = Self::BASE;
        Self {
            padding: b.padding * scale,
            section_gap: b.section_gap * scale,
            label_font_size: b.label_font_size * scale,
            label_letter_spacing: b.label_letter_spacing * scale,
            label_margin: b.label_margin * scale,
            label_padding: b.label_padding * scale,
            grid_min_cell_width: b.grid_min_cell_width * scale,
            grid_row_gap: b.grid_row_gap * scale,
            grid_column_gap: b.grid_column_gap * scale,
            row_flow_row_gap: b.row_flow_row_gap * scale,
            row_flow_column_gap: b.row_flow_column_gap * scale,
            logo_max_height: b.logo_max_height * scale,
            logo_max_width: b.logo_max_width * scale,
            large_logo_max_height: b.large_logo_max_height * scale,
            large_logo_max_width: b.large_logo_max_width * scale,
            placeholder_font_size: b.placeholder_font_size * scale,
        }
    }

    /// Maximum logo box `(width, height)` for the given treatment.
    pub fn logo_box(&self, large: bool) -> (f64, f64) {
        if large {
            (self.large_logo_max_width, self.large_logo_max_height)
        } else {
            (self.logo_max_width, self.logo_max_height)
        }
    }
}

/// How the outer container is sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Container {
    /// Exact pixel size (export)
    Fixed { width: u32, height: u32 },
    /// Full available width, height from the aspect ratio (preview / embed)
    Responsive { aspect_width: u32, aspect_height: u32 },
}

/// Arrangement of logos inside one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionLayout {
    /// Unbounded horizontal flow, wrapping only when out of width
    SingleRow,
    /// Auto-fit grid whose cells are at least `min_cell_width` wide
    Grid { min_cell_width: f64 },
}

/// One logo to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    /// Alt text, tooltip and text fallback
    pub name: String,
    /// Resolved image source; `None` renders `name` as text
    pub image_src: Option<String>,
    pub large: bool,
}

/// A labelled tier group (tiered mode) or the flat list (alphabetical mode).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub tier: Option<Tier>,
    pub label: Option<String>,
    pub layout: SectionLayout,
    pub entries: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub ratio: Ratio,
    pub mode: Mode,
    pub scale: f64,
    pub container: Container,
    pub metrics: LayoutMetrics,
    pub sections: Vec<Section>,
}

impl RenderPlan {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Every entry in draw order.
    pub fn entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.entries().map(|e| e.name.as_str()).collect()
    }
}

/// Display options for [`compute_render_plan`].
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub ratio: Ratio,
    pub mode: Mode,
    /// Export size; `None` lays out responsively at scale 1
    pub fixed_size: Option<FixedSize>,
    /// Prefix for relative logo paths (no trailing slash)
    pub base_url: String,
}

/// Scale factor for a given export size.
pub fn scale_for(fixed_size: Option<FixedSize>) -> f64 {
    match fixed_size {
        Some(size) => size.width as f64 / REFERENCE_WIDTH,
        None => 1.0,
    }
}

/// Resolve a logo path against `base_url`.
///
/// Paths starting with `http` are already absolute and pass through.
pub fn resolve_logo_url(logo_url: &str, base_url: &str) -> String {
    if logo_url.starts_with("http") {
        logo_url.to_string()
    } else if !base_url.is_empty() {
        format!("{}/{}", base_url, logo_url)
    } else {
        logo_url.to_string()
    }
}

/// Founding members first in input order, then everyone else by name.
pub fn alphabetical_order(members: &[Member]) -> Vec<&Member> {
    let mut founding: Vec<&Member> = members.iter().filter(|m| m.is_founding).collect();
    let mut rest: Vec<&Member> = members.iter().filter(|m| !m.is_founding).collect();
    rest.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    founding.append(&mut rest);
    founding
}

fn entry(member: &Member, large: bool, base_url: &str) -> PlanEntry {
    PlanEntry {
        name: member.name.clone(),
        image_src: member.logo().map(|l| resolve_logo_url(l, base_url)),
        large,
    }
}

/// Compute the render plan for `members` under `opts`.
///
/// - Tiered: one section per non-empty known tier in fixed order; input
///   order is kept within a tier; unknown tiers are skipped.
/// - Alphabetical: a single grid section, founding members pinned first,
///   each entry large iff the member is founding.
pub fn compute_render_plan(members: &[Member], opts: &LayoutOptions) -> RenderPlan {
    let scale = scale_for(opts.fixed_size);
    let metrics = LayoutMetrics::scaled(scale);
    let container = match opts.fixed_size {
        Some(size) => Container::Fixed { width: size.width, height: size.height },
        None => {
            let (aspect_width, aspect_height) = opts.ratio.aspect();
            Container::Responsive { aspect_width, aspect_height }
        }
    };
    let grid = SectionLayout::Grid { min_cell_width: metrics.grid_min_cell_width };

    let mut sections = Vec::new();
    match opts.mode {
        Mode::Tiered => {
            for tier in Tier::ORDER.iter() {
                let large = tier.is_large();
                let entries: Vec<PlanEntry> = members
                    .iter()
                    .filter(|m| &m.tier == tier)
                    .map(|m| entry(m, large, &opts.base_url))
                    .collect();
                if entries.is_empty() {
                    continue;
                }
                sections.push(Section {
                    tier: Some(tier.clone()),
                    label: Some(tier.label().to_string()),
                    layout: if tier.is_single_row() {
                        SectionLayout::SingleRow
                    } else {
                        grid
                    },
                    entries,
                });
            }
        }
        Mode::Alphabetical => {
            let entries: Vec<PlanEntry> = alphabetical_order(members)
                .into_iter()
                .map(|m| entry(m, m.is_founding, &opts.base_url))
                .collect();
            if !entries.is_empty() {
                sections.push(Section { tier: None, label: None, layout: grid, entries });
            }
        }
    }

    RenderPlan {
        ratio: opts.ratio,
        mode: opts.mode,
        scale,
        container,
        metrics,
        sections,
    }
}
