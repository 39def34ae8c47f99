//! Paint commands: a render plan laid out onto a concrete pixel surface.

use crate::rendering::layout::{
    Container, LayoutMetrics, RenderPlan, SectionLayout, REFERENCE_WIDTH,
};

pub type Rgba = (u8, u8, u8, u8);

pub const BACKGROUND: Rgba = (0, 0, 0, 255);
pub const FOREGROUND: Rgba = (255, 255, 255, 255);
/// `rgba(255,255,255,0.2)` over the black background
pub const DIVIDER: Rgba = (51, 51, 51, 255);

/// Average glyph advance as a fraction of the font size.
pub const GLYPH_ADVANCE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        size: f64,
        text: String,
        rgba: Rgba,
    },
    /// A logo scaled to fit (contain) inside the box; rasterizers draw
    /// `fallback` as text when `src` cannot be loaded.
    Image {
        x: i32,
        y: i32,
        max_width: u32,
        max_height: u32,
        src: String,
        fallback: String,
        fallback_size: f64,
    },
}

/// Pixel size of the surface the plan paints onto.
///
/// Responsive plans use the reference width and derive height from the
/// aspect ratio.
pub fn surface_size(plan: &RenderPlan) -> (u32, u32) {
    match plan.container {
        Container::Fixed { width, height } => (width, height),
        Container::Responsive { aspect_width, aspect_height } => {
            let width = REFERENCE_WIDTH as u32;
            (width, width * aspect_height / aspect_width.max(1))
        }
    }
}

/// Estimated pixel width of `text` at `size`.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_ADVANCE
}

fn px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}

/// Width the entry occupies in a flow row.
fn entry_width(m: &LayoutMetrics, large: bool, has_image: bool, name: &str) -> f64 {
    if has_image {
        m.logo_box(large).0
    } else {
        text_width(name, m.placeholder_font_size)
    }
}

/// Lay out `plan` and return the commands in paint order.
pub fn build_display_list(plan: &RenderPlan) -> Vec<PaintCommand> {
    let (width, height) = surface_size(plan);
    let m = &plan.metrics;
    let mut cmds = vec![PaintCommand::SolidRect { x: 0, y: 0, width, height, rgba: BACKGROUND }];

    let left = m.padding;
    let content_w = (width as f64 - m.padding * 2.0).max(0.0);
    let right = left + content_w;
    let mut y = m.padding;

    for section in &plan.sections {
        if let Some(label) = &section.label {
            cmds.push(PaintCommand::Text {
                x: left as i32,
                y: y as i32,
                size: m.label_font_size,
                text: label.to_uppercase(),
                rgba: FOREGROUND,
            });
            y += m.label_font_size + m.label_padding;
            cmds.push(PaintCommand::SolidRect {
                x: left as i32,
                y: y as i32,
                width: px(content_w),
                height: 1,
                rgba: DIVIDER,
            });
            y += 1.0 + m.label_margin;
        }

        let (row_gap, col_gap) = match section.layout {
            SectionLayout::SingleRow => (m.row_flow_row_gap, m.row_flow_column_gap),
            SectionLayout::Grid { .. } => (m.grid_row_gap, m.grid_column_gap),
        };
        // Grid cells are evenly sized; single-row items advance by their own width.
        let cell_w = match section.layout {
            SectionLayout::SingleRow => None,
            SectionLayout::Grid { min_cell_width } => {
                let cols = ((content_w + col_gap) / (min_cell_width + col_gap)).floor().max(1.0);
                Some((content_w - (cols - 1.0) * col_gap) / cols)
            }
        };

        let mut x = left;
        let mut row_h: f64 = 0.0;
        for e in &section.entries {
            let (box_w, box_h) = m.logo_box(e.large);
            let w = cell_w
                .unwrap_or_else(|| entry_width(m, e.large, e.image_src.is_some(), &e.name));
            if x > left && x + w > right + 0.5 {
                x = left;
                y += row_h + row_gap;
                row_h = 0.0;
            }
            match &e.image_src {
                Some(src) => {
                    cmds.push(PaintCommand::Image {
                        x: x as i32,
                        y: y as i32,
                        max_width: px(box_w.min(w)),
                        max_height: px(box_h),
                        src: src.clone(),
                        fallback: e.name.clone(),
                        fallback_size: m.placeholder_font_size,
                    });
                    row_h = row_h.max(box_h);
                }
                None => {
                    cmds.push(PaintCommand::Text {
                        x: x as i32,
                        y: y as i32,
                        size: m.placeholder_font_size,
                        text: e.name.clone(),
                        rgba: FOREGROUND,
                    });
                    row_h = row_h.max(m.placeholder_font_size);
                }
            }
            x += w + col_gap;
        }
        y += row_h + m.section_gap;
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Member;
    use crate::rendering::layout::{compute_render_plan, LayoutOptions};
    use crate::{FixedSize, Mode};

    #[test]
    fn background_covers_fixed_surface() {
        let opts = LayoutOptions {
            fixed_size: Some(FixedSize::new(1500, 1500)),
            ..Default::default()
        };
        let plan = compute_render_plan(&[], &opts);
        let cmds = build_display_list(&plan);
        assert_eq!(
            cmds,
            vec![PaintCommand::SolidRect {
                x: 0,
                y: 0,
                width: 1500,
                height: 1500,
                rgba: BACKGROUND,
            }]
        );
    }

    #[test]
    fn tier_sections_get_uppercase_label_and_divider() {
        let members = vec![Member::new("Acme", "premier").with_logo("logos/acme.png")];
        let plan = compute_render_plan(&members, &LayoutOptions::default());
        let cmds = build_display_list(&plan);
        assert!(matches!(&cmds[1], PaintCommand::Text { text, .. } if text == "PREMIER MEMBERS"));
        assert!(matches!(
            &cmds[2],
            PaintCommand::SolidRect { height: 1, rgba, .. } if *rgba == DIVIDER
        ));
        assert!(matches!(&cmds[3], PaintCommand::Image { fallback, .. } if fallback == "Acme"));
    }

    #[test]
    fn grid_wraps_to_next_row() {
        let members: Vec<Member> = (0..12)
            .map(|i| Member::new(format!("M{:02}", i), "industry").with_logo("x.png"))
            .collect();
        let opts = LayoutOptions { mode: Mode::Alphabetical, ..Default::default() };
        let plan = compute_render_plan(&members, &opts);
        let ys: Vec<i32> = build_display_list(&plan)
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Image { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys.len(), 12);
        // 920px of content fits five 150px cells per row
        assert_eq!(ys[0], ys[4]);
        assert!(ys[5] > ys[4]);
    }

    #[test]
    fn responsive_surface_follows_aspect() {
        let plan = compute_render_plan(&[], &LayoutOptions::default());
        assert_eq!(surface_size(&plan), (1000, 562));
    }
}
