//! Dashboard state: the canonical member list and the current display
//! selection.

use crate::editor::TierEditor;
use crate::embed::embed_snippet;
use crate::export::{export, ExportRequest, ExportedImage};
use crate::member::{tier_counts, MemberList, MembersDocument, Tier};
use crate::rendering::layout::{compute_render_plan, LayoutOptions, RenderPlan};
use crate::rendering::raster::Rasterizer;
use crate::{GridConfig, Mode, Ratio};
use std::path::PathBuf;

pub struct Dashboard {
    members: MemberList,
    tiers: serde_json::Value,
    ratio: Ratio,
    mode: Mode,
    config: GridConfig,
}

impl Dashboard {
    pub fn new(document: MembersDocument, config: GridConfig) -> Self {
        Self {
            members: document.members,
            tiers: document.tiers,
            ratio: Ratio::default(),
            mode: Mode::default(),
            config,
        }
    }

    pub fn members(&self) -> &[crate::Member] {
        &self.members
    }

    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_ratio(&mut self, ratio: Ratio) {
        self.ratio = ratio;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Responsive preview of the current selection.
    pub fn preview_plan(&self) -> RenderPlan {
        let opts = LayoutOptions {
            ratio: self.ratio,
            mode: self.mode,
            fixed_size: None,
            base_url: self.config.base_url.clone(),
        };
        compute_render_plan(&self.members, &opts)
    }

    pub fn total(&self) -> usize {
        self.members.len()
    }

    pub fn tier_counts(&self) -> Vec<(Tier, usize)> {
        tier_counts(&self.members)
    }

    /// Embed snippet for the current selection.
    pub fn embed_code(&self) -> String {
        embed_snippet(&self.config.host_url, self.ratio, self.mode)
    }

    pub fn export_request(&self) -> ExportRequest {
        ExportRequest::new(self.ratio, self.mode)
    }

    /// Render the current selection at its export size.
    ///
    /// A failed export is logged and yields `None`; the dashboard state is
    /// unchanged either way.
    pub fn export<R: Rasterizer + ?Sized>(&self, rasterizer: &R) -> Option<ExportedImage> {
        let request = self.export_request();
        match export(&self.members, &request, &self.config.base_url, rasterizer) {
            Ok(img) => Some(img),
            Err(e) => {
                log::error!("Failed to generate {}: {}", request.file_name, e);
                None
            }
        }
    }

    /// Export and write the PNG into the configured export directory.
    pub fn export_to_disk<R: Rasterizer + ?Sized>(&self, rasterizer: &R) -> Option<PathBuf> {
        let img = self.export(rasterizer)?;
        match img.write_to_dir(&self.config.export_dir) {
            Ok(path) => Some(path),
            Err(e) => {
                log::error!("Failed to write {}: {}", img.file_name, e);
                None
            }
        }
    }

    /// Start an editing session on a copy of the canonical list.
    pub fn open_editor(&self) -> TierEditor {
        TierEditor::new(&self.members)
    }

    /// Replace the canonical list with an editor's saved result.
    pub fn apply_editor_save(&mut self, members: MemberList) {
        log::info!("Member list replaced ({} -> {} members)", self.members.len(), members.len());
        self.members = members;
    }

    /// Document to persist: current members plus the untouched tier metadata.
    pub fn document(&self) -> MembersDocument {
        MembersDocument {
            members: self.members.clone(),
            tiers: self.tiers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Member;

    fn dashboard() -> Dashboard {
        let doc = MembersDocument {
            members: vec![
                Member::new("A", "industry"),
                Member::new("B", "founding").founding(true),
                Member::new("C", "industry"),
            ],
            tiers: serde_json::json!({"founding": {"label": "Founding"}}),
        };
        Dashboard::new(doc, GridConfig::default())
    }

    #[test]
    fn preview_follows_selection() {
        let mut d = dashboard();
        assert_eq!(d.preview_plan().sections.len(), 2);
        d.set_mode(Mode::Alphabetical);
        assert_eq!(d.preview_plan().member_names(), vec!["B", "A", "C"]);
        d.set_ratio(Ratio::Square);
        assert_eq!(d.export_request().file_name, "bfc-members-square-alphabetical.png");
        assert!(d.embed_code().contains("ratio=\"square\""));
    }

    #[test]
    fn counts_per_tier() {
        let d = dashboard();
        assert_eq!(d.total(), 3);
        let counts = d.tier_counts();
        assert_eq!(counts[0], (Tier::Founding, 1));
        assert_eq!(counts[4], (Tier::Industry, 2));
    }

    #[test]
    fn editor_save_replaces_canonical_list_and_cancel_does_not() {
        let mut d = dashboard();
        let mut ed = d.open_editor();
        ed.start_drag("C");
        ed.drag_end(Some("A"));
        ed.cancel();
        assert_eq!(d.members()[0].name, "A");

        let mut ed = d.open_editor();
        ed.start_drag("C");
        ed.drag_end(Some("A"));
        d.apply_editor_save(ed.save());
        let names: Vec<_> = d.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        assert_eq!(d.document().tiers["founding"]["label"], "Founding");
    }
}
