//! Tier editor: drag-and-drop reassignment and reordering of members.
//!
//! The editor owns a working copy of the member list. Every transition is a
//! synchronous method call that leaves the working list consistent; nothing
//! reaches the canonical list until [`TierEditor::save`].

use crate::member::{canonical_order, find_member, Member, MemberList, Tier};
use crate::{Error, Result};

/// Message shown when the add-member form is incomplete.
pub const MISSING_FIELDS: &str = "Please fill in name and logo URL";

/// Interaction state of the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Idle,
    /// A member is being dragged; `source_tier` is its tier at drag start
    Dragging { active: String, source_tier: Tier },
    /// The add-member form is open
    AddingMember,
}

/// Contents of the add-member form.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub name: String,
    pub tier: Tier,
    pub logo_url: String,
}

impl Default for MemberDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            tier: Tier::Executive,
            logo_url: String::new(),
        }
    }
}

/// Yes/no prompt supplied by the host UI.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Logo path for an uploaded file: whitespace runs become `-`, lowercased,
/// under `logos/`.
pub fn logo_path_for_upload(file_name: &str) -> String {
    let mut normalized = String::with_capacity(file_name.len());
    let mut in_space = false;
    for c in file_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                normalized.push('-');
            }
            in_space = true;
        } else {
            normalized.push(c);
            in_space = false;
        }
    }
    format!("logos/{}", normalized.to_lowercase())
}

/// Move the element at `from` to `to`, shifting the ones in between.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

#[derive(Debug, Clone)]
pub struct TierEditor {
    members: MemberList,
    state: EditorState,
    draft: MemberDraft,
}

impl TierEditor {
    /// Start a session on a copy of `members`.
    pub fn new(members: &[Member]) -> Self {
        Self {
            members: members.to_vec(),
            state: EditorState::Idle,
            draft: MemberDraft::default(),
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Members currently assigned to `tier`, in working-list order.
    pub fn members_in_tier(&self, tier: &Tier) -> Vec<&Member> {
        self.members.iter().filter(|m| &m.tier == tier).collect()
    }

    /// The member under the cursor while dragging.
    pub fn active_member(&self) -> Option<&Member> {
        match &self.state {
            EditorState::Dragging { active, .. } => find_member(&self.members, active),
            _ => None,
        }
    }

    /// Tiers whose drop zone is highlighted: all but the drag source.
    pub fn highlighted_tiers(&self) -> Vec<Tier> {
        match &self.state {
            EditorState::Dragging { source_tier, .. } => Tier::ORDER
                .iter()
                .filter(|t| *t != source_tier)
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn start_drag(&mut self, name: &str) {
        let Some(member) = find_member(&self.members, name) else {
            log::debug!("start_drag: no member named {:?}", name);
            return;
        };
        self.state = EditorState::Dragging {
            active: member.name.clone(),
            source_tier: member.tier.clone(),
        };
    }

    /// Live cross-tier move: adopt the target's tier if it differs.
    pub fn drag_over(&mut self, target: &str) {
        let EditorState::Dragging { active, .. } = &self.state else {
            return;
        };
        let Some(target_tier) = find_member(&self.members, target).map(|m| m.tier.clone()) else {
            return;
        };
        if let Some(m) = self.members.iter_mut().find(|m| &m.name == active) {
            if m.tier != target_tier {
                log::debug!("Moving {} from {} to {}", m.name, m.tier, target_tier);
                m.tier = target_tier;
            }
        }
    }

    /// Drop. Within one tier the active member moves to the target's slot;
    /// the tier's members are written back into the positions they already
    /// occupied in the working list. Dropping on nothing keeps any tier
    /// change made during the drag.
    pub fn drag_end(&mut self, target: Option<&str>) {
        let state = std::mem::replace(&mut self.state, EditorState::Idle);
        let EditorState::Dragging { active, .. } = state else {
            return;
        };
        let Some(target) = target else {
            return;
        };
        if target == active {
            return;
        }
        let (Some(a), Some(t)) = (
            find_member(&self.members, &active),
            find_member(&self.members, target),
        ) else {
            return;
        };
        if a.tier != t.tier {
            return;
        }
        let tier = a.tier.clone();

        let slots: Vec<usize> = self
            .members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.tier == tier)
            .map(|(i, _)| i)
            .collect();
        let mut group: Vec<Member> = slots.iter().map(|&i| self.members[i].clone()).collect();
        let from = group.iter().position(|m| m.name == active);
        let to = group.iter().position(|m| m.name == target);
        if let (Some(from), Some(to)) = (from, to) {
            move_item(&mut group, from, to);
            for (slot, member) in slots.into_iter().zip(group) {
                self.members[slot] = member;
            }
        }
    }

    /// Abort the drag; tier changes made by [`TierEditor::drag_over`] stand.
    pub fn cancel_drag(&mut self) {
        if matches!(self.state, EditorState::Dragging { .. }) {
            self.state = EditorState::Idle;
        }
    }

    /// Remove `name` after the operator confirms. Returns whether anything
    /// was removed.
    pub fn delete_member<C: Confirm + ?Sized>(&mut self, name: &str, confirm: &mut C) -> bool {
        if !confirm.confirm(&format!("Remove {} from the grid?", name)) {
            return false;
        }
        let before = self.members.len();
        self.members.retain(|m| m.name != name);
        before != self.members.len()
    }

    /// Validate `draft` and append it to the working list.
    pub fn add_member(&mut self, draft: MemberDraft) -> Result<()> {
        if draft.name.is_empty() || draft.logo_url.is_empty() {
            return Err(Error::Validation(MISSING_FIELDS.to_string()));
        }
        let is_founding = draft.tier == Tier::Founding;
        self.members.push(Member {
            name: draft.name,
            tier: draft.tier,
            logo_url: Some(draft.logo_url),
            is_founding,
        });
        Ok(())
    }

    pub fn open_add_member(&mut self) {
        if self.state == EditorState::Idle {
            self.state = EditorState::AddingMember;
        }
    }

    pub fn close_add_member(&mut self) {
        if self.state == EditorState::AddingMember {
            self.state = EditorState::Idle;
        }
    }

    pub fn draft(&self) -> &MemberDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MemberDraft {
        &mut self.draft
    }

    /// Fill the draft's logo path from an uploaded file name.
    pub fn set_logo_from_file(&mut self, file_name: &str) {
        self.draft.logo_url = logo_path_for_upload(file_name);
    }

    /// Submit the add-member form. On success the form resets and closes;
    /// on failure it stays open with its contents.
    pub fn confirm_add_member(&mut self) -> Result<()> {
        self.add_member(self.draft.clone())?;
        self.draft = MemberDraft::default();
        self.state = EditorState::Idle;
        Ok(())
    }

    /// Finish the session, returning the working list in canonical tier order.
    pub fn save(self) -> MemberList {
        canonical_order(&self.members)
    }

    /// Discard the working list.
    pub fn cancel(self) {
        log::debug!("Editor cancelled; {} working members discarded", self.members.len());
    }
}
