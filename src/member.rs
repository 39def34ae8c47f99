//! Member records and the JSON document they are loaded from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A sponsorship tier.
///
/// The five known tiers have a fixed display order (see [`Tier::ORDER`]).
/// Any other string found in the data is kept as [`Tier::Other`] so that it
/// survives a load/save round trip, but it is never rendered in tiered mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    Founding,
    ChairmansCircle,
    Executive,
    Premier,
    Industry,
    Other(String),
}

impl Tier {
    /// Fixed tier order used for tiered rendering and canonical save order.
    pub const ORDER: [Tier; 5] = [
        Tier::Founding,
        Tier::ChairmansCircle,
        Tier::Executive,
        Tier::Premier,
        Tier::Industry,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Tier::Founding => "founding",
            Tier::ChairmansCircle => "chairmans_circle",
            Tier::Executive => "executive",
            Tier::Premier => "premier",
            Tier::Industry => "industry",
            Tier::Other(s) => s,
        }
    }

    /// Human readable section heading.
    pub fn label(&self) -> &str {
        match self {
            Tier::Founding => "Founding Members",
            Tier::ChairmansCircle => "Chairman's Circle",
            Tier::Executive => "Executive Members",
            Tier::Premier => "Premier Members",
            Tier::Industry => "Industry Members",
            Tier::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Tier::Other(_))
    }

    /// Position in [`Tier::ORDER`], `None` for unknown tiers.
    pub fn rank(&self) -> Option<usize> {
        Tier::ORDER.iter().position(|t| t == self)
    }

    /// Tiers drawn with the large logo treatment.
    pub fn is_large(&self) -> bool {
        matches!(self, Tier::Founding | Tier::ChairmansCircle)
    }

    /// Tiers laid out as a single unbounded horizontal flow instead of a grid.
    pub fn is_single_row(&self) -> bool {
        matches!(
            self,
            Tier::Founding | Tier::ChairmansCircle | Tier::Premier | Tier::Industry
        )
    }
}

impl From<String> for Tier {
    fn from(s: String) -> Self {
        match s.as_str() {
            "founding" => Tier::Founding,
            "chairmans_circle" => Tier::ChairmansCircle,
            "executive" => Tier::Executive,
            "premier" => Tier::Premier,
            "industry" => Tier::Industry,
            _ => Tier::Other(s),
        }
    }
}

impl From<&str> for Tier {
    fn from(s: &str) -> Self {
        Tier::from(s.to_string())
    }
}

impl From<Tier> for String {
    fn from(t: Tier) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sponsoring organization.
///
/// `tier` and `is_founding` are independent fields: a member may be
/// `executive` and still flagged as founding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Identity key within a list
    pub name: String,
    pub tier: Tier,
    /// Absolute URL or path relative to the data file's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub is_founding: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, tier: impl Into<Tier>) -> Self {
        Self {
            name: name.into(),
            tier: tier.into(),
            logo_url: None,
            is_founding: false,
        }
    }

    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    pub fn founding(mut self, is_founding: bool) -> Self {
        self.is_founding = is_founding;
        self
    }

    /// Logo path if one is set and non-empty.
    pub fn logo(&self) -> Option<&str> {
        self.logo_url.as_deref().filter(|s| !s.is_empty())
    }
}

pub type MemberList = Vec<Member>;

/// The JSON data file: a `members` array plus opaque `tiers` metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembersDocument {
    #[serde(default)]
    pub members: MemberList,
    #[serde(default)]
    pub tiers: serde_json::Value,
}

impl MembersDocument {
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a document from disk.
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Pretty-printed JSON, as committed to the remote store.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Find the first member with `name`.
pub fn find_member<'a>(members: &'a [Member], name: &str) -> Option<&'a Member> {
    members.iter().find(|m| m.name == name)
}

/// Reorder `members` into canonical tier order.
///
/// Known tiers come first in [`Tier::ORDER`], each keeping its relative
/// order. Members with unknown tiers follow, also in their original order.
pub fn canonical_order(members: &[Member]) -> MemberList {
    let mut ordered = Vec::with_capacity(members.len());
    for tier in Tier::ORDER.iter() {
        ordered.extend(members.iter().filter(|m| &m.tier == tier).cloned());
    }
    ordered.extend(members.iter().filter(|m| !m.tier.is_known()).cloned());
    ordered
}

/// Number of members in each known tier, in tier order.
pub fn tier_counts(members: &[Member]) -> Vec<(Tier, usize)> {
    Tier::ORDER
        .iter()
        .map(|t| (t.clone(), members.iter().filter(|m| &m.tier == t).count()))
        .collect()
}
