//! Embeddable element support: snippet generation, attribute mapping and
//! loading the member data an embed points at.

use crate::member::MemberList;
use crate::{Mode, Ratio};

/// Name of the custom element.
pub const ELEMENT_NAME: &str = "bfc-logo-grid";

/// HTML snippet an operator pastes into a page to embed the grid.
pub fn embed_snippet(host_url: &str, ratio: Ratio, mode: Mode) -> String {
    format!(
        r#"<!-- BFC Logo Grid Embed -->
<script src="{host}/bfc-logo-grid.js"></script>
<{el}
  ratio="{ratio}"
  mode="{mode}"
  data-url="{host}/members.json">
</{el}>"#,
        host = host_url,
        el = ELEMENT_NAME,
        ratio = ratio,
        mode = mode,
    )
}

/// Directory part of a data URL; relative logo paths resolve against it.
pub fn base_url_from_data_url(data_url: &str) -> String {
    match data_url.rfind('/') {
        Some(i) => data_url[..i].to_string(),
        None => String::new(),
    }
}

/// Attributes of an embedded element, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedAttributes {
    pub ratio: Ratio,
    pub mode: Mode,
    pub data_url: Option<String>,
}

impl EmbedAttributes {
    /// Missing or empty attributes mean landscape/tiered. Any other value
    /// than `landscape` renders square and any other value than `tiered`
    /// renders alphabetically.
    pub fn from_attrs(ratio: Option<&str>, mode: Option<&str>, data_url: Option<&str>) -> Self {
        let ratio = match ratio.filter(|s| !s.is_empty()) {
            None | Some("landscape") => Ratio::Landscape,
            Some(_) => Ratio::Square,
        };
        let mode = match mode.filter(|s| !s.is_empty()) {
            None | Some("tiered") => Mode::Tiered,
            Some(_) => Mode::Alphabetical,
        };
        Self {
            ratio,
            mode,
            data_url: data_url.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    pub fn base_url(&self) -> String {
        self.data_url.as_deref().map(base_url_from_data_url).unwrap_or_default()
    }
}

/// Members and logo base URL for an embedded grid.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedData {
    pub members: MemberList,
    pub base_url: String,
}

/// Fetch the data file behind an embed.
///
/// Failures are logged and produce an empty member list so the element
/// renders nothing instead of erroring.
#[cfg(feature = "remote")]
pub fn load_embedded(client: &reqwest::blocking::Client, attrs: &EmbedAttributes) -> EmbeddedData {
    let Some(url) = attrs.data_url.as_deref() else {
        return EmbeddedData::default();
    };
    let fetched = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.json::<crate::member::MembersDocument>());
    match fetched {
        Ok(doc) => EmbeddedData {
            members: doc.members,
            base_url: base_url_from_data_url(url),
        },
        Err(e) => {
            log::error!("BfcLogoGrid: Failed to load members data from {}: {}", url, e);
            EmbeddedData::default()
        }
    }
}
