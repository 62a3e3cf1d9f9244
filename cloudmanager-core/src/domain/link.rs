//! HAL link types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Relation name of a step's cancel link
pub const REL_CANCEL: &str = "http://ns.adobe.com/adobecloud/rel/pipeline/cancel";
/// Relation name of a step's advance link
pub const REL_ADVANCE: &str = "http://ns.adobe.com/adobecloud/rel/pipeline/advance";
/// Relation name of a step's logs link
pub const REL_LOGS: &str = "http://ns.adobe.com/adobecloud/rel/pipeline/logs";

/// A single HAL link (`{ "href": "..." }`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalLink {
    pub href: String,
}

impl HalLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Links attached to a step state, keyed by relation name
///
/// Any of them may be absent; which ones the API includes depends on the
/// step's action and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepLinks(BTreeMap<String, HalLink>);

impl StepLinks {
    /// Look up a link by relation name
    pub fn get(&self, rel: &str) -> Option<&HalLink> {
        self.0.get(rel)
    }

    /// Add or replace the link for a relation
    pub fn insert(&mut self, rel: impl Into<String>, link: HalLink) {
        self.0.insert(rel.into(), link);
    }

    pub fn cancel(&self) -> Option<&HalLink> {
        self.get(REL_CANCEL)
    }

    pub fn advance(&self) -> Option<&HalLink> {
        self.get(REL_ADVANCE)
    }

    pub fn logs(&self) -> Option<&HalLink> {
        self.get(REL_LOGS)
    }
}
