//! Log DTOs

use serde::{Deserialize, Serialize};

/// Body returned by a step's logs link
///
/// The actual log content lives behind `redirect`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogRedirect {
    #[serde(default)]
    pub redirect: Option<String>,
}
