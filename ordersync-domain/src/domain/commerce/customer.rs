use crate::prelude::StringExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    /// The customer's company name in its comparison form, or `None` when the
    /// customer has no company on file.
    pub fn company_name(&self) -> Option<String> {
        self.company
            .as_deref()
            .map(|name| name.normalized_name())
            .filter(|name| !name.is_empty())
    }
}
