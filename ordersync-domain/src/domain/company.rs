use crate::prelude::{lenient_rows, StringExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraField {
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub field_value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExtraField {
    /// Empty strings count as no value.
    pub fn value(&self) -> Option<String> {
        match &self.field_value {
            Value::String(s) if !s.is_empty() => Some(s.to_owned()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A company record from the B2B directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub company_id: Option<u64>,
    pub company_name: Option<String>,
    pub extra_fields: Option<Vec<ExtraField>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Company {
    pub fn normalized_name(&self) -> Option<String> {
        self.company_name.as_deref().map(|name| name.normalized_name())
    }

    /// Value of the first extra field whose label matches `label`, compared
    /// upper-cased.
    pub fn field_value(&self, label: &str) -> Option<String> {
        let label = label.field_label();

        self.extra_fields
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|field| field.field_name.field_label() == label)
            .and_then(ExtraField::value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_count: Option<u64>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryMeta {
    pub message: Option<String>,
    pub pagination: Option<Pagination>,
}

/// Response envelope of `GET /api/v3/io/companies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDirectory {
    pub code: Option<i64>,
    #[serde(default, deserialize_with = "lenient_rows")]
    pub data: Vec<Company>,
    pub meta: Option<DirectoryMeta>,
}

impl CompanyDirectory {
    /// First company whose normalised name equals the normalised `name`.
    /// Blank names never match.
    pub fn find_by_name(&self, name: &str) -> Option<&Company> {
        let wanted = name.normalized_name();
        if wanted.is_empty() {
            return None;
        }

        let mut matches = self
            .data
            .iter()
            .filter(|company| company.normalized_name().as_deref() == Some(wanted.as_str()));

        let first = matches.next()?;
        let duplicates = matches.count();
        if duplicates > 0 {
            tracing::warn!(
                company_name = %wanted,
                company_id = first.company_id,
                duplicates,
                "Company directory holds more than one company with this name, using the first"
            );
        }

        Some(first)
    }

    /// How many companies the directory reports beyond the ones it returned.
    pub fn missing_rows(&self) -> Option<u64> {
        let total = self.meta.as_ref()?.pagination.as_ref()?.total_count?;
        let returned = self.data.len() as u64;

        (total > returned).then(|| total - returned)
    }
}
