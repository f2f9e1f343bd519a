use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Decodes each element of `rows` on its own. Elements that do not fit `T`
/// are logged and dropped so one bad record never costs the whole list.
pub fn keep_valid_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(row, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    row,
                    record = std::any::type_name::<T>(),
                    "Dropping malformed upstream record: {e}"
                );
                None
            }
        })
        .collect()
}

/// `deserialize_with` form of [`keep_valid_rows`]. A missing or `null` list
/// is empty.
pub fn lenient_rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let rows = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(keep_valid_rows(rows))
}
