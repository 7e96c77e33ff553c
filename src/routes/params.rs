use serde::{Deserialize, Deserializer, de};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Keep only the first `limit` products. Negative or empty values are ignored.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
}

// `?limit=` arrives as an empty string and means "no limit".
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
