use serde::{Deserialize, Deserializer};

// `?page=abc` falls back to the default page instead of rejecting the request
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.trim().parse::<u32>().ok()))
}

// forms send an empty string for a field the user never filled in
pub fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}
