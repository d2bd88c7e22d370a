use crate::errors::CoreError;
use crate::models::activity::Activity;

/// File name of the persisted list inside the data directory.
pub const FILE_NAME: &str = "activities.json";

/// Encode activities in display order.
///
/// Layout: a JSON array, position 0 = top of the list. Each record is
/// ```text
/// {"activity": str, "type": str, "participants": int,
///  "price": float, "accessibility": float, "link": str | null}
/// ```
/// There is no version field; the field set is the format.
pub fn encode(activities: &[&Activity]) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec_pretty(activities)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize activity list: {e}")))
}

/// Decode a persisted list. A blank file is an empty list.
pub fn decode(data: &[u8]) -> Result<Vec<Activity>, CoreError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let activities: Vec<Activity> = serde_json::from_slice(data)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize activity list: {e}")))?;
    if let Some(problem) = activities.iter().find_map(Activity::out_of_range) {
        return Err(CoreError::Deserialization(format!(
            "Invalid activity in saved list: {problem}"
        )));
    }
    Ok(activities)
}
