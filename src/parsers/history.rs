use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{EntryDescriptor, RawDocument};
use crate::store::ReadError;

/// Parse the JSON stored under the recently-opened key.
///
/// The document must be an object with an `entries` array. Individual
/// entries that fail to deserialize are logged and skipped.
pub fn parse_history_payload(payload: &str) -> Result<RawDocument, ReadError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| ReadError::MalformedPayload { reason: format!("invalid JSON: {}", e) })?;

    let items = value.get("entries").and_then(Value::as_array).ok_or_else(|| {
        ReadError::MalformedPayload { reason: "document has no `entries` list".to_string() }
    })?;

    let mut entries = Vec::with_capacity(items.len());
    let mut skipped_count = 0;

    for (idx, item) in items.iter().enumerate() {
        match EntryDescriptor::deserialize(item) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(index = idx, error = %e, "Skipping malformed history entry");
                skipped_count += 1;
            }
        }
    }

    if skipped_count > 0 {
        debug!(parsed = entries.len(), skipped = skipped_count, "Parsed history payload");
    }

    Ok(RawDocument { entries })
}
