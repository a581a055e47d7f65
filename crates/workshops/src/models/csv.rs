use serde::{Deserialize, Serialize};

/// Body of an accepted CSV export request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvResponse {
    /// Id of the export job, also the stem of the export file.
    pub tracking_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_tracking_id_in_camel_case() {
        let response = CsvResponse {
            tracking_id: "abc".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "trackingId": "abc" }));
    }
}
