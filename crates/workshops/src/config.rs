use std::{env, path::PathBuf, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding every entity kind (default: "workshops")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub table_name: String,
    /// Endpoint override, e.g. DynamoDB Local (default: none)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub endpoint_url: Option<String>,
    /// Directory CSV exports are written to (default: "exports")
    pub export_dir: PathBuf,
    /// Client whose workshops are exported (default: "default")
    pub export_client_id: String,
    /// Maximum number of pending export jobs (default: 64)
    pub export_queue_capacity: usize,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "workshops")
    /// - `AWS_ENDPOINT_URL` - Endpoint override (default: none)
    /// - `CSV_EXPORT_DIR` - Export directory (default: "exports")
    /// - `CSV_EXPORT_CLIENT_ID` - Exported client (default: "default")
    /// - `CSV_EXPORT_QUEUE_CAPACITY` - Pending export jobs (default: 64)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME").unwrap_or_else(|_| "workshops".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            export_dir: env::var("CSV_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("exports")),
            export_client_id: env::var("CSV_EXPORT_CLIENT_ID")
                .unwrap_or_else(|_| "default".to_string()),
            export_queue_capacity: env::var("CSV_EXPORT_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config {
            table_name: "workshops".to_string(),
            endpoint_url: None,
            export_dir: PathBuf::from("exports"),
            export_client_id: "default".to_string(),
            export_queue_capacity: 64,
            request_timeout_seconds: 30,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("DYNAMODB_TABLE_NAME");
        env::remove_var("AWS_ENDPOINT_URL");
        env::remove_var("CSV_EXPORT_DIR");
        env::remove_var("CSV_EXPORT_CLIENT_ID");
        env::remove_var("CSV_EXPORT_QUEUE_CAPACITY");
        env::remove_var("REQUEST_TIMEOUT_SECS");

        let config = Config::from_env();

        assert_eq!(config.table_name, "workshops");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.export_dir, PathBuf::from("exports"));
        assert_eq!(config.export_client_id, "default");
        assert_eq!(config.export_queue_capacity, 64);
        assert_eq!(config.request_timeout_seconds, 10);
    }
}
