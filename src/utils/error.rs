use async_graphql::ErrorExtensions;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        /// 欄位名稱 -> 錯誤訊息
        fields: BTreeMap<String, String>,
    },

    #[error("{entity} matching {field} = {value:?} does not exist")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    #[error("{count} {entity} documents match {field} = {value:?}")]
    MultipleMatches {
        entity: String,
        field: String,
        value: String,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// 由欄位錯誤表建立驗證錯誤
    pub fn validation(fields: BTreeMap<String, String>) -> Self {
        let message = fields
            .iter()
            .map(|(field, reason)| format!("{}: {}", field, reason))
            .collect::<Vec<_>>()
            .join("; ");
        ApiError::ValidationError { message, fields }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::StorageError {
            message: message.into(),
        }
    }

    /// Machine-readable code attached to GraphQL errors.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::MultipleMatches { .. } => "CONFLICT",
            ApiError::ConfigError { .. }
            | ApiError::InvalidConfigValueError { .. }
            | ApiError::MissingConfigError { .. } => "CONFIG",
            ApiError::IoError(_)
            | ApiError::SerializationError(_)
            | ApiError::StorageError { .. } => "INTERNAL",
        }
    }

    /// HTTP status the boundary should answer with, when it differs from 200.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } | ApiError::MultipleMatches { .. } => Some(404),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ApiError::IoError(e) => format!("File access failed: {}", e),
            ApiError::SerializationError(e) => format!("Stored data is not valid JSON: {}", e),
            ApiError::StorageError { message } => format!("Storage failure: {}", message),
            ApiError::ConfigError { message } => format!("Configuration problem: {}", message),
            ApiError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting '{}' has invalid value '{}': {}", field, value, reason),
            ApiError::MissingConfigError { field } => {
                format!("Setting '{}' is required but was not provided", field)
            }
            ApiError::ValidationError { message, .. } => format!("Invalid input: {}", message),
            ApiError::NotFound { entity, value, .. } => {
                format!("No {} named '{}' exists", entity, value)
            }
            ApiError::MultipleMatches { entity, value, .. } => {
                format!("More than one {} named '{}' exists", entity, value)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ApiError::IoError(_) => "Check that the data file path exists and is writable",
            ApiError::SerializationError(_) => {
                "Restore the data file from a backup or remove it to start empty"
            }
            ApiError::StorageError { .. } => "Retry the request; check server logs for details",
            ApiError::ConfigError { .. } => "Check the TOML syntax of the configuration file",
            ApiError::InvalidConfigValueError { .. } => {
                "Fix the reported setting in the configuration file or command line"
            }
            ApiError::MissingConfigError { .. } => "Add the missing setting and restart",
            ApiError::ValidationError { .. } => "Correct the reported input fields and retry",
            ApiError::NotFound { .. } => "Create the referenced entity first",
            ApiError::MultipleMatches { .. } => "Use a name that identifies a single entity",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let Some(status) = self.http_status() {
                e.set("status", i32::from(status));
            }
            if let ApiError::ValidationError { fields, .. } = self {
                if let Some(value) = serde_json::to_value(fields)
                    .ok()
                    .and_then(|json| async_graphql::Value::from_json(json).ok())
                {
                    e.set("fields", value);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::NotFound {
            entity: "Department".to_string(),
            field: "name".to_string(),
            value: "Sales".to_string(),
        };
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(
            err.to_string(),
            "Department matching name = \"Sales\" does not exist"
        );
    }

    #[test]
    fn test_multiple_matches_is_conflict_with_404() {
        let err = ApiError::MultipleMatches {
            entity: "Role".to_string(),
            field: "name".to_string(),
            value: "Engineer".to_string(),
            count: 2,
        };
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.http_status(), Some(404));
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "is required".to_string());
        fields.insert("role".to_string(), "value is not a string".to_string());

        let err = ApiError::validation(fields);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.http_status(), None);
        assert_eq!(
            err.to_string(),
            "Validation error: name: is required; role: value is not a string"
        );
    }

    #[test]
    fn test_graphql_extension_carries_code_and_status() {
        let err = ApiError::NotFound {
            entity: "Role".to_string(),
            field: "name".to_string(),
            value: "Intern".to_string(),
        };
        let gql = err.extend();
        let extensions = gql.extensions.expect("extensions should be set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("NOT_FOUND"))
        );
        assert_eq!(
            extensions.get("status"),
            Some(&async_graphql::Value::from(404))
        );
    }
}
