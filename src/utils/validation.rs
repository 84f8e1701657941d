use crate::utils::error::{ApiError, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ApiError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// 檢查字串長度 (以字元計算)，回傳錯誤原因
pub fn check_min_length(value: &str, min_length: usize) -> std::result::Result<(), String> {
    if value.chars().count() < min_length {
        return Err(format!("String is shorter than {} characters", min_length));
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct StringRule {
    name: &'static str,
    min_length: usize,
}

/// Declarative shape check for a mutation's input map.
///
/// Every declared key must be present and hold a string of at least
/// `min_length` characters. Undeclared keys are rejected. All failures are
/// collected into a single `ApiError::ValidationError`.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    rules: Vec<StringRule>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, name: &'static str, min_length: usize) -> Self {
        self.rules.push(StringRule { name, min_length });
        self
    }

    pub fn check(&self, input: &HashMap<String, Value>) -> Result<HashMap<String, String>> {
        let mut errors = BTreeMap::new();
        let mut checked = HashMap::new();

        for rule in &self.rules {
            match input.get(rule.name) {
                None | Some(Value::Null) => {
                    errors.insert(rule.name.to_string(), "is required".to_string());
                }
                Some(Value::String(s)) => match check_min_length(s, rule.min_length) {
                    Ok(()) => {
                        checked.insert(rule.name.to_string(), s.clone());
                    }
                    Err(reason) => {
                        errors.insert(rule.name.to_string(), reason);
                    }
                },
                Some(_) => {
                    errors.insert(rule.name.to_string(), "value is not a string".to_string());
                }
            }
        }

        for key in input.keys() {
            if !self.rules.iter().any(|rule| rule.name == key) {
                errors.insert(key.clone(), "is not allowed key".to_string());
            }
        }

        if errors.is_empty() {
            Ok(checked)
        } else {
            Err(ApiError::validation(errors))
        }
    }
}
