use crate::helpers::time::now_i64;

/// Access token held by the cache slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub cached_at_unix_ts: i64, // UNIX TIMESTAMP, informational only
}

impl CachedToken {
    pub fn new(value: String) -> Self {
        Self { value, cached_at_unix_ts: now_i64() }
    }
}

/// Deployment environment of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentMode {
    Production,
    #[default]
    Development,
}

impl EnvironmentMode {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "production" => EnvironmentMode::Production,
            _ => EnvironmentMode::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == EnvironmentMode::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_production_name_is_production() {
        assert!(EnvironmentMode::from_name("production").is_production());
        assert!(EnvironmentMode::from_name(" Production ").is_production());
        assert!(!EnvironmentMode::from_name("prod").is_production());
        assert!(!EnvironmentMode::from_name("").is_production());
    }
}
