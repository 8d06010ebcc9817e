use std::fmt;

/// Field-level constraint violations, collected rather than short-circuited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Records `message` when `failed` holds.
    pub fn check(&mut self, failed: bool, message: &str) {
        if failed {
            self.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<&str> for ValidationErrors {
    fn from(message: &str) -> Self {
        Self(vec![message.to_string()])
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
