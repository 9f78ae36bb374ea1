use serde::{Deserialize, Serialize};

/// The only status the core assigns on its own; every new order starts here.
pub const PENDING: &str = "Pending";

const DEFAULT_STATUSES: [&str; 5] = [
    PENDING,
    "InPreparation",
    "OnTheWay",
    "Delivered",
    "Cancelled",
];

/// The recognized order-status enumeration, supplied as configuration at
/// startup rather than hardcoded. Transition targets are validated against
/// this set; `Pending` must always be a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSet {
    recognized: Vec<String>,
}

impl Default for StatusSet {
    fn default() -> Self {
        Self {
            recognized: DEFAULT_STATUSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StatusSet {
    pub fn new(values: Vec<String>) -> anyhow::Result<Self> {
        if values.is_empty() {
            anyhow::bail!("status set empty");
        }
        if !values.iter().any(|v| v == PENDING) {
            anyhow::bail!("status set must include {PENDING}");
        }
        Ok(Self { recognized: values })
    }

    /// Parses a comma-separated list, e.g. from an env var.
    pub fn from_csv(csv: &str) -> anyhow::Result<Self> {
        Self::new(
            csv.split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
        )
    }

    pub fn contains(&self, status: &str) -> bool {
        self.recognized.iter().any(|v| v == status)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.recognized
    }
}
