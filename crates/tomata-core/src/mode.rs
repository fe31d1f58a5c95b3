use serde::{Deserialize, Serialize};

/// Session classification for a countdown: a focused work block or a break.
///
/// Serialized lowercase (`"work"` / `"break"`) to match the persisted
/// plan-list layout and the UI contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    pub fn is_work(self) -> bool {
        self == SessionKind::Work
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SessionKind::Work).unwrap(), "\"work\"");
        assert_eq!(serde_json::to_string(&SessionKind::Break).unwrap(), "\"break\"");
    }

    #[test]
    fn round_trips() {
        let kind: SessionKind = serde_json::from_str("\"break\"").unwrap();
        assert_eq!(kind, SessionKind::Break);
    }
}
