use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlates the log lines of one fact-check request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub Uuid);

impl CheckId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CheckId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = self.0.simple().to_string();
        write!(f, "{}", &full[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_short_and_ids_differ() {
        let a = CheckId::new();
        let b = CheckId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 8);
    }
}
