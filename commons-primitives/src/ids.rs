//! Batch identifier types.

use std::fmt::{self, Display, Formatter};

use uuid::Uuid;

/// Identifier correlating the log records of a single batch operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BatchId(Uuid);

impl BatchId {
    /// Generates a random batch identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for BatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        let first = BatchId::random();
        let second = BatchId::random();
        assert_ne!(first, second);
        assert_eq!(first.to_string().len(), 36);
    }
}
