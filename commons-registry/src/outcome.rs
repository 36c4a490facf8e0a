//! Reports returned by batch operations.

use serde::Serialize;

/// Result of a batch removal.
///
/// Every input entry is recorded exactly once, in `removed` or `failed`, in
/// input order. A name listed twice therefore appears twice.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OperationOutcome {
    removed: Vec<String>,
    failed: Vec<(String, String)>,
}

impl OperationOutcome {
    pub(crate) fn record_success(&mut self, name: String) {
        self.removed.push(name);
    }

    pub(crate) fn record_failure(&mut self, name: String, error: String) {
        self.failed.push((name, error));
    }

    /// Names that were removed, in processing order.
    #[must_use]
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// `(name, error)` pairs for names that could not be removed.
    #[must_use]
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    /// Number of names attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.failed.len()
    }

    /// `removed / attempted`, or `0.0` for an empty batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        let attempted = self.attempted();
        if attempted == 0 {
            0.0
        } else {
            self.removed.len() as f64 / attempted as f64
        }
    }

    /// Returns `true` when nothing failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Consumes the outcome, keeping only the removed names.
    #[must_use]
    pub fn into_removed(self) -> Vec<String> {
        self.removed
    }
}

/// Result of a batch registration.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegistrationReport {
    registered: Vec<(String, String)>,
    failed: Vec<(String, String)>,
}

impl RegistrationReport {
    pub(crate) fn record_success(&mut self, name: String, description: String) {
        self.registered.push((name, description));
    }

    pub(crate) fn record_failure(&mut self, name: String, error: String) {
        self.failed.push((name, error));
    }

    /// `(name, description)` of every registered tool, in catalog order.
    #[must_use]
    pub fn registered(&self) -> &[(String, String)] {
        &self.registered
    }

    /// `(name, error)` pairs the runtime rejected.
    #[must_use]
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    /// Consumes the report, keeping the registered entries.
    #[must_use]
    pub fn into_registered(self) -> Vec<(String, String)> {
        self.registered
    }
}

/// Result of a batch replacement.
///
/// When `rollback_performed` is set, `added` is empty: whatever the failed add
/// phase had registered was taken back out.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReplaceOutcome {
    pub(crate) removed: Vec<String>,
    pub(crate) added: Vec<String>,
    pub(crate) restored: Vec<String>,
    pub(crate) rollback_performed: bool,
    pub(crate) errors: Vec<(String, String)>,
}

impl ReplaceOutcome {
    /// Names removed during the remove phase.
    #[must_use]
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// Names registered during the add phase and still registered.
    #[must_use]
    pub fn added(&self) -> &[String] {
        &self.added
    }

    /// Removed names re-registered from caller-supplied originals.
    #[must_use]
    pub fn restored(&self) -> &[String] {
        &self.restored
    }

    /// Whether the add phase failed and a rollback was attempted.
    #[must_use]
    pub fn rollback_performed(&self) -> bool {
        self.rollback_performed
    }

    /// Every `(name, error)` from either phase and from the rollback.
    #[must_use]
    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }

    /// Returns `true` when both phases finished without errors.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.rollback_performed && self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outcome_has_zero_rate() {
        let outcome = OperationOutcome::default();
        assert_eq!(outcome.attempted(), 0);
        assert!(outcome.success_rate().abs() < f64::EPSILON);
        assert!(outcome.is_complete());
    }

    #[test]
    fn success_rate_counts_both_lists() {
        let mut outcome = OperationOutcome::default();
        outcome.record_success("a".into());
        outcome.record_failure("b".into(), "not registered".into());
        outcome.record_success("c".into());
        outcome.record_success("d".into());

        assert_eq!(outcome.attempted(), 4);
        assert!((outcome.success_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(outcome.removed(), ["a", "c", "d"]);
    }
}
