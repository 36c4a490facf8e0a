//! Startup log lines for registration batches.

use tracing::{info, warn};

/// Logs how many tools a server registered out of how many it tried.
pub fn log_registration_summary(registered: usize, total: usize, server_name: &str) {
    if registered == total {
        info!(server = %server_name, registered, "registered all tools");
    } else {
        warn!(
            server = %server_name,
            registered,
            total,
            missing = total.saturating_sub(registered),
            "some tools failed to register"
        );
    }
}
