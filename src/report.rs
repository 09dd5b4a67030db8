//! Where the loaders send their diagnostics.
//!
//! Components never log through a global hook directly, they are handed a [`Reporter`] instead.
//! [`LogReporter`] forwards everything to the `log` facade.

use log::{error, info, warn};

pub trait Reporter: Send + Sync {
    /// Something that aborts the current operation. The operation still returns its error.
    fn fatal(&self, message: &str);

    /// Something that went wrong but was recovered from.
    fn warn(&self, message: &str);

    fn info(&self, _message: &str) {}
}

/// A [`Reporter`] writing to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn fatal(&self, message: &str) {
        error!("{message}");
    }

    fn warn(&self, message: &str) {
        warn!("{message}");
    }

    fn info(&self, message: &str) {
        info!("{message}");
    }
}
