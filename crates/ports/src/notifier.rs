// crates/ports/src/notifier.rs
use notestat_shared_kernel::Result;

/// Best-effort user-facing reporting. Failures are logged by callers and never
/// abort a calculation.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str) -> Result<()>;
    fn error(&self, message: &str) -> Result<()>;
    fn progress(&self, processed: usize, total: usize) -> Result<()>;
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn info(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn error(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn progress(&self, _processed: usize, _total: usize) -> Result<()> {
        Ok(())
    }
}
