//! Caller-supplied per-item checks

use crate::{Fields, ItemLabel};

/// Error raised by an [`ItemCheck`]; kept unchanged as the error source.
pub type CheckError = Box<dyn std::error::Error + Send + Sync>;

/// Result of an [`ItemCheck`].
pub type CheckResult = std::result::Result<(), CheckError>;

/// Domain-specific validation layered on top of the structural checks.
///
/// Runs once per item, after the item has passed the field checks.
/// Closures of the right shape implement this trait.
pub trait ItemCheck: Send + Sync {
    fn check(&self, fields: &Fields, label: &ItemLabel) -> CheckResult;
}

impl<F> ItemCheck for F
where
    F: Fn(&Fields, &ItemLabel) -> CheckResult + Send + Sync,
{
    fn check(&self, fields: &Fields, label: &ItemLabel) -> CheckResult {
        self(fields, label)
    }
}
