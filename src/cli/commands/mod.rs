//! Command implementations organized by category.

/// Dish commands: list, add, edit, status, delete
pub mod dish;

/// Outlet profile and catalog listings
pub mod general;

use crate::errors::{Error, Result};

/// Turns a failed action into a `❌` reply.
///
/// Store and configuration failures are not the owner's to fix and are passed on.
pub(crate) fn reply_error(error: Error) -> Result<String> {
    match error {
        Error::Database(_) | Error::Config { .. } => Err(error),
        other => Ok(format!("❌ {other}")),
    }
}
