//! Core controller logic for the file-manager widget.
//!
//! This module provides:
//! - [`ReloadCoordinator`] serialized, coalesced listing refreshes
//! - [`UploadQueue`] sequential uploads with per-task cancellation
//! - [`services`] collaborator contracts for the server and the view

pub mod error;
mod reload;
pub mod services;
mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use reload::{PendingReloads, ReloadCoordinator, SuppressionGuard};
pub use upload::{UploadHandle, UploadQueue};
