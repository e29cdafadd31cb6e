// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deterministic project identity reconciliation.
//!
//! Resolution (`resolve`) is a pure function: given a set of inventory URLs
//! and the three consulted authorities, it always produces the same
//! [`wd_core::IdentityScanResult`] and derived patches. Applying a patch
//! (`apply`) is a separate, explicitly out-of-band step — nothing in this
//! crate writes to CMP on its own.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod apply;
mod authority;
mod patch;
mod resolve;
mod url;

pub use apply::{apply_patch, ApplyOutcome, CmpRowState, CmpTarget};
pub use authority::{Authorities, CmpProjectRecord};
pub use patch::{derive_patch, derive_patches};
pub use resolve::{mint_uuid, resolve_all, resolve_one, NAMESPACE_FEDERATION};
pub use url::{normalize, NormalizedUrl};
