//! rolemine-cluster - Entitlement fingerprint clustering
//!
//! Groups subjects whose permission sets are *identical* and turns every
//! group that survives the filter cascade into a derived role.
//!
//! ```text
//! assignments ──► fingerprint ──► group ──► filter cascade ──► role synthesis
//!                 (sorted ids)              a. empty fingerprint
//!                                           b. min members
//!                                           c. max permissions
//!                                           d. application scope
//!                                           e. org-unit scope
//! ```
//!
//! There is no similarity metric: two subjects share a role only when their
//! fingerprints are equal.
//!
//! # Example
//!
//! ```rust,ignore
//! use rolemine_cluster::cluster_context;
//! use rolemine_types::MiningFilters;
//!
//! let roles = cluster_context(&ctx, &MiningFilters::default());
//! ```

#![allow(clippy::doc_markdown)]

mod engine;
mod fingerprint;
mod naming;
mod stages;

pub use engine::{cluster, cluster_context, group_by_fingerprint};
pub use fingerprint::{Fingerprint, PermissionGroup};
pub use naming::{GENERIC_APPLICATION_LABEL, RoleCategory, role_name};
pub use stages::{FilterStage, apply_stages};
