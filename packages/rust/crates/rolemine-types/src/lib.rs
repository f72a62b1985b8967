//! rolemine-types - Shared data model for role mining
//!
//! This crate provides the structures exchanged by the clustering engine,
//! the response interpreter and the mining orchestrator.
//!
//! # Architecture
//!
//! ```text
//! rolemine-types/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── entity.rs   # Subject, Permission, Application, OrganizationalUnit, Assignment
//! ├── role.rs     # RoleRecord, RoleOrigin
//! ├── filters.rs  # MiningFilters, FilterError
//! └── context.rs  # EntityResolver, DataContext, Dataset, DataSummary
//! ```

#![allow(clippy::doc_markdown)]

// ============================================================================
// Module Declarations
// ============================================================================

mod context;
mod entity;
mod filters;
mod role;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use context::{AssignmentRow, DataContext, DataSummary, Dataset, EntityResolver};
pub use entity::{Application, Assignment, OrganizationalUnit, Permission, Subject};
pub use filters::{
    DEFAULT_MAX_PERMISSIONS_PER_ROLE, DEFAULT_MIN_MEMBERS_PER_ROLE, FilterError, MiningFilters,
};
pub use role::{JUSTIFICATION_ATTRIBUTE, RoleOrigin, RoleRecord, STRATEGY_ATTRIBUTE};
