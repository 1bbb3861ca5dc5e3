//! Service layer providing business-oriented operations on top of models.
//! - Separates business rules (specialization consistency, permission overlay,
//!   hierarchy traversal) from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod asset_service;
pub mod permission_service;
pub mod org_service;
pub mod inventory_service;

mod hierarchy;

#[cfg(test)]
pub mod test_support;
