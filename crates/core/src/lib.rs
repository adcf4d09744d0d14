//! Domain logic shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O. Repositories and handlers call into
//! these modules to decide *what* should change; the `db` crate decides
//! *how* it is persisted.

pub mod error;
pub mod notifications;
pub mod pagination;
pub mod roles;
pub mod tags;
pub mod types;
pub mod validation;
pub mod voting;
