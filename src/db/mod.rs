//! Database module: page rows and the actor that owns the SQLite pool.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `patch.rs`: create/patch payloads
//! - `actor.rs`: `DbActor` and its cloneable handle

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;

mod patch_impl;

pub use models::DbPage;
pub use patch::{DbPatchable, PageCreate, PagePatch, PagePatchById};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
