//! sportify/crates/sf-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the sponsorship site:
//! the sponsor record store, the application form and its validation rules.

pub mod attachment;
pub mod error;
pub mod events;
pub mod form;
pub mod memory;
pub mod models;
pub mod store;
pub mod traits;
pub mod validation;

// Re-exporting for easier access in other crates
pub use attachment::*;
pub use error::*;
pub use events::*;
pub use form::*;
pub use memory::*;
pub use models::*;
pub use store::*;
pub use traits::*;
pub use validation::{amount, composite_phone, validate, Field, FieldErrors, FormValues};
