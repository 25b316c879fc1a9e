//! Business logic layer
//!
//! Services validate and normalize input, then delegate to the store.

pub mod crud;
pub mod import;
pub mod search;

pub use crud::CrudService;
pub use import::{ImportOutcome, ImportService};
pub use search::SearchService;
