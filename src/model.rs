//! Wire types exchanged with the backend.
//!
//! Field names follow the backend's JSON (Spanish for profile and course resources); Rust
//! field names are English and mapped with `serde(rename)`.

pub mod account;
pub mod course;
pub mod error_body;
pub mod profile;

pub use account::*;
pub use course::*;
pub use error_body::*;
pub use profile::*;
