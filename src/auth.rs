//! Auth-domain models: redacted token secrets, the session pair, and access-token claims.

pub mod claims;
pub mod secret;
pub mod session;

pub use claims::*;
pub use secret::*;
pub use session::*;
