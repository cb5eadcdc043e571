//! Session and credential management.
//!
//! The session manager owns the login/logout lifecycle and is the sole
//! writer of the token and profile storage keys. Remembered credentials
//! are a separate opt-in concern keyed by the `rememberMe` flag.

pub mod credentials;
pub mod manager;
pub mod session;

pub use credentials::{Credentials, RememberedCredentials};
pub use manager::SessionManager;
pub use session::SessionData;
