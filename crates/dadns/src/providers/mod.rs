//! DNS provider implementations
//!
//! The capability traits live in [`traits`]; DirectAdmin is the only
//! backend implementing them.

pub mod credentials;
pub mod directadmin;
pub mod traits;

// Re-export commonly used types
pub use credentials::DirectAdminCredentials;
pub use directadmin::DirectAdminProvider;
pub use traits::{DnsProvider, RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
