//! DNS record management for DirectAdmin
//!
//! This crate exposes a DirectAdmin control panel as a libdns-style DNS
//! provider: records can be listed, appended, set and deleted through the
//! panel's `CMD_API_DNS_CONTROL` endpoint.
//!
//! # Features
//!
//! - **Capability traits**: [`RecordGetter`], [`RecordAppender`], [`RecordSetter`]
//!   and [`RecordDeleter`], with [`DnsProvider`] covering all four
//! - **Typed records**: A/AAAA, MX, SRV and TXT are parsed into dedicated
//!   variants, everything else stays a generic [`Rr`]
//! - **Subdomain zones**: a request for `test.example.com` is routed to the
//!   managed `example.com` zone with record names adjusted accordingly
//! - **Serialized writes**: mutating calls on one provider never interleave
//!
//! # Usage
//!
//! ```ignore
//! use dadns::{DirectAdminCredentials, DirectAdminProvider, Record, RecordAppender};
//! use std::time::Duration;
//!
//! let provider = DirectAdminProvider::new(DirectAdminCredentials {
//!     server_url: "https://da.example.com:2222".to_string(),
//!     user: "admin".to_string(),
//!     login_key: "login-key".to_string(),
//!     insecure_requests: false,
//! })?;
//!
//! let record = Record::Txt {
//!     name: "_acme-challenge".to_string(),
//!     ttl: Duration::from_secs(300),
//!     text: "token".to_string(),
//! };
//! provider.append_records("example.com.", &[record]).await?;
//! ```

pub mod errors;
pub mod providers;
pub mod records;
pub mod zones;

// Re-export main types
pub use errors::DnsError;
pub use providers::{
    DirectAdminCredentials, DirectAdminProvider, DnsProvider, RecordAppender, RecordDeleter,
    RecordGetter, RecordSetter,
};
pub use records::{Record, Rr};
