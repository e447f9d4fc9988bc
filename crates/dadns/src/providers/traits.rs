//! DNS provider trait definitions
//!
//! Each capability is its own trait so that consumers can ask for exactly
//! what they need (a certificate client usually only appends and deletes).
//! Zone names may be given with or without the trailing dot.

use async_trait::async_trait;

use crate::errors::DnsError;
use crate::records::Record;

/// Lists the records of a zone
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// List all records in the zone
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, DnsError>;
}

/// Creates records in a zone
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Add records to the zone. Returns the records that were added.
    async fn append_records(&self, zone: &str, records: &[Record])
        -> Result<Vec<Record>, DnsError>;
}

/// Creates or updates records in a zone
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Update records that match by name and type, create the others.
    ///
    /// If every record fails the error is [`DnsError::Atomic`]; if only some
    /// fail it is [`DnsError::PartialUpdate`], carrying the applied records.
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, DnsError>;
}

/// Deletes records from a zone
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Delete records from the zone. Returns the records that were deleted.
    async fn delete_records(&self, zone: &str, records: &[Record])
        -> Result<Vec<Record>, DnsError>;
}

/// A provider supporting every record operation
pub trait DnsProvider: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {}

impl<T> DnsProvider for T where T: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {}
