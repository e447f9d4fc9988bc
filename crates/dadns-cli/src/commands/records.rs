//! Commands that change records: append, set and delete

use clap::Args;
use colored::Colorize;
use dadns::{DnsError, Record, RecordAppender, RecordDeleter, RecordSetter, Rr};
use std::time::Duration;
use tracing::debug;

use super::zones::format_record;
use super::ConnectionArgs;

/// A single record to append, set or delete
#[derive(Args, Debug)]
pub struct RecordCommand {
    /// Zone the record belongs to (e.g. "example.com")
    pub zone: String,

    /// Record type (A, AAAA, CNAME, MX, NS, SRV, TXT, ...)
    #[arg(long = "type", short = 't')]
    pub record_type: String,

    /// Record name relative to the zone ("@" for the apex)
    #[arg(long, short = 'n')]
    pub name: String,

    /// Record value in presentation format (e.g. "10 mail" for MX)
    #[arg(long, short = 'v')]
    pub value: String,

    /// Time to live in seconds
    #[arg(long, default_value_t = 300)]
    pub ttl: u64,
}

impl RecordCommand {
    /// The record described by the arguments, typed where the data allows
    pub fn record(&self) -> Record {
        Record::parse(Rr::new(
            self.name.clone(),
            self.record_type.to_uppercase(),
            Duration::from_secs(self.ttl),
            self.value.clone(),
        ))
    }

    pub fn execute_append(self, connection: &ConnectionArgs) -> anyhow::Result<()> {
        let provider = connection.provider()?;
        let record = self.record();
        debug!("Appending {:?} to {}", record, self.zone);

        let rt = tokio::runtime::Runtime::new()?;
        let created = rt.block_on(provider.append_records(&self.zone, &[record]))?;

        print_records("Created", &created);
        Ok(())
    }

    pub fn execute_set(self, connection: &ConnectionArgs) -> anyhow::Result<()> {
        let provider = connection.provider()?;
        let record = self.record();
        debug!("Setting {:?} in {}", record, self.zone);

        let rt = tokio::runtime::Runtime::new()?;
        match rt.block_on(provider.set_records(&self.zone, &[record])) {
            Ok(updated) => {
                print_records("Set", &updated);
                Ok(())
            }
            Err(DnsError::PartialUpdate { updated, errors }) => {
                print_records("Set", &updated);
                for error in &errors {
                    println!("{} {}", "✗".bright_red(), error);
                }
                Err(anyhow::anyhow!("{} record(s) failed to update", errors.len()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn execute_delete(self, connection: &ConnectionArgs) -> anyhow::Result<()> {
        let provider = connection.provider()?;
        let record = self.record();
        debug!("Deleting {:?} from {}", record, self.zone);

        let rt = tokio::runtime::Runtime::new()?;
        let deleted = rt.block_on(provider.delete_records(&self.zone, &[record]))?;

        print_records("Deleted", &deleted);
        Ok(())
    }
}

fn print_records(action: &str, records: &[Record]) {
    for record in records {
        println!(
            "{} {} {}",
            "✓".bright_green(),
            action.bright_white(),
            format_record(record)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(record_type: &str, name: &str, value: &str) -> RecordCommand {
        RecordCommand {
            zone: "example.com".to_string(),
            record_type: record_type.to_string(),
            name: name.to_string(),
            value: value.to_string(),
            ttl: 600,
        }
    }

    #[test]
    fn test_record_is_typed_when_possible() {
        let record = command("a", "www", "192.0.2.1").record();
        assert!(matches!(record, Record::Address { .. }));
        assert_eq!(record.record_type(), "A");
        assert_eq!(record.ttl(), Duration::from_secs(600));

        let record = command("TXT", "_acme-challenge", "token").record();
        assert!(matches!(record, Record::Txt { .. }));
    }

    #[test]
    fn test_record_stays_generic_otherwise() {
        let record = command("CNAME", "ftp", "example.com.").record();
        assert_eq!(
            record,
            Record::Rr(Rr::new("ftp", "CNAME", Duration::from_secs(600), "example.com."))
        );

        // Wrong address family is passed through for the panel to reject
        let record = command("A", "www", "2001:db8::1").record();
        assert!(matches!(record, Record::Rr(_)));
    }
}
