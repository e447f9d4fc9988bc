//! Read-only commands: managed zones and zone listings

use clap::Args;
use colored::Colorize;
use dadns::{Record, RecordGetter};

use super::ConnectionArgs;

/// List the domains the account can manage
#[derive(Args)]
pub struct ZonesCommand {}

/// List the records of a zone
#[derive(Args)]
pub struct ListCommand {
    /// Zone to list (e.g. "example.com" or "test.example.com.")
    pub zone: String,
}

impl ZonesCommand {
    pub fn execute(self, connection: &ConnectionArgs) -> anyhow::Result<()> {
        let provider = connection.provider()?;
        let rt = tokio::runtime::Runtime::new()?;

        let zones = rt.block_on(provider.list_zones())?;

        if zones.is_empty() {
            println!("  {} No domains found for this account.", "ℹ".bright_blue());
            return Ok(());
        }

        for zone in zones {
            println!("{}", zone.bright_cyan());
        }
        Ok(())
    }
}

impl ListCommand {
    pub fn execute(self, connection: &ConnectionArgs) -> anyhow::Result<()> {
        let provider = connection.provider()?;
        let rt = tokio::runtime::Runtime::new()?;

        let records = rt.block_on(provider.get_records(&self.zone))?;

        if records.is_empty() {
            println!("  {} No records in {}.", "ℹ".bright_blue(), self.zone);
            return Ok(());
        }

        println!(
            "{:<40} {:<8} {:<8} {}",
            "NAME".bright_white().bold(),
            "TYPE".bright_white().bold(),
            "TTL".bright_white().bold(),
            "VALUE".bright_white().bold()
        );
        for record in &records {
            println!("{}", format_record(record));
        }
        Ok(())
    }
}

/// One table row for a record
pub fn format_record(record: &Record) -> String {
    let rr = record.rr();
    format!(
        "{:<40} {:<8} {:<8} {}",
        rr.name,
        rr.rtype,
        rr.ttl.as_secs(),
        rr.data
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_record() {
        let record = Record::Mx {
            name: "@".to_string(),
            ttl: Duration::from_secs(3600),
            preference: 10,
            target: "mail.example.com".to_string(),
        };

        let line = format_record(&record);
        assert!(line.starts_with("@ "));
        assert!(line.contains("MX"));
        assert!(line.contains("3600"));
        assert!(line.ends_with("10 mail.example.com"));
    }
}
