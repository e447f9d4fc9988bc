//! Zone detection and record name adjustment
//!
//! Callers often ask for a zone that is really a subdomain of the zone the
//! panel manages (e.g. "test.example.com" when only "example.com" exists).
//! These helpers find the managed parent and rewrite record names so that
//! they land at the same place inside it.

use tracing::debug;
use url::form_urlencoded;

use crate::errors::DnsError;
use crate::records::{Record, Rr};

/// Maximum number of labels walked when looking for a managed parent zone
const MAX_ZONE_ROUNDS: usize = 100;

/// Strip the trailing root dot from a zone name
pub fn normalize_zone(zone: &str) -> &str {
    zone.strip_suffix('.').unwrap_or(zone)
}

/// Decode the `CMD_API_SHOW_DOMAINS` body (`list[]=a.com&list[]=b.com`)
///
/// Every value is collected regardless of its key.
pub fn parse_domain_list(body: &str) -> Vec<String> {
    form_urlencoded::parse(body.trim().as_bytes())
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Find the most specific domain in `domains` that `zone` is part of
pub fn find_root(zone: &str, domains: &[String]) -> Result<String, DnsError> {
    let zone = normalize_zone(zone);
    let labels: Vec<&str> = zone.split('.').collect();

    for start in 0..labels.len().min(MAX_ZONE_ROUNDS) {
        let candidate = labels[start..].join(".");
        if let Some(found) = domains
            .iter()
            .find(|domain| normalize_zone(domain).eq_ignore_ascii_case(&candidate))
        {
            return Ok(normalize_zone(found).to_string());
        }
    }

    Err(DnsError::ZoneNotFound(format!("root zone not found for {}", zone)))
}

/// Labels of `requested` to the left of `managed`
///
/// Returns `None` when both are the same zone or when `requested` does not
/// lie inside `managed`.
pub fn subdomain_of(requested: &str, managed: &str) -> Option<String> {
    let requested = normalize_zone(requested);
    let managed = normalize_zone(managed);

    if requested.eq_ignore_ascii_case(managed) {
        return None;
    }

    let suffix = format!(".{}", managed);
    if requested.len() <= suffix.len()
        || !requested
            .to_ascii_lowercase()
            .ends_with(&suffix.to_ascii_lowercase())
    {
        return None;
    }

    Some(requested[..requested.len() - suffix.len()].to_string())
}

/// Rewrite a record for the managed zone when the requested zone is below it
///
/// Example: requested "test.example.com", managed "example.com", record
/// "_acme-challenge" becomes "_acme-challenge.test". A record whose name
/// already ends with the subdomain is left alone.
pub fn adjust_record_for_zone(record: &Record, requested: &str, managed: &str) -> Record {
    let Some(subdomain) = subdomain_of(requested, managed) else {
        return record.clone();
    };

    let rr = record.rr();

    if rr.name.ends_with(&format!(".{}", subdomain)) {
        debug!(
            name = %rr.name,
            subdomain = %subdomain,
            "Record name already adjusted, skipping"
        );
        return record.clone();
    }

    let adjusted_name = if rr.name.is_empty() || rr.name == "@" {
        subdomain.clone()
    } else {
        format!("{}.{}", rr.name, subdomain)
    };

    debug!(
        original_name = %rr.name,
        adjusted_name = %adjusted_name,
        subdomain = %subdomain,
        "Adjusting record name"
    );

    Record::Rr(Rr {
        name: adjusted_name,
        ..rr
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn domains(list: &[&str]) -> Vec<String> {
        list.iter().map(|d| d.to_string()).collect()
    }

    fn txt(name: &str) -> Record {
        Record::Txt {
            name: name.to_string(),
            ttl: Duration::from_secs(300),
            text: "token".to_string(),
        }
    }

    #[test]
    fn test_normalize_zone() {
        assert_eq!(normalize_zone("example.com."), "example.com");
        assert_eq!(normalize_zone("example.com"), "example.com");
    }

    #[test]
    fn test_parse_domain_list() {
        let parsed = parse_domain_list("list[]=example.com&list[]=other.org\n");
        assert_eq!(parsed, domains(&["example.com", "other.org"]));

        let encoded = parse_domain_list("list%5B%5D=example.com");
        assert_eq!(encoded, domains(&["example.com"]));

        assert!(parse_domain_list("").is_empty());
    }

    #[test]
    fn test_find_root_exact() {
        let list = domains(&["example.com", "other.org"]);
        assert_eq!(find_root("example.com", &list).unwrap(), "example.com");
        assert_eq!(find_root("example.com.", &list).unwrap(), "example.com");
    }

    #[test]
    fn test_find_root_subdomain() {
        let list = domains(&["example.com", "test.example.com"]);
        assert_eq!(
            find_root("deep.test.example.com", &list).unwrap(),
            "test.example.com"
        );
        assert_eq!(find_root("a.b.example.com", &list).unwrap(), "example.com");
    }

    #[test]
    fn test_find_root_not_found() {
        let list = domains(&["example.com"]);
        let err = find_root("example.net", &list).unwrap_err();
        assert!(matches!(err, DnsError::ZoneNotFound(_)));
    }

    #[test]
    fn test_subdomain_of() {
        assert_eq!(
            subdomain_of("test.example.com", "example.com"),
            Some("test".to_string())
        );
        assert_eq!(
            subdomain_of("a.b.example.com.", "example.com"),
            Some("a.b".to_string())
        );
        assert_eq!(subdomain_of("example.com.", "example.com"), None);
        assert_eq!(subdomain_of("badexample.com", "example.com"), None);
        assert_eq!(subdomain_of("example.net", "example.com"), None);
    }

    #[test]
    fn test_adjust_record_for_subdomain() {
        let adjusted = adjust_record_for_zone(
            &txt("_acme-challenge.libdns"),
            "test.example.com.",
            "example.com",
        );
        let rr = adjusted.rr();
        assert_eq!(rr.name, "_acme-challenge.libdns.test");
        assert_eq!(rr.rtype, "TXT");
        assert_eq!(rr.data, "token");
        assert_eq!(rr.ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_adjust_record_same_zone_unchanged() {
        let record = txt("www");
        assert_eq!(
            adjust_record_for_zone(&record, "example.com.", "example.com"),
            record
        );
    }

    #[test]
    fn test_adjust_record_already_adjusted() {
        let record = txt("_acme-challenge.test");
        assert_eq!(
            adjust_record_for_zone(&record, "test.example.com", "example.com"),
            record
        );
    }

    #[test]
    fn test_adjust_apex_record() {
        let adjusted = adjust_record_for_zone(&txt("@"), "test.example.com", "example.com");
        assert_eq!(adjusted.name(), "test");
    }
}
