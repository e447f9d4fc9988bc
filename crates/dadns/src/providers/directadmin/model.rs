//! DirectAdmin API payloads and their translation into the generic model

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::errors::DnsError;
use crate::records::{record_id, Record, Rr};

/// Response of `CMD_API_DNS_CONTROL` when listing a zone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaZone {
    #[serde(default)]
    pub records: Vec<DaRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_dnssec_control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ptr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_spf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ttl: Option<String>,
    #[serde(
        rename = "DNS_AFFECT_POINTERS_DEFAULT",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dns_affect_pointers_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_tlsa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_caa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_dns_underscore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_mx_records: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_ttl_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_is_overridden: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_value: Option<String>,
}

/// A single record as the panel reports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub combined: String,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub ttl: Option<String>,
}

impl DaRecord {
    /// Identity the panel uses to select this record for edit or delete
    pub fn id(&self) -> String {
        record_id(&self.name, &self.value)
    }

    /// Whether this panel record has the same name and type as `rr`
    pub fn matches(&self, rr: &Rr) -> bool {
        self.name == rr.name && self.record_type.eq_ignore_ascii_case(&rr.rtype)
    }

    /// Convert into the generic model
    ///
    /// Relative MX targets are qualified with `zone`. TXT data is kept
    /// exactly as the panel reports it. URI records are
    /// reported as [`DnsError::Unsupported`].
    pub fn to_record(&self, zone: &str) -> Result<Record, DnsError> {
        let ttl = self.ttl_duration()?;
        let rr = Rr::new(
            self.name.clone(),
            self.record_type.clone(),
            ttl,
            self.value.clone(),
        );

        match self.record_type.to_uppercase().as_str() {
            "URI" => Err(DnsError::Unsupported(format!(
                "{} {}",
                self.record_type, self.name
            ))),
            "MX" => {
                let mut parts = self.value.split_whitespace();
                let preference = parts.next().and_then(|p| p.parse::<u16>().ok());
                match (preference, parts.next()) {
                    (Some(preference), Some(target)) => Ok(Record::Mx {
                        name: self.name.clone(),
                        ttl,
                        preference,
                        target: qualify(target, zone),
                    }),
                    _ => Ok(Record::Rr(rr)),
                }
            }
            // Panel TXT values keep their quotes; they are part of the
            // name/value selector used for edit and delete
            "TXT" => Ok(Record::Txt {
                name: self.name.clone(),
                ttl,
                text: self.value.clone(),
            }),
            "A" | "AAAA" | "SRV" => Ok(Record::parse(rr)),
            _ => Ok(Record::Rr(rr)),
        }
    }

    fn ttl_duration(&self) -> Result<Duration, DnsError> {
        match self.ttl.as_deref().map(str::trim) {
            None | Some("") => Ok(Duration::ZERO),
            Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                DnsError::Validation(format!("failed to parse TTL for {}: {}", self.name, e))
            }),
        }
    }
}

/// Response of a mutating `CMD_API_DNS_CONTROL` call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl DaResponse {
    /// Turn a reported panel error into [`DnsError::ApiError`]
    ///
    /// Only the first line of `result` is kept; the panel often appends
    /// HTML or a full trace after it.
    pub fn into_result(self) -> Result<(), DnsError> {
        let error = self.error.unwrap_or_default();
        let error = error.trim();
        if error.is_empty() || error == "0" {
            return Ok(());
        }

        let result = self.result.unwrap_or_default();
        let first_line = result.lines().next().unwrap_or_default();
        Err(DnsError::ApiError(format!(
            "api response error: {}: {}",
            error, first_line
        )))
    }
}

fn qualify(target: &str, zone: &str) -> String {
    if target.ends_with('.') {
        target.to_string()
    } else if target == "@" {
        zone.to_string()
    } else {
        format!("{}.{}", target, zone)
    }
}

/// Accept the TTL as either a JSON string or a number
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}
