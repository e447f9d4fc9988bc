//! Generic DNS record model
//!
//! Records are expressed independently of any control panel. Every typed
//! variant can be projected onto the generic [`Rr`] form (name, type, TTL,
//! data), which is what gets sent over the wire, and a generic [`Rr`] can be
//! lifted back into the richest variant its data allows.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Generic resource record: the lowest common denominator of all record types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rr {
    /// Record name relative to its zone ("@" for the apex)
    pub name: String,

    /// Record type, e.g. "A" or "TXT"
    #[serde(rename = "type")]
    pub rtype: String,

    /// Time to live
    #[serde(with = "ttl_seconds")]
    pub ttl: Duration,

    /// Record data in presentation format
    pub data: String,
}

impl Rr {
    pub fn new(
        name: impl Into<String>,
        rtype: impl Into<String>,
        ttl: Duration,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rtype: rtype.into(),
            ttl,
            data: data.into(),
        }
    }
}

/// A DNS record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    /// A or AAAA record, depending on the address family
    Address {
        name: String,
        #[serde(with = "ttl_seconds")]
        ttl: Duration,
        ip: IpAddr,
    },
    /// MX record
    Mx {
        name: String,
        #[serde(with = "ttl_seconds")]
        ttl: Duration,
        preference: u16,
        target: String,
    },
    /// SRV record. `name` excludes the `_service._transport` prefix.
    Srv {
        service: String,
        transport: String,
        name: String,
        #[serde(with = "ttl_seconds")]
        ttl: Duration,
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    /// TXT record
    Txt {
        name: String,
        #[serde(with = "ttl_seconds")]
        ttl: Duration,
        text: String,
    },
    /// Any other record, kept in generic form
    Rr(Rr),
}

impl Record {
    /// Lift a generic record into a typed variant when its data parses.
    ///
    /// Data that does not fit the type's expected shape is kept generic
    /// rather than rejected.
    pub fn parse(rr: Rr) -> Record {
        let typed = match rr.rtype.to_uppercase().as_str() {
            "A" | "AAAA" => parse_address(&rr),
            "MX" => parse_mx(&rr),
            "SRV" => parse_srv(&rr),
            "TXT" => Some(Record::Txt {
                name: rr.name.clone(),
                ttl: rr.ttl,
                text: unquote(&rr.data).to_string(),
            }),
            _ => None,
        };

        typed.unwrap_or(Record::Rr(rr))
    }

    /// Project this record onto the generic form
    pub fn rr(&self) -> Rr {
        match self {
            Record::Address { name, ttl, ip } => {
                let rtype = if ip.is_ipv4() { "A" } else { "AAAA" };
                Rr::new(name.clone(), rtype, *ttl, ip.to_string())
            }
            Record::Mx {
                name,
                ttl,
                preference,
                target,
            } => Rr::new(name.clone(), "MX", *ttl, format!("{} {}", preference, target)),
            Record::Srv {
                service,
                transport,
                name,
                ttl,
                priority,
                weight,
                port,
                target,
            } => {
                let prefix = format!("_{}._{}", service, transport);
                let full_name = if name.is_empty() || name == "@" {
                    prefix
                } else {
                    format!("{}.{}", prefix, name)
                };
                Rr::new(
                    full_name,
                    "SRV",
                    *ttl,
                    format!("{} {} {} {}", priority, weight, port, target),
                )
            }
            Record::Txt { name, ttl, text } => Rr::new(name.clone(), "TXT", *ttl, text.clone()),
            Record::Rr(rr) => rr.clone(),
        }
    }

    /// Record type as sent to the panel
    pub fn record_type(&self) -> String {
        self.rr().rtype
    }

    /// Record name as sent to the panel
    pub fn name(&self) -> String {
        self.rr().name
    }

    pub fn ttl(&self) -> Duration {
        match self {
            Record::Address { ttl, .. }
            | Record::Mx { ttl, .. }
            | Record::Srv { ttl, .. }
            | Record::Txt { ttl, .. } => *ttl,
            Record::Rr(rr) => rr.ttl,
        }
    }

    /// Identity of this record within a DirectAdmin zone.
    ///
    /// The panel has no record IDs; records are addressed by name and value.
    pub fn id(&self) -> String {
        let rr = self.rr();
        record_id(&rr.name, &rr.data)
    }
}

/// Panel record identity for a name/value pair
pub fn record_id(name: &str, value: &str) -> String {
    format!("name={}&value={}", name, value)
}

fn parse_address(rr: &Rr) -> Option<Record> {
    let ip: IpAddr = rr.data.trim().parse().ok()?;
    let family_matches = match rr.rtype.to_uppercase().as_str() {
        "A" => ip.is_ipv4(),
        _ => ip.is_ipv6(),
    };
    if !family_matches {
        return None;
    }

    Some(Record::Address {
        name: rr.name.clone(),
        ttl: rr.ttl,
        ip,
    })
}

fn parse_mx(rr: &Rr) -> Option<Record> {
    let mut parts = rr.data.split_whitespace();
    let preference = parts.next()?.parse::<u16>().ok()?;
    let target = parts.next()?;

    Some(Record::Mx {
        name: rr.name.clone(),
        ttl: rr.ttl,
        preference,
        target: target.to_string(),
    })
}

fn parse_srv(rr: &Rr) -> Option<Record> {
    let (service, transport, name) = split_srv_name(&rr.name)?;

    let mut parts = rr.data.split_whitespace();
    let priority = parts.next()?.parse::<u16>().ok()?;
    let weight = parts.next()?.parse::<u16>().ok()?;
    let port = parts.next()?.parse::<u16>().ok()?;
    let target = parts.next()?;

    Some(Record::Srv {
        service,
        transport,
        name,
        ttl: rr.ttl,
        priority,
        weight,
        port,
        target: target.to_string(),
    })
}

/// Split `_service._transport[.rest]` into its three parts
pub(crate) fn split_srv_name(name: &str) -> Option<(String, String, String)> {
    let mut labels = name.splitn(3, '.');
    let service = labels.next()?.strip_prefix('_')?;
    let transport = labels.next()?.strip_prefix('_')?;
    if service.is_empty() || transport.is_empty() {
        return None;
    }
    let rest = match labels.next() {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => "@".to_string(),
    };

    Some((service.to_string(), transport.to_string(), rest))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

mod ttl_seconds {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
