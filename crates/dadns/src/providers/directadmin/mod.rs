//! DirectAdmin DNS provider implementation
//!
//! This provider drives the DirectAdmin control panel API:
//! - `CMD_API_SHOW_DOMAINS` lists the domains the account owns and is used
//!   to find which parent zone a request belongs to
//! - `CMD_API_DNS_CONTROL` lists, adds, edits and deletes records
//!
//! Every call is a GET with query parameters and HTTP basic auth using the
//! account name and a login key. Records have no IDs on the panel side; they
//! are selected by `<type>recs0=name=<name>&value=<value>`.

pub mod model;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::credentials::DirectAdminCredentials;
use super::traits::{RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
use crate::errors::DnsError;
use crate::records::{record_id, Record};
use crate::zones::{adjust_record_for_zone, find_root, normalize_zone, parse_domain_list};
use model::{DaRecord, DaResponse, DaZone};

const DNS_CONTROL_PATH: &str = "/CMD_API_DNS_CONTROL";
const SHOW_DOMAINS_PATH: &str = "/CMD_API_SHOW_DOMAINS";

/// DirectAdmin DNS provider
pub struct DirectAdminProvider {
    client: Client,
    credentials: DirectAdminCredentials,
    base_url: Url,
    /// Serializes append/set/delete so that lookups made during an edit
    /// are not invalidated by a concurrent mutation
    mutex: Mutex<()>,
}

impl std::fmt::Debug for DirectAdminProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectAdminProvider")
            .field("credentials", &self.credentials.masked())
            .finish()
    }
}

impl DirectAdminProvider {
    /// Create a new DirectAdmin provider with the given credentials
    pub fn new(credentials: DirectAdminCredentials) -> Result<Self, DnsError> {
        credentials.validate()?;

        let base_url = Url::parse(credentials.server_url.trim())?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .danger_accept_invalid_certs(credentials.insecure_requests)
            .build()
            .map_err(|e| DnsError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        if credentials.insecure_requests {
            warn!(
                "TLS certificate verification disabled for {}",
                credentials.server_url
            );
        }

        Ok(Self {
            client,
            credentials,
            base_url,
            mutex: Mutex::new(()),
        })
    }

    pub fn credentials(&self) -> &DirectAdminCredentials {
        &self.credentials
    }

    /// Test the credentials/connection to the panel
    pub async fn test_connection(&self) -> Result<bool, DnsError> {
        match self.list_zones().await {
            Ok(_) => {
                info!("DirectAdmin API connection test successful");
                Ok(true)
            }
            Err(e) => {
                warn!("DirectAdmin API connection test failed: {}", e);
                Ok(false)
            }
        }
    }

    /// List the domains this account can manage
    pub async fn list_zones(&self) -> Result<Vec<String>, DnsError> {
        let url = self.endpoint(SHOW_DOMAINS_PATH, &[]);
        let body = self.do_request(url).await?;
        Ok(parse_domain_list(&body))
    }

    /// Resolve the zone the panel actually manages for `zone`
    ///
    /// Falls back to the requested zone itself when detection fails, so that
    /// keys without `CMD_API_SHOW_DOMAINS` still work for exact zones.
    async fn find_manageable_zone(&self, zone: &str) -> String {
        let requested = normalize_zone(zone);

        let root = match self.list_zones().await {
            Ok(domains) => find_root(requested, &domains),
            Err(e) => Err(e),
        };

        match root {
            Ok(root) => {
                if root != requested {
                    debug!(
                        managed_zone = %root,
                        requested_zone = %requested,
                        "Using managed zone"
                    );
                }
                root
            }
            Err(e) => {
                debug!(
                    zone = %requested,
                    error = %e,
                    "Zone detection failed, using requested zone"
                );
                requested.to_string()
            }
        }
    }

    /// Build a panel URL for `path` with the given query
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
        url
    }

    /// Send an authenticated GET and return the body
    async fn do_request(&self, url: Url) -> Result<String, DnsError> {
        debug!("DirectAdmin API request: {}", url.path());

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.login_key))
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DnsError::ApiError(format!("Failed to read response: {}", e)))?;

        if status != StatusCode::OK {
            return Err(DnsError::ApiError(format!(
                "API returned status {}: {}",
                status,
                body.trim()
            )));
        }

        Ok(body)
    }

    /// Send a mutating request and unwrap the panel's JSON error field
    async fn execute_json_request(&self, params: &[(&str, &str)]) -> Result<(), DnsError> {
        let url = self.endpoint(DNS_CONTROL_PATH, params);
        let body = self.do_request(url).await?;
        let response: DaResponse = serde_json::from_str(&body)?;
        response.into_result()
    }

    /// Fetch the raw zone listing from the panel
    async fn fetch_zone(&self, managed_zone: &str) -> Result<DaZone, DnsError> {
        let url = self.endpoint(
            DNS_CONTROL_PATH,
            &[
                ("json", "yes"),
                ("full_mx_records", "yes"),
                ("allow_dns_underscore", "yes"),
                ("ttl", "yes"),
                ("domain", managed_zone),
            ],
        );
        let body = self.do_request(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Convert a zone listing, skipping record types the model cannot hold
    fn convert_zone(zone: DaZone, managed_zone: &str) -> Result<Vec<Record>, DnsError> {
        let mut records = Vec::with_capacity(zone.records.len());
        for da_record in &zone.records {
            match da_record.to_record(managed_zone) {
                Ok(record) => records.push(record),
                Err(DnsError::Unsupported(what)) => {
                    warn!("Skipping unsupported record conversion: {}", what);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    /// Common query parameters for add and edit
    fn write_params<'a>(
        action: &'a str,
        managed_zone: &'a str,
        rtype: &'a str,
        name: &'a str,
        value: &'a str,
        ttl: &'a str,
    ) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![("action", action), ("json", "yes")];
        if action == "add" {
            params.push(("full_mx_records", "yes"));
            params.push(("allow_dns_underscore", "yes"));
        }
        params.extend([
            ("domain", managed_zone),
            ("type", rtype),
            ("name", name),
            ("value", value),
        ]);
        // NS records always take the zone default TTL
        if !rtype.eq_ignore_ascii_case("NS") {
            params.push(("ttl", ttl));
        }
        params
    }

    async fn append_zone_record(
        &self,
        managed_zone: &str,
        record: &Record,
    ) -> Result<Record, DnsError> {
        let rr = record.rr();
        let ttl = rr.ttl.as_secs().to_string();
        let params = Self::write_params("add", managed_zone, &rr.rtype, &rr.name, &rr.data, &ttl);

        self.execute_json_request(&params).await?;
        Ok(record.clone())
    }

    async fn set_zone_record(
        &self,
        managed_zone: &str,
        record: &Record,
    ) -> Result<Record, DnsError> {
        let rr = record.rr();
        let ttl = rr.ttl.as_secs().to_string();

        // A lookup failure just means we create instead of edit
        let existing: Vec<DaRecord> = match self.fetch_zone(managed_zone).await {
            Ok(zone) => zone.records,
            Err(e) => {
                debug!("Could not list existing records of {}: {}", managed_zone, e);
                Vec::new()
            }
        };

        let edit_key = format!("{}recs0", rr.rtype.to_lowercase());
        let edit_value = existing
            .iter()
            .find(|da_record| da_record.matches(&rr))
            .map(DaRecord::id);

        let mut params =
            Self::write_params("edit", managed_zone, &rr.rtype, &rr.name, &rr.data, &ttl);
        if let Some(edit_value) = edit_value.as_deref() {
            debug!(
                name = %rr.name,
                record_type = %rr.rtype,
                existing = %edit_value,
                "Editing existing record"
            );
            params.push((edit_key.as_str(), edit_value));
        }

        self.execute_json_request(&params).await?;
        Ok(record.clone())
    }

    async fn delete_zone_record(
        &self,
        managed_zone: &str,
        record: &Record,
    ) -> Result<Record, DnsError> {
        let rr = record.rr();
        let select_key = format!("{}recs0", rr.rtype.to_lowercase());
        let select_value = record_id(&rr.name, &rr.data);

        let params = [
            ("action", "select"),
            ("json", "yes"),
            ("domain", managed_zone),
            (select_key.as_str(), select_value.as_str()),
        ];

        self.execute_json_request(&params).await?;
        Ok(record.clone())
    }
}

#[async_trait]
impl RecordGetter for DirectAdminProvider {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, DnsError> {
        debug!(zone, "GetRecords called");

        let managed_zone = self.find_manageable_zone(zone).await;
        let da_zone = self.fetch_zone(&managed_zone).await?;
        Self::convert_zone(da_zone, &managed_zone)
    }
}

#[async_trait]
impl RecordAppender for DirectAdminProvider {
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, DnsError> {
        debug!(zone, record_count = records.len(), "AppendRecords called");

        let managed_zone = self.find_manageable_zone(zone).await;
        let _guard = self.mutex.lock().await;

        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let adjusted = adjust_record_for_zone(record, zone, &managed_zone);
            let rr = adjusted.rr();
            debug!(
                name = %rr.name,
                record_type = %rr.rtype,
                value = %rr.data,
                "Creating record"
            );

            created.push(self.append_zone_record(&managed_zone, &adjusted).await?);
        }

        Ok(created)
    }
}

#[async_trait]
impl RecordSetter for DirectAdminProvider {
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, DnsError> {
        debug!(zone, record_count = records.len(), "SetRecords called");

        let managed_zone = self.find_manageable_zone(zone).await;
        let _guard = self.mutex.lock().await;

        let mut updated = Vec::with_capacity(records.len());
        let mut errors = Vec::new();

        for record in records {
            let adjusted = adjust_record_for_zone(record, zone, &managed_zone);
            let rr = adjusted.rr();
            debug!(
                name = %rr.name,
                record_type = %rr.rtype,
                value = %rr.data,
                "Setting record"
            );

            match self.set_zone_record(&managed_zone, &adjusted).await {
                Ok(result) => updated.push(result),
                Err(e) => {
                    warn!("Failed to set {} record {}: {}", rr.rtype, rr.name, e);
                    errors.push(e.to_string());
                }
            }
        }

        if errors.is_empty() {
            return Ok(updated);
        }

        if updated.is_empty() {
            return Err(DnsError::Atomic(errors.join("; ")));
        }

        Err(DnsError::PartialUpdate { updated, errors })
    }
}

#[async_trait]
impl RecordDeleter for DirectAdminProvider {
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, DnsError> {
        debug!(zone, record_count = records.len(), "DeleteRecords called");

        let managed_zone = self.find_manageable_zone(zone).await;
        let _guard = self.mutex.lock().await;

        let mut deleted = Vec::with_capacity(records.len());
        for record in records {
            let adjusted = adjust_record_for_zone(record, zone, &managed_zone);
            let rr = adjusted.rr();
            debug!(
                name = %rr.name,
                record_type = %rr.rtype,
                value = %rr.data,
                "Deleting record"
            );

            deleted.push(self.delete_zone_record(&managed_zone, &adjusted).await?);
        }

        Ok(deleted)
    }
}
