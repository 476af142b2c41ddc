//! Zone and Record Queries
//!
//! Resolves a zone name to its Cloudflare zone ID, lists the zones on the
//! account, and fetches the DNS records of a resolved zone.

use tracing::debug;

use crate::cloudflare::{DnsApi, DnsRecord, Zone};
use crate::error::CheckError;

/// First zone whose name equals `zone_name` exactly (case-sensitive)
pub fn find_zone_id<'a>(zones: &'a [Zone], zone_name: &str) -> Option<&'a str> {
    zones
        .iter()
        .find(|zone| zone.name == zone_name)
        .map(|zone| zone.id.as_str())
}

/// Look up the zone ID for `zone_name`
pub async fn resolve_zone_id<A>(api: &A, zone_name: &str) -> Result<String, CheckError>
where
    A: DnsApi + ?Sized,
{
    debug!("Looking up zone ID for: {}", zone_name);

    let zones = api
        .list_zones(Some(zone_name))
        .await
        .map_err(|source| CheckError::ZoneLookup {
            zone: zone_name.to_string(),
            source,
        })?;

    let zone_id = find_zone_id(&zones, zone_name).ok_or_else(|| CheckError::ZoneNotFound {
        zone: zone_name.to_string(),
    })?;

    debug!("Found zone ID: {}", zone_id);
    Ok(zone_id.to_string())
}

/// Names of every zone visible to the account, in provider order
pub async fn list_zone_names<A>(api: &A) -> Result<Vec<String>, CheckError>
where
    A: DnsApi + ?Sized,
{
    debug!("Listing zones");

    let zones = api
        .list_zones(None)
        .await
        .map_err(|source| CheckError::ZoneLookup {
            zone: "<all zones>".to_string(),
            source,
        })?;

    debug!("Found {} zones", zones.len());
    Ok(zones.into_iter().map(|zone| zone.name).collect())
}

/// Fetch all DNS records for a zone in one request
pub async fn fetch_records<A>(api: &A, zone_id: &str) -> Result<Vec<DnsRecord>, CheckError>
where
    A: DnsApi + ?Sized,
{
    debug!("Fetching DNS records for zone ID: {}", zone_id);

    let records = api
        .list_dns_records(zone_id)
        .await
        .map_err(|source| CheckError::RecordLookup {
            zone_id: zone_id.to_string(),
            source,
        })?;

    debug!("Fetched {} records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudflare::ApiError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory account that records every zone query it receives
    struct FakeAccount {
        zones: Vec<Zone>,
        records: Vec<DnsRecord>,
        fail: bool,
        zone_queries: Mutex<Vec<Option<String>>>,
    }

    impl FakeAccount {
        fn new(zones: &[(&str, &str)]) -> Self {
            Self {
                zones: zones
                    .iter()
                    .map(|(id, name)| Zone {
                        id: id.to_string(),
                        name: name.to_string(),
                    })
                    .collect(),
                records: Vec::new(),
                fail: false,
                zone_queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(&[])
            }
        }
    }

    #[async_trait]
    impl DnsApi for FakeAccount {
        async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>, ApiError> {
            self.zone_queries
                .lock()
                .unwrap()
                .push(name.map(str::to_string));
            if self.fail {
                return Err(ApiError::Api("Authentication error (10000)".to_string()));
            }
            Ok(self.zones.clone())
        }

        async fn list_dns_records(&self, _zone_id: &str) -> Result<Vec<DnsRecord>, ApiError> {
            if self.fail {
                return Err(ApiError::Api("Authentication error (10000)".to_string()));
            }
            Ok(self.records.clone())
        }
    }

    fn account() -> FakeAccount {
        FakeAccount::new(&[("abc", "example.com"), ("xyz", "test.org")])
    }

    #[tokio::test]
    async fn test_resolve_exact_match() {
        let api = account();
        assert_eq!(resolve_zone_id(&api, "example.com").await.unwrap(), "abc");
        assert_eq!(resolve_zone_id(&api, "test.org").await.unwrap(), "xyz");
    }

    #[tokio::test]
    async fn test_resolve_filters_by_name() {
        let api = account();
        resolve_zone_id(&api, "example.com").await.unwrap();
        assert_eq!(
            *api.zone_queries.lock().unwrap(),
            vec![Some("example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let err = resolve_zone_id(&account(), "nope.com").await.unwrap_err();
        assert!(matches!(err, CheckError::ZoneNotFound { ref zone } if zone == "nope.com"));
    }

    #[tokio::test]
    async fn test_resolve_is_case_sensitive() {
        let err = resolve_zone_id(&account(), "Example.com").await.unwrap_err();
        assert!(matches!(err, CheckError::ZoneNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_first_duplicate_wins() {
        let api = FakeAccount::new(&[("first", "dup.net"), ("second", "dup.net")]);
        assert_eq!(resolve_zone_id(&api, "dup.net").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_resolve_is_repeatable() {
        let api = account();
        let first = resolve_zone_id(&api, "example.com").await.unwrap();
        let second = resolve_zone_id(&api, "example.com").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_transport_failure() {
        let err = resolve_zone_id(&FakeAccount::failing(), "example.com")
            .await
            .unwrap_err();
        match err {
            CheckError::ZoneLookup { zone, source } => {
                assert_eq!(zone, "example.com");
                assert!(source.to_string().contains("Authentication error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_zone_names_unfiltered() {
        let api = account();
        let names = list_zone_names(&api).await.unwrap();
        assert_eq!(names, vec!["example.com", "test.org"]);
        assert_eq!(*api.zone_queries.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_list_zone_names_empty() {
        let names = list_zone_names(&FakeAccount::new(&[])).await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_records_passthrough() {
        let mut api = account();
        api.records = vec![DnsRecord {
            name: "www".to_string(),
            content: "1.2.3.4".to_string(),
            modified_on: "2024-01-01".to_string(),
            ..Default::default()
        }];

        let records = fetch_records(&api, "abc").await.unwrap();
        assert_eq!(records, api.records);
    }

    #[tokio::test]
    async fn test_fetch_records_failure_carries_zone_id() {
        let err = fetch_records(&FakeAccount::failing(), "abc")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::RecordLookup { ref zone_id, .. } if zone_id == "abc"));
    }
}
