//! Leaseweb domains API client
//!
//! Thin wrapper over the resource record set endpoints of
//! `https://api.leaseweb.com/hosting/v2/domains/{domainName}/resourceRecordSets`.
//! Every request is authenticated with the `X-LSW-Auth` header.

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::models::{ApiErrorBody, RecordSet, RecordSetList, UpdateRecordSetRequest};
use crate::errors::DnsError;
use crate::providers::credentials::LeasewebCredentials;

pub const LEASEWEB_API_BASE: &str = "https://api.leaseweb.com/hosting/v2";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-LSW-Auth";

/// Page size requested when the list endpoint paginates
const LIST_PAGE_SIZE: usize = 100;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote operations on resource record sets
///
/// `domain` is always the zone without its trailing dot; record set names
/// are fully-qualified and dot-terminated.
#[async_trait]
pub trait RecordSetApi: Send + Sync {
    async fn list_record_sets(&self, domain: &str) -> Result<Vec<RecordSet>, DnsError>;

    /// Create a record set, returning the set as stored by the API
    async fn create_record_set(&self, domain: &str, set: &RecordSet)
        -> Result<RecordSet, DnsError>;

    /// Replace content and TTL of an existing record set
    async fn update_record_set(&self, domain: &str, set: &RecordSet)
        -> Result<RecordSet, DnsError>;

    /// Delete a record set; deleting a missing set succeeds
    async fn delete_record_set(
        &self,
        domain: &str,
        name: &str,
        record_type: &str,
    ) -> Result<(), DnsError>;
}

/// reqwest-backed Leaseweb API client
pub struct LeasewebClient {
    client: Client,
    credentials: LeasewebCredentials,
    base_url: String,
}

impl LeasewebClient {
    /// Create a client for the public Leaseweb API
    pub fn new(credentials: LeasewebCredentials) -> Result<Self, DnsError> {
        Self::with_base_url(credentials, LEASEWEB_API_BASE.to_string())
    }

    /// Create a client for another endpoint (mock servers, sandboxes)
    pub fn with_base_url(
        credentials: LeasewebCredentials,
        base_url: String,
    ) -> Result<Self, DnsError> {
        credentials.validate()?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn record_sets_path(domain: &str) -> String {
        format!("/domains/{}/resourceRecordSets", domain)
    }

    fn record_set_path(domain: &str, name: &str, record_type: &str) -> String {
        format!(
            "/domains/{}/resourceRecordSets/{}/{}",
            domain, name, record_type
        )
    }

    /// Send an authenticated request, turning non-2xx responses into errors
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, DnsError> {
        let url = self.url(path);

        debug!("Leaseweb API request: {} {}", method, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, &self.credentials.api_key);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(
                "Leaseweb API returned status {} for {} {}",
                status, method, path
            );
            return Err(DnsError::Api {
                status: status.as_u16(),
                details: ApiErrorBody::parse(&error_body),
                message: error_body,
            });
        }

        Ok(response)
    }

    /// Decode a JSON body, or `None` when the API answered without one
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>, DnsError> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[async_trait]
impl RecordSetApi for LeasewebClient {
    async fn list_record_sets(&self, domain: &str) -> Result<Vec<RecordSet>, DnsError> {
        let path = Self::record_sets_path(domain);
        let mut sets: Vec<RecordSet> = Vec::new();
        let mut query: Vec<(&str, String)> = Vec::new();

        loop {
            let response = self.send(Method::GET, &path, &query, None::<&()>).await?;
            let page = Self::read_json::<RecordSetList>(response)
                .await?
                .unwrap_or_default();
            let page_len = page.resource_record_sets.len();
            sets.extend(page.resource_record_sets);

            let total = page.metadata.map(|m| m.total_count).unwrap_or(0);
            if page_len == 0 || sets.len() >= total {
                break;
            }

            debug!(
                "Fetched {} of {} record sets for {}, requesting next page",
                sets.len(),
                total,
                domain
            );
            query = vec![
                ("offset", sets.len().to_string()),
                ("limit", LIST_PAGE_SIZE.to_string()),
            ];
        }

        Ok(sets)
    }

    async fn create_record_set(
        &self,
        domain: &str,
        set: &RecordSet,
    ) -> Result<RecordSet, DnsError> {
        let path = Self::record_sets_path(domain);
        let response = self.send(Method::POST, &path, &[], Some(set)).await?;
        let created = Self::read_json::<RecordSet>(response)
            .await?
            .unwrap_or_else(|| set.clone());

        info!(
            "Created {} record set {} in domain {}",
            set.record_type, set.name, domain
        );

        Ok(created)
    }

    async fn update_record_set(
        &self,
        domain: &str,
        set: &RecordSet,
    ) -> Result<RecordSet, DnsError> {
        let path = Self::record_set_path(domain, &set.name, &set.record_type);
        let body = UpdateRecordSetRequest::from(set);
        let response = self.send(Method::PUT, &path, &[], Some(&body)).await?;
        let updated = Self::read_json::<RecordSet>(response)
            .await?
            .unwrap_or_else(|| set.clone());

        info!(
            "Updated {} record set {} in domain {}",
            set.record_type, set.name, domain
        );

        Ok(updated)
    }

    async fn delete_record_set(
        &self,
        domain: &str,
        name: &str,
        record_type: &str,
    ) -> Result<(), DnsError> {
        let path = Self::record_set_path(domain, name, record_type);
        self.send(Method::DELETE, &path, &[], None::<&()>).await?;

        info!(
            "Deleted {} record set {} from domain {}",
            record_type, name, domain
        );

        Ok(())
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test_key_12345";

    fn create_mock_client(mock_server: &MockServer) -> LeasewebClient {
        LeasewebClient::with_base_url(LeasewebCredentials::new(API_KEY), mock_server.uri())
            .unwrap()
    }

    fn txt_set(values: &[&str]) -> RecordSet {
        RecordSet {
            name: "_acme-challenge.example.com.".to_string(),
            record_type: "TXT".to_string(),
            content: values.iter().map(|v| v.to_string()).collect(),
            ttl: 60,
        }
    }

    #[tokio::test]
    async fn test_list_record_sets() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/domains/example.com/resourceRecordSets"))
            .and(header(API_KEY_HEADER, API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_metadata": {"totalCount": 2, "limit": 10, "offset": 0},
                "resourceRecordSets": [
                    {"name": "www.example.com.", "type": "A", "content": ["192.0.2.1"], "ttl": 300},
                    {"name": "example.com.", "type": "TXT", "content": ["v=spf1 -all", "x"], "ttl": 3600}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let sets = client.list_record_sets("example.com").await.unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "www.example.com.");
        assert_eq!(sets[1].content, vec!["v=spf1 -all", "x"]);
    }

    #[tokio::test]
    async fn test_list_record_sets_follows_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/domains/example.com/resourceRecordSets"))
            .and(query_param("offset", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_metadata": {"totalCount": 2, "limit": 100, "offset": 1},
                "resourceRecordSets": [
                    {"name": "b.example.com.", "type": "A", "content": ["192.0.2.2"], "ttl": 60}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/domains/example.com/resourceRecordSets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_metadata": {"totalCount": 2, "limit": 1, "offset": 0},
                "resourceRecordSets": [
                    {"name": "a.example.com.", "type": "A", "content": ["192.0.2.1"], "ttl": 60}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let sets = client.list_record_sets("example.com").await.unwrap();

        let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a.example.com.", "b.example.com."]);
    }

    #[tokio::test]
    async fn test_list_record_sets_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/domains/example.com/resourceRecordSets"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "errorCode": "401",
                "errorMessage": "You are not authorized to view this resource.",
                "correlationId": "8f1e-42"
            })))
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let err = client.list_record_sets("example.com").await.unwrap_err();

        match err {
            DnsError::Api {
                status, details, ..
            } => {
                assert_eq!(status, 401);
                let details = details.expect("structured error body");
                assert_eq!(details.correlation_id.as_deref(), Some("8f1e-42"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_record_set() {
        let mock_server = MockServer::start().await;
        let set = txt_set(&["token-a", "token-b"]);

        Mock::given(method("POST"))
            .and(path("/domains/example.com/resourceRecordSets"))
            .and(header(API_KEY_HEADER, API_KEY))
            .and(body_json(serde_json::json!({
                "name": "_acme-challenge.example.com.",
                "type": "TXT",
                "content": ["token-a", "token-b"],
                "ttl": 60
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "name": "_acme-challenge.example.com.",
                "type": "TXT",
                "content": ["token-a", "token-b"],
                "ttl": 60,
                "editable": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let created = client.create_record_set("example.com", &set).await.unwrap();

        assert_eq!(created, set);
    }

    #[tokio::test]
    async fn test_create_record_set_conflict() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/domains/example.com/resourceRecordSets"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "errorCode": "409",
                "errorMessage": "Resource record set already exists."
            })))
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let err = client
            .create_record_set("example.com", &txt_set(&["token"]))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_update_record_set() {
        let mock_server = MockServer::start().await;
        let set = txt_set(&["token-c"]);

        Mock::given(method("PUT"))
            .and(path(
                "/domains/example.com/resourceRecordSets/_acme-challenge.example.com./TXT",
            ))
            .and(header(API_KEY_HEADER, API_KEY))
            .and(body_json(serde_json::json!({"content": ["token-c"], "ttl": 60})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "_acme-challenge.example.com.",
                "type": "TXT",
                "content": ["token-c"],
                "ttl": 60
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let updated = client.update_record_set("example.com", &set).await.unwrap();

        assert_eq!(updated, set);
    }

    #[tokio::test]
    async fn test_update_record_set_without_body_echoes_request() {
        let mock_server = MockServer::start().await;
        let set = txt_set(&["token-d"]);

        Mock::given(method("PUT"))
            .and(path(
                "/domains/example.com/resourceRecordSets/_acme-challenge.example.com./TXT",
            ))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let updated = client.update_record_set("example.com", &set).await.unwrap();

        assert_eq!(updated, set);
    }

    #[tokio::test]
    async fn test_update_record_set_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(
                "/domains/example.com/resourceRecordSets/_acme-challenge.example.com./TXT",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let err = client
            .update_record_set("example.com", &txt_set(&["token"]))
            .await
            .unwrap_err();

        assert!(matches!(err, DnsError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_delete_record_set() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(
                "/domains/example.com/resourceRecordSets/_acme-challenge.example.com./TXT",
            ))
            .and(header(API_KEY_HEADER, API_KEY))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let result = client
            .delete_record_set("example.com", "_acme-challenge.example.com.", "TXT")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_record_set_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = create_mock_client(&mock_server);
        let err = client
            .delete_record_set("example.com", "www.example.com.", "A")
            .await
            .unwrap_err();

        match err {
            DnsError::Api {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
                assert!(details.is_none());
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client =
            LeasewebClient::with_base_url(LeasewebCredentials::new(API_KEY), uri).unwrap();
        let err = client.list_record_sets("example.com").await.unwrap_err();

        assert!(matches!(err, DnsError::Request(_)));
    }
}
