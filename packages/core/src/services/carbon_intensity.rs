use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client};
use serde::Deserialize;

use crate::energy::{
    error::ProviderError,
    provider::{GenerationProvider, ProviderResult},
    types::{FuelShare, IntervalRecord, Timestamp, UPSTREAM_TIME_FORMAT},
};

/// Public GB generation mix endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.carbonintensity.org.uk/generation";

#[derive(Clone)]
pub struct CarbonIntensityClient {
    base_url: String,
    http: Client,
}

impl CarbonIntensityClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn generation_url(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            from.format(UPSTREAM_TIME_FORMAT),
            to.format(UPSTREAM_TIME_FORMAT)
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub data: Vec<GenerationData>,
}

/// Timestamps are kept as sent; an unparseable one fails the whole body.
#[derive(Debug, Deserialize)]
pub struct GenerationData {
    pub from: Timestamp,
    pub to: Timestamp,
    pub generationmix: Vec<FuelShare>,
}

impl From<GenerationData> for IntervalRecord {
    fn from(data: GenerationData) -> Self {
        IntervalRecord {
            from: data.from,
            to: data.to,
            mix: data.generationmix,
        }
    }
}

impl CarbonIntensityClient {
    pub async fn fetch_generation_mix(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ProviderResult<Vec<IntervalRecord>> {
        let url = self.generation_url(from, to);
        tracing::info!("Fetching data from {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| ProviderError::upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::upstream(
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string()),
            ));
        }

        let body = response
            .json::<GenerationResponse>()
            .await
            .map_err(|err| ProviderError::parse(err.to_string()))?;

        Ok(body.data.into_iter().map(IntervalRecord::from).collect())
    }
}

#[async_trait]
impl GenerationProvider for CarbonIntensityClient {
    async fn fetch_generation(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ProviderResult<Vec<IntervalRecord>> {
        self.fetch_generation_mix(from, to).await
    }

    fn provider_name(&self) -> &str {
        "Carbon Intensity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wiremock::{
        matchers::{header as header_matcher, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const SAMPLE_BODY: &str = r#"{
        "data": [
            {
                "from": "2024-03-01T00:00Z",
                "to": "2024-03-01T00:30Z",
                "generationmix": [
                    { "fuel": "gas", "perc": 30.1 },
                    { "fuel": "wind", "perc": 45.2 }
                ]
            },
            {
                "from": "2024-03-01T00:30Z",
                "to": "2024-03-01T01:00Z",
                "generationmix": [
                    { "fuel": "gas", "perc": 28.0 },
                    { "fuel": "wind", "perc": 47.5 }
                ]
            }
        ]
    }"#;

    fn range() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap(),
        )
    }

    #[test]
    fn generation_url_uses_minute_precision_timestamps() {
        let client = CarbonIntensityClient::new("http://upstream/generation/".to_string());
        let (from, to) = range();

        assert_eq!(
            client.generation_url(from, to),
            "http://upstream/generation/2024-03-01T00:00Z/2024-03-01T01:00Z"
        );
    }

    #[tokio::test]
    async fn fetch_parses_generation_records_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generation/2024-03-01T00:00Z/2024-03-01T01:00Z"))
            .and(header_matcher("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(SAMPLE_BODY, "application/json"))
            .mount(&server)
            .await;

        let client = CarbonIntensityClient::new(format!("{}/generation", server.uri()));
        let (from, to) = range();
        let records = client.fetch_generation_mix(from, to).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].from.instant(), from);
        assert_eq!(records[1].to.instant(), to);
        assert_eq!(records[0].from.as_str(), "2024-03-01T00:00Z");
        assert_eq!(records[1].to.as_str(), "2024-03-01T01:00Z");
        assert_eq!(records[1].mix[1].fuel, "wind");
        assert_eq!(records[1].mix[1].perc, 47.5);
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error_with_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = CarbonIntensityClient::new(server.uri());
        let (from, to) = range();
        let err = client.fetch_generation_mix(from, to).await.unwrap_err();

        match err {
            ProviderError::Upstream { message } => assert_eq!(message, "Service Unavailable"),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"rows": []}"#, "application/json"))
            .mount(&server)
            .await;

        let client = CarbonIntensityClient::new(server.uri());
        let (from, to) = range();
        let err = client.fetch_generation_mix(from, to).await.unwrap_err();

        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[tokio::test]
    async fn unparseable_timestamp_is_parse_error() {
        let server = MockServer::start().await;
        let body = r#"{"data": [{"from": "yesterday", "to": "2024-03-01T00:30Z", "generationmix": []}]}"#;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let client = CarbonIntensityClient::new(server.uri());
        let (from, to) = range();
        let err = client.fetch_generation_mix(from, to).await.unwrap_err();

        assert!(matches!(err, ProviderError::Parse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_upstream_error() {
        let client = CarbonIntensityClient::new("http://127.0.0.1:1".to_string());
        let (from, to) = range();
        let err = client.fetch_generation_mix(from, to).await.unwrap_err();

        assert!(matches!(err, ProviderError::Upstream { .. }));
    }
}
