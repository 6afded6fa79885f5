use async_trait::async_trait;
use reqwest::StatusCode;

use crate::storage::config::StoreConfig;
use crate::sync::document_store::{DocumentStore, StoreError};
use crate::timetable::TimetableDocument;

/// Remote JSON document reached over HTTP: `GET` reads it (404 = absent),
/// `PUT` replaces it.
pub struct RestDocumentStore {
    base_url: String,
    document_path: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl RestDocumentStore {
    pub fn new(base_url: impl Into<String>, document_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            document_path: document_path.into(),
            access_token: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        let store = Self::new(config.url.clone(), config.document.clone());
        match config.api_token() {
            Some(token) => store.with_access_token(token.to_string()),
            None => store,
        }
    }

    pub fn with_access_token(mut self, access_token: String) -> Self {
        self.access_token = Some(access_token);
        self
    }

    pub fn document_url(&self) -> String {
        let encoded: Vec<String> = self.document_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.base_url, encoded.join("/"))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn fetch(&self) -> Result<Option<TimetableDocument>, StoreError> {
        let url = self.document_url();
        tracing::debug!("GET {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let status = response.status();
        tracing::debug!("Fetch document response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            tracing::info!("Document {} does not exist yet", self.document_path);
            return Ok(None);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::error!("Authentication failed when fetching {}", self.document_path);
            return Err(StoreError::AuthenticationFailed);
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Failed to fetch document. Status: {}, Body: {}", status, body);
            return Err(StoreError::RequestError(format!("Status {}: {}", status, body)));
        }

        let body = response.text().await?;
        let document: TimetableDocument = serde_json::from_str(&body)?;
        Ok(Some(document))
    }

    async fn overwrite(&self, document: &TimetableDocument) -> Result<(), StoreError> {
        let url = self.document_url();
        tracing::info!("Writing {} classes to {}", document.data.total_entries(), url);

        let response = self.authorize(self.client.put(&url))
            .json(document)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Overwrite document response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::error!("Authentication failed when writing {}", self.document_path);
            return Err(StoreError::AuthenticationFailed);
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Failed to write document. Status: {}, Body: {}", status, body);
            return Err(StoreError::RequestError(format!("Status {}: {}", status, body)));
        }

        Ok(())
    }

    fn describe(&self) -> String {
        self.document_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::{ClassEntry, Timetable, Weekday};
    use chrono::NaiveTime;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn biology() -> ClassEntry {
        ClassEntry {
            name: "Biology".to_string(),
            room: Some("Prof. Shad".to_string()),
            day: Weekday::Monday,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn document_url_joins_encoded_segments() {
        let store = RestDocumentStore::new("http://localhost:8080/v1/", "timetables/my plan");

        assert_eq!(store.document_url(), "http://localhost:8080/v1/timetables/my%20plan");
    }

    #[tokio::test]
    async fn fetch_returns_none_for_missing_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timetables/main"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = RestDocumentStore::new(server.uri(), "timetables/main");

        assert!(store.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_parses_existing_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timetables/main"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data":{"Monday":[{"name":"Biology","room":"Prof. Shad","day":"Monday","startTime":"09:00","endTime":"10:00"}]}}"#,
            ))
            .mount(&server)
            .await;

        let store = RestDocumentStore::new(server.uri(), "timetables/main");
        let document = store.fetch().await.unwrap().unwrap();

        assert_eq!(document.data.day(Weekday::Monday), &[biology()]);
    }

    #[tokio::test]
    async fn fetch_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let store = RestDocumentStore::new(server.uri(), "timetables/main")
            .with_access_token("s3cret".to_string());

        assert!(store.fetch().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn fetch_maps_unauthorized_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = RestDocumentStore::new(server.uri(), "timetables/main");

        assert!(matches!(store.fetch().await, Err(StoreError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn overwrite_puts_whole_document() {
        let server = MockServer::start().await;
        let mut timetable = Timetable::new();
        timetable.add(biology());
        let document = TimetableDocument::new(timetable);

        Mock::given(method("PUT"))
            .and(path("/timetables/main"))
            .and(body_json(serde_json::json!({
                "data": {
                    "Monday": [{
                        "name": "Biology",
                        "room": "Prof. Shad",
                        "day": "Monday",
                        "startTime": "09:00",
                        "endTime": "10:00"
                    }]
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = RestDocumentStore::new(server.uri(), "timetables/main");

        store.overwrite(&document).await.unwrap();
    }

    #[tokio::test]
    async fn overwrite_reports_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let store = RestDocumentStore::new(server.uri(), "timetables/main");
        let result = store.overwrite(&TimetableDocument::default()).await;

        assert!(matches!(result, Err(StoreError::RequestError(message)) if message.contains("boom")));
    }
}
