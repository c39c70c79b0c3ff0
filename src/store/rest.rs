use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::debug;

use super::{BookStore, StoreError, StoreResult};
use crate::models::Book;

/// Hosted row-store reached over its PostgREST-style HTTP interface
/// (`/rest/v1/<table>`), the way Supabase exposes tables.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> StoreResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
        })
    }

    /// Endpoint for a read-all query over every column.
    pub fn select_all_url(&self) -> String {
        format!("{}/rest/v1/{}?select=*", self.base_url, self.table)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        // Keys that are not valid header values are sent without auth and
        // rejected by the store, which surfaces as a status error.
        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers
    }
}

impl BookStore for RestStore {
    fn fetch_all(&self) -> StoreResult<Vec<Book>> {
        let url = self.select_all_url();
        debug!(%url, "querying rest store");

        let response = self.client.get(&url).headers(self.auth_headers()).send()?;
        let status = response.status();
        let body = response.text()?;

        rows_from_response(status, body)
    }

    fn describe(&self) -> String {
        format!("rest:{}/{}", self.base_url, self.table)
    }
}

/// Turn a select response into rows; anything but 2xx is a status error that
/// keeps the body the store sent back.
fn rows_from_response(status: StatusCode, body: String) -> StoreResult<Vec<Book>> {
    if !status.is_success() {
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }

    decode_rows(&body)
}

/// Decode a JSON array of rows as returned by the select endpoint.
pub(crate) fn decode_rows(body: &str) -> StoreResult<Vec<Book>> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_url_targets_every_column_of_the_table() {
        let store = RestStore::new("https://demo.supabase.co/", "anon", "Books").unwrap();
        assert_eq!(
            store.select_all_url(),
            "https://demo.supabase.co/rest/v1/Books?select=*"
        );
    }

    #[test]
    fn auth_headers_carry_key_twice() {
        let store = RestStore::new("https://demo.supabase.co", "secret", "Books").unwrap();
        let headers = store.auth_headers();
        assert_eq!(headers.get("apikey").unwrap(), "secret");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
    }

    #[test]
    fn decodes_rows_in_payload_order() {
        let rows = decode_rows(
            r#"[
                {"id": 2, "title": "B", "author": "x", "status": "Available"},
                {"id": 1, "title": "A", "author": "y", "status": "Issued", "issued_to": "Sam"}
            ]"#,
        )
        .unwrap();

        let ids: Vec<i64> = rows.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(rows[1].issued_to.as_deref(), Some("Sam"));
    }

    #[test]
    fn error_status_keeps_the_body() {
        let err = rows_from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"Invalid API key"}"#.to_string(),
        )
        .unwrap_err();

        match err {
            StoreError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_status_wins_over_a_valid_payload() {
        let err = rows_from_response(StatusCode::SERVICE_UNAVAILABLE, "[]".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 503, .. }));
    }

    #[test]
    fn success_status_decodes_rows() {
        let rows = rows_from_response(
            StatusCode::OK,
            r#"[{"id": 9, "title": "Beloved", "author": "Toni Morrison"}]"#.to_string(),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author, "Toni Morrison");
    }

    #[test]
    fn non_array_payload_is_a_decode_error() {
        let err = decode_rows(r#"{"message": "permission denied"}"#).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
