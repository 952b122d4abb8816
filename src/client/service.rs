use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, de::DeserializeOwned};

use crate::errors::DUPLICATE_TITLE_CODE;
use crate::models::form::{Form, FormRequest};
use crate::models::response::{FormResponse, MessageResponse, SubmitRequest};

#[derive(Debug)]
pub enum ClientError {
    /// Transport failure or an unreadable success body.
    Http(reqwest::Error),
    NotFound(String),
    DuplicateTitle(String),
    Api { status: u16, message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "Request failed: {e}"),
            ClientError::NotFound(msg) => write!(f, "{msg}"),
            ClientError::DuplicateTitle(msg) => write!(f, "{msg}"),
            ClientError::Api { status, message } => write!(f, "{message} (HTTP {status})"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<u16>,
}

/// Map a non-success status and its body to a [`ClientError`].
pub fn classify_error(status: u16, body: &str) -> ClientError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = if parsed.message.trim().is_empty() {
        match status {
            404 => "Form not found".to_string(),
            _ => "Request failed".to_string(),
        }
    } else {
        parsed.message
    };

    match (status, parsed.code) {
        (400, Some(DUPLICATE_TITLE_CODE)) => ClientError::DuplicateTitle(message),
        (404, _) => ClientError::NotFound(message),
        _ => ClientError::Api { status, message },
    }
}

/// HTTP client for the form API. The base URL is always passed in.
#[derive(Debug, Clone)]
pub struct FormServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl FormServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        FormServiceClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/forms{}", self.base_url, path)
    }

    pub async fn list_forms(&self) -> Result<Vec<Form>, ClientError> {
        self.get("").await
    }

    pub async fn get_form(&self, id: i64) -> Result<Form, ClientError> {
        self.get(&format!("/{id}")).await
    }

    pub async fn create_form(&self, request: &FormRequest) -> Result<Form, ClientError> {
        let resp = self.http.post(self.url("")).json(request).send().await?;
        decode(resp).await
    }

    pub async fn update_form(&self, id: i64, request: &FormRequest) -> Result<Form, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/{id}")))
            .json(request)
            .send()
            .await?;
        decode(resp).await
    }

    /// Returns the server's confirmation message.
    pub async fn delete_form(&self, id: i64) -> Result<String, ClientError> {
        let resp = self.http.delete(self.url(&format!("/{id}"))).send().await?;
        let body: MessageResponse = decode(resp).await?;
        Ok(body.message)
    }

    pub async fn submit(
        &self,
        form_id: i64,
        answers: &HashMap<String, String>,
    ) -> Result<String, ClientError> {
        let body = SubmitRequest {
            form_data: answers.clone(),
        };
        let resp = self
            .http
            .post(self.url(&format!("/{form_id}/submit")))
            .json(&body)
            .send()
            .await?;
        let body: MessageResponse = decode(resp).await?;
        Ok(body.message)
    }

    pub async fn list_responses(&self, form_id: i64) -> Result<Vec<FormResponse>, ClientError> {
        self.get(&format!("/{form_id}/responses")).await
    }

    /// Every form paired with its number of responses. A form whose responses
    /// cannot be fetched counts as zero.
    pub async fn list_forms_with_counts(&self) -> Result<Vec<(Form, usize)>, ClientError> {
        let forms = self.list_forms().await?;
        let mut out = Vec::with_capacity(forms.len());
        for form in forms {
            let count = match self.list_responses(form.id).await {
                Ok(responses) => responses.len(),
                Err(e) => {
                    log::warn!("Could not load responses for form {}: {e}", form.id);
                    0
                }
            };
            out.push((form, count));
        }
        Ok(out)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(path)).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(classify_error(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_injected_and_normalised() {
        let client = FormServiceClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url(""), "http://localhost:5000/api/forms");
        assert_eq!(client.url("/4/submit"), "http://localhost:5000/api/forms/4/submit");
    }

    #[test]
    fn duplicate_title_is_distinguished_by_code() {
        let err = classify_error(400, r#"{"message":"Form Already present use another name","code":3}"#);
        assert!(matches!(err, ClientError::DuplicateTitle(ref m) if m.contains("Already present")));
    }

    #[test]
    fn other_bad_requests_stay_generic() {
        let err = classify_error(400, r#"{"message":"Invalid request body"}"#);
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
    }

    #[test]
    fn not_found_without_body_gets_a_message() {
        let err = classify_error(404, "");
        match err {
            ClientError::NotFound(msg) => assert_eq!(msg, "Form not found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn server_errors_keep_status() {
        let err = classify_error(500, r#"{"message":"Server Error"}"#);
        assert_eq!(err.to_string(), "Server Error (HTTP 500)");
    }
}
