use super::error::ProviderError;
use super::ProviderClient;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    sentences: Vec<&'a str>,
    src_lang: &'a str,
    tgt_lang: &'a str,
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    input: &'a str,
    response_format: &'a str,
}

/// HTTP implementation of [`ProviderClient`].
pub struct HttpProviderClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProviderClient {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn classify_status(status: StatusCode, body: String) -> ProviderError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            ProviderError::RateLimited(body)
        } else if status.is_server_error() {
            ProviderError::ConnectionFailure(format!("provider returned {}: {}", status, body))
        } else {
            ProviderError::InvalidResponse(format!("provider returned {}: {}", status, body))
        }
    }

    /// Collapse the provider's known response shapes into one outcome.
    ///
    /// Accepted: object with a "translations" list, object with a bare
    /// "translation" string, a bare string, a bare list of strings.
    /// Empty strings/lists, null and the bare-zero sentinel all map to
    /// `EmptyResult`; any other shape is `InvalidResponse`.
    fn normalize_translation(value: Value) -> Result<String, ProviderError> {
        match value {
            Value::Object(map) => {
                if let Some(translations) = map.get("translations") {
                    match translations {
                        Value::Array(items) => Self::first_non_empty(items),
                        other => Err(ProviderError::InvalidResponse(format!(
                            "\"translations\" is not a list: {}",
                            other
                        ))),
                    }
                } else if let Some(translation) = map.get("translation") {
                    match translation {
                        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
                        Value::String(_) => Err(ProviderError::EmptyResult),
                        other => Err(ProviderError::InvalidResponse(format!(
                            "\"translation\" is not a string: {}",
                            other
                        ))),
                    }
                } else {
                    Err(ProviderError::InvalidResponse(
                        "object without translations".to_string(),
                    ))
                }
            }
            Value::String(s) => {
                if s.trim().is_empty() {
                    Err(ProviderError::EmptyResult)
                } else {
                    Ok(s)
                }
            }
            Value::Array(items) => Self::first_non_empty(&items),
            Value::Null => Err(ProviderError::EmptyResult),
            // The provider has been observed returning a bare 0 instead
            // of a payload when it produced nothing.
            Value::Number(n) if n.as_i64() == Some(0) => Err(ProviderError::EmptyResult),
            other => Err(ProviderError::InvalidResponse(format!(
                "unrecognized payload: {}",
                other
            ))),
        }
    }

    fn first_non_empty(items: &[Value]) -> Result<String, ProviderError> {
        match items.first() {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(Value::String(_)) | None => Err(ProviderError::EmptyResult),
            Some(other) => Err(ProviderError::InvalidResponse(format!(
                "non-string translation entry: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn translate(
        &self,
        text: &str,
        src_code: &str,
        tgt_code: &str,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            src = src_code,
            tgt = tgt_code,
            text_length = text.len(),
            "Calling provider translate"
        );

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .header("X-API-Key", &self.api_key)
            .json(&TranslateRequest {
                sentences: vec![text],
                src_lang: src_code,
                tgt_lang: tgt_code,
            })
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("non-JSON body: {}", e)))?;

        Self::normalize_translation(payload)
    }

    async fn synthesize(&self, text: &str, format: &str) -> Result<Vec<u8>, ProviderError> {
        tracing::debug!(
            text_length = text.len(),
            format = format,
            "Calling provider speech synthesis"
        );

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .header("X-API-Key", &self.api_key)
            .json(&SynthesizeRequest {
                input: text,
                response_format: format,
            })
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, body));
        }

        // A JSON or text body here means the provider answered with
        // diagnostics instead of audio.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type.contains("json") || content_type.starts_with("text/") {
            return Err(ProviderError::EmptyAudio);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::ConnectionFailure(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ProviderError::EmptyAudio);
        }

        tracing::debug!(audio_size = bytes.len(), "Speech synthesis completed");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server_uri: &str) -> HttpProviderClient {
        HttpProviderClient::new(
            reqwest::Client::new(),
            server_uri.to_string(),
            "test-key".to_string(),
        )
    }

    // ==================== Response normalization ====================

    #[test]
    fn test_normalize_object_with_translations_list() {
        let value = json!({"translations": ["namaste"]});
        assert_eq!(
            HttpProviderClient::normalize_translation(value).unwrap(),
            "namaste"
        );
    }

    #[test]
    fn test_normalize_object_with_bare_translation() {
        let value = json!({"translation": "vanakkam"});
        assert_eq!(
            HttpProviderClient::normalize_translation(value).unwrap(),
            "vanakkam"
        );
    }

    #[test]
    fn test_normalize_bare_string() {
        let value = json!("namaskara");
        assert_eq!(
            HttpProviderClient::normalize_translation(value).unwrap(),
            "namaskara"
        );
    }

    #[test]
    fn test_normalize_bare_list() {
        let value = json!(["namaskaram"]);
        assert_eq!(
            HttpProviderClient::normalize_translation(value).unwrap(),
            "namaskaram"
        );
    }

    #[test]
    fn test_normalize_empty_list_is_empty_result() {
        let value = json!({"translations": []});
        assert!(matches!(
            HttpProviderClient::normalize_translation(value),
            Err(ProviderError::EmptyResult)
        ));
    }

    #[test]
    fn test_normalize_empty_string_is_empty_result() {
        let value = json!({"translations": ["  "]});
        assert!(matches!(
            HttpProviderClient::normalize_translation(value),
            Err(ProviderError::EmptyResult)
        ));
    }

    #[test]
    fn test_normalize_null_is_empty_result() {
        assert!(matches!(
            HttpProviderClient::normalize_translation(Value::Null),
            Err(ProviderError::EmptyResult)
        ));
    }

    #[test]
    fn test_normalize_bare_zero_is_empty_result() {
        let value = json!(0);
        assert!(matches!(
            HttpProviderClient::normalize_translation(value),
            Err(ProviderError::EmptyResult)
        ));
    }

    #[test]
    fn test_normalize_unrecognized_object_is_invalid() {
        let value = json!({"detail": "unexpected"});
        assert!(matches!(
            HttpProviderClient::normalize_translation(value),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_normalize_non_zero_number_is_invalid() {
        let value = json!(42);
        assert!(matches!(
            HttpProviderClient::normalize_translation(value),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    // ==================== Translate over HTTP ====================

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(header("X-API-Key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"translations": ["नमस्ते"]})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client
            .translate("hello", "eng_Latn", "hin_Deva")
            .await
            .expect("should translate");
        assert_eq!(result, "नमस्ते");
    }

    #[tokio::test]
    async fn test_translate_429_is_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .translate("hello", "eng_Latn", "hin_Deva")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_translate_500_is_connection_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .translate("hello", "eng_Latn", "hin_Deva")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ConnectionFailure(_)));
    }

    #[tokio::test]
    async fn test_translate_400_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .translate("hello", "eng_Latn", "hin_Deva")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_translate_non_json_body_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .translate("hello", "eng_Latn", "hin_Deva")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    // ==================== Synthesize over HTTP ====================

    #[tokio::test]
    async fn test_synthesize_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(header("X-API-Key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![0xff, 0xfb, 0x90, 0x00]),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let audio = client
            .synthesize("नमस्ते", "mp3")
            .await
            .expect("should synthesize");
        assert_eq!(audio, vec![0xff, 0xfb, 0x90, 0x00]);
    }

    #[tokio::test]
    async fn test_synthesize_empty_body_is_empty_audio() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(Vec::<u8>::new()),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.synthesize("hello", "mp3").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyAudio));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_synthesize_json_body_is_empty_audio() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "no audio"})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.synthesize("hello", "mp3").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyAudio));
    }

    #[tokio::test]
    async fn test_synthesize_429_is_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.synthesize("hello", "mp3").await.unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited(_)));
    }
}
