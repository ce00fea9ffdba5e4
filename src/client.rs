use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

/// Annotation pipeline requested from the service. Tokenization, sentence
/// splitting and POS tags are everything the simplifier consumes; the coref
/// properties are accepted by the service but otherwise inert.
const ANNOTATORS: &str = "tokenize,ssplit,pos";

/// Failure modes of a single annotation request.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    /// The request never completed, or the body was not JSON at all.
    #[error("annotation transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The body was JSON, but not the shape the service documents.
    #[error("malformed annotation response: {0}")]
    Contract(#[source] serde_json::Error),
}

impl From<reqwest::Error> for AnnotationError {
    fn from(e: reqwest::Error) -> Self {
        AnnotationError::Transport(Box::new(e))
    }
}

/// Remote part-of-speech tagging.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Submit `text` for tokenization, sentence splitting and POS tagging.
    ///
    /// Resolves with whatever JSON the service returns. The HTTP status is
    /// not consulted: the endpoint reports its own failures in JSON bodies.
    /// Retrying is the caller's business; one call means one request.
    async fn fetch_annotations(&self, text: &str) -> Result<Value, AnnotationError>;
}

/// Request configuration carried in the `properties` query parameter.
/// Field order is fixed; the serialized string is identical between
/// requests except for the timestamp.
#[derive(Serialize)]
struct Properties<'a> {
    annotators: &'a str,
    date: &'a str,
    #[serde(rename = "coref.md.type")]
    coref_md_type: &'a str,
    #[serde(rename = "coref.mode")]
    coref_mode: &'a str,
}

/// Client for the hosted CoreNLP web endpoint.
pub struct HttpAnnotator {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAnnotator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn request_url(&self, date: &str) -> Result<String, AnnotationError> {
        let properties = Properties {
            annotators: ANNOTATORS,
            date,
            coref_md_type: "dep",
            coref_mode: "statistical",
        };
        let json = serde_json::to_string(&properties)
            .map_err(|e| AnnotationError::Transport(Box::new(e)))?;
        Ok(format!(
            "{}/?properties={}",
            self.base_url,
            urlencoding::encode(&json)
        ))
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn fetch_annotations(&self, text: &str) -> Result<Value, AnnotationError> {
        let url = self.request_url(&request_timestamp(Local::now()))?;
        trace!(%url, "annotation request");
        // The endpoint treats the body as a form field with an empty
        // value, hence the trailing '='.
        let response = self.http.post(&url).body(format!("{text}=")).send().await?;
        debug!(status = %response.status(), "annotation response");
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AnnotationError::Transport(Box::new(e)))
    }
}

/// The `date` property embedded in every request, the way CoreNLP's own
/// clients send it: local time, second precision, zero-padded. Required
/// by the remote protocol, unused for correctness on either end.
fn request_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S").to_string()
}
