use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, error, info};

pub mod annotation;
pub mod client;
pub mod daemon;
pub mod simplify;

pub use annotation::{AnnotationResponse, Sentence, Token};
pub use client::{AnnotationError, Annotator, HttpAnnotator};
pub use simplify::{ClassifiedToken, TokenKind, simplify};

/// One parse request. The id is opaque to the daemon and echoed back
/// verbatim, so callers can correlate replies however they like.
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub id: Value,
    pub text: String,
}

/// Completion of a [`ParseRequest`]. Either the full token sequence with
/// `ok` set, or `ok: false` and no tokens; never partial data.
#[derive(Debug, PartialEq, Serialize)]
pub struct ParseReply {
    pub id: Value,
    pub ok: bool,
    pub tokens: Vec<ClassifiedToken>,
}

/// Annotate `text` remotely and reduce the response to classified tokens.
pub async fn parse_text(
    annotator: &dyn Annotator,
    text: &str,
) -> Result<Vec<ClassifiedToken>, AnnotationError> {
    let raw = annotator.fetch_annotations(text).await?;
    let response: AnnotationResponse =
        serde_json::from_value(raw).map_err(AnnotationError::Contract)?;
    Ok(simplify(&response))
}

/// Resolve a request into its reply. Failures do not escape: the reply
/// carries `ok: false` and an empty token list.
pub async fn process_request(annotator: &dyn Annotator, request: ParseRequest) -> ParseReply {
    match parse_text(annotator, &request.text).await {
        Ok(tokens) => ParseReply {
            id: request.id,
            ok: true,
            tokens,
        },
        Err(e) => {
            error!(?e, id = %request.id, "parse failed");
            ParseReply {
                id: request.id,
                ok: false,
                tokens: Vec::new(),
            }
        }
    }
}

/// Run the daemon against the hosted annotation endpoint.
pub async fn run(socket: PathBuf, corenlp_url: String) -> anyhow::Result<()> {
    serve(socket, Arc::new(HttpAnnotator::new(corenlp_url))).await
}

/// Serve newline-delimited JSON parse requests on a Unix socket.
pub async fn serve(socket: PathBuf, annotator: Arc<dyn Annotator>) -> anyhow::Result<()> {
    if socket.exists() {
        tokio::fs::remove_file(&socket).await.ok();
    }
    let listener = UnixListener::bind(&socket)?;
    info!(?socket, "tagged listening for parse requests");

    loop {
        let (stream, _) = listener.accept().await?;
        let annotator = annotator.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, annotator).await {
                error!(?e, "connection error");
            }
        });
    }
}

async fn handle_connection(stream: UnixStream, annotator: Arc<dyn Annotator>) -> anyhow::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let request: ParseRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                error!(?e, "unreadable request line");
                continue;
            }
        };
        debug!(id = %request.id, bytes = request.text.len(), "parse requested");
        let reply = process_request(annotator.as_ref(), request).await;
        let mut data = serde_json::to_vec(&reply)?;
        data.push(b'\n');
        write_half.write_all(&data).await?;
    }
    Ok(())
}
