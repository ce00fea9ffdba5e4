use httpmock::prelude::*;
use serde_json::json;
use tagged::{AnnotationError, Annotator, HttpAnnotator, TokenKind, parse_text};

#[tokio::test]
async fn posts_raw_text_with_properties_query() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .query_param_exists("properties")
            .body("the quick fox=");
        then.status(200).json_body(json!({"sentences": []}));
    });

    let annotator = HttpAnnotator::new(server.base_url());
    let value = annotator.fetch_annotations("the quick fox").await.unwrap();

    mock.assert_async().await;
    assert_eq!(value, json!({"sentences": []}));
}

#[tokio::test]
async fn non_2xx_json_still_resolves() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST);
        then.status(500).json_body(json!({"error": "overloaded"}));
    });

    let annotator = HttpAnnotator::new(server.base_url());
    let value = annotator.fetch_annotations("hello").await.unwrap();
    assert_eq!(value, json!({"error": "overloaded"}));
}

#[tokio::test]
async fn non_json_body_is_a_transport_failure() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).body("<html>busy</html>");
    });

    let annotator = HttpAnnotator::new(server.base_url());
    let err = annotator.fetch_annotations("hello").await.unwrap_err();
    assert!(matches!(err, AnnotationError::Transport(_)));
}

#[tokio::test]
async fn wrong_shape_is_a_contract_breach() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST);
        then.status(200)
            .json_body(json!({"sentences": [{"tokens": [{"word": "x"}]}]}));
    });

    let annotator = HttpAnnotator::new(server.base_url());
    let err = parse_text(&annotator, "x").await.unwrap_err();
    assert!(matches!(err, AnnotationError::Contract(_)));
}

#[tokio::test]
async fn annotates_and_simplifies_end_to_end() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).body("A wet dog barked.=");
        then.status(200).json_body(json!({
            "sentences": [
                {"tokens": [{"word": "=", "originalText": "=", "pos": "JJ", "before": "", "after": ""}]},
                {"tokens": [
                    {"word": "A", "originalText": "A", "pos": "DT", "before": "", "after": " "},
                    {"word": "wet", "originalText": "wet", "pos": "JJ", "before": " ", "after": " "},
                    {"word": "dog", "originalText": "dog", "pos": "NN", "before": " ", "after": " "},
                    {"word": "barked", "originalText": "barked", "pos": "VBD", "before": " ", "after": ""},
                    {"word": ".", "originalText": ".", "pos": ".", "before": "", "after": ""}
                ]}
            ]
        }));
    });

    let annotator = HttpAnnotator::new(server.base_url());
    let tokens = parse_text(&annotator, "A wet dog barked.").await.unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Filler,
            TokenKind::Adjective,
            TokenKind::Filler,
            TokenKind::Noun,
            TokenKind::Filler,
            TokenKind::Verb,
            TokenKind::Filler,
        ]
    );
    assert_eq!(values, vec!["A", "wet", "", "dog", "", "barked", "."]);
}
