//! End-to-end analyzer tests against mocked providers.

use sentimerge_core::{AwsCredentials, ProviderConfig};
use sentimerge_sentiment::{
    ComprehendClient, NaturalLanguageClient, OverallSentiment, SentimentAnalyzer, SentimentError,
};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> ProviderConfig {
    ProviderConfig {
        aws_credentials: AwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
        },
        aws_region: "us-east-1".to_string(),
        gcp_language_api_key: "test-key".to_string(),
        timeout_secs: 5,
        max_retries: 0,
        retry_backoff_base_ms: 1,
    }
}

fn analyzer(aws: &MockServer, gcp: &MockServer) -> SentimentAnalyzer {
    let config = test_config();
    SentimentAnalyzer::new(
        ComprehendClient::with_base_url(&config, &aws.uri()).expect("comprehend client"),
        NaturalLanguageClient::with_base_url(&config, &gcp.uri()).expect("language client"),
    )
}

async fn mount_aws(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_gcp(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v1/documents:analyzeEntitySentiment"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn aws_mention(text: &str, positive: f64, negative: f64) -> serde_json::Value {
    serde_json::json!({
        "Text": text,
        "Score": 1.0,
        "GroupScore": 1.0,
        "MentionSentiment": {
            "SentimentScore": { "Positive": positive, "Negative": negative }
        }
    })
}

#[tokio::test]
async fn analyze_merges_both_providers() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;

    mount_aws(
        &aws,
        200,
        serde_json::json!({
            "Entities": [
                {
                    "DescriptiveMentionIndex": [0],
                    "Mentions": [aws_mention("coffee", 0.9, 0.0), aws_mention("it", 0.8, 0.1)]
                },
                {
                    "DescriptiveMentionIndex": [0],
                    "Mentions": [aws_mention("waiter", 0.0, 0.9)]
                }
            ]
        }),
    )
    .await;
    mount_gcp(
        &gcp,
        200,
        serde_json::json!({
            "entities": [
                { "name": "coffee", "salience": 0.7, "sentiment": { "score": 0.8, "magnitude": 1.6 } },
                { "name": "cafe", "salience": 0.3, "sentiment": { "magnitude": 0.1 } }
            ],
            "language": "en"
        }),
    )
    .await;

    let result = analyzer(&aws, &gcp)
        .analyze_sentiment("The coffee was great, it really was. The waiter at the cafe was rude.")
        .await
        .expect("analysis should succeed");

    let texts: Vec<&str> = result.entities.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["cafe", "coffee", "waiter"]);

    assert_eq!(result.common_entities.len(), 1);
    let coffee = &result.common_entities[0];
    assert_eq!(coffee.text, "coffee");
    assert!((coffee.aws_score.expect("aws score") - 0.8).abs() < 1e-9);
    assert_eq!(coffee.overall_sentiment, Some(OverallSentiment::Positive));

    let waiter = &result.entities[2];
    assert!(waiter.gcp_score.is_none());
    assert!(waiter.overall_sentiment.is_none());
}

#[tokio::test]
async fn analyze_fails_when_either_provider_fails() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;

    mount_aws(&aws, 200, serde_json::json!({ "Entities": [] })).await;
    mount_gcp(
        &gcp,
        400,
        serde_json::json!({ "error": { "code": 400, "message": "bad request" } }),
    )
    .await;

    let err = analyzer(&aws, &gcp)
        .analyze_sentiment("hello")
        .await
        .expect_err("provider failure should fail the analysis");
    assert!(matches!(
        err,
        SentimentError::Provider {
            provider: "gcp_language",
            status: 400,
            ..
        }
    ));
}

#[tokio::test]
async fn analyze_rejects_blank_text_without_calling_providers() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&aws)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gcp)
        .await;

    let err = analyzer(&aws, &gcp)
        .analyze_sentiment("   \n")
        .await
        .expect_err("blank text should fail");
    assert!(matches!(err, SentimentError::EmptyText));
}
