mod harness;

use axum::http::StatusCode;
use futures_util::StreamExt;
use harness::config::ConfigBuilder;
use harness::mock_llm::{MockLlm, Reply, delta_frame};
use parley_llm::types::FinishReason;
use parley_llm::{AdapterError, ContentGenerator, GenerateContentRequest, GenerateContentResponse};

/// Drain a stream into its fragments, panicking on the first error
async fn collect_fragments(mock: &MockLlm) -> Vec<GenerateContentResponse> {
    let adapter = ConfigBuilder::new(&mock.base_url()).adapter();

    adapter
        .generate_content_stream(&GenerateContentRequest::new("Hello"))
        .await
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await
}

#[tokio::test]
async fn fragments_arrive_in_order() {
    let mock = MockLlm::start_streaming([
        delta_frame("Hello", None),
        delta_frame(" from", None),
        delta_frame(" mock", Some("stop")),
        "data: [DONE]\n\n".to_owned(),
    ])
    .await
    .unwrap();

    let fragments = collect_fragments(&mock).await;
    let texts: Vec<_> = fragments.iter().map(GenerateContentResponse::text).collect();

    assert_eq!(texts, ["Hello", " from", " mock"]);
    assert_eq!(fragments[0].finish_reason(), None);
    assert_eq!(fragments[2].finish_reason(), Some(FinishReason::Stop));
}

#[tokio::test]
async fn request_asks_for_a_stream() {
    let mock = MockLlm::start_streaming(["data: [DONE]\n"]).await.unwrap();

    assert!(collect_fragments(&mock).await.is_empty());
    assert_eq!(mock.last_request().unwrap().body["stream"], serde_json::json!(true));
}

#[tokio::test]
async fn frames_split_across_chunks_are_reassembled() {
    let mock = MockLlm::start_streaming([
        r#"data: {"choices":[{"delta":{"content":"He"#,
        r#"llo"}}]}"#,
        "\n\ndata: [DONE]\n",
    ])
    .await
    .unwrap();

    let fragments = collect_fragments(&mock).await;

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text(), "Hello");
}

#[tokio::test]
async fn multibyte_text_split_mid_character() {
    let frame = delta_frame("héllo wörld", None).into_bytes();
    let split = frame.iter().position(|&b| b == 0xC3).unwrap() + 1;

    let mock = MockLlm::start(Reply::Sse(vec![frame[..split].to_vec(), frame[split..].to_vec()]))
        .await
        .unwrap();

    let fragments = collect_fragments(&mock).await;

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text(), "héllo wörld");
}

#[tokio::test]
async fn malformed_and_foreign_lines_are_skipped() {
    let mock = MockLlm::start_streaming([
        ": keep-alive\n".to_owned(),
        "event: ping\n".to_owned(),
        "data: {not json}\n".to_owned(),
        delta_frame("ok", None),
        "data: [DONE]\n".to_owned(),
    ])
    .await
    .unwrap();

    let fragments = collect_fragments(&mock).await;

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text(), "ok");
}

#[tokio::test]
async fn empty_deltas_and_non_stop_finish_produce_nothing() {
    let mock = MockLlm::start_streaming([
        delta_frame("", None),
        delta_frame("text", None),
        delta_frame("", Some("length")),
    ])
    .await
    .unwrap();

    let fragments = collect_fragments(&mock).await;

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].finish_reason(), None);
}

#[tokio::test]
async fn stream_ends_without_done_sentinel() {
    let mock = MockLlm::start_streaming([delta_frame("a", None), "data: {\"choices\":[".to_owned()])
        .await
        .unwrap();

    let fragments = collect_fragments(&mock).await;

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text(), "a");
}

#[tokio::test]
async fn crlf_line_endings_are_accepted() {
    let mock = MockLlm::start_streaming([
        r#"data: {"choices":[{"delta":{"content":"crlf"}}]}"#.to_owned() + "\r\n\r\n",
        "data: [DONE]\r\n".to_owned(),
    ])
    .await
    .unwrap();

    let fragments = collect_fragments(&mock).await;

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text(), "crlf");
}

#[tokio::test]
async fn error_status_fails_before_streaming() {
    let mock = MockLlm::start(Reply::Status(StatusCode::TOO_MANY_REQUESTS)).await.unwrap();
    let adapter = ConfigBuilder::new(&mock.base_url()).adapter();

    let err = adapter
        .generate_content_stream(&GenerateContentRequest::new("hi"))
        .await
        .err()
        .unwrap();

    assert!(matches!(err, AdapterError::Upstream { status: 429, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn abandoning_a_stream_early_is_clean() {
    let mock = MockLlm::start_streaming([
        delta_frame("first", None),
        delta_frame("second", None),
        "data: [DONE]\n".to_owned(),
    ])
    .await
    .unwrap();
    let adapter = ConfigBuilder::new(&mock.base_url()).adapter();

    let mut stream = adapter
        .generate_content_stream(&GenerateContentRequest::new("hi"))
        .await
        .unwrap();
    let first = stream.next().await.unwrap().unwrap();
    drop(stream);

    assert_eq!(first.text(), "first");

    // the adapter stays usable after an abandoned stream
    let again = collect_fragments(&mock).await;
    assert_eq!(again.len(), 2);
}
