use rue2e::http::{HandlerOption, Spec};
use rue2e::{Client, E2eError, RequestHandler, ResponseBodyModifier, SpecOption};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 测试执行请求后保存状态码、header 和 body
#[tokio::test]
async fn test_run_request_captures_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("content-type", "application/json")
                .set_body_json(json!({"error": "not found"})),
        )
        .mount(&mock_server)
        .await;

    let mut handler = RequestHandler::from_spec_options(
        Client::new(),
        vec![SpecOption::url(format!("{}/missing", mock_server.uri()))],
    )
    .unwrap();

    assert!(handler.response().is_none());
    handler.run_request().await.unwrap();

    let response = handler.response().unwrap();
    assert_eq!(response.status.code(), 404);
    assert!(response.is_client_error());
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(handler.response_json().unwrap(), json!({"error": "not found"}));

    handler.close().unwrap();
    handler.close().unwrap();
}

/// 测试再次执行会覆盖上一次的响应
#[tokio::test]
async fn test_rerun_replaces_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("first"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("second"))
        .mount(&mock_server)
        .await;

    let spec = Spec::new([SpecOption::url(mock_server.uri())]).unwrap();
    let mut handler = RequestHandler::new(Client::new(), [HandlerOption::Spec(spec)]).unwrap();

    handler.run_request().await.unwrap();
    assert_eq!(handler.response_body(), Some(&b"first"[..]));

    handler.run_request().await.unwrap();
    assert_eq!(handler.response().unwrap().status.code(), 500);
    assert_eq!(handler.response_body(), Some(&b"second"[..]));
}

/// 测试没有 Spec 时执行失败
#[tokio::test]
async fn test_run_request_without_spec() {
    let mut handler = RequestHandler::new(Client::new(), std::iter::empty()).unwrap();

    let err = handler.run_request().await.unwrap_err();
    assert!(matches!(err, E2eError::Precondition(_)));
}

/// 测试 body 修改链失败时保留原 body
#[tokio::test]
async fn test_failing_body_chain_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw"))
        .mount(&mock_server)
        .await;

    let mut handler =
        RequestHandler::from_spec_options(Client::new(), vec![SpecOption::url(mock_server.uri())])
            .unwrap();
    handler.run_request().await.unwrap();

    let modifiers = vec![
        ResponseBodyModifier::custom(|mut body| {
            body.extend_from_slice(b"-changed");
            Ok(body)
        }),
        ResponseBodyModifier::custom(|_| Err(E2eError::Other("stop".to_string()))),
    ];
    let err = handler.modify_response_body(&modifiers).unwrap_err();

    assert!(err.to_string().contains("modifying response body failed"));
    assert_eq!(handler.response_body(), Some(&b"raw"[..]));
}
