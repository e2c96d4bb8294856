use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;

use clinica_api::HttpApi;
use clinica_core::{Error, RemoteApi};

fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[tokio::test]
async fn get_passes_query_and_returns_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/pacientes")
                .query_param("cnpj", "12345678000190")
                .query_param("nome", "Maria Silva");
            then.status(200)
                .json_body(json!([{"id": 7, "nome": "Maria Silva"}]));
        })
        .await;

    let api = HttpApi::new(&server.url("/api/v1"));
    let body = api
        .get(
            "/pacientes",
            &query(&[("cnpj", "12345678000190"), ("nome", "Maria Silva")]),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body, json!([{"id": 7, "nome": "Maria Silva"}]));
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start_async().await;
    let payload = json!({
        "cnpj": "12345678000190",
        "nome": "João",
        "cpf": "11122233344",
        "data_nascimento": "1985-03-02",
        "telefone": "11999990000",
        "email": "joao@example.com"
    });
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/pacientes")
                .header("content-type", "application/json")
                .json_body(payload.clone());
            then.status(201).json_body(json!({"id": 99, "status": "criado"}));
        })
        .await;

    let api = HttpApi::new(&server.base_url());
    let body = api.post("/pacientes", payload.clone()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(body, json!({"id": 99, "status": "criado"}));
}

#[tokio::test]
async fn error_status_is_remote_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/executores");
            then.status(500).body("database offline");
        })
        .await;

    let api = HttpApi::new(&server.base_url());
    let err = api.get("/executores", &[]).await.unwrap_err();

    match err {
        Error::Remote(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("database offline"));
        }
        other => panic!("expected a remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_failure_is_remote_error() {
    let api = HttpApi::new("http://127.0.0.1:1");
    let err = api.get("/pacientes", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
}

#[tokio::test]
async fn plain_text_body_is_returned_as_string() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/executores");
            then.status(200).body("nenhum executor");
        })
        .await;

    let api = HttpApi::new(&server.base_url());
    let body = api.get("/executores", &[]).await.unwrap();
    assert_eq!(body, json!("nenhum executor"));
}
