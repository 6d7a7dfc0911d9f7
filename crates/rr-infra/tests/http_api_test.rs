use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use rr_core::ports::{ObjectiveFeedPort, RegistrationGatewayPort, RemoteError};
use rr_core::registration::RegistrationForm;
use rr_infra::{HttpObjectiveFeed, HttpRegistrationGateway, ReqwestHttpClient};

fn http() -> Arc<ReqwestHttpClient> {
    Arc::new(ReqwestHttpClient::new(Duration::from_secs(5)).expect("http client"))
}

fn api_base(server: &Server) -> String {
    format!("{}/api", server.url())
}

#[tokio::test]
async fn phone_challenge_posts_phone_and_returns_code() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/sendNumber")
        .match_body(Matcher::Json(json!({ "telefone": "81998765432" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("4821")
        .create_async()
        .await;
    let gateway = HttpRegistrationGateway::new(http(), api_base(&server));

    let code = gateway
        .send_phone_challenge("81998765432")
        .await
        .expect("challenge");

    mock.assert_async().await;
    assert_eq!(code, "4821");
}

#[tokio::test]
async fn phone_challenge_failure_status_is_classified() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/sendNumber")
        .with_status(500)
        .create_async()
        .await;
    let gateway = HttpRegistrationGateway::new(http(), api_base(&server));

    let err = gateway
        .send_phone_challenge("81998765432")
        .await
        .expect_err("server error");

    assert_eq!(err, RemoteError::ChallengeRejected { status: 500 });
}

#[tokio::test]
async fn code_validation_sends_code_as_integer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/validateCode")
        .match_body(Matcher::Json(
            json!({ "telefone": "81998765432", "codigo": 821 }),
        ))
        .with_status(200)
        .create_async()
        .await;
    let gateway = HttpRegistrationGateway::new(http(), api_base(&server));

    gateway
        .validate_code("81998765432", "0821")
        .await
        .expect("validate");

    mock.assert_async().await;
}

#[tokio::test]
async fn code_validation_rejection_is_classified() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/validateCode")
        .with_status(401)
        .create_async()
        .await;
    let gateway = HttpRegistrationGateway::new(http(), api_base(&server));

    let err = gateway
        .validate_code("81998765432", "4821")
        .await
        .expect_err("rejected");

    assert_eq!(err, RemoteError::ValidationRejected { status: 401 });
}

#[tokio::test]
async fn register_posts_the_form_and_classifies_conflicts() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::PartialJson(json!({
            "CPF": "529.982.247-25",
            "telefone": "81998765432",
            "mochila": false
        })))
        .with_status(409)
        .create_async()
        .await;
    let gateway = HttpRegistrationGateway::new(http(), api_base(&server));
    let form = RegistrationForm {
        phone: "(81) 99876-5432".into(),
        tax_id_individual: "529.982.247-25".into(),
        ..Default::default()
    };

    let err = gateway.register(&form).await.expect_err("conflict");

    mock.assert_async().await;
    assert_eq!(err, RemoteError::RegistrationRejected { status: 409 });
}

#[tokio::test]
async fn objective_feed_maps_the_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/objective")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "id": "a", "titulo": "Primeira entrega", "meta": 1,
                  "image": { "url": "https://cdn.example.com/a.png" }, "id_campanha": "c-1" },
                { "id": "b", "titulo": "Dez entregas", "meta": 0.3,
                  "image": { "url": "https://cdn.example.com/b.png" }, "id_campanha": "c-2" }
            ])
            .to_string(),
        )
        .create_async()
        .await;
    let feed = HttpObjectiveFeed::new(http(), api_base(&server));

    let objectives = feed.fetch_objectives().await.expect("objectives");

    mock.assert_async().await;
    assert_eq!(objectives.len(), 2);
    assert_eq!(objectives[0].id.as_str(), "a");
    assert!(objectives[0].is_complete());
    assert_eq!(objectives[1].campaign_id.as_str(), "c-2");
}

#[tokio::test]
async fn objective_feed_reports_status_and_decode_failures() {
    let mut server = Server::new_async().await;
    let _down = server
        .mock("GET", "/down/objective")
        .with_status(503)
        .create_async()
        .await;
    let _garbage = server
        .mock("GET", "/garbage/objective")
        .with_status(200)
        .with_body("<html>")
        .create_async()
        .await;

    let down = HttpObjectiveFeed::new(http(), format!("{}/down", server.url()));
    assert_eq!(
        down.fetch_objectives().await.expect_err("down"),
        RemoteError::FeedRejected { status: 503 }
    );

    let garbage = HttpObjectiveFeed::new(http(), format!("{}/garbage", server.url()));
    assert!(matches!(
        garbage.fetch_objectives().await,
        Err(RemoteError::Decode(_))
    ));
}
