use crate::context::{TestServer, COMMERCE_TOKEN};
use http::{Method, StatusCode};
use mockito::Matcher;
use ordersync_domain::OrderSyncError;
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_subscribes_to_order_created() -> Result<(), OrderSyncError> {
    let mut server = TestServer::with_env(vec![("PUBLIC_DOMAIN", "hooks.example.com")]).await?;

    let hook = json!({
        "id": 18048287,
        "scope": "store/order/created",
        "destination": "https://hooks.example.com/api/webhook",
        "is_active": true
    });
    let hooks = server
        .mock_server
        .mock("POST", "/stores/abc123/v3/hooks")
        .match_header("x-auth-token", COMMERCE_TOKEN)
        .match_body(Matcher::Json(json!({
            "scope": "store/order/created",
            "destination": "https://hooks.example.com/api/webhook",
            "is_active": true,
            "events_history_enabled": true
        })))
        .with_status(200)
        .with_body(json!({ "data": hook, "meta": {} }).to_string())
        .expect(1)
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>("api/webhook/register", Method::GET, None)
        .await?;

    hooks.assert_async().await;
    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data["success"], json!(true));
    assert_eq!(res.data["data"]["data"], hook);

    Ok(())
}

#[tokio::test]
async fn test_rejected_registration_is_reported() -> Result<(), OrderSyncError> {
    let mut server = TestServer::with_env(vec![("PUBLIC_DOMAIN", "hooks.example.com")]).await?;

    let _hooks = server
        .mock_server
        .mock("POST", "/stores/abc123/v3/hooks")
        .with_status(422)
        .with_body(json!({ "title": "Hook already exists" }).to_string())
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>("api/webhook/register", Method::GET, None)
        .await?;

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.data,
        json!({ "success": false, "error": "Failed to register webhook" })
    );

    Ok(())
}

#[tokio::test]
async fn test_register_requires_public_domain() -> Result<(), OrderSyncError> {
    let mut server = TestServer::new().await?;

    let hooks = server
        .mock_server
        .mock("POST", "/stores/abc123/v3/hooks")
        .expect(0)
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>("api/webhook/register", Method::GET, None)
        .await?;

    hooks.assert_async().await;
    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.data,
        json!({ "success": false, "error": "Missing env variables" })
    );

    Ok(())
}
