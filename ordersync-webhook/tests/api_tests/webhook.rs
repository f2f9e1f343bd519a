use crate::context::{TestServer, COMMERCE_TOKEN, COMPANY_TOKEN};
use futures::{stream, StreamExt};
use http::{Method, StatusCode};
use mockito::{Matcher, Mock};
use ordersync_domain::OrderSyncError;
use serde_json::{json, Value};

async fn mock_json(server: &mut TestServer, path: &str, status: usize, body: Value) -> Mock {
    server
        .mock_server
        .mock("GET", path)
        .match_header("x-auth-token", COMMERCE_TOKEN)
        .match_header("accept", "application/json")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn mock_line_items(server: &mut TestServer, order_id: u64) -> Vec<Mock> {
    vec![
        mock_json(
            server,
            &format!("/stores/abc123/v2/orders/{order_id}/products"),
            200,
            json!([
                { "id": 1, "order_id": order_id, "product_id": 111, "name": "Anvil", "sku": "ANV-1", "quantity": 2, "price_inc_tax": "49.9900" },
                { "id": 2, "order_id": order_id, "product_id": 112, "name": "Rope", "sku": "RP-9", "quantity": 1, "price_inc_tax": "9.5000" }
            ]),
        )
        .await,
        mock_json(
            server,
            &format!("/stores/abc123/v2/orders/{order_id}/fees"),
            200,
            json!([{ "id": 3, "type": "custom_fee", "display_name_customer": "Handling", "cost_inc_tax": "5.0000" }]),
        )
        .await,
        mock_json(
            server,
            &format!("/stores/abc123/v2/orders/{order_id}/coupons"),
            200,
            json!([{ "id": 4, "coupon_id": 21, "code": "SPRING", "amount": "10.0000", "discount": "10.0000" }]),
        )
        .await,
    ]
}

fn directory() -> Value {
    json!({
        "code": 200,
        "data": [
            {
                "companyId": 41,
                "companyName": "Globex",
                "extraFields": [{ "fieldName": "E8 COMPANY ID", "fieldValue": "G-1" }]
            },
            {
                "companyId": 42,
                "companyName": "  acme CORP ",
                "extraFields": [
                    { "fieldName": "Region", "fieldValue": "EMEA" },
                    { "fieldName": "E8 COMPANY ID", "fieldValue": "X-9" }
                ]
            }
        ],
        "meta": {
            "message": "SUCCESS",
            "pagination": { "totalCount": 2, "offset": 0, "limit": 10 }
        }
    })
}

#[tokio::test]
async fn test_order_with_b2b_customer_is_fully_aggregated() -> Result<(), OrderSyncError> {
    let mut server = TestServer::new().await?;

    let _order = mock_json(
        &mut server,
        "/stores/abc123/v2/orders/501",
        200,
        json!({ "id": 501, "customer_id": 77, "status": "Awaiting Fulfillment", "total_inc_tax": "105.4800", "currency_code": "USD" }),
    )
    .await;
    let _customer = mock_json(
        &mut server,
        "/stores/abc123/v2/customers/77",
        200,
        json!({ "id": 77, "email": "jane@acme.test", "first_name": "Jane", "last_name": "Doe", "company": "Acme Corp" }),
    )
    .await;
    let _items = mock_line_items(&mut server, 501).await;
    let companies = server
        .mock_server
        .mock("GET", "/api/v3/io/companies")
        .match_header("x-auth-token", COMPANY_TOKEN)
        .with_status(200)
        .with_body(directory().to_string())
        .expect(1)
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>(
            "api/webhook",
            Method::POST,
            Some(&json!({ "scope": "store/order/created", "data": { "type": "order", "id": 501 } })),
        )
        .await?;

    companies.assert_async().await;
    assert_eq!(res.code, StatusCode::OK);

    let data = &res.data["data"];
    assert_eq!(res.data["success"], json!(true));
    assert_eq!(data["order"]["id"], json!(501));
    assert_eq!(data["order"]["currency_code"], json!("USD"));
    assert_eq!(data["customer"]["id"], json!(77));
    assert_eq!(data["products"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["fees"][0]["type"], json!("custom_fee"));
    assert_eq!(data["coupons"][0]["code"], json!("SPRING"));
    assert_eq!(data["matchedCompany"]["companyId"], json!(42));
    assert_eq!(data["companyId"], json!(42));
    assert_eq!(data["e8CompanyId"], json!("X-9"));

    Ok(())
}

#[tokio::test]
async fn test_customer_without_company_never_queries_directory() -> Result<(), OrderSyncError> {
    let mut server = TestServer::new().await?;

    let _order = mock_json(
        &mut server,
        "/stores/abc123/v2/orders/502",
        200,
        json!({ "id": 502, "customer_id": 78 }),
    )
    .await;
    let _customer = mock_json(
        &mut server,
        "/stores/abc123/v2/customers/78",
        200,
        json!({ "id": 78, "email": "solo@example.test", "company": null }),
    )
    .await;
    let _items = mock_line_items(&mut server, 502).await;
    let companies = server
        .mock_server
        .mock("GET", "/api/v3/io/companies")
        .expect(0)
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>(
            "api/webhook",
            Method::POST,
            Some(&json!({ "data": { "id": 502 } })),
        )
        .await?;

    companies.assert_async().await;
    assert_eq!(res.code, StatusCode::OK);

    let data = &res.data["data"];
    assert_eq!(data["customer"]["id"], json!(78));
    assert_eq!(data["matchedCompany"], Value::Null);
    assert_eq!(data["companyId"], Value::Null);
    assert_eq!(data["e8CompanyId"], Value::Null);

    Ok(())
}

#[tokio::test]
async fn test_unavailable_order_fails_without_data() -> Result<(), OrderSyncError> {
    let mut server = TestServer::new().await?;

    let _order = mock_json(
        &mut server,
        "/stores/abc123/v2/orders/503",
        503,
        json!({ "title": "Service Unavailable" }),
    )
    .await;
    let customers = server
        .mock_server
        .mock("GET", Matcher::Regex(r"^/stores/abc123/v2/customers/".into()))
        .expect(0)
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>(
            "api/webhook",
            Method::POST,
            Some(&json!({ "data": { "id": 503 } })),
        )
        .await?;

    customers.assert_async().await;
    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.data["success"], json!(false));
    assert!(res.data.get("data").is_none());

    Ok(())
}

#[tokio::test]
async fn test_invalid_json_is_rejected_before_any_upstream_call() -> Result<(), OrderSyncError> {
    let mut server = TestServer::new().await?;

    let upstream = server
        .mock_server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let res = server
        .send_raw::<Value>("api/webhook", r#"{"data": {"id": 501"#)
        .await?;

    upstream.assert_async().await;
    assert_eq!(res.code, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.data,
        json!({ "success": false, "error": "Invalid JSON payload" })
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_order_id_is_a_bad_request() -> Result<(), OrderSyncError> {
    let server = TestServer::new().await?;

    let res = server
        .send_request::<Value, Value>(
            "api/webhook",
            Method::POST,
            Some(&json!({ "scope": "store/order/created", "data": { "type": "order" } })),
        )
        .await?;

    assert_eq!(res.code, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.data,
        json!({ "success": false, "error": "Missing order ID" })
    );

    Ok(())
}

#[tokio::test]
async fn test_redelivery_produces_identical_result() -> Result<(), OrderSyncError> {
    let mut server = TestServer::new().await?;

    let _order = mock_json(
        &mut server,
        "/stores/abc123/v2/orders/504",
        200,
        json!({ "id": 504, "customer_id": 79, "status": "Pending", "billing_address": { "zip": "10001", "city": "New York" } }),
    )
    .await;
    let _customer = mock_json(
        &mut server,
        "/stores/abc123/v2/customers/79",
        200,
        json!({ "id": 79, "company": "Globex" }),
    )
    .await;
    let _items = mock_line_items(&mut server, 504).await;
    let _companies = server
        .mock_server
        .mock("GET", "/api/v3/io/companies")
        .with_status(200)
        .with_body(directory().to_string())
        .create_async()
        .await;

    let payload = json!({ "data": { "id": 504 } });
    let first = server
        .send_request::<Value, Value>("api/webhook", Method::POST, Some(&payload))
        .await?;
    let second = server
        .send_request::<Value, Value>("api/webhook", Method::POST, Some(&payload))
        .await?;

    assert_eq!(first.code, StatusCode::OK);
    assert_eq!(first.data["data"]["e8CompanyId"], json!("G-1"));
    assert_eq!(first.data.to_string(), second.data.to_string());

    Ok(())
}

const PARALLEL_REQUESTS: usize = 8;

#[tokio::test]
async fn test_concurrent_deliveries_are_independent() -> Result<(), OrderSyncError> {
    let mut server = TestServer::new().await?;

    let mut mocks = Vec::new();
    for order_id in 600..600 + PARALLEL_REQUESTS as u64 {
        mocks.push(
            mock_json(
                &mut server,
                &format!("/stores/abc123/v2/orders/{order_id}"),
                200,
                json!({ "id": order_id, "customer_id": 0 }),
            )
            .await,
        );
        mocks.extend(mock_line_items(&mut server, order_id).await);
    }

    let payloads = (600..600 + PARALLEL_REQUESTS as u64)
        .map(|id| json!({ "data": { "id": id } }))
        .collect::<Vec<_>>();

    let results = stream::iter(payloads.iter())
        .map(|payload| {
            server.send_request::<Value, Value>("api/webhook", Method::POST, Some(payload))
        })
        .buffer_unordered(PARALLEL_REQUESTS)
        .collect::<Vec<_>>()
        .await;

    let mut order_ids = results
        .into_iter()
        .map(|r| {
            let res = r.expect("Failed to send request");
            assert_eq!(res.code, StatusCode::OK);
            res.data["data"]["order"]["id"].as_u64().expect("order id")
        })
        .collect::<Vec<_>>();
    order_ids.sort_unstable();

    assert_eq!(
        order_ids,
        (600..600 + PARALLEL_REQUESTS as u64).collect::<Vec<_>>()
    );

    Ok(())
}
