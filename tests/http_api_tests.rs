mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{create_test_app, package_body, TestApp};

async fn create_driver(app: &TestApp) -> String {
    let response = app
        .post("/api/v1/drivers", json!({ "name": "Alice", "vehicle_type": "van" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()["id"].as_str().unwrap().to_string()
}

async fn create_package(app: &TestApp, tracking_number: &str) -> String {
    let response = app.post("/api/v1/packages", package_body(tracking_number)).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()["id"].as_str().unwrap().to_string()
}

async fn create_route(app: &TestApp, driver_id: &str) -> String {
    let response = app
        .post("/routes", json!({ "driver_id": driver_id, "date": "2024-01-01" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let response = app.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_driver_crud() {
    let app = create_test_app().await;
    let id = create_driver(&app).await;

    let response = app.get(&format!("/api/v1/drivers/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["vehicle_type"], "van");
    assert_eq!(body["active"], true);

    let response = app
        .put(
            &format!("/api/v1/drivers/{}", id),
            json!({ "name": "Alicia", "vehicle_type": "truck", "active": false }),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json()["active"], false);

    let response = app.get("/api/v1/drivers").await;
    assert_eq!(response.json().as_array().unwrap().len(), 1);

    let response = app.delete(&format!("/api/v1/drivers/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.is_empty());

    let response = app.get(&format!("/api/v1/drivers/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_bad_input_is_400() {
    let app = create_test_app().await;

    let response = app.get("/api/v1/drivers/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "invalid driver id");

    let response = app
        .post("/api/v1/drivers", json!({ "name": "Alice", "vehicle_type": "plane" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/v1/drivers", json!({ "name": "", "vehicle_type": "bike" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "VALIDATION_ERROR");

    let mut package = package_body("T1");
    package["weight_kg"] = json!(0.0);
    let response = app.post("/api/v1/packages", package).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/routes", json!({ "driver_id": "xyz", "date": "2024-01-01" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_package_endpoints() {
    let app = create_test_app().await;
    let id = create_package(&app, "T1").await;

    let response = app.get("/api/v1/packages/tracking/T1").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json()["id"], id.as_str());

    let mut update = package_body("T1");
    update["customer_name"] = json!("Dave");
    let response = app.put(&format!("/api/v1/packages/{}", id), update).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json()["customer_name"], "Dave");

    let response = app
        .post(&format!("/api/v1/packages/{}/deliver", id), json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["delivered"], true);
    assert!(body["delivery_timestamp"].is_string());

    let response = app.delete(&format!("/api/v1/packages/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let other = create_package(&app, "T2").await;
    let response = app.delete(&format!("/api/v1/packages/{}", other)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_assign_and_list_route_packages() {
    let app = create_test_app().await;
    let driver_id = create_driver(&app).await;
    let route_id = create_route(&app, &driver_id).await;
    let p1 = create_package(&app, "T1").await;
    let p2 = create_package(&app, "T2").await;

    let response = app
        .post(&format!("/api/v1/packages/{}/assign", p1), json!({ "route_id": route_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .post(&format!("/routes/{}/packages", route_id), json!({ "package_ids": [p2] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .post(&format!("/api/v1/packages/{}/assign", p1), json!({ "route_id": route_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app.get(&format!("/api/v1/packages/route/{}", route_id)).await;
    let assignments = response.json();
    assert_eq!(assignments[0]["package_id"], p1.as_str());
    assert_eq!(assignments[0]["order_in_route"], 1);
    assert_eq!(assignments[1]["package_id"], p2.as_str());
    assert_eq!(assignments[1]["order_in_route"], 2);

    let route = app.get(&format!("/routes/{}", route_id)).await.json();
    assert_eq!(route["estimated_distance_km"], 10.0);
    assert_eq!(route["estimated_time_min"], 12);

    let routes = app.get(&format!("/api/v1/drivers/{}/routes", driver_id)).await.json();
    assert_eq!(routes.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_route_lifecycle_scenario() {
    let app = create_test_app().await;
    let driver_id = create_driver(&app).await;
    let route_id = create_route(&app, &driver_id).await;

    let route = app.get(&format!("/routes/{}", route_id)).await.json();
    assert_eq!(route["status"], "pending");
    assert_eq!(route["packages"], json!([]));

    let package_id = create_package(&app, "T1").await;
    app.post(
        &format!("/routes/{}/packages", route_id),
        json!({ "package_ids": [package_id] }),
    )
    .await;

    let route = app.get(&format!("/routes/{}", route_id)).await.json();
    assert_eq!(route["packages"][0]["order_in_route"], 1);
    assert_eq!(route["estimated_distance_km"], 5.0);
    assert_eq!(route["estimated_time_min"], 6);

    let response = app
        .patch(&format!("/routes/{}/status", route_id), Some(json!({ "status": "active" })))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let package = app.get(&format!("/api/v1/packages/{}", package_id)).await.json();
    assert_eq!(package["status"], "assigned");

    let response = app
        .delete(&format!("/api/v1/drivers/{}", driver_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app
        .patch(&format!("/routes/{}/status", route_id), Some(json!({ "status": "completed" })))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json()["code"], "ROUTE_HAS_PENDING_PACKAGES");

    let response = app
        .patch(
            &format!("/routes/{}/packages/{}/delivered", route_id, package_id),
            None,
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let route = app.get(&format!("/routes/{}", route_id)).await.json();
    assert_eq!(route["packages"][0]["delivered"], true);

    let response = app
        .patch(&format!("/routes/{}/status", route_id), Some(json!({ "status": "completed" })))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let package = app.get(&format!("/api/v1/packages/{}", package_id)).await.json();
    assert_eq!(package["status"], "delivered");

    let response = app
        .patch(&format!("/routes/{}/status", route_id), Some(json!({ "status": "active" })))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app
        .delete(&format!("/api/v1/drivers/{}", driver_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delivery_flag_can_be_cleared() {
    let app = create_test_app().await;
    let driver_id = create_driver(&app).await;
    let route_id = create_route(&app, &driver_id).await;
    let package_id = create_package(&app, "T1").await;

    app.post(
        &format!("/routes/{}/packages", route_id),
        json!({ "package_ids": [package_id] }),
    )
    .await;
    app.patch(&format!("/routes/{}/status", route_id), Some(json!({ "status": "active" })))
        .await;

    let uri = format!("/routes/{}/packages/{}/delivered", route_id, package_id);
    app.patch(&uri, Some(json!({ "delivered": true }))).await;
    let response = app.patch(&uri, Some(json!({ "delivered": false }))).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let route = app.get(&format!("/routes/{}", route_id)).await.json();
    assert_eq!(route["packages"][0]["delivered"], false);
    assert!(route["packages"][0].get("delivery_timestamp").is_none());
}

#[tokio::test]
async fn test_route_update_and_delete() {
    let app = create_test_app().await;
    let driver_id = create_driver(&app).await;
    let route_id = create_route(&app, &driver_id).await;

    let response = app
        .put(
            &format!("/routes/{}", route_id),
            json!({
                "driver_id": driver_id,
                "date": "2024-03-04T08:30:00Z",
                "estimated_distance_km": 7.5,
                "estimated_time_min": 9
            }),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["estimated_distance_km"], 7.5);
    assert_eq!(body["status"], "pending");

    let response = app
        .patch(&format!("/routes/{}/status", route_id), Some(json!({ "status": "paused" })))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app.delete(&format!("/routes/{}", route_id)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    let response = app.delete(&format!("/routes/{}", route_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_for_inactive_driver_is_conflict() {
    let app = create_test_app().await;
    let driver_id = create_driver(&app).await;
    app.put(
        &format!("/api/v1/drivers/{}", driver_id),
        json!({ "name": "Alice", "vehicle_type": "van", "active": false }),
    )
    .await;

    let response = app
        .post("/routes", json!({ "driver_id": driver_id, "date": "2024-01-01" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app
        .post(
            "/routes",
            json!({ "driver_id": uuid::Uuid::new_v4().to_string(), "date": "2024-01-01" }),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
