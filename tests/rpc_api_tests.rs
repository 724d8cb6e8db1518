mod common;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use delivery_planner::rpc::{create_rpc_router, RpcClient, RpcClientError, RpcCode, RpcServer};

use common::{package_body, test_state};

struct TestServer {
    client: RpcClient,
    shutdown: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
}

async fn start_server() -> TestServer {
    let state = test_state();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = RpcServer::new(create_rpc_router(&state));
    let shutdown = server.shutdown_token();
    let handle = tokio::spawn(server.serve(listener));

    TestServer {
        client: RpcClient::connect(addr).await.unwrap(),
        shutdown,
        handle,
    }
}

fn status_code(err: RpcClientError) -> RpcCode {
    match err {
        RpcClientError::Status(status) => status.code,
        other => panic!("expected an RPC status, got {other:?}"),
    }
}

fn id_of(value: &Value, key: &str) -> String {
    value[key]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_route_scenario_over_rpc() {
    let mut server = start_server().await;
    let client = &mut server.client;

    let driver = client
        .call("DriverService/CreateDriver", json!({ "name": "Alice", "vehicle_type": "van" }))
        .await
        .unwrap();
    assert_eq!(driver["driver"]["active"], true);
    let driver_id = id_of(&driver, "driver");

    let route = client
        .call("RouteService/CreateRoute", json!({ "driver_id": driver_id, "date": "2024-01-01" }))
        .await
        .unwrap();
    assert_eq!(route["route"]["status"], "pending");
    let route_id = id_of(&route, "route");

    let package = client
        .call("PackageService/CreatePackage", package_body("T1"))
        .await
        .unwrap();
    let package_id = id_of(&package, "package");

    client
        .call(
            "RouteService/AddPackagesToRoute",
            json!({ "route_id": route_id, "package_ids": [package_id] }),
        )
        .await
        .unwrap();

    let route = client
        .call("RouteService/GetRoute", json!({ "id": route_id }))
        .await
        .unwrap();
    assert_eq!(route["route"]["estimated_distance_km"], 5.0);
    assert_eq!(route["route"]["estimated_time_min"], 6);

    client
        .call("RouteService/UpdateRouteStatus", json!({ "id": route_id, "status": "active" }))
        .await
        .unwrap();

    let err = client
        .call("DriverService/DeleteDriver", json!({ "id": driver_id }))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::FailedPrecondition);

    let err = client
        .call("RouteService/MarkRouteAsCompleted", json!({ "id": route_id }))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::FailedPrecondition);

    client
        .call(
            "RouteService/UpdatePackageDeliveryStatus",
            json!({ "route_id": route_id, "package_id": package_id, "delivered": true }),
        )
        .await
        .unwrap();

    let completed = client
        .call("RouteService/MarkRouteAsCompleted", json!({ "id": route_id }))
        .await
        .unwrap();
    assert_eq!(completed["route"]["status"], "completed");

    let packages = client
        .call("PackageService/GetPackagesByRoute", json!({ "route_id": route_id }))
        .await
        .unwrap();
    assert_eq!(packages["packages"][0]["tracking_number"], "T1");
    assert_eq!(packages["packages"][0]["status"], "delivered");

    client
        .call("DriverService/DeleteDriver", json!({ "id": driver_id }))
        .await
        .unwrap();

    server.shutdown.cancel();
    drop(server.client);
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_error_codes() {
    let mut server = start_server().await;
    let client = &mut server.client;

    let err = client
        .call("DriverService/GetDriver", json!({ "id": "not-a-uuid" }))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::InvalidArgument);

    let err = client
        .call("DriverService/GetDriver", json!({ "id": uuid::Uuid::new_v4().to_string() }))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::NotFound);

    let err = client
        .call("DriverService/Teleport", json!({}))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::Unimplemented);

    let err = client
        .call("FleetService/ListDrivers", Value::Null)
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::Unimplemented);

    let err = client
        .call("PackageService/CreatePackage", json!({ "tracking_number": "T1" }))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::InvalidArgument);

    let err = client
        .call("RouteService/CreateRoute", json!({ "driver_id": "", "date": "" }))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::InvalidArgument);
}

#[tokio::test]
async fn test_package_methods() {
    let mut server = start_server().await;
    let client = &mut server.client;

    let created = client
        .call("PackageService/CreatePackage", package_body("T7"))
        .await
        .unwrap();
    let id = id_of(&created, "package");

    let mut update = package_body("T7");
    update["id"] = json!(id);
    update["customer_address"] = json!("2 Side St");
    let updated = client.call("PackageService/UpdatePackage", update).await.unwrap();
    assert_eq!(updated["package"]["customer_address"], "2 Side St");

    let found = client
        .call("PackageService/GetPackageByTrackingNumber", json!({ "tracking_number": "T7" }))
        .await
        .unwrap();
    assert_eq!(found["package"]["id"], id.as_str());

    let delivered = client
        .call("PackageService/MarkPackageAsDelivered", json!({ "id": id }))
        .await
        .unwrap();
    assert_eq!(delivered["package"]["delivered"], true);

    let err = client
        .call("PackageService/DeletePackage", json!({ "id": id }))
        .await
        .unwrap_err();
    assert_eq!(status_code(err), RpcCode::FailedPrecondition);

    let list = client
        .call("PackageService/ListPackages", Value::Null)
        .await
        .unwrap();
    assert_eq!(list["packages"].as_array().unwrap().len(), 1);
}
