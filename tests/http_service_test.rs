use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use order_desk::api::{ApiError, CatalogService, HttpCatalogService};
use order_desk::model::{Credentials, NewProduct, OrderId, ProductId, ProductPatch, Role};
use order_desk::ordering::{OrderDesk, OrderingError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Every request the stub saw, as `(method and path, body)`.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<(String, Value)>>>);

impl Recorder {
    fn push(&self, route: impl Into<String>, body: Value) {
        self.0.lock().unwrap().push((route.into(), body));
    }

    fn take(&self) -> Vec<(String, Value)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

fn login_reply(body: &Value) -> Json<Value> {
    let message = if body["password"] == "secret" {
        "Login exitoso"
    } else {
        "Credenciales incorrectas"
    };
    Json(json!({ "message": message }))
}

async fn admin_login(State(rec): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    rec.push("POST /api/login", body.clone());
    login_reply(&body)
}

async fn client_login(State(rec): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    rec.push("POST /api/login-client", body.clone());
    login_reply(&body)
}

async fn list_products() -> Json<Value> {
    Json(json!([
        { "id": 1, "nombre": "Notebook", "precio": 15.0, "imagen": "img/1.png" },
        { "id": 2, "name": "Pen", "price": 2.5 },
        { "id": 3, "nombre": "Eraser", "precio": 1.0 }
    ]))
}

async fn create_product(State(rec): State<Recorder>, Json(body): Json<Value>) -> StatusCode {
    rec.push("POST /api/products", body);
    StatusCode::CREATED
}

async fn update_product(
    State(rec): State<Recorder>,
    Path(id): Path<u32>,
    Json(body): Json<Value>,
) -> StatusCode {
    rec.push(format!("PUT /api/products/{id}"), body);
    StatusCode::OK
}

async fn delete_product(State(rec): State<Recorder>, Path(id): Path<u32>) -> Response {
    rec.push(format!("DELETE /api/products/{id}"), Value::Null);
    if id == 99 {
        return (StatusCode::NOT_FOUND, "product not found").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create_order(State(rec): State<Recorder>, Json(body): Json<Value>) -> Response {
    rec.push("POST /api/orders", body.clone());
    if body["product"] == "Pen" {
        return (StatusCode::CONFLICT, "out of stock").into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn list_orders() -> Json<Value> {
    Json(json!([
        {
            "id": 10, "product": "Notebook", "amount": 2, "total": "30.00",
            "orderDate": "2024-05-01", "deliveryDate": null, "orderStatus": null
        },
        {
            "id": 11, "product": "Eraser", "amount": 1, "total": 1.0,
            "orderDate": "2024-05-02", "deliveryDate": "2024-05-04", "orderStatus": "delivered"
        }
    ]))
}

async fn deliver_order(State(rec): State<Recorder>, Path(id): Path<u32>) -> StatusCode {
    rec.push(format!("PUT /api/orders/{id}"), Value::Null);
    StatusCode::OK
}

async fn broken_products() -> &'static str {
    "<html>maintenance</html>"
}

/// Starts the stub on an ephemeral port and returns a binding pointed at it.
async fn start_stub() -> (HttpCatalogService, Recorder) {
    let rec = Recorder::default();
    let app = Router::new()
        .route("/api/login", post(admin_login))
        .route("/api/login-client", post(client_login))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}", put(deliver_order))
        .route("/broken/products", get(broken_products))
        .with_state(rec.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let service =
        HttpCatalogService::new(&format!("http://{addr}/api"), Duration::from_secs(5)).unwrap();
    (service, rec)
}

#[tokio::test]
async fn test_login_uses_role_endpoint() {
    let (service, rec) = start_stub().await;
    let good = Credentials {
        email: "ana@tienda.com".into(),
        password: "secret".into(),
    };
    let bad = Credentials {
        email: "ana@tienda.com".into(),
        password: "nope".into(),
    };

    assert!(service.login(Role::Admin, &good).await.unwrap().is_success());
    assert!(!service.login(Role::Client, &bad).await.unwrap().is_success());

    let seen = rec.take();
    assert_eq!(seen[0].0, "POST /api/login");
    assert_eq!(seen[0].1, json!({ "email": "ana@tienda.com", "password": "secret" }));
    assert_eq!(seen[1].0, "POST /api/login-client");
}

#[tokio::test]
async fn test_catalog_wire_format() {
    let (service, rec) = start_stub().await;

    let products = service.list_products().await.unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].image.as_deref(), Some("img/1.png"));
    assert_eq!(products[1].name, "Pen");
    assert_eq!(products[1].price, 2.5);

    service
        .create_product(&NewProduct {
            name: "Ruler".into(),
            price: 3.0,
            image: None,
        })
        .await
        .unwrap();
    service
        .update_product(
            ProductId(2),
            &ProductPatch {
                name: None,
                price: Some(2.75),
            },
        )
        .await
        .unwrap();
    let err = service.delete_product(ProductId(99)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 404,
            body: "product not found".into(),
        }
    );

    let seen = rec.take();
    assert_eq!(seen[0], ("POST /api/products".into(), json!({ "nombre": "Ruler", "precio": 3.0 })));
    assert_eq!(seen[1], ("PUT /api/products/2".into(), json!({ "precio": 2.75 })));
    assert_eq!(seen[2].0, "DELETE /api/products/99");
}

#[tokio::test]
async fn test_orders_wire_format() {
    let (service, rec) = start_stub().await;

    let orders = service.list_orders().await.unwrap();
    assert_eq!(orders[0].id, OrderId(10));
    assert_eq!(orders[0].total, 30.0);
    assert_eq!(orders[0].status, "pending");
    assert_eq!(orders[0].delivered_at, None);
    assert!(orders[1].is_delivered());

    service.update_order_status(OrderId(10)).await.unwrap();
    assert_eq!(rec.take()[0].0, "PUT /api/orders/10");
}

#[tokio::test]
async fn test_partial_failure_over_http() {
    let (service, rec) = start_stub().await;
    let mut desk = OrderDesk::new(Arc::new(service));
    desk.load().await;

    desk.set_quantity(ProductId(1), 2).unwrap();
    desk.set_quantity(ProductId(2), 4).unwrap();
    let report = desk.place_order().await;

    assert_eq!(
        report.to_string(),
        "Order for Notebook placed successfully!\nError ordering Pen: out of stock"
    );
    assert_eq!(desk.error(), Some(&OrderingError::PartialFailure));
    assert_eq!(desk.lines()[0].quantity(), 0);
    assert_eq!(desk.lines()[1].quantity(), 4);

    let mut bodies: Vec<Value> = rec
        .take()
        .into_iter()
        .filter(|(route, _)| route == "POST /api/orders")
        .map(|(_, body)| body)
        .collect();
    bodies.sort_by_key(|b| b["product"].as_str().map(str::to_string));
    assert_eq!(
        bodies,
        vec![
            json!({ "product": "Notebook", "amount": 2, "total": 30.0 }),
            json!({ "product": "Pen", "amount": 4, "total": 10.0 }),
        ]
    );
}

#[tokio::test]
async fn test_unexpected_body_is_a_decode_error() {
    let (service, _rec) = start_stub().await;
    let broken = HttpCatalogService::new(
        service.base_url().join("/broken").unwrap().as_str(),
        Duration::from_secs(5),
    )
    .unwrap();

    let err = broken.list_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "unexpected error: {err:?}");
}
