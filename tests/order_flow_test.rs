use order_desk::api::mock::{MockCall, MockCatalogService};
use order_desk::api::{ApiError, CatalogService};
use order_desk::catalog::CatalogDesk;
use order_desk::lifecycle::App;
use order_desk::login::{current_role, logout, LoginForm};
use order_desk::model::{LoginReply, OrderId, OrderRecord, OrderRequest, Product, ProductId, Role};
use order_desk::ordering::{OrderDesk, OrderingError};
use order_desk::orders::OrderBoard;
use order_desk::settings::Settings;
use order_desk::store::PreferenceStore;
use std::sync::Arc;
use std::time::Duration;

fn catalog() -> Vec<Product> {
    vec![
        Product::new(1, "Notebook", 15.0),
        Product::new(2, "Pen", 2.5),
        Product::new(3, "Eraser", 1.0),
    ]
}

fn login_ok() -> LoginReply {
    LoginReply {
        message: "Login exitoso".into(),
    }
}

/// A client logs in, fills a cart, and one line fails.
#[tokio::test]
async fn test_client_order_flow() {
    let mock = MockCatalogService::new();
    mock.expect_login().return_ok(login_ok());
    mock.expect_list_products().return_ok(catalog());
    mock.expect_create_order("Notebook").return_ok(());
    mock.expect_create_order("Eraser")
        .return_err(ApiError::Transport("connection reset".into()));
    mock.expect_create_order("Eraser").return_ok(());

    let (store, prefs) = PreferenceStore::in_memory(8);
    let app = App::with_parts(Arc::new(mock.clone()), store, prefs);

    let mut form = LoginForm::new();
    form.set_email("luis@correo.com");
    form.set_password("pw");
    form.select_role(Role::Client);
    assert_eq!(form.submit(app.service.as_ref(), &app.prefs).await, Some(Role::Client));
    assert_eq!(current_role(&app.prefs).await.unwrap(), Some(Role::Client));

    let mut desk = OrderDesk::new(app.service.clone());
    desk.load().await;
    assert_eq!(desk.lines().len(), 3);
    assert!(desk.lines().iter().all(|line| line.quantity() == 0));

    desk.set_quantity(ProductId(3), 4).unwrap();
    desk.set_quantity(ProductId(1), 2).unwrap();
    assert_eq!(desk.total_amount(), 34.0);

    let report = desk.place_order().await;
    assert_eq!(
        report.to_string(),
        "Order for Notebook placed successfully!\nNetwork error ordering Eraser: connection reset"
    );
    assert_eq!(desk.error(), Some(&OrderingError::PartialFailure));
    assert_eq!(desk.total_amount(), 4.0);

    // Only the failed line is resubmitted.
    let report = desk.place_order().await;
    assert_eq!(report.to_string(), "Order for Eraser placed successfully!");
    assert_eq!(desk.error(), None);
    assert_eq!(desk.total_amount(), 0.0);

    let received = mock.orders_received();
    assert_eq!(received.len(), 3);
    assert!(received.contains(&OrderRequest::new("Notebook", 2, 15.0)));
    assert_eq!(
        received.iter().filter(|r| r.product == "Eraser").count(),
        2
    );
    assert!(!received.iter().any(|r| r.product == "Pen"));

    logout(&app.prefs).await.unwrap();
    assert_eq!(current_role(&app.prefs).await.unwrap(), None);
    app.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_empty_cart_sends_nothing() {
    let mock = MockCatalogService::new();
    mock.expect_list_products().return_ok(catalog());
    let mut desk = OrderDesk::new(Arc::new(mock.clone()));
    desk.load().await;

    let report = desk.place_order().await;
    assert!(report.is_empty());
    assert_eq!(
        desk.error().map(ToString::to_string).as_deref(),
        Some("No products selected for ordering.")
    );
    assert_eq!(mock.calls(), vec![MockCall::ListProducts]);
}

/// An administrator edits the catalog and delivers an order.
#[tokio::test]
async fn test_admin_flow() {
    let mock = MockCatalogService::new();
    mock.expect_create_product().return_ok(());
    mock.expect_list_products().return_ok(catalog());
    mock.expect_list_orders().return_ok(vec![OrderRecord {
        id: OrderId(5),
        product: "Pen".into(),
        quantity: 3,
        total: 7.5,
        ordered_at: Some("2024-05-01".into()),
        delivered_at: None,
        status: "pending".into(),
    }]);
    mock.expect_update_order_status(OrderId(5)).return_ok(());
    mock.expect_list_orders().return_ok(vec![]);
    let service: Arc<dyn CatalogService> = Arc::new(mock.clone());

    let mut catalog_desk = CatalogDesk::new(service.clone());
    catalog_desk.add_product("Eraser", "1", None).await;
    assert!(catalog_desk.success());
    assert_eq!(catalog_desk.products().len(), 3);

    let mut board = OrderBoard::new(service);
    board.refresh().await;
    assert_eq!(board.orders().len(), 1);
    assert!(!board.orders()[0].is_delivered());

    board.mark_delivered(OrderId(5)).await;
    assert_eq!(board.status(), Some("Order 5 updated to Delivered"));
    mock.verify();
}

/// Settings survive a restart of the file-backed store.
#[tokio::test]
async fn test_settings_persist_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let (store, prefs) = PreferenceStore::open(&path, 8).unwrap();
    let app = App::with_parts(Arc::new(MockCatalogService::new()), store, prefs);
    let mut settings = Settings::load(&app.prefs).await.unwrap();
    settings.user_name = "Marta".into();
    settings.set_language(1);
    settings.save(&app.prefs).await.unwrap();
    settings
        .record_usage(&app.prefs, Duration::from_secs(3600))
        .await
        .unwrap();
    app.shutdown().await.unwrap();

    let (store, prefs) = PreferenceStore::open(&path, 8).unwrap();
    let app = App::with_parts(Arc::new(MockCatalogService::new()), store, prefs);
    let loaded = Settings::load(&app.prefs).await.unwrap();
    assert_eq!(loaded.user_name, "Marta");
    assert_eq!(loaded.language_name(), "English");
    assert_eq!(loaded.total_usage, Duration::from_secs(3600));
    assert!(loaded.last_access.is_some());
    app.shutdown().await.unwrap();
}
