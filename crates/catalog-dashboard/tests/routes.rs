//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use catalog_dashboard::{CatalogServer, InMemoryProductStore, ProductInput, ServerConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn input(name: &str, category: &str, brand: &str, price: f64) -> ProductInput {
    ProductInput {
        product_name: name.into(),
        product_type: category.into(),
        brand: brand.into(),
        price: Some(price),
        ..Default::default()
    }
}

fn app_with(products: Vec<ProductInput>) -> Router {
    let store = InMemoryProductStore::with_products(products).unwrap();
    CatalogServer::new(ServerConfig::default(), store)
        .unwrap()
        .router()
}

fn seeded_app() -> Router {
    app_with(vec![
        input("Air Runner", "Shoes", "Nike", 120.0),
        input("Canvas Tote", "Bags", "Canvas Co", 20.0),
        input("zip hoodie", "Apparel", "Nike", 60.0),
    ])
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn names(body: &str) -> Vec<String> {
    let json: Value = serde_json::from_str(body).unwrap();
    json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["product_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_version() {
    let (status, _, body) = send(app_with(vec![]), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn api_crud_round() {
    let app = app_with(vec![]);

    let (status, _, body) = send(
        app.clone(),
        json_request("POST", "/api/products", json!({"product_name": "Belt", "price": 25})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(created["product_id"], 1);

    let (status, _, body) = send(app.clone(), get("/api/products/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"Belt\""));

    let (status, _, body) = send(
        app.clone(),
        json_request("PUT", "/api/products/1", json!({"product_name": "Wide Belt", "price": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Wide Belt"));

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/products/1")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app.clone(), delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = send(app, get("/api/products/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Product 1 not found");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn api_rejects_invalid_product() {
    let (status, _, body) = send(
        app_with(vec![]),
        json_request("POST", "/api/products", json!({"product_name": " ", "price": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Product name is required"));
}

#[tokio::test]
async fn api_rejects_bad_id() {
    let (status, _, _) = send(app_with(vec![]), get("/api/products/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_list_searches_and_sorts() {
    let (status, _, body) = send(seeded_app(), get("/api/products?q=NIKE&sort=price-asc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["zip hoodie", "Air Runner"]);

    let (_, _, body) = send(seeded_app(), get("/api/products?sort=name-asc")).await;
    assert_eq!(names(&body), ["Air Runner", "Canvas Tote", "zip hoodie"]);

    let (_, _, body) = send(seeded_app(), get("/api/products")).await;
    assert_eq!(names(&body), ["zip hoodie", "Canvas Tote", "Air Runner"]);
}

#[tokio::test]
async fn api_list_filters_and_pages() {
    let (_, _, body) = send(seeded_app(), get("/api/products?filter=price%3C100&sort=price-desc")).await;
    assert_eq!(names(&body), ["zip hoodie", "Canvas Tote"]);

    let (_, _, body) = send(seeded_app(), get("/api/products?sort=price-asc&offset=1&limit=1")).await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(names(&body), ["zip hoodie"]);

    let (status, _, _) = send(seeded_app(), get("/api/products?filter=price%3Echeap")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(seeded_app(), get("/api/products?sort=rating")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn api_filter_equality_reads_text_fields_as_text() {
    let app = || {
        app_with(vec![
            input("42", "Posters", "Printworks", 15.0),
            input("Canvas Tote", "Bags", "Canvas Co", 42.0),
        ])
    };

    let (_, _, body) = send(app(), get("/api/products?filter=product_name%3D42")).await;
    assert_eq!(names(&body), ["42"]);

    let (_, _, body) = send(app(), get("/api/products?filter=product_name!%3D42")).await;
    assert_eq!(names(&body), ["Canvas Tote"]);

    let (_, _, body) = send(app(), get("/api/products?filter=price%3D42")).await;
    assert_eq!(names(&body), ["Canvas Tote"]);
}

#[tokio::test]
async fn export_csv_and_unknown_format() {
    let (status, headers, body) =
        send(seeded_app(), get("/api/products/export?format=csv&sort=price-asc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let columns = reader.headers().unwrap().clone();
    let name_col = columns.iter().position(|h| h == "product_name").unwrap();
    let id_col = columns.iter().position(|h| h == "product_id").unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][name_col], "Canvas Tote");
    assert_eq!(&rows[0][id_col], "2");
    assert_eq!(&rows[2][name_col], "Air Runner");

    let (status, headers, body) = send(seeded_app(), get("/api/products/export?format=yaml&q=tote")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/yaml");
    assert!(body.contains("product_name: Canvas Tote"));
    assert!(!body.contains("Air Runner"));

    let (status, _, _) = send(seeded_app(), get("/api/products/export?format=xml")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_lists_products() {
    let (status, _, body) = send(seeded_app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Products Management</title>"));
    assert!(body.contains("Canvas Tote"));
    assert!(body.contains("Rs. 120.00"));
    assert!(body.contains("/products/2/edit"));
    assert!(body.contains("Price (Low to High)"));
}

#[tokio::test]
async fn dashboard_empty_state() {
    let (_, _, body) = send(app_with(vec![]), get("/")).await;
    assert!(body.contains("No products yet. Add your first product above!"));
}

#[tokio::test]
async fn dashboard_search_and_notice() {
    let (_, _, body) = send(seeded_app(), get("/?q=tote&notice=created")).await;
    assert!(body.contains("Canvas Tote"));
    assert!(!body.contains("Air Runner"));
    assert!(body.contains("Product created successfully!"));
    assert!(body.contains("alert-success"));

    let (_, _, body) = send(seeded_app(), get("/?q=sandals")).await;
    assert!(body.contains("No products match your search."));
}

#[tokio::test]
async fn form_create_redirects() {
    let app = app_with(vec![]);
    let (status, headers, _) = send(
        app.clone(),
        form_request(
            "/products",
            "product_name=Tote&product_type=Bags&brand=&material=Canvas&price=19.99&colors=Red%2C+Blue&features_list=Roomy",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/?notice=created");

    let (_, _, body) = send(app, get("/api/products/1")).await;
    let product: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(product["variants"]["colors"], json!(["Red", "Blue"]));
    assert_eq!(product["features"], json!(["Roomy"]));
    assert_eq!(product["price"], 19.99);
}

#[tokio::test]
async fn form_create_with_errors_rerenders() {
    let app = app_with(vec![]);
    let (status, _, body) = send(app.clone(), form_request("/products", "product_name=&price=abc")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Product name is required"));
    assert!(body.contains("Price must be a number"));
    assert!(body.contains("value=\"abc\""));

    let (_, _, body) = send(app, get("/api/products")).await;
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn detail_and_edit_pages() {
    let (status, _, body) = send(seeded_app(), get("/products/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Air Runner"));
    assert!(body.contains(">Delete</button>"));
    assert!(body.contains("Shoes"));

    let (status, _, body) = send(seeded_app(), get("/products/1/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"120.00\""));
    assert!(body.contains("Save Changes"));
}

#[tokio::test]
async fn form_update_and_delete() {
    let app = seeded_app();
    let (status, headers, _) = send(
        app.clone(),
        form_request("/products/2", "product_name=Canvas+Tote+XL&price=25"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/?notice=updated");

    let (status, _, body) = send(app.clone(), form_request("/products/2", "product_name=Tote&price=-1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Price must not be negative"));

    let (_, _, body) = send(app.clone(), get("/api/products/2")).await;
    assert!(body.contains("Canvas Tote XL"));

    let (status, headers, _) = send(app.clone(), form_request("/products/2/delete", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/?notice=deleted");

    let (status, _, body) = send(app, get("/products/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product 2 not found"));
}

#[tokio::test]
async fn unknown_route_renders_error_page() {
    let (status, _, body) = send(app_with(vec![]), get("/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn product_text_is_html_escaped() {
    let app = || app_with(vec![input("<script>x</script>", "Bags", "Tom & Co", 10.0)]);

    for uri in ["/", "/products/1", "/products/1/edit"] {
        let (status, _, body) = send(app(), get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.contains("&lt;script&gt;x"), "{uri}");
        assert!(!body.contains("<script>x"), "{uri}");
    }

    let (_, _, body) = send(app(), get("/products/1")).await;
    assert!(body.contains("Tom &amp; Co"));
}
