use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sixcities_api::{app, create_offer_container};
use sixcities_store::InMemoryOfferRepository;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> Router {
    let container = create_offer_container(Arc::new(InMemoryOfferRepository::new()));
    app(&container)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn new_offer(city: &str, is_premium: bool) -> Value {
    json!({
        "title": format!("Sunny flat in central {}", city),
        "description": "Spacious flat with a balcony, close to the station and cafes.",
        "city": city,
        "previewImage": "https://img.example/preview.jpg",
        "images": [
            "https://img.example/1.jpg",
            "https://img.example/2.jpg",
            "https://img.example/3.jpg",
            "https://img.example/4.jpg",
            "https://img.example/5.jpg",
            "https://img.example/6.jpg"
        ],
        "isPremium": is_premium,
        "rating": 4.5,
        "type": "apartment",
        "bedrooms": 2,
        "maxAdults": 3,
        "price": 210,
        "goods": ["Breakfast", "Washer", "Laptop friendly workspace"],
        "hostId": Uuid::new_v4(),
        "location": { "latitude": 53.550341, "longitude": 10.000654 }
    })
}

async fn create(app: &Router, city: &str, is_premium: bool) -> Value {
    let (status, body) = send(app, "POST", "/offers", Some(new_offer(city, is_premium))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|offer| offer["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_then_get_returns_same_full_shape() {
    let app = test_app();
    let created = create(&app, "Hamburg", false).await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/offers/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["commentCount"], 0);
    assert!(fetched.get("createdAt").is_none());
}

#[tokio::test]
async fn test_index_lists_every_offer_in_preview_shape() {
    let app = test_app();
    create(&app, "Paris", true).await;
    create(&app, "Cologne", false).await;
    create(&app, "Brussels", false).await;

    let (status, list) = send(&app, "GET", "/offers", None).await;

    assert_eq!(status, StatusCode::OK);
    let offers = list.as_array().unwrap();
    assert_eq!(offers.len(), 3);
    for offer in offers {
        assert!(offer.get("description").is_none());
        assert!(offer.get("images").is_none());
        assert!(offer.get("goods").is_none());
        assert!(offer.get("previewImage").is_some());
    }
}

#[tokio::test]
async fn test_premium_offers_scoped_by_city() {
    let app = test_app();
    let premium = create(&app, "Paris", true).await;
    create(&app, "Paris", false).await;

    let (status, in_paris) = send(&app, "GET", "/offers/premium?cityId=Paris", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&in_paris), vec![premium["id"].as_str().unwrap().to_string()]);

    let (status, in_cologne) = send(&app, "GET", "/offers/premium?cityId=Cologne", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(in_cologne.as_array().unwrap().is_empty());

    let (status, unknown) = send(&app, "GET", "/offers/premium?cityId=Atlantis", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(unknown.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_premium_offers_require_city_id() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/offers/premium", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert!(body["detail"].as_str().unwrap().contains("cityId"));
}

#[tokio::test]
async fn test_malformed_query_and_path_use_error_body() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/offers/premium?cityId=Paris&cityId=Cologne", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["detail"].as_str().unwrap().contains("cityId"));

    // %FF does not decode to UTF-8
    let (status, body) = send(&app, "GET", "/offers/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Validation failed");
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let app = test_app();
    let created = create(&app, "Amsterdam", false).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/offers/{}", id),
        Some(json!({ "price": 999, "isPremium": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["price"], 999);
    assert_eq!(updated["isPremium"], true);
    assert_eq!(updated["title"], created["title"]);
    assert_eq!(updated["images"], created["images"]);

    let (_, premium) = send(&app, "GET", "/offers/premium?cityId=Amsterdam", None).await;
    assert_eq!(ids(&premium), vec![id.to_string()]);
}

#[tokio::test]
async fn test_patch_unknown_offer_is_404_naming_the_id() {
    let app = test_app();
    let missing = Uuid::new_v4().to_string();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/offers/{}", missing),
        Some(json!({ "price": 300 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], format!("Offer with id {} not found.", missing));
    assert_eq!(body["detail"], "OfferController");
}

#[tokio::test]
async fn test_get_and_delete_unknown_offer_are_404() {
    let app = test_app();

    for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let (status, body) = send(&app, "GET", &format!("/offers/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains(&id));

        let (status, _) = send(&app, "DELETE", &format!("/offers/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_delete_then_get_reports_absence() {
    let app = test_app();
    let created = create(&app, "Dusseldorf", true).await;
    let uri = format!("/offers/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/offers", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected_before_the_service() {
    let app = test_app();

    let mut too_cheap = new_offer("Paris", false);
    too_cheap["price"] = json!(10);
    let (status, body) = send(&app, "POST", "/offers", Some(too_cheap)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("price"));

    let mut unknown_city = new_offer("Paris", false);
    unknown_city["city"] = json!("Berlin");
    let (status, _) = send(&app, "POST", "/offers", Some(unknown_city)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let created = create(&app, "Paris", false).await;
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/offers/{}", created["id"].as_str().unwrap()),
        Some(json!({ "id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/offers", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
