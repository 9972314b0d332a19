// Integration tests for Yojana Match

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use yojana_match::core::{Matcher, SchemeCatalog};
use yojana_match::routes::{configure_routes, handle_json_payload_error, AppState};
use yojana_match::services::{MemoryStore, PasswordHasher, UserStore};

const CATALOG: &str = r#"[
    {"title": "Women Welfare", "ministry": "WCD", "eligibility": {"minAge": 18, "maxAge": 80, "maxIncome": 100000, "caste": "OBC", "gender": "Female"}},
    {"title": "Men Welfare", "eligibility": {"minAge": 18, "maxAge": 80, "maxIncome": 100000, "caste": "OBC", "gender": "Male"}},
    {"title": "SC Support", "eligibility": {"minAge": 18, "maxAge": 80, "maxIncome": 100000, "caste": "SC", "gender": "Female"}}
]"#;

fn create_state(catalog_json: &str, store: UserStore) -> AppState {
    AppState {
        matcher: Matcher::new(Arc::new(SchemeCatalog::from_json_str(catalog_json).unwrap())),
        store,
        hasher: PasswordHasher::new(4),
    }
}

fn registration(mobile: &str) -> Value {
    json!({
        "name": "Asha",
        "middleName": "K",
        "lastName": "Patil",
        "mobileNumber": mobile,
        "gender": " female ",
        "dob": "1990-01-01",
        "caste": "OBC",
        "income": 50000,
        "aadharNumber": "1234-5678-9012",
        "panNumber": "ABCDE1234F",
        "password": "secret123",
        "address": {
            "state": "Maharashtra",
            "district": "Pune",
            "pincode": "411001",
            "addressLine": "MG Road"
        }
    })
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(configure_routes),
        )
        .await
    };
}

fn scheme_titles(schemes: &Value) -> Vec<String> {
    schemes
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_register_computes_eligibility() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(registration("9800000001"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(scheme_titles(&body["user"]["schemeEligibility"]), vec!["Women Welfare"]);
    assert_eq!(body["user"]["schemeEligibility"][0]["ministry"], "WCD");

    let user = body["user"].as_object().unwrap();
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("passwordHash"));
}

#[actix_web::test]
async fn test_register_requires_password() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let mut payload = registration("9800000002");
    payload.as_object_mut().unwrap().remove("password");

    let req = test::TestRequest::post().uri("/register").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Password is required");
}

#[actix_web::test]
async fn test_register_rejects_invalid_fields() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let mut bad_gender = registration("9800000003");
    bad_gender["gender"] = json!("unknown");
    let req = test::TestRequest::post().uri("/register").set_json(bad_gender).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let mut bad_dob = registration("9800000003");
    bad_dob["dob"] = json!("yesterday");
    let req = test::TestRequest::post().uri("/register").set_json(bad_dob).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_register_rejects_blank_mobile_number() {
    let store = UserStore::Memory(Arc::new(MemoryStore::new()));
    let app = init_app!(create_state(CATALOG, store.clone()));

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(registration("   "))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    assert!(store.find_by_mobile("").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_register_malformed_json() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let req = test::TestRequest::post()
        .uri("/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_register_duplicate_mobile() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(registration("9800000004"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}

#[actix_web::test]
async fn test_login_flow() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(registration("9800000005"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "mobileNumber": "9800000005", "password": "wrong-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "mobileNumber": "0000000000", "password": "secret123" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "mobileNumber": "9800000005" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "mobileNumber": "9800000005", "password": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(scheme_titles(&body["user"]["schemeEligibility"]), vec!["Women Welfare"]);
}

#[actix_web::test]
async fn test_login_recomputes_against_current_catalog() {
    let store = UserStore::Memory(Arc::new(MemoryStore::new()));

    let old_app = init_app!(create_state(CATALOG, store.clone()));
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(registration("9800000006"))
        .to_request();
    assert_eq!(test::call_service(&old_app, req).await.status(), StatusCode::CREATED);

    // Same store, new catalog snapshot
    let new_catalog = r#"[
        {"title": "New Women Scheme", "eligibility": {"minAge": 18, "maxAge": 80, "maxIncome": 60000, "caste": "OBC", "gender": "FEMALE"}}
    ]"#;
    let new_app = init_app!(create_state(new_catalog, store.clone()));

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "mobileNumber": "9800000006", "password": "secret123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&new_app, req).await;
    assert_eq!(scheme_titles(&body["user"]["schemeEligibility"]), vec!["New Women Scheme"]);

    let stored = store.find_by_mobile("9800000006").await.unwrap().unwrap();
    assert_eq!(stored.scheme_eligibility.len(), 1);
    assert_eq!(stored.scheme_eligibility[0].title, "New Women Scheme");
}

#[actix_web::test]
async fn test_user_schemes_lookup() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(registration("9800000007"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/user/schemes/9800000007").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Eligible schemes fetched successfully");
    assert_eq!(scheme_titles(&body["schemeEligibility"]), vec!["Women Welfare"]);

    let req = test::TestRequest::get().uri("/user/schemes/0000000000").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_all_yojana_data() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let req = test::TestRequest::get().uri("/all-yojana-data").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "All Yojana Data");
    assert_eq!(
        scheme_titles(&body["data"]),
        vec!["Women Welfare", "Men Welfare", "SC Support"]
    );
    assert_eq!(body["data"][0]["eligibility"]["maxIncome"], 100000);
}

#[actix_web::test]
async fn test_index_and_health() {
    let app = init_app!(create_state(CATALOG, UserStore::memory()));

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, web::Bytes::from_static(b"Hello from Backend!"));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["schemes"], 3);
}
