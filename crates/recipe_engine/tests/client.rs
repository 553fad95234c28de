use std::time::Duration;

use pretty_assertions::assert_eq;
use recipe_engine::{ClientSettings, FailureKind, RecipeClient, ReqwestRecipeClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "Token 9c8b06d329136da358c2d00e76946b0111ce2c48";

const SOUP_JSON: &str = r#"{
    "pk": 42,
    "title": "Soup",
    "publisher": "mitch",
    "featured_image": "https://example.com/soup.png",
    "rating": 16,
    "source_url": "http://www.example.com/soup",
    "ingredients": ["water", "salt"],
    "date_added": "November 11 2020",
    "date_updated": "November 11 2020",
    "long_date_added": 1606348709
}"#;

fn client_for(server: &MockServer) -> ReqwestRecipeClient {
    let settings = ClientSettings {
        base_url: format!("{}/api/recipe", server.uri()),
        ..ClientSettings::default()
    };
    ReqwestRecipeClient::new(settings).expect("client")
}

#[tokio::test]
async fn get_by_id_sends_token_and_decodes_recipe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recipe/get"))
        .and(query_param("id", "42"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SOUP_JSON, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let recipe = client_for(&server).get_by_id(TOKEN, 42).await.expect("recipe");
    assert_eq!(recipe.id, 42);
    assert_eq!(recipe.title, "Soup");
    assert_eq!(recipe.ingredients, vec!["water".to_string(), "salt".to_string()]);
    assert_eq!(recipe.date_added.as_deref(), Some("November 11 2020"));
}

#[tokio::test]
async fn search_passes_page_and_query() {
    let server = MockServer::start().await;
    let body = format!(r#"{{"count": 118, "next": null, "previous": null, "results": [{SOUP_JSON}]}}"#);
    Mock::given(method("GET"))
        .and(path("/api/recipe/search"))
        .and(query_param("page", "2"))
        .and(query_param("query", "beef carrot"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .search(TOKEN, 2, "beef carrot")
        .await
        .expect("search");
    assert_eq!(response.total_results, 118);
    assert_eq!(response.recipes.len(), 1);
    assert_eq!(response.recipes[0].publisher, "mitch");
}

#[tokio::test]
async fn unauthorized_maps_to_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).get_by_id("Token bad", 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Auth);
}

#[tokio::test]
async fn missing_token_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SOUP_JSON, "application/json"))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).get_by_id("  ", 42).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Auth);
}

#[tokio::test]
async fn not_found_status_and_null_body_map_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("id", "404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.get_by_id(TOKEN, 404).await.unwrap_err().kind,
        FailureKind::NotFound
    );
    assert_eq!(
        client.get_by_id(TOKEN, 5).await.unwrap_err().kind,
        FailureKind::NotFound
    );
}

#[tokio::test]
async fn server_error_and_bad_json_are_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"pk\":", "application/json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.get_by_id(TOKEN, 1).await.unwrap_err().kind,
        FailureKind::HttpStatus(503)
    );
    assert_eq!(
        client.get_by_id(TOKEN, 2).await.unwrap_err().kind,
        FailureKind::Malformed
    );
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(SOUP_JSON, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let client = ReqwestRecipeClient::new(settings).expect("client");

    let err = client.get_by_id(TOKEN, 42).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SOUP_JSON, "application/json"))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        base_url: server.uri(),
        max_bytes: 16,
        ..ClientSettings::default()
    };
    let client = ReqwestRecipeClient::new(settings).expect("client");

    let err = client.get_by_id(TOKEN, 42).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 16, .. }));
}
