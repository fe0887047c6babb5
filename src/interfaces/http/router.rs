//! API router with Swagger UI

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::{health, owners, pets, pricing, visits};
use super::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        owners::list_owners,
        owners::create_owner,
        owners::get_owner,
        owners::update_owner,
        pets::get_pet,
        pets::list_pet_types,
        pets::add_pet,
        pets::update_pet,
        visits::list_visits,
        visits::add_visit,
        pricing::quote_owner,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            owners::OwnerResponse,
            owners::OwnerRequest,
            pets::PetResponse,
            pets::PetTypeResponse,
            pets::CreatePetRequest,
            pets::UpdatePetRequest,
            visits::VisitResponse,
            visits::CreateVisitRequest,
            pricing::QuoteRequest,
            pricing::QuoteResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Owners", description = "Pet owner registry"),
        (name = "Pets", description = "Pets and pet types"),
        (name = "Visits", description = "Visit history of a pet"),
        (name = "Pricing", description = "Visit price quotes for an owner's pets"),
    ),
    info(
        title = "Vet Clinic API",
        version = "1.0.0",
        description = "Owners, pets, visits and visit pricing",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/api/v1/owners",
            get(owners::list_owners).post(owners::create_owner),
        )
        .route(
            "/api/v1/owners/{id}",
            get(owners::get_owner).put(owners::update_owner),
        )
        .route("/api/v1/owners/{id}/pets", post(pets::add_pet))
        .route("/api/v1/owners/{id}/pets/{pet_id}", put(pets::update_pet))
        .route("/api/v1/owners/{id}/quote", post(pricing::quote_owner))
        .route("/api/v1/pets/{id}", get(pets::get_pet))
        .route(
            "/api/v1/pets/{id}/visits",
            get(visits::list_visits).post(visits::add_visit),
        )
        .route("/api/v1/pet-types", get(pets::list_pet_types))
        .route("/health", get(health::health_check))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};

    use crate::config::PricingConfig;
    use crate::infrastructure::{InMemoryStorage, PetTimedCache};

    fn app() -> Router {
        let storage = Arc::new(InMemoryStorage::new());
        let cache = Arc::new(PetTimedCache::new(storage.clone(), Duration::from_secs(60)));
        create_api_router(AppState::new(storage, cache, &PricingConfig::default()))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        use tower::Service;

        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let mut svc = app.clone().into_service();
        let resp = svc.call(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn owner_body(last_name: &str) -> Value {
        json!({
            "first_name": "George",
            "last_name": last_name,
            "address": "110 W. Liberty St.",
            "city": "Madison",
            "telephone": "6085551023"
        })
    }

    async fn create_owner(app: &Router, last_name: &str) -> i64 {
        let (status, json) = call(app, "POST", "/api/v1/owners", Some(owner_body(last_name))).await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_i64().unwrap()
    }

    async fn add_pet(app: &Router, owner_id: i64, body: Value) -> (StatusCode, Value) {
        call(app, "POST", &format!("/api/v1/owners/{}/pets", owner_id), Some(body)).await
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, json) = call(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["cached_pets"], 0);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, json) = call(&app(), "GET", "/api-doc/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"]["/api/v1/owners/{id}/quote"].is_object());
    }

    #[tokio::test]
    async fn created_owner_can_be_fetched_and_searched() {
        let app = app();
        let id = create_owner(&app, "Franklin").await;
        create_owner(&app, "Davis").await;

        let (status, json) = call(&app, "GET", &format!("/api/v1/owners/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["last_name"], "Franklin");
        assert_eq!(json["data"]["pets"], json!([]));

        let (_, json) = call(&app, "GET", "/api/v1/owners?last_name=fra", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        let (_, json) = call(&app, "GET", "/api/v1/owners", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalid_owner_is_422() {
        let mut body = owner_body("Franklin");
        body["telephone"] = json!("not-a-phone");
        let (status, json) = call(&app(), "POST", "/api/v1/owners", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("telephone"));
    }

    #[tokio::test]
    async fn unknown_owner_is_404() {
        let (status, json) = call(&app(), "GET", "/api/v1/owners/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn update_owner_changes_contact_details() {
        let app = app();
        let id = create_owner(&app, "Franklin").await;
        let mut body = owner_body("Franklin");
        body["city"] = json!("Monona");

        let (status, json) = call(&app, "PUT", &format!("/api/v1/owners/{}", id), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["city"], "Monona");
    }

    #[tokio::test]
    async fn pet_names_are_unique_per_owner() {
        let app = app();
        let owner_id = create_owner(&app, "Franklin").await;

        let (status, json) = add_pet(&app, owner_id, json!({"name": "Leo", "pet_type": "cat"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["pet_type"]["name"], "cat");

        let (status, _) = add_pet(&app, owner_id, json!({"name": "leo"})).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn pet_with_unknown_type_or_future_birth_date_is_400() {
        let app = app();
        let owner_id = create_owner(&app, "Franklin").await;

        let (status, _) = add_pet(&app, owner_id, json!({"name": "Puff", "pet_type": "dragon"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = add_pet(&app, owner_id, json!({"name": "Puff", "birth_date": "2999-01-01"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pet_for_unknown_owner_is_404() {
        let (status, _) = add_pet(&app(), 42, json!({"name": "Leo"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_pet_renames_and_lists_sorted() {
        let app = app();
        let owner_id = create_owner(&app, "Franklin").await;
        let (_, json) = add_pet(&app, owner_id, json!({"name": "Zed"})).await;
        let pet_id = json["data"]["id"].as_i64().unwrap();
        add_pet(&app, owner_id, json!({"name": "bella"})).await;

        let (status, _) = call(
            &app,
            "PUT",
            &format!("/api/v1/owners/{}/pets/{}", owner_id, pet_id),
            Some(json!({"name": "Alfie"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = call(&app, "GET", &format!("/api/v1/owners/{}", owner_id), None).await;
        let names: Vec<&str> = json["data"]["pets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Alfie", "bella"]);
    }

    #[tokio::test]
    async fn pet_types_are_listed() {
        let (status, json) = call(&app(), "GET", "/api/v1/pet-types", None).await;
        assert_eq!(status, StatusCode::OK);
        let types = json["data"].as_array().unwrap();
        assert_eq!(types.len(), 6);
        assert!(types.iter().any(|t| t["name"] == "lizard" && t["rare"] == true));
    }

    #[tokio::test]
    async fn visits_are_recorded_and_filtered_by_range() {
        let app = app();
        let owner_id = create_owner(&app, "Franklin").await;
        let (_, json) = add_pet(&app, owner_id, json!({"name": "Rosy"})).await;
        let pet_id = json["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/v1/pets/{}/visits", pet_id);

        for (date, description) in [("2023-01-01", "shots"), ("2024-03-04", "spayed")] {
            let (status, _) = call(&app, "POST", &uri, Some(json!({"date": date, "description": description}))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, json) = call(&app, "GET", &format!("{}?from=2024-01-01", uri), None).await;
        let visits = json["data"].as_array().unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0]["description"], "spayed");

        let (_, json) = call(&app, "GET", &format!("/api/v1/pets/{}", pet_id), None).await;
        assert_eq!(json["data"]["visits"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["visits"][0]["date"], "2024-03-04");
    }

    #[tokio::test]
    async fn blank_visit_description_is_422() {
        let app = app();
        let owner_id = create_owner(&app, "Franklin").await;
        let (_, json) = add_pet(&app, owner_id, json!({"name": "Rosy"})).await;
        let pet_id = json["data"]["id"].as_i64().unwrap();

        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/v1/pets/{}/visits", pet_id),
            Some(json!({"description": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn quote_prices_owner_pets() {
        let app = app();
        let owner_id = create_owner(&app, "Franklin").await;
        add_pet(&app, owner_id, json!({"name": "Leo", "pet_type": "cat", "birth_date": "2015-01-01"})).await;
        let uri = format!("/api/v1/owners/{}/quote", owner_id);

        let (status, json) = call(
            &app,
            "POST",
            &uri,
            Some(json!({"tier": "silver", "calculator": "simple", "base_charge": 20.0, "price_per_pet": 30.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["calculator"], "simple");
        assert_eq!(json["data"]["tier"], "SILVER");
        assert!((json["data"]["total"].as_f64().unwrap() - 50.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn quote_errors_map_to_http_statuses() {
        let app = app();
        let owner_id = create_owner(&app, "Franklin").await;
        let uri = format!("/api/v1/owners/{}/quote", owner_id);

        let (status, _) = call(&app, "POST", &uri, Some(json!({"tier": "GOLD"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "owner without pets");

        add_pet(&app, owner_id, json!({"name": "Leo"})).await;
        let (status, _) = call(&app, "POST", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing tier");

        let (status, _) = call(&app, "POST", &uri, Some(json!({"tier": "platinum"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "unknown tier");

        let (status, _) = call(&app, "POST", &uri, Some(json!({"tier": "NEW", "price_per_pet": -1.0}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "negative rate");

        let (status, _) = call(&app, "POST", "/api/v1/owners/77/quote", Some(json!({"tier": "NEW"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
