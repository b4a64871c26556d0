//! HTTP routes.
//!
//! Handlers only translate between wire DTOs and domain values; every rule
//! lives in the use cases.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use cardbattle_domain::{is_valid_id, CardFields, CardId, Player, PlayerId};
use cardbattle_shared::{
    CacheStatsResponse, CardRequest, CardResponse, CountResponse, ErrorResponse, PlayerRequest,
    PlayerResponse, TrophiesQuery,
};

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::management::ManagementError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/cards", get(list_cards).post(create_card))
        .route("/api/cards/count", get(count_cards))
        .route("/api/cards/type/{card_type}", get(list_cards_by_type))
        .route("/api/cards/rarity/{rarity}", get(list_cards_by_rarity))
        .route(
            "/api/cards/{id}",
            get(get_card).put(update_card).delete(delete_card),
        )
        .route("/api/cards/{id}/upgrade", put(upgrade_card))
        .route("/api/players", get(list_players).post(create_player))
        .route(
            "/api/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/api/players/{id}/trophies", post(add_trophies))
}

async fn health() -> &'static str {
    "OK"
}

async fn cache_stats(State(app): State<Arc<App>>) -> Json<CacheStatsResponse> {
    let stats = app.cache.stats();
    Json(CacheStatsResponse {
        hits: stats.hits,
        misses: stats.misses,
        entries: app.cache.len().await,
    })
}

// =============================================================================
// Cards
// =============================================================================

async fn list_cards(State(app): State<Arc<App>>) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = app.use_cases.management.card.list().await?;
    Ok(Json(cards.iter().map(CardResponse::from).collect()))
}

async fn create_card(
    State(app): State<Arc<App>>,
    request: Result<Json<CardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CardResponse>), ApiError> {
    let Json(request) = request?;
    let card = build_card(&app, request, None)?;
    let card = app.use_cases.management.card.create(card).await?;
    Ok((StatusCode::CREATED, Json(CardResponse::from(&card))))
}

async fn get_card(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CardResponse>, ApiError> {
    let id = card_id(id)?;
    let card = app.use_cases.management.card.get(id).await?;
    Ok(Json(CardResponse::from(&card)))
}

async fn update_card(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<CardRequest>, JsonRejection>,
) -> Result<Json<CardResponse>, ApiError> {
    let Json(request) = request?;
    let id = card_id(id)?;
    let card = build_card(&app, request, Some(id))?;
    let card = app.use_cases.management.card.update(id, card).await?;
    Ok(Json(CardResponse::from(&card)))
}

async fn delete_card(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = card_id(id)?;
    app.use_cases.management.card.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upgrade_card(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CardResponse>, ApiError> {
    let id = card_id(id)?;
    let card = app.use_cases.management.card.upgrade(id).await?;
    Ok(Json(CardResponse::from(&card)))
}

async fn list_cards_by_type(
    State(app): State<Arc<App>>,
    Path(card_type): Path<String>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = app.use_cases.management.card.list_by_type(&card_type).await?;
    Ok(Json(cards.iter().map(CardResponse::from).collect()))
}

async fn list_cards_by_rarity(
    State(app): State<Arc<App>>,
    Path(rarity): Path<String>,
) -> Result<Json<Vec<CardResponse>>, ApiError> {
    let cards = app.use_cases.management.card.list_by_rarity(&rarity).await?;
    Ok(Json(cards.iter().map(CardResponse::from).collect()))
}

async fn count_cards(State(app): State<Arc<App>>) -> Result<Json<CountResponse>, ApiError> {
    let count = app.use_cases.management.card.count().await?;
    Ok(Json(CountResponse { count }))
}

fn build_card(
    app: &App,
    request: CardRequest,
    id: Option<CardId>,
) -> Result<cardbattle_domain::Card, ApiError> {
    let mut fields = CardFields::new(
        request.name,
        request.rarity,
        request.elixir_cost,
        request.level,
    );
    fields.id = id;
    fields.hp = request.hp;
    fields.damage = request.damage;
    fields.radius = request.radius;
    fields.lifetime = request.lifetime;

    app.card_factory
        .create_card(&request.card_type, fields)
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn card_id(path: Result<Path<i64>, PathRejection>) -> Result<CardId, ApiError> {
    let Path(raw) = path?;
    if !is_valid_id(raw) {
        return Err(ApiError::BadRequest(format!("Invalid card ID: {raw}")));
    }
    Ok(CardId::new(raw))
}

// =============================================================================
// Players
// =============================================================================

async fn list_players(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let players = app.use_cases.management.player.list().await?;
    Ok(Json(players.iter().map(PlayerResponse::from).collect()))
}

async fn create_player(
    State(app): State<Arc<App>>,
    request: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlayerResponse>), ApiError> {
    let Json(request) = request?;
    let player = build_player(request)?;
    let player = app.use_cases.management.player.create(player).await?;
    Ok((StatusCode::CREATED, Json(PlayerResponse::from(&player))))
}

async fn get_player(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let id = player_id(id)?;
    let player = app.use_cases.management.player.get(id).await?;
    Ok(Json(PlayerResponse::from(&player)))
}

async fn update_player(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let Json(request) = request?;
    let id = player_id(id)?;
    let player = build_player(request)?;
    let player = app.use_cases.management.player.update(id, player).await?;
    Ok(Json(PlayerResponse::from(&player)))
}

async fn delete_player(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = player_id(id)?;
    app.use_cases.management.player.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_trophies(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<TrophiesQuery>, QueryRejection>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let id = player_id(id)?;
    let Query(query) = query?;
    let player = app
        .use_cases
        .management
        .player
        .add_trophies(id, query.amount)
        .await?;
    Ok(Json(PlayerResponse::from(&player)))
}

fn build_player(request: PlayerRequest) -> Result<Player, ApiError> {
    let mut builder = Player::builder().name(request.name);
    if let Some(level) = request.level {
        builder = builder.level(level);
    }
    if let Some(trophies) = request.trophies {
        builder = builder.trophies(trophies);
    }
    builder
        .build()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn player_id(path: Result<Path<i64>, PathRejection>) -> Result<PlayerId, ApiError> {
    let Path(raw) = path?;
    if !is_valid_id(raw) {
        return Err(ApiError::BadRequest(format!("Invalid player ID: {raw}")));
    }
    Ok(PlayerId::new(raw))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(status.as_u16(), message))).into_response()
    }
}

impl From<ManagementError> for ApiError {
    fn from(e: ManagementError) -> Self {
        match e {
            ManagementError::InvalidInput(_) => ApiError::BadRequest(e.to_string()),
            ManagementError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ManagementError::Storage(RepoError::ConstraintViolation(msg)) => {
                tracing::warn!(error = %msg, "Constraint violation");
                ApiError::Conflict(msg)
            }
            ManagementError::Storage(_) => ApiError::Internal(e.to_string()),
        }
    }
}

// Extractor failures (malformed JSON, a non-numeric id, a missing query
// parameter) share the error body of every other 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
