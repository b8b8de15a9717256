//! Seat booking service.
//!
//! Generic endpoints:
//! - `GET|POST /api/seats`, `GET|PUT|DELETE /api/seats/{id}`
//! - `POST /api/seats/search`, `POST /api/seats/search/all?pagesize=&pagenum=`
//!
//! Booking endpoints:
//! - `GET /seats?seatPos=&seatAvailable=&startTime=&endTime=`
//! - `POST /seats/{seat_id}` with `{"start_time": ..., "end_time": ...}`
//! - `POST /seats/random`
//!
//! The generic endpoints are described at `GET /api-docs/openapi.json`.
//!
//! Run with `cargo run --example seats [config.yaml]`. A missing config file is written with
//! defaults before starting.

mod seat;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, post},
};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use crudkit::{
    ApiError, GroupMutator, Resource, add_crud, add_find_api, api_builder,
    config::{AppConfig, load_yaml, write_default},
    openapi::{crud_paths, document, find_paths},
};
use rand::seq::SliceRandom;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Schema,
};
use seat::{BookingWindow, Seat};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

const QUERY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SeatsConfig {
    #[serde(flatten)]
    app: AppConfig,
    seat: SeatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct SeatConfig {
    /// Minutes a random reservation lasts.
    book_duration: i64,
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self { book_duration: 60 }
    }
}

#[derive(Clone)]
struct AppState {
    db: DatabaseConnection,
    book_duration: TimeDelta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeatFilter {
    seat_pos: Option<String>,
    seat_available: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReserveRequest {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

fn parse_query_time(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    NaiveDateTime::parse_from_str(raw, QUERY_TIME_FORMAT)
        .map(|time| time.and_utc())
        .map_err(|err| ApiError::bad_request(format!("invalid time {raw:?}: {err}")))
}

/// Seats whose booking does not cover `time`.
fn free_at(time: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(seat::Column::SeatBookEndTime.lt(time))
        .add(seat::Column::SeatBookStartTime.gt(time))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn list_seats(
    State(state): State<AppState>,
    Query(filter): Query<SeatFilter>,
) -> Result<Json<Vec<Seat>>, ApiError> {
    let mut condition = Condition::all();
    if let Some(pos) = non_empty(filter.seat_pos) {
        condition = condition.add(seat::Column::SeatPos.eq(pos));
    }
    if let Some(available) = non_empty(filter.seat_available) {
        condition = condition.add(seat::Column::SeatAvailable.eq(available == "true"));
    }
    for raw in [filter.start_time, filter.end_time]
        .into_iter()
        .filter_map(non_empty)
    {
        condition = condition.add(free_at(parse_query_time(&raw)?));
    }

    let models = seat::Entity::find()
        .filter(condition)
        .order_by_asc(seat::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| ApiError::storage(err, "Failed to fetch records"))?;
    Ok(Json(models.into_iter().map(Seat::from_model).collect()))
}

async fn reserve_seat(
    State(state): State<AppState>,
    seat_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ReserveRequest>, JsonRejection>,
) -> Result<Json<Seat>, ApiError> {
    let Path(seat_id) = seat_id.map_err(|_| ApiError::not_found("Record not found"))?;
    let model = seat::Entity::find()
        .filter(seat::Column::SeatId.eq(seat_id))
        .one(&state.db)
        .await
        .map_err(|err| ApiError::storage(err, "Failed to fetch record"))?
        .ok_or_else(|| ApiError::not_found("Record not found"))?;

    let mut seat = Seat::from_model(model);
    if !seat.seat_available {
        return Err(ApiError::bad_request("seat is already booked"));
    }
    let Json(request) = payload?;

    seat.reserve(BookingWindow {
        seat_book_start_time: request.start_time,
        seat_book_end_time: request.end_time,
    });
    save(&state.db, seat).await
}

async fn reserve_random_seat(State(state): State<AppState>) -> Result<Json<Seat>, ApiError> {
    let available = seat::Entity::find()
        .filter(seat::Column::SeatAvailable.eq(true))
        .all(&state.db)
        .await
        .map_err(|err| ApiError::storage(err, "Failed to fetch records"))?;

    let chosen = available.choose(&mut rand::thread_rng()).cloned();
    let Some(model) = chosen else {
        return Err(ApiError::bad_request("no seat is available"));
    };

    let mut seat = Seat::from_model(model);
    let start = Utc::now();
    seat.reserve(BookingWindow {
        seat_book_start_time: start,
        seat_book_end_time: start + state.book_duration,
    });
    save(&state.db, seat).await
}

async fn save(db: &DatabaseConnection, seat: Seat) -> Result<Json<Seat>, ApiError> {
    let id = seat.id;
    let saved = Seat::update(db, id, seat)
        .await
        .map_err(|err| ApiError::storage(err, "Failed to update record"))?;
    info!(
        seat_id = saved.seat_id,
        until = %saved.booking.seat_book_end_time,
        "seat reserved"
    );
    Ok(Json(saved))
}

fn router(db: DatabaseConnection, book_duration: TimeDelta) -> Router {
    let api = add_crud::<Seat>(Router::new(), "/api/seats");
    let api = add_find_api::<Seat>(api, "/api/seats/search").with_state(db.clone());

    let docs = document([
        crud_paths::<Seat>("/api/seats"),
        find_paths::<Seat>("/api/seats/search"),
    ]);
    let api = api.route("/api-docs/openapi.json", get(move || async move { Json(docs) }));

    let booking: Vec<GroupMutator<AppState>> = vec![
        Box::new(|group: Router<AppState>| group.route("/", get(list_seats))),
        Box::new(|group: Router<AppState>| {
            group
                .route("/random", post(reserve_random_seat))
                .route("/{seat_id}", post(reserve_seat))
        }),
    ];
    let booking = api_builder(booking)(Router::new(), "/seats")
        .with_state(AppState { db, book_duration });

    api.merge(booking)
}

async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(seat::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seats=info,crudkit=info,tower_http=info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    if !std::path::Path::new(&path).exists() {
        write_default::<SeatsConfig>(&path)?;
    }
    let mut config: SeatsConfig = load_yaml(&path)?;
    config.app = config.app.with_env_overrides()?;

    let db = Database::connect(&config.app.database.url).await?;
    create_tables(&db).await?;

    let app = router(db, TimeDelta::minutes(config.seat.book_duration))
        .layer(TraceLayer::new_for_http());

    let address = config.app.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "seat service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
