#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeZone, Utc};
use crudkit::{add_crud, add_find_api};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

pub mod seat_entity;
pub mod tag_entity;

use seat_entity::Seat;
use tag_entity::Tag;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// CRUD under `/api/v1/{seats,tags}`, search under `/api/v1/{seats,tags}/search`.
pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let api = add_crud::<Seat>(Router::new(), "/seats");
    let api = add_find_api::<Seat>(api, "/seats/search");
    let api = add_crud::<Tag>(api, "/tags");
    let api = add_find_api::<Tag>(api, "/tags/search").with_state(db);

    Router::new().nest("/api/v1", api)
}

pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
}

pub fn seat_json(seat_id: i32, seat_pos: &str, seat_available: bool) -> Value {
    json!({
        "seat_id": seat_id,
        "seat_pos": seat_pos,
        "seat_available": seat_available,
        "seat_book_start_time": at(9),
        "seat_book_end_time": at(10),
    })
}

/// Sends a request with an optional JSON body and returns the status and decoded body.
/// Non-JSON bodies decode as `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Creates a tag through the API and returns it as stored.
pub async fn create_tag(app: &Router, label: &str, weight: i32) -> Tag {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/tags",
        Some(json!({ "label": label, "weight": weight })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_value(body).unwrap()
}

/// Creates a seat through the API and returns it as stored.
pub async fn create_seat(app: &Router, seat_id: i32, seat_pos: &str, available: bool) -> Seat {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/seats",
        Some(seat_json(seat_id, seat_pos, available)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_value(body).unwrap()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateSeatTable), Box::new(CreateTagTable)]
    }
}

pub struct CreateSeatTable;

#[async_trait::async_trait]
impl MigrationName for CreateSeatTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_seat_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateSeatTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(SeatTable)
            .if_not_exists()
            .col(
                ColumnDef::new(SeatColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(SeatColumn::SeatId)
                    .integer()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(SeatColumn::SeatPos).string().not_null())
            .col(
                ColumnDef::new(SeatColumn::SeatAvailable)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(
                ColumnDef::new(SeatColumn::SeatBookStartTime)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(SeatColumn::SeatBookEndTime)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeatTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum SeatColumn {
    Id,
    SeatId,
    SeatPos,
    SeatAvailable,
    SeatBookStartTime,
    SeatBookEndTime,
}

impl Iden for SeatColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::SeatId => "seat_id",
                Self::SeatPos => "seat_pos",
                Self::SeatAvailable => "seat_available",
                Self::SeatBookStartTime => "seat_book_start_time",
                Self::SeatBookEndTime => "seat_book_end_time",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct SeatTable;

impl Iden for SeatTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "seats").unwrap();
    }
}

pub struct CreateTagTable;

#[async_trait::async_trait]
impl MigrationName for CreateTagTable {
    fn name(&self) -> &'static str {
        "m20240101_000002_create_tag_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTagTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(TagTable)
            .if_not_exists()
            .col(
                ColumnDef::new(TagColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(TagColumn::Label).string().not_null())
            .col(ColumnDef::new(TagColumn::Weight).integer().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TagTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum TagColumn {
    Id,
    Label,
    Weight,
}

impl Iden for TagColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Label => "label",
                Self::Weight => "weight",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct TagTable;

impl Iden for TagTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "tags").unwrap();
    }
}
