use chrono::{DateTime, Utc};
use crudkit::{Record, RecordId, Resource};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub seat_id: i32,
    pub seat_pos: String,
    pub seat_available: bool,
    pub seat_book_start_time: DateTimeUtc,
    pub seat_book_end_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// When a seat is held. Both ends are zero (the epoch) for a seat never booked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct BookingWindow {
    pub seat_book_start_time: DateTime<Utc>,
    pub seat_book_end_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct Seat {
    #[record(skip)]
    pub id: RecordId,
    pub seat_id: i32,
    pub seat_pos: String,
    pub seat_available: bool,
    #[record(nested)]
    #[serde(flatten)]
    pub booking: BookingWindow,
}

impl Seat {
    /// Marks the seat as taken for `window`.
    pub fn reserve(&mut self, window: BookingWindow) {
        self.seat_available = false;
        self.booking = window;
    }
}

impl Resource for Seat {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME: &'static str = "seat";

    fn from_model(model: Model) -> Self {
        Self {
            id: model.id,
            seat_id: model.seat_id,
            seat_pos: model.seat_pos,
            seat_available: model.seat_available,
            booking: BookingWindow {
                seat_book_start_time: model.seat_book_start_time,
                seat_book_end_time: model.seat_book_end_time,
            },
        }
    }

    fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            seat_id: Set(self.seat_id),
            seat_pos: Set(self.seat_pos),
            seat_available: Set(self.seat_available),
            seat_book_start_time: Set(self.booking.seat_book_start_time),
            seat_book_end_time: Set(self.booking.seat_book_end_time),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}
