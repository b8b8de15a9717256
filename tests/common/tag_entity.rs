use crudkit::{Record, RecordId, Resource};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub label: String,
    pub weight: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A record with no unique columns, so any number of rows can match one example.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct Tag {
    #[record(skip)]
    pub id: RecordId,
    pub label: String,
    pub weight: i32,
}

impl Resource for Tag {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME: &'static str = "tag";

    fn from_model(model: Model) -> Self {
        Self {
            id: model.id,
            label: model.label,
            weight: model.weight,
        }
    }

    fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            label: Set(self.label),
            weight: Set(self.weight),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}
