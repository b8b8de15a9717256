use crate::pagination::Pagination;
use crate::query::{build_predicates, into_condition};
use crate::record::Record;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Serialize, de::DeserializeOwned};

/// Storage-assigned identity of a record.
pub type RecordId = i32;

/// A record type that can be stored, fetched and searched generically.
///
/// Implementors bind the API-facing record to its sea-orm entity and describe how to move
/// between the two. Every operation takes the connection explicitly and is expressed once,
/// here, for all record types.
///
/// `update` and `delete` check for the row and then act on it as two separate statements.
/// A concurrent writer can interleave between them; the last write wins.
#[async_trait]
pub trait Resource:
    Record + Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync;

    const ID_COLUMN: <Self::Entity as EntityTrait>::Column;
    const RESOURCE_NAME: &'static str;

    fn from_model(model: Self::Model) -> Self;

    /// Active model with every non-identity column `Set` and the id left `NotSet`.
    fn into_active(self) -> Self::ActiveModel;

    fn id(&self) -> RecordId;

    /// Every stored record, ordered by id. Not paginated.
    async fn list_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        let models = Self::Entity::find()
            .order_by_asc(Self::ID_COLUMN)
            .all(db)
            .await?;
        tracing::debug!(resource = Self::RESOURCE_NAME, count = models.len(), "listed records");
        Ok(models.into_iter().map(Self::from_model).collect())
    }

    async fn get_by_id(db: &DatabaseConnection, id: RecordId) -> Result<Self, DbErr> {
        let model = Self::Entity::find()
            .filter(Self::ID_COLUMN.eq(id))
            .one(db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("{} {id} not found", Self::RESOURCE_NAME))
            })?;
        Ok(Self::from_model(model))
    }

    async fn create(db: &DatabaseConnection, record: Self) -> Result<Self, DbErr> {
        let model = record.into_active().insert(db).await?;
        let created = Self::from_model(model);
        tracing::debug!(resource = Self::RESOURCE_NAME, id = created.id(), "created record");
        Ok(created)
    }

    /// Replaces every non-identity column of record `id` with the values in `record`.
    async fn update(db: &DatabaseConnection, id: RecordId, record: Self) -> Result<Self, DbErr> {
        Self::get_by_id(db, id).await?;

        let mut active = record.into_active();
        active.set(Self::ID_COLUMN, id.into());
        let model = active.update(db).await?;
        tracing::debug!(resource = Self::RESOURCE_NAME, id, "updated record");
        Ok(Self::from_model(model))
    }

    async fn delete(db: &DatabaseConnection, id: RecordId) -> Result<(), DbErr> {
        Self::get_by_id(db, id).await?;

        Self::Entity::delete_many()
            .filter(Self::ID_COLUMN.eq(id))
            .exec(db)
            .await?;
        tracing::debug!(resource = Self::RESOURCE_NAME, id, "deleted record");
        Ok(())
    }

    /// First record, by id, whose columns equal every scalar field of `example`.
    async fn find_one(db: &DatabaseConnection, example: &Self) -> Result<Self, DbErr> {
        let predicates = build_predicates(example);
        tracing::debug!(
            resource = Self::RESOURCE_NAME,
            predicates = predicates.len(),
            "find one by example"
        );
        let condition = into_condition(predicates);

        let model = Self::Entity::find()
            .filter(condition)
            .order_by_asc(Self::ID_COLUMN)
            .one(db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("no matching {}", Self::RESOURCE_NAME))
            })?;
        Ok(Self::from_model(model))
    }

    /// One page of the records matching `example`, ordered by id.
    async fn find_all(
        db: &DatabaseConnection,
        example: &Self,
        page: Pagination,
    ) -> Result<Vec<Self>, DbErr> {
        let predicates = build_predicates(example);
        tracing::debug!(
            resource = Self::RESOURCE_NAME,
            predicates = predicates.len(),
            limit = page.limit,
            offset = page.offset,
            "find all by example"
        );
        let condition = into_condition(predicates);

        let models = Self::Entity::find()
            .filter(condition)
            .order_by_asc(Self::ID_COLUMN)
            .offset(page.offset)
            .limit(page.limit)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Self::from_model).collect())
    }
}
