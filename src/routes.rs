use crate::errors::ApiError;
use crate::models::{DeleteConfirmation, PageParams};
use crate::pagination::Pagination;
use crate::traits::{RecordId, Resource};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use sea_orm::{DatabaseConnection, DbErr};

/// A step that registers routes on a group and hands the group back.
pub type GroupMutator<S> = Box<dyn FnOnce(Router<S>) -> Router<S> + Send>;

/// Bundles `mutators` into a mount function.
///
/// Calling the result with a parent router and a path creates an empty group, threads it
/// through every mutator in order, mounts the group on the parent under `path` and returns
/// the parent. An empty path or `"/"` merges the group at the root.
///
/// axum mounts a finished `Router` with `nest` and hands back the parent, so there is no live
/// group left to return once mounting is done. The parent router takes the group's place as
/// the value further registrations chain from.
pub fn api_builder<S>(mutators: Vec<GroupMutator<S>>) -> impl FnOnce(Router<S>, &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    move |parent: Router<S>, path: &str| {
        let group = mutators
            .into_iter()
            .fold(Router::new(), |group, mutate| mutate(group));
        mount(parent, path, group)
    }
}

fn mount<S>(parent: Router<S>, path: &str, group: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        parent.merge(group)
    } else {
        parent.nest(&format!("/{trimmed}"), group)
    }
}

/// List, get, create, update and delete for `T`, relative to the group root.
pub fn crud_routes<T: Resource>(group: Router<DatabaseConnection>) -> Router<DatabaseConnection> {
    group
        .route("/", get(list_all::<T>).post(create_one::<T>))
        .route(
            "/{id}",
            get(get_one::<T>).put(update_one::<T>).delete(delete_one::<T>),
        )
}

/// Query-by-example search for `T`: `POST /` returns the first match, `POST /all` a page.
pub fn find_routes<T: Resource>(group: Router<DatabaseConnection>) -> Router<DatabaseConnection> {
    group
        .route("/", post(find_one::<T>))
        .route("/all", post(find_all::<T>))
}

/// Mounts the CRUD routes for `T` under `path`.
pub fn add_crud<T: Resource>(
    router: Router<DatabaseConnection>,
    path: &str,
) -> Router<DatabaseConnection> {
    api_builder(vec![Box::new(crud_routes::<T>) as GroupMutator<_>])(router, path)
}

/// Mounts the search routes for `T` under `path`.
///
/// Both route sets register `POST /`, so the search API needs its own path.
pub fn add_find_api<T: Resource>(
    router: Router<DatabaseConnection>,
    path: &str,
) -> Router<DatabaseConnection> {
    api_builder(vec![Box::new(find_routes::<T>) as GroupMutator<_>])(router, path)
}

/// Identity from the `{id}` segment. An id that is not an integer names no record.
fn record_id(id: Result<Path<RecordId>, PathRejection>) -> Result<RecordId, ApiError> {
    id.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(%rejection, "unparseable record id");
        ApiError::not_found("Record not found")
    })
}

pub async fn list_all<T: Resource>(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<T>>, ApiError> {
    T::list_all(&db)
        .await
        .map(Json)
        .map_err(|err| ApiError::storage(err, "Failed to fetch records"))
}

pub async fn get_one<T: Resource>(
    State(db): State<DatabaseConnection>,
    id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<T>, ApiError> {
    let id = record_id(id)?;
    T::get_by_id(&db, id)
        .await
        .map(Json)
        .map_err(|err| ApiError::storage(err, "Failed to fetch record"))
}

pub async fn create_one<T: Resource>(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let Json(record) = payload?;
    let created = T::create(&db, record)
        .await
        .map_err(|err| ApiError::storage(err, "Failed to create record"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Full replace of record `id`. A missing record is reported before a bad body.
pub async fn update_one<T: Resource>(
    State(db): State<DatabaseConnection>,
    id: Result<Path<RecordId>, PathRejection>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, ApiError> {
    let id = record_id(id)?;
    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => {
            T::get_by_id(&db, id)
                .await
                .map_err(|err| ApiError::storage(err, "Failed to update record"))?;
            return Err(rejection.into());
        }
    };

    T::update(&db, id, record)
        .await
        .map(Json)
        .map_err(|err| ApiError::storage(err, "Failed to update record"))
}

pub async fn delete_one<T: Resource>(
    State(db): State<DatabaseConnection>,
    id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    let id = record_id(id)?;
    T::delete(&db, id)
        .await
        .map_err(|err| ApiError::storage(err, "Failed to delete record"))?;
    Ok(Json(DeleteConfirmation::default()))
}

/// First record matching every field of the posted example.
///
/// A miss answers 404 and echoes the decoded example under `data`.
pub async fn find_one<T: Resource>(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, ApiError> {
    let Json(example) = payload?;
    match T::find_one(&db, &example).await {
        Ok(found) => Ok(Json(found)),
        Err(DbErr::RecordNotFound(_)) => Err(match serde_json::to_value(&example) {
            Ok(data) => ApiError::not_found_with("No matching record found", data),
            Err(_) => ApiError::not_found("No matching record found"),
        }),
        Err(err) => Err(ApiError::storage(err, "Failed to find records")),
    }
}

/// Page of records matching every field of the posted example, sized by `pagesize` and
/// `pagenum`. A query string that does not decode falls back to the default page.
pub async fn find_all<T: Resource>(
    State(db): State<DatabaseConnection>,
    params: Result<Query<PageParams>, QueryRejection>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<Vec<T>>, ApiError> {
    let Json(example) = payload?;
    let params = params.map(|Query(params)| params).unwrap_or_else(|rejection| {
        tracing::debug!(%rejection, "ignoring undecodable page parameters");
        PageParams::default()
    });
    let page = Pagination::from_params(&params);
    T::find_all(&db, &example, page)
        .await
        .map(Json)
        .map_err(|err| ApiError::storage(err, "Failed to find records"))
}
