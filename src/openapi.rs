//! OpenAPI description of the generated routes.
//!
//! The routers built by [`crate::add_crud`] and [`crate::add_find_api`] are plain axum
//! routers, so their documentation is assembled separately: [`crud_paths`] and [`find_paths`]
//! describe the operations mounted at a path, and [`document`] folds them into one
//! [`OpenApi`] value that can be served as JSON.

use crate::models::{DeleteConfirmation, PageParams};
use crate::traits::Resource;
use utoipa::IntoParams;
use utoipa::OpenApi as _;
use utoipa::openapi::path::{Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::{HttpMethod, OpenApi, Paths, Required, Response};

#[derive(utoipa::OpenApi)]
#[openapi(components(schemas(DeleteConfirmation, PageParams)))]
struct ApiDoc;

fn normalize(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}

fn join(base: &str, segment: &str) -> String {
    if base == "/" {
        format!("/{segment}")
    } else {
        format!("{base}/{segment}")
    }
}

fn id_parameter() -> Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some("Storage-assigned record id"))
        .build()
}

fn operation<T: Resource>(summary: String, responses: &[(&str, &str)]) -> OperationBuilder {
    responses.iter().fold(
        OperationBuilder::new()
            .tag(T::RESOURCE_NAME)
            .summary(Some(summary)),
        |op, (status, description)| op.response(*status, Response::new(*description)),
    )
}

fn with_id(op: OperationBuilder) -> Operation {
    op.parameter(id_parameter()).build()
}

/// Operations registered by [`crate::add_crud`] for `T` mounted at `path`.
#[must_use]
pub fn crud_paths<T: Resource>(path: &str) -> Paths {
    let name = T::RESOURCE_NAME;
    let base = normalize(path);
    let item = join(&base, "{id}");
    let mut paths = Paths::new();

    paths.add_path_operation(
        &base,
        vec![HttpMethod::Get],
        operation::<T>(format!("List every {name}"), &[("200", "All records, ordered by id")])
            .build(),
    );
    paths.add_path_operation(
        &base,
        vec![HttpMethod::Post],
        operation::<T>(
            format!("Create a {name}"),
            &[
                ("201", "The stored record with its id"),
                ("400", "Body could not be decoded"),
                ("409", "Duplicate entry"),
            ],
        )
        .build(),
    );
    paths.add_path_operation(
        &item,
        vec![HttpMethod::Get],
        with_id(operation::<T>(
            format!("Fetch a {name} by id"),
            &[("200", "The record"), ("404", "Record not found")],
        )),
    );
    paths.add_path_operation(
        &item,
        vec![HttpMethod::Put],
        with_id(operation::<T>(
            format!("Replace a {name}"),
            &[
                ("200", "The record after replacement"),
                ("400", "Body could not be decoded"),
                ("404", "Record not found"),
                ("409", "Duplicate entry"),
            ],
        )),
    );
    paths.add_path_operation(
        &item,
        vec![HttpMethod::Delete],
        with_id(operation::<T>(
            format!("Delete a {name}"),
            &[("200", "Deletion confirmation"), ("404", "Record not found")],
        )),
    );
    paths
}

/// Operations registered by [`crate::add_find_api`] for `T` mounted at `path`.
#[must_use]
pub fn find_paths<T: Resource>(path: &str) -> Paths {
    let name = T::RESOURCE_NAME;
    let base = normalize(path);
    let mut paths = Paths::new();

    paths.add_path_operation(
        &base,
        vec![HttpMethod::Post],
        operation::<T>(
            format!("First {name} matching the example"),
            &[
                ("200", "Lowest-id match"),
                ("400", "Body could not be decoded"),
                ("404", "No matching record found"),
            ],
        )
        .build(),
    );
    paths.add_path_operation(
        join(&base, "all"),
        vec![HttpMethod::Post],
        operation::<T>(
            format!("Page of {name} records matching the example"),
            &[("200", "Matches, ordered by id"), ("400", "Body could not be decoded")],
        )
        .parameters(Some(PageParams::into_params(|| Some(ParameterIn::Query))))
        .build(),
    );
    paths
}

/// Base document with the shared schemas, extended with every set of `paths`.
#[must_use]
pub fn document(paths: impl IntoIterator<Item = Paths>) -> OpenApi {
    let mut doc = ApiDoc::openapi();
    for set in paths {
        doc.paths.merge(set);
    }
    doc
}
