use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by the search-all route.
///
/// Both values are kept as raw strings: pagination input is never rejected, it is clamped
/// by [`crate::pagination::Pagination`] instead.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Records per page. Values of 100 or more are capped at 100; missing, invalid or
    /// non-positive values mean 10.
    #[param(example = "20")]
    pub pagesize: Option<String>,
    /// 1-based page number. Missing, invalid or non-positive values mean the first page.
    #[param(example = "1")]
    pub pagenum: Option<String>,
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self {
            message: "Record deleted successfully".to_string(),
        }
    }
}
