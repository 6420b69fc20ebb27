//! Case Endpoints
//!
//! Case-specific actions plus the filter and access lookups the cases view
//! depends on.

use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::resources::Resource;
use crate::models::{AccessClaim, FilterOptions, Item};

const FILTER_OPTIONS_PATH: &str = "/admin/dynamic-filters/database-only";
const VERIFY_ACCESS_PATH: &str = "/admin/verify-access";

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a str,
    resolution: &'a str,
}

impl ApiClient {
    /// Quick-close from the cases table
    pub async fn close_case(&self, id: i64) -> Result<Item, ApiError> {
        let update = StatusUpdate {
            status: "Closed",
            resolution: "Case closed via quick action",
        };
        self.patch_json(&Resource::Cases.item_path(id), &update).await
    }

    pub async fn delete_case(&self, id: i64) -> Result<(), ApiError> {
        self.delete_item(Resource::Cases, id).await
    }

    /// Options for the status/type/priority/institution dropdowns
    pub async fn filter_options(&self) -> Result<FilterOptions, ApiError> {
        let options: FilterOptions = self.get_json(FILTER_OPTIONS_PATH, &[]).await?;
        if options.total() == 0 {
            log::warn!(target: "API", "no filter options found in database");
        }
        Ok(options)
    }

    /// Explicit admin claim; controls admin-only actions such as delete.
    pub async fn verify_access(&self) -> Result<AccessClaim, ApiError> {
        self.get_json(VERIFY_ACCESS_PATH, &[]).await
    }
}
