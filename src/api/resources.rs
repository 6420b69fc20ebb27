//! Resource Endpoints
//!
//! Collection listing and deletion shared by every backend collection.

use async_trait::async_trait;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::PageBody;
use crate::pagination::{Page, PageQuery, PageSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Accounts,
    Loans,
    Cases,
    Contacts,
    Assets,
    AdminUsers,
}

impl Resource {
    pub fn collection_path(self) -> &'static str {
        match self {
            Resource::Accounts => "/accounts/",
            Resource::Loans => "/loans/",
            Resource::Cases => "/cases/",
            Resource::Contacts => "/contacts/",
            Resource::Assets => "/assets/",
            Resource::AdminUsers => "/admin/users/",
        }
    }

    pub fn item_path(self, id: i64) -> String {
        format!("{}{}", self.collection_path(), id)
    }

    /// Frontend route of the detail page
    pub fn detail_route(self, id: i64) -> String {
        format!("/{}/{}", self.collection_path().trim_matches('/'), id)
    }
}

impl ApiClient {
    pub async fn list_page(&self, resource: Resource, query: &PageQuery) -> Result<Page, ApiError> {
        let body: PageBody = self.get_json(resource.collection_path(), &query.params()).await?;
        let (items, total) = body.into_parts();
        Ok(Page { items, total })
    }

    pub async fn delete_item(&self, resource: Resource, id: i64) -> Result<(), ApiError> {
        log::info!(target: "API", "deleting {}", resource.item_path(id));
        self.delete(&resource.item_path(id)).await
    }
}

/// Page source over one resource collection.
pub struct CollectionPages<'a> {
    pub client: &'a ApiClient,
    pub resource: Resource,
}

#[async_trait(?Send)]
impl PageSource for CollectionPages<'_> {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, ApiError> {
        self.client.list_page(self.resource, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Resource::Cases.collection_path(), "/cases/");
        assert_eq!(Resource::Cases.item_path(42), "/cases/42");
        assert_eq!(Resource::AdminUsers.item_path(3), "/admin/users/3");
        assert_eq!(Resource::Loans.detail_route(8), "/loans/8");
        assert_eq!(Resource::AdminUsers.detail_route(3), "/admin/users/3");
    }
}
