//! # Package Catalogue Endpoints

use shared::PackagesPage;

use super::client::ApiClient;
use super::request::ApiRequest;
use crate::core::error::Result;

pub const PACKAGES_PATH: &str = "/api/packages";

/// Page size used by the packages screen.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Get one page of subscription packages.
pub async fn get_packages(client: &ApiClient, limit: u32, offset: u32) -> Result<PackagesPage> {
    let request = ApiRequest::get(PACKAGES_PATH)
        .query("limit", limit)
        .query("offset", offset);

    let page = client.execute::<PackagesPage>(request).await?.into_data();

    tracing::debug!(
        returned = page.packages.len(),
        total = page.total,
        offset = page.offset,
        "Packages loaded"
    );
    Ok(page)
}
