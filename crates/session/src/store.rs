//! Persistence collaborator seam

use sitetrack_api_client::endpoints::sites::{NewSite, SiteRecord};
use sitetrack_api_client::{ApiResult, Credentials, SiteTrackClient};
use std::future::Future;

/// Where site boundaries are loaded from and saved to.
///
/// Credentials are passed into every call; implementations must not look them
/// up from ambient state.
pub trait SiteStore: Send + Sync {
    /// Fetch persisted sites, optionally restricted to one project
    fn list_sites(
        &self,
        credentials: &Credentials,
        project_id: Option<i64>,
    ) -> impl Future<Output = ApiResult<Vec<SiteRecord>>> + Send;

    /// Persist a new site and return the stored record
    fn create_site(
        &self,
        credentials: &Credentials,
        site: &NewSite,
    ) -> impl Future<Output = ApiResult<SiteRecord>> + Send;
}

impl SiteStore for SiteTrackClient {
    async fn list_sites(
        &self,
        credentials: &Credentials,
        project_id: Option<i64>,
    ) -> ApiResult<Vec<SiteRecord>> {
        self.sites().list(credentials, project_id).await
    }

    async fn create_site(&self, credentials: &Credentials, site: &NewSite) -> ApiResult<SiteRecord> {
        self.sites().create(credentials, site).await
    }
}

impl<S: SiteStore> SiteStore for std::sync::Arc<S> {
    fn list_sites(
        &self,
        credentials: &Credentials,
        project_id: Option<i64>,
    ) -> impl Future<Output = ApiResult<Vec<SiteRecord>>> + Send {
        (**self).list_sites(credentials, project_id)
    }

    fn create_site(
        &self,
        credentials: &Credentials,
        site: &NewSite,
    ) -> impl Future<Output = ApiResult<SiteRecord>> + Send {
        (**self).create_site(credentials, site)
    }
}
