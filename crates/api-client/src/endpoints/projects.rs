//! Project endpoints

use crate::client::SiteTrackClient;
use crate::credentials::Credentials;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Projects API interface
#[derive(Clone)]
pub struct ProjectsApi {
    client: SiteTrackClient,
}

impl ProjectsApi {
    /// Create a new projects API interface
    pub(crate) fn new(client: SiteTrackClient) -> Self {
        Self { client }
    }

    /// List all projects
    ///
    /// GET /projects
    pub async fn list(&self, credentials: &Credentials) -> ApiResult<Vec<Project>> {
        self.client.get("projects", Some(credentials)).await
    }

    /// Create a new project
    ///
    /// POST /projects
    pub async fn create(&self, credentials: &Credentials, name: &str) -> ApiResult<Project> {
        let request = CreateProjectRequest::new(name)?;
        self.client
            .post("projects", &request, Some(credentials))
            .await
    }
}

/// Create project request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name
    pub name: String,
}

impl CreateProjectRequest {
    /// Build a request, rejecting blank names
    pub fn new(name: &str) -> ApiResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::invalid_request("project name cannot be empty"));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

/// Project entity
///
/// The list endpoint omits `id`; only creation responses carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier, when the endpoint returns it
    #[serde(default)]
    pub id: Option<i64>,
    /// Project name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_trims_name() {
        let request = CreateProjectRequest::new("  Western Ghats  ").unwrap();
        assert_eq!(request.name, "Western Ghats");
    }

    #[test]
    fn test_create_request_rejects_blank() {
        assert!(matches!(
            CreateProjectRequest::new("   "),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_project_deserialize_with_and_without_id() {
        let created: Project = serde_json::from_str(r#"{"id": 3, "name": "Mangroves"}"#).unwrap();
        assert_eq!(created.id, Some(3));

        let listed: Vec<Project> = serde_json::from_str(r#"[{"name": "Mangroves"}]"#).unwrap();
        assert_eq!(listed[0].id, None);
        assert_eq!(listed[0].name, "Mangroves");
    }
}
