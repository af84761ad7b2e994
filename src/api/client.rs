//! REST client for the registry's remote persistence service.
//!
//! Four logical resources - profile, projects, class-groups, assignments -
//! each exposed as fetch-all, insert-one (returning the assigned id),
//! update-by-id and delete-by-id. Field names on the wire are the
//! snake_case projection of the model fields, produced by serde.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::RegistryConfig;
use crate::models::{
    Assignment, AssignmentDraft, ClassGroup, ClassGroupDraft, Project, ProjectDraft, SchoolProfile,
};

use super::RemoteError;

/// Abstracted CRUD operations against the remote store, one method per
/// (resource, verb) pair. Every call is independently fallible; no method
/// retries. The profile resource has no delete: the registry never removes
/// the institution record.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_profile(&self) -> Result<Option<SchoolProfile>, RemoteError>;
    async fn insert_profile(&self, profile: &SchoolProfile) -> Result<String, RemoteError>;
    async fn update_profile(&self, id: &str, profile: &SchoolProfile) -> Result<(), RemoteError>;

    async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError>;
    async fn insert_project(&self, draft: &ProjectDraft) -> Result<String, RemoteError>;
    async fn update_project(&self, id: &str, project: &Project) -> Result<(), RemoteError>;
    async fn delete_project(&self, id: &str) -> Result<(), RemoteError>;

    async fn fetch_class_groups(&self) -> Result<Vec<ClassGroup>, RemoteError>;
    async fn insert_class_group(&self, draft: &ClassGroupDraft) -> Result<String, RemoteError>;
    async fn update_class_group(&self, id: &str, group: &ClassGroup) -> Result<(), RemoteError>;
    async fn delete_class_group(&self, id: &str) -> Result<(), RemoteError>;

    async fn fetch_assignments(&self) -> Result<Vec<Assignment>, RemoteError>;
    async fn insert_assignment(&self, draft: &AssignmentDraft) -> Result<String, RemoteError>;
    async fn update_assignment(&self, id: &str, assignment: &Assignment)
        -> Result<(), RemoteError>;
    async fn delete_assignment(&self, id: &str) -> Result<(), RemoteError>;
}

/// Row returned by insert endpoints.
#[derive(Debug, Deserialize)]
struct InsertedRow {
    id: String,
}

/// HTTP client for the remote store.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(RemoteError::from_status(status, &body))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn put_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), RemoteError> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let response = self.client.put(&url).json(body).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for RestClient {
    async fn fetch_profile(&self) -> Result<Option<SchoolProfile>, RemoteError> {
        // The profile endpoint returns the single row or a JSON null.
        self.get_json("profile").await
    }

    async fn insert_profile(&self, profile: &SchoolProfile) -> Result<String, RemoteError> {
        let row: InsertedRow = self.post_json("profile", profile).await?;
        Ok(row.id)
    }

    async fn update_profile(&self, id: &str, profile: &SchoolProfile) -> Result<(), RemoteError> {
        self.put_json(&format!("profile/{}", id), profile).await
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError> {
        self.get_json("projects").await
    }

    async fn insert_project(&self, draft: &ProjectDraft) -> Result<String, RemoteError> {
        let row: InsertedRow = self.post_json("projects", draft).await?;
        Ok(row.id)
    }

    async fn update_project(&self, id: &str, project: &Project) -> Result<(), RemoteError> {
        self.put_json(&format!("projects/{}", id), project).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), RemoteError> {
        self.delete(&format!("projects/{}", id)).await
    }

    async fn fetch_class_groups(&self) -> Result<Vec<ClassGroup>, RemoteError> {
        self.get_json("class-groups").await
    }

    async fn insert_class_group(&self, draft: &ClassGroupDraft) -> Result<String, RemoteError> {
        let row: InsertedRow = self.post_json("class-groups", draft).await?;
        Ok(row.id)
    }

    async fn update_class_group(&self, id: &str, group: &ClassGroup) -> Result<(), RemoteError> {
        self.put_json(&format!("class-groups/{}", id), group).await
    }

    async fn delete_class_group(&self, id: &str) -> Result<(), RemoteError> {
        self.delete(&format!("class-groups/{}", id)).await
    }

    async fn fetch_assignments(&self) -> Result<Vec<Assignment>, RemoteError> {
        self.get_json("assignments").await
    }

    async fn insert_assignment(&self, draft: &AssignmentDraft) -> Result<String, RemoteError> {
        let row: InsertedRow = self.post_json("assignments", draft).await?;
        Ok(row.id)
    }

    async fn update_assignment(
        &self,
        id: &str,
        assignment: &Assignment,
    ) -> Result<(), RemoteError> {
        self.put_json(&format!("assignments/{}", id), assignment)
            .await
    }

    async fn delete_assignment(&self, id: &str) -> Result<(), RemoteError> {
        self.delete(&format!("assignments/{}", id)).await
    }
}
