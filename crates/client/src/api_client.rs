//! HTTP API client with bearer-token authentication.

use alm_shared::{
    ApiError, Artifact, ArtifactUpdate, CreateArtifactRequest, CreateLinkRequest,
    CreateProjectRequest, InviteMemberRequest, LoginRequest, LoginResponse, Org, Project,
    ProjectMember, Role, UpdateMemberRoleRequest,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for the `/api/v1` REST surface. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: String::new(),
            token: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send `Authorization: Bearer {token}` on every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let rb = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    /// Send and return the body text of a 2xx response.
    async fn send(&self, rb: RequestBuilder) -> Result<String, ApiError> {
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            if status.as_u16() == 401 {
                crate::log_warn!("API rejected the session token");
            }
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    async fn send_json<TReq: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> Result<String, ApiError> {
        let body = serde_json::to_vec(body).map_err(|e| ApiError::Deserialize(e.to_string()))?;
        let rb = self
            .request(method, path)
            .header("Content-Type", "application/json")
            .body(body);
        self.send(rb).await
    }

    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        let text = self.send(self.request(Method::GET, path)).await?;
        decode(&text)
    }

    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let text = self.send_json(Method::POST, path, body).await?;
        decode(&text)
    }

    pub async fn patch_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let text = self.send_json(Method::PATCH, path, body).await?;
        decode(&text)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    // --- Auth ---

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/api/v1/auth/login", request).await
    }

    // --- Orgs and projects ---

    pub async fn list_orgs(&self) -> Result<Vec<Org>, ApiError> {
        self.get_json("/api/v1/orgs").await
    }

    pub async fn list_projects(&self, org_id: &str) -> Result<Vec<Project>, ApiError> {
        self.get_json(&format!("/api/v1/orgs/{}/projects", enc(org_id))).await
    }

    pub async fn get_project(&self, org_id: &str, project_id: &str) -> Result<Project, ApiError> {
        self.get_json(&project_path(org_id, project_id)).await
    }

    pub async fn create_project(
        &self,
        org_id: &str,
        request: &CreateProjectRequest,
    ) -> Result<Project, ApiError> {
        self.post_json(&format!("/api/v1/orgs/{}/projects", enc(org_id)), request)
            .await
    }

    pub async fn invite_member(
        &self,
        org_id: &str,
        request: &InviteMemberRequest,
    ) -> Result<(), ApiError> {
        self.post_json(&format!("/api/v1/orgs/{}/invitations", enc(org_id)), request)
            .await
    }

    // --- Project members ---

    pub async fn list_members(
        &self,
        org_id: &str,
        project_id: &str,
    ) -> Result<Vec<ProjectMember>, ApiError> {
        self.get_json(&format!("{}/members", project_path(org_id, project_id)))
            .await
    }

    pub async fn update_member_role(
        &self,
        org_id: &str,
        project_id: &str,
        user_id: &str,
        role: Role,
    ) -> Result<ProjectMember, ApiError> {
        let path = format!("{}/members/{}", project_path(org_id, project_id), enc(user_id));
        self.patch_json(&path, &UpdateMemberRoleRequest { role }).await
    }

    pub async fn remove_member(
        &self,
        org_id: &str,
        project_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        let path = format!("{}/members/{}", project_path(org_id, project_id), enc(user_id));
        self.delete(&path).await
    }

    // --- Artifacts ---

    pub async fn list_artifacts(
        &self,
        org_id: &str,
        project_id: &str,
    ) -> Result<Vec<Artifact>, ApiError> {
        self.get_json(&format!("{}/artifacts", project_path(org_id, project_id)))
            .await
    }

    pub async fn create_artifact(
        &self,
        org_id: &str,
        project_id: &str,
        request: &CreateArtifactRequest,
    ) -> Result<Artifact, ApiError> {
        let path = format!("{}/artifacts", project_path(org_id, project_id));
        self.post_json(&path, request).await
    }

    pub async fn update_artifact(
        &self,
        org_id: &str,
        project_id: &str,
        artifact_id: &str,
        update: &ArtifactUpdate,
    ) -> Result<Artifact, ApiError> {
        let path = artifact_path(org_id, project_id, artifact_id);
        self.patch_json(&path, update).await
    }

    pub async fn delete_artifact(
        &self,
        org_id: &str,
        project_id: &str,
        artifact_id: &str,
    ) -> Result<(), ApiError> {
        self.delete(&artifact_path(org_id, project_id, artifact_id))
            .await
    }

    pub async fn create_link(
        &self,
        org_id: &str,
        project_id: &str,
        artifact_id: &str,
        request: &CreateLinkRequest,
    ) -> Result<(), ApiError> {
        let path = format!("{}/links", artifact_path(org_id, project_id, artifact_id));
        self.post_json(&path, request).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn enc(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn project_path(org_id: &str, project_id: &str) -> String {
    format!("/api/v1/orgs/{}/projects/{}", enc(org_id), enc(project_id))
}

fn artifact_path(org_id: &str, project_id: &str, artifact_id: &str) -> String {
    format!(
        "{}/artifacts/{}",
        project_path(org_id, project_id),
        enc(artifact_id)
    )
}

/// Empty bodies (204) decode as JSON `null`, which `()` accepts.
fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Deserialize(e.to_string()))
}

/// Join a base URL and an absolute or relative path. An empty base keeps the
/// path relative to the page.
fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if base.is_empty() {
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        }
    } else {
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_slashes_and_absolute_paths() {
        assert_eq!(join_url("https://alm.example.com/", "/api/v1/orgs"), "https://alm.example.com/api/v1/orgs");
        assert_eq!(join_url("", "api/v1/orgs"), "/api/v1/orgs");
        assert_eq!(join_url("http://x", "https://y/z"), "https://y/z");
    }

    #[test]
    fn path_segments_are_encoded() {
        assert_eq!(
            artifact_path("acme", "p 1", "a/2"),
            "/api/v1/orgs/acme/projects/p%201/artifacts/a%2F2"
        );
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let unit: Result<(), ApiError> = decode("");
        assert!(unit.is_ok());
        let bad: Result<Vec<Org>, ApiError> = decode("{");
        assert!(matches!(bad, Err(ApiError::Deserialize(_))));
    }
}
