use std::time::Duration;

use base64::Engine;
use reqwest::blocking::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::constants::{ERROR_BODY_MAX, GITHUB_API_BASE, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::github::error::GithubError;
use crate::github::sync::ContentsApi;
use crate::github::types::{ContentEntry, DeleteRequest, WriteRequest};
use crate::text::truncate;

/// Blocking client bound to one branch of one repository.
pub struct RepoClient {
    client: Client,
    token: SecretString,
    owner: String,
    repo: String,
    branch: String,
}

impl RepoClient {
    /// Build a client and validate the credentials by resolving the
    /// repository. Fails fast on a bad token or a missing repo so the
    /// form can show the connection state up front.
    pub fn connect(owner: &str, repo: &str, token: &str, branch: &str) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(GithubError::from)?;
        let this = Self {
            client,
            token: SecretString::from(token.to_string()),
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
        };
        let url = format!("{}/repos/{}/{}", GITHUB_API_BASE, this.owner, this.repo);
        let resp = this.authed(this.client.get(&url)).send()?;
        this.check_status(resp, &format!("{}/{}", this.owner, this.repo))?;
        Ok(this)
    }

    /// `owner/repo` for display
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token.expose_secret()))
    }

    fn contents_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/contents/{}", GITHUB_API_BASE, self.owner, self.repo, encode_path(path))
    }

    /// Map a response status onto the error taxonomy, returning the body
    /// for success. 401/403 are auth failures, 404 is NotFound (which the
    /// create-or-update logic branches on), everything else surfaces as-is.
    fn check_status(&self, resp: Response, path: &str) -> Result<String, GithubError> {
        let status = resp.status().as_u16();
        let body = resp.text()?;
        match status {
            200..=299 => Ok(body),
            401 | 403 => Err(GithubError::Auth(truncate(&body, ERROR_BODY_MAX).to_string())),
            404 => Err(GithubError::NotFound(path.to_string())),
            _ => Err(GithubError::Api { status, body: truncate(&body, ERROR_BODY_MAX).to_string() }),
        }
    }

    fn write_file(&self, path: &str, message: &str, bytes: &[u8], sha: Option<&str>) -> Result<(), GithubError> {
        let body = WriteRequest {
            message,
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
            branch: &self.branch,
            sha,
        };
        let resp = self.authed(self.client.put(self.contents_url(path)).json(&body)).send()?;
        self.check_status(resp, path)?;
        Ok(())
    }
}

impl ContentsApi for RepoClient {
    fn get(&self, path: &str) -> Result<ContentEntry, GithubError> {
        let url = format!("{}?ref={}", self.contents_url(path), self.branch);
        let resp = self.authed(self.client.get(&url)).send()?;
        let body = self.check_status(resp, path)?;
        serde_json::from_str(&body).map_err(|e| GithubError::Parse(format!("contents of {}: {}", path, e)))
    }

    fn list_root(&self) -> Result<Vec<ContentEntry>, GithubError> {
        let url = format!("{}?ref={}", self.contents_url(""), self.branch);
        let resp = self.authed(self.client.get(&url)).send()?;
        let body = self.check_status(resp, "/")?;
        serde_json::from_str(&body).map_err(|e| GithubError::Parse(format!("root listing: {}", e)))
    }

    fn create(&self, path: &str, message: &str, bytes: &[u8]) -> Result<(), GithubError> {
        self.write_file(path, message, bytes, None)
    }

    fn update(&self, path: &str, message: &str, bytes: &[u8], sha: &str) -> Result<(), GithubError> {
        self.write_file(path, message, bytes, Some(sha))
    }

    fn delete(&self, path: &str, message: &str, sha: &str) -> Result<(), GithubError> {
        let body = DeleteRequest { message, sha, branch: &self.branch };
        let resp = self.authed(self.client.delete(self.contents_url(path)).json(&body)).send()?;
        self.check_status(resp, path)?;
        Ok(())
    }
}

/// Percent-encode a repository path for use in a URL, keeping `/`
/// separators intact.
fn encode_path(path: &str) -> String {
    let mut result = String::with_capacity(path.len() * 2);
    for b in path.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                result.push(b as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", b));
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_path_keeps_separators() {
        assert_eq!(encode_path("docs/my file.txt"), "docs/my%20file.txt");
        assert_eq!(encode_path("index.html"), "index.html");
    }
}
