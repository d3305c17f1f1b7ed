//! Create-or-update reconciliation and the other repository operations,
//! written against the `ContentsApi` seam so they can be exercised without
//! a network.

use crate::github::error::GithubError;
use crate::github::types::ContentEntry;

/// The subset of the contents API the sync logic needs. Implemented by
/// `RepoClient` over HTTP and by in-memory stubs in tests.
pub trait ContentsApi {
    /// Fetch metadata (and content, for files) of a single path on the
    /// configured branch. Missing paths are `GithubError::NotFound`.
    fn get(&self, path: &str) -> Result<ContentEntry, GithubError>;
    /// List the repository root. Non-recursive.
    fn list_root(&self) -> Result<Vec<ContentEntry>, GithubError>;
    /// Create a new file. Fails if the path already exists.
    fn create(&self, path: &str, message: &str, bytes: &[u8]) -> Result<(), GithubError>;
    /// Update an existing file, identified by its current version token.
    fn update(&self, path: &str, message: &str, bytes: &[u8], sha: &str) -> Result<(), GithubError>;
    /// Delete a file, identified by its current version token.
    fn delete(&self, path: &str, message: &str, sha: &str) -> Result<(), GithubError>;
}

/// Whether `put_file` created a fresh file or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Created,
    Updated,
}

/// Create-or-update a single file.
///
/// The existence check is explicit: a missing path drives the create
/// branch, a found path drives an update with its current sha, and every
/// other error (auth, network, rejected operation) propagates unchanged
/// instead of being retried as an update.
pub fn put_file(
    api: &dyn ContentsApi,
    path: &str,
    bytes: &[u8],
    create_message: &str,
    update_message: &str,
) -> Result<PutOutcome, GithubError> {
    match api.get(path) {
        Ok(existing) => {
            api.update(path, update_message, bytes, &existing.sha)?;
            Ok(PutOutcome::Updated)
        }
        Err(GithubError::NotFound(_)) => {
            api.create(path, create_message, bytes)?;
            Ok(PutOutcome::Created)
        }
        Err(other) => Err(other),
    }
}

/// List file paths at the repository root. Directories are filtered out.
pub fn list_files(api: &dyn ContentsApi) -> Result<Vec<String>, GithubError> {
    let entries = api.list_root()?;
    Ok(entries.into_iter().filter(|e| e.is_file()).map(|e| e.path).collect())
}

/// Fetch the decoded content of a single file.
pub fn get_file(api: &dyn ContentsApi, path: &str) -> Result<Vec<u8>, GithubError> {
    api.get(path)?.decoded_content()
}

/// Delete a file, fetching its current version token immediately before
/// the delete call. No compare-and-swap against concurrent modification;
/// the get-then-delete window is accepted.
pub fn delete_file(api: &dyn ContentsApi, path: &str, message: &str) -> Result<(), GithubError> {
    let entry = api.get(path)?;
    api.delete(&entry.path, message, &entry.sha)
}

/// Upload a batch of files into `dest_folder`, one `put_file` each.
///
/// Files are independent: one failure neither aborts nor rolls back the
/// rest. Returns the success count and the failures in input order, each
/// tagged with its index into `files` so callers can fold them back into
/// a larger input-ordered report.
pub fn bulk_put(
    api: &dyn ContentsApi,
    files: &[(String, Vec<u8>)],
    dest_folder: &str,
    create_message: &str,
    update_message: &str,
) -> (usize, Vec<(usize, String, GithubError)>) {
    let mut success = 0;
    let mut errors = Vec::new();
    for (i, (name, bytes)) in files.iter().enumerate() {
        let path = join_dest(dest_folder, name);
        match put_file(api, &path, bytes, create_message, update_message) {
            Ok(_) => success += 1,
            Err(e) => errors.push((i, name.clone(), e)),
        }
    }
    (success, errors)
}

/// Publish (create-or-update) `index.html` for GitHub Pages.
pub fn publish_site(api: &dyn ContentsApi, html: &[u8]) -> Result<PutOutcome, GithubError> {
    put_file(api, crate::constants::PAGES_INDEX, html, crate::constants::MSG_PUBLISH, crate::constants::MSG_PUBLISH)
}

/// The URL GitHub Pages serves the repository at.
pub fn pages_url(user: &str, repo: &str) -> String {
    format!("https://{}.github.io/{}/", user, repo)
}

/// Join a destination folder and file name. An empty folder means the
/// repository root; trailing slashes and stray whitespace are tolerated
/// ("docs/" and "docs" are the same destination).
fn join_dest(dest_folder: &str, name: &str) -> String {
    let folder = dest_folder.trim().trim_end_matches('/');
    if folder.is_empty() { name.to_string() } else { format!("{}/{}", folder, name) }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::*;

    /// In-memory contents API that records every call in order.
    #[derive(Default)]
    struct StubApi {
        files: RefCell<BTreeMap<String, Vec<u8>>>,
        dirs: Vec<String>,
        /// Paths whose get() fails with an auth error
        auth_fail_on_get: Vec<String>,
        /// Paths whose create() is rejected with a 422
        reject_create: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl StubApi {
        fn with_file(self, path: &str, content: &[u8]) -> Self {
            self.files.borrow_mut().insert(path.to_string(), content.to_vec());
            self
        }

        fn sha_of(path: &str, content: &[u8]) -> String {
            format!("sha-{}-{}", path, content.len())
        }

        fn log(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl ContentsApi for StubApi {
        fn get(&self, path: &str) -> Result<ContentEntry, GithubError> {
            self.log(format!("get {}", path));
            if self.auth_fail_on_get.iter().any(|p| p == path) {
                return Err(GithubError::Auth("bad credentials".into()));
            }
            match self.files.borrow().get(path) {
                Some(content) => {
                    use base64::Engine;
                    Ok(ContentEntry {
                        path: path.to_string(),
                        sha: Self::sha_of(path, content),
                        entry_type: "file".into(),
                        content: Some(base64::engine::general_purpose::STANDARD.encode(content)),
                    })
                }
                None => Err(GithubError::NotFound(path.to_string())),
            }
        }

        fn list_root(&self) -> Result<Vec<ContentEntry>, GithubError> {
            self.log("list_root".into());
            let mut entries: Vec<ContentEntry> = self
                .files
                .borrow()
                .iter()
                .filter(|(p, _)| !p.contains('/'))
                .map(|(p, c)| ContentEntry {
                    path: p.clone(),
                    sha: Self::sha_of(p, c),
                    entry_type: "file".into(),
                    content: None,
                })
                .collect();
            entries.extend(self.dirs.iter().map(|d| ContentEntry {
                path: d.clone(),
                sha: format!("sha-{}", d),
                entry_type: "dir".into(),
                content: None,
            }));
            Ok(entries)
        }

        fn create(&self, path: &str, message: &str, bytes: &[u8]) -> Result<(), GithubError> {
            self.log(format!("create {} msg={}", path, message));
            if self.reject_create.iter().any(|p| p == path) {
                return Err(GithubError::Api { status: 422, body: "rejected".into() });
            }
            let mut files = self.files.borrow_mut();
            if files.contains_key(path) {
                return Err(GithubError::Api { status: 422, body: "already exists".into() });
            }
            files.insert(path.to_string(), bytes.to_vec());
            Ok(())
        }

        fn update(&self, path: &str, message: &str, bytes: &[u8], sha: &str) -> Result<(), GithubError> {
            self.log(format!("update {} sha={} msg={}", path, sha, message));
            let mut files = self.files.borrow_mut();
            let current = files.get(path).ok_or_else(|| GithubError::NotFound(path.to_string()))?;
            if sha != Self::sha_of(path, current) {
                return Err(GithubError::Api { status: 409, body: "stale sha".into() });
            }
            files.insert(path.to_string(), bytes.to_vec());
            Ok(())
        }

        fn delete(&self, path: &str, _message: &str, sha: &str) -> Result<(), GithubError> {
            self.log(format!("delete {} sha={}", path, sha));
            let mut files = self.files.borrow_mut();
            let current = files.get(path).ok_or_else(|| GithubError::NotFound(path.to_string()))?;
            if sha != Self::sha_of(path, current) {
                return Err(GithubError::Api { status: 409, body: "stale sha".into() });
            }
            files.remove(path);
            Ok(())
        }
    }

    #[test]
    fn put_file_creates_when_missing() {
        let api = StubApi::default();
        let outcome = put_file(&api, "new.txt", b"hi", "c", "u").unwrap();
        assert_eq!(outcome, PutOutcome::Created);
        assert_eq!(api.files.borrow().get("new.txt").unwrap(), b"hi");
    }

    #[test]
    fn put_file_updates_when_present() {
        let api = StubApi::default().with_file("old.txt", b"v1");
        let outcome = put_file(&api, "old.txt", b"v2", "c", "u").unwrap();
        assert_eq!(outcome, PutOutcome::Updated);
        assert_eq!(api.files.borrow().get("old.txt").unwrap(), b"v2");
    }

    #[test]
    fn put_file_twice_is_idempotent_on_content() {
        let api = StubApi::default();
        put_file(&api, "f.txt", b"same", "c", "u").unwrap();
        put_file(&api, "f.txt", b"same", "c", "u").unwrap();
        assert_eq!(api.files.borrow().get("f.txt").unwrap(), b"same");
    }

    #[test]
    fn put_file_propagates_auth_errors_instead_of_updating() {
        let api = StubApi { auth_fail_on_get: vec!["f.txt".into()], ..StubApi::default() };
        let err = put_file(&api, "f.txt", b"x", "c", "u").unwrap_err();
        assert!(matches!(err, GithubError::Auth(_)));
        // Never fell through to create or update
        let calls = api.calls.borrow();
        assert_eq!(*calls, vec!["get f.txt".to_string()]);
    }

    #[test]
    fn list_files_filters_directories() {
        let api = StubApi { dirs: vec!["src".into()], ..StubApi::default() }
            .with_file("readme.md", b"r")
            .with_file("index.html", b"<html>");
        let files = list_files(&api).unwrap();
        assert_eq!(files, vec!["index.html".to_string(), "readme.md".to_string()]);
    }

    #[test]
    fn get_file_returns_decoded_bytes() {
        let api = StubApi::default().with_file("hello.txt", b"hello world");
        assert_eq!(get_file(&api, "hello.txt").unwrap(), b"hello world");
    }

    #[test]
    fn delete_fetches_current_sha_then_deletes() {
        let api = StubApi::default().with_file("gone.txt", b"bye");
        delete_file(&api, "gone.txt", "msg").unwrap();
        assert!(api.files.borrow().is_empty());
        let calls = api.calls.borrow();
        assert_eq!(calls[0], "get gone.txt");
        assert!(calls[1].starts_with("delete gone.txt sha=sha-gone.txt"));
    }

    #[test]
    fn bulk_put_is_independent_per_file() {
        let api = StubApi { reject_create: vec!["docs/bad.txt".into()], ..StubApi::default() };
        let files = vec![
            ("a.txt".to_string(), b"a".to_vec()),
            ("bad.txt".to_string(), b"b".to_vec()),
            ("c.txt".to_string(), b"c".to_vec()),
        ];
        let (success, errors) = bulk_put(&api, &files, "docs", "c", "u");
        assert_eq!(success, 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 1);
        assert_eq!(errors[0].1, "bad.txt");
        assert!(api.files.borrow().contains_key("docs/a.txt"));
        assert!(api.files.borrow().contains_key("docs/c.txt"));
        assert!(!api.files.borrow().contains_key("docs/bad.txt"));
    }

    #[test]
    fn bulk_put_reports_errors_in_input_order() {
        let api = StubApi {
            reject_create: vec!["z.txt".into(), "a.txt".into()],
            ..StubApi::default()
        };
        let files = vec![
            ("z.txt".to_string(), b"z".to_vec()),
            ("m.txt".to_string(), b"m".to_vec()),
            ("a.txt".to_string(), b"a".to_vec()),
        ];
        let (success, errors) = bulk_put(&api, &files, "", "c", "u");
        assert_eq!(success, 1);
        let names: Vec<&str> = errors.iter().map(|(_, n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["z.txt", "a.txt"]);
        let indices: Vec<usize> = errors.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn bulk_put_uses_distinct_create_and_update_messages() {
        let api = StubApi::default().with_file("old.txt", b"v1");
        let files = vec![
            ("old.txt".to_string(), b"v2".to_vec()),
            ("new.txt".to_string(), b"n".to_vec()),
        ];
        let (success, errors) = bulk_put(&api, &files, "", "batch create", "batch update");
        assert_eq!(success, 2);
        assert!(errors.is_empty());
        let calls = api.calls.borrow();
        assert!(calls.iter().any(|c| c.starts_with("update old.txt") && c.ends_with("msg=batch update")));
        assert!(calls.contains(&"create new.txt msg=batch create".to_string()));
    }

    #[test]
    fn join_dest_normalizes_trailing_slash() {
        assert_eq!(join_dest("docs/", "a.txt"), "docs/a.txt");
        assert_eq!(join_dest("docs", "a.txt"), "docs/a.txt");
        assert_eq!(join_dest("  ", "a.txt"), "a.txt");
        assert_eq!(join_dest("", "a.txt"), "a.txt");
    }

    #[test]
    fn publish_site_targets_index_html() {
        let api = StubApi::default();
        publish_site(&api, b"<html></html>").unwrap();
        assert!(api.files.borrow().contains_key("index.html"));
    }

    #[test]
    fn pages_url_format() {
        assert_eq!(pages_url("octocat", "hello-world"), "https://octocat.github.io/hello-world/");
    }
}
