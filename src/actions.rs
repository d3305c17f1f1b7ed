//! Action handlers, one per button. Every remote or local call is wrapped
//! here: failures are formatted into a `StatusLine` and shown inline, and
//! no failure is fatal — the form stays usable after any error.

use std::fs;
use std::path::Path;

use crate::chat::ChatClient;
use crate::config::Config;
use crate::constants::{MSG_BULK_UPDATE, MSG_BULK_UPLOAD, MSG_DELETE, MSG_UPDATE, MSG_UPLOAD};
use crate::github::{self, GithubError, PutOutcome, RepoClient};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
    Warning,
    Error,
}

/// One line of feedback shown at the bottom of the form.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, text: text.into() }
    }
    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Warning, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}

/// Save the configuration file.
pub fn save_config(config: &Config, path: &Path) -> StatusLine {
    match config.save(path) {
        Ok(()) => StatusLine::success("Configuration saved"),
        Err(e) => StatusLine::error(format!("Could not save configuration: {}", e)),
    }
}

/// Connect with the current credentials. The chat client needs only the
/// API key and is set up independently of the GitHub fields; the GitHub
/// connection needs all four of its fields. Replaces any previous handles.
pub fn connect(session: &mut Session, config: &Config) -> StatusLine {
    session.chat = None;
    if !config.openai_api_key.is_empty() {
        match ChatClient::new(&config.openai_api_key) {
            Ok(chat) => session.chat = Some(chat),
            Err(e) => return StatusLine::error(format!("Chat client error: {}", e)),
        }
    }

    if !config.github_complete() {
        return if session.chat.is_some() {
            StatusLine::info("Chat ready. Fill in user, repo, token and branch to connect GitHub")
        } else {
            StatusLine::warning("Fill in user, repo, token and branch first")
        };
    }
    match RepoClient::connect(&config.github_user, &config.github_repo, &config.github_token, &config.github_branch) {
        Ok(client) => {
            let status = format!("Connected to GitHub: {} [{}]", client.slug(), client.branch());
            session.repo = Some(client);
            session.listing_stale = true;
            StatusLine::success(status)
        }
        Err(e) => StatusLine::error(format!("Could not connect to GitHub: {}", e)),
    }
}

/// Send a prompt to the chat endpoint and append the exchange to the
/// transcript.
pub fn ask(session: &mut Session, prompt: &str) -> StatusLine {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return StatusLine::warning("Type a prompt first");
    }
    let Some(chat) = &session.chat else {
        return StatusLine::warning("Set the OpenAI API key and connect first");
    };
    match chat.ask(prompt) {
        Ok(response) => {
            session.transcript.push(prompt.to_string(), response);
            StatusLine::success("Response received")
        }
        Err(e) => StatusLine::error(format!("OpenAI error: {}", e)),
    }
}

/// Upload one local file, create-or-update. An empty destination falls
/// back to the local file name, like the original form.
pub fn upload_one(session: &mut Session, local_path: &str, dest: &str) -> StatusLine {
    let local_path = local_path.trim();
    if local_path.is_empty() {
        return StatusLine::warning("Select a file first");
    }
    let Some(repo) = &session.repo else {
        return StatusLine::warning("Connect to GitHub first");
    };
    let bytes = match fs::read(local_path) {
        Ok(b) => b,
        Err(e) => return StatusLine::error(format!("Could not read {}: {}", local_path, e)),
    };
    let dest = dest.trim();
    let final_path = if dest.is_empty() { file_name_of(local_path) } else { dest.to_string() };
    match github::put_file(repo, &final_path, &bytes, MSG_UPLOAD, MSG_UPDATE) {
        Ok(PutOutcome::Created) => {
            session.listing_stale = true;
            StatusLine::success(format!("File {} uploaded", final_path))
        }
        Ok(PutOutcome::Updated) => {
            session.listing_stale = true;
            StatusLine::info(format!("File {} updated", final_path))
        }
        Err(e) => StatusLine::error(format!("Upload failed: {}", e)),
    }
}

/// Upload many local files into a destination folder. Per-file
/// independence: unreadable local files and rejected uploads are reported
/// together, in input order, without aborting the rest.
pub fn upload_many(session: &mut Session, local_paths: &str, dest_folder: &str) -> StatusLine {
    let paths: Vec<&str> = local_paths.split_whitespace().collect();
    if paths.is_empty() {
        return StatusLine::warning("Select at least one file");
    }
    let Some(repo) = &session.repo else {
        return StatusLine::warning("Connect to GitHub first");
    };

    // One slot per input path so read failures and upload failures land
    // back at the position of the path that caused them.
    let mut slots: Vec<Option<String>> = vec![None; paths.len()];
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut file_idx: Vec<usize> = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        let name = file_name_of(path);
        match fs::read(path) {
            Ok(bytes) => {
                file_idx.push(i);
                files.push((name, bytes));
            }
            Err(e) => slots[i] = Some(format!("{}: {}", name, e)),
        }
    }

    let (success, upload_errors) = github::bulk_put(repo, &files, dest_folder, MSG_BULK_UPLOAD, MSG_BULK_UPDATE);
    if success > 0 {
        session.listing_stale = true;
    }

    let all_errors = merge_batch_errors(slots, &file_idx, upload_errors);

    if all_errors.is_empty() {
        StatusLine::success(format!("{} file(s) uploaded", success))
    } else if success > 0 {
        StatusLine::warning(format!("{} file(s) uploaded, {} failed: {}", success, all_errors.len(), all_errors.join("; ")))
    } else {
        StatusLine::error(format!("All uploads failed: {}", all_errors.join("; ")))
    }
}

/// Refresh the root file listing (files only, directories filtered).
pub fn refresh_listing(session: &mut Session) -> StatusLine {
    let Some(repo) = &session.repo else {
        return StatusLine::warning("Connect to GitHub first");
    };
    match github::list_files(repo) {
        Ok(listing) => {
            let n = listing.len();
            session.set_listing(listing);
            if n == 0 {
                StatusLine::info("No files in the repository")
            } else {
                StatusLine::success(format!("{} file(s) listed", n))
            }
        }
        Err(e) => StatusLine::error(format!("Could not list files: {}", e)),
    }
}

/// Fetch and stash the selected file's content for display.
pub fn view_file(session: &mut Session) -> StatusLine {
    let Some(repo) = &session.repo else {
        return StatusLine::warning("Connect to GitHub first");
    };
    let Some(path) = session.selected_file().map(|s| s.to_string()) else {
        return StatusLine::warning("No file selected — refresh the listing");
    };
    match github::get_file(repo, &path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            session.viewed = Some((path.clone(), text));
            StatusLine::success(format!("Showing {}", path))
        }
        Err(e) => StatusLine::error(format!("Could not fetch {}: {}", path, e)),
    }
}

/// Delete the selected file (current version token fetched just before).
pub fn delete_selected(session: &mut Session) -> StatusLine {
    let Some(repo) = &session.repo else {
        return StatusLine::warning("Connect to GitHub first");
    };
    let Some(path) = session.selected_file().map(|s| s.to_string()) else {
        return StatusLine::warning("No file selected — refresh the listing");
    };
    match github::delete_file(repo, &path, MSG_DELETE) {
        Ok(()) => {
            session.listing_stale = true;
            if session.viewed.as_ref().is_some_and(|(viewed_path, _)| *viewed_path == path) {
                session.viewed = None;
            }
            StatusLine::success(format!("File {} deleted", path))
        }
        Err(e) => StatusLine::error(format!("Could not delete {}: {}", path, e)),
    }
}

/// Publish a local HTML file as `index.html` for GitHub Pages.
pub fn publish(session: &mut Session, local_path: &str) -> StatusLine {
    let local_path = local_path.trim();
    if local_path.is_empty() {
        return StatusLine::warning("Select an HTML file first");
    }
    let Some(repo) = &session.repo else {
        return StatusLine::warning("Connect to GitHub first");
    };
    let html = match fs::read(local_path) {
        Ok(b) => b,
        Err(e) => return StatusLine::error(format!("Could not read {}: {}", local_path, e)),
    };
    let url = github::pages_url(repo.owner(), repo.repo());
    match github::publish_site(repo, &html) {
        Ok(PutOutcome::Created) => {
            session.listing_stale = true;
            StatusLine::success(format!("Site published! See: {}", url))
        }
        Ok(PutOutcome::Updated) => {
            session.listing_stale = true;
            StatusLine::success(format!("Site updated! See: {}", url))
        }
        Err(e) => StatusLine::error(format!("Could not publish site: {}", e)),
    }
}

/// Fold batch upload failures back into their input slots and flatten,
/// keeping the final error list in input order. `file_idx[j]` is the input
/// position of the j-th file that was handed to the batch upload.
fn merge_batch_errors(
    mut slots: Vec<Option<String>>,
    file_idx: &[usize],
    upload_errors: Vec<(usize, String, GithubError)>,
) -> Vec<String> {
    for (j, name, e) in upload_errors {
        slots[file_idx[j]] = Some(format!("{}: {}", name, e));
    }
    slots.into_iter().flatten().collect()
}

fn file_name_of(path: &str) -> String {
    Path::new(path).file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_with_empty_prompt_warns_before_any_call() {
        let mut session = Session::new();
        let status = ask(&mut session, "   ");
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn upload_without_connection_warns() {
        let mut session = Session::new();
        let status = upload_one(&mut session, "some.txt", "");
        assert_eq!(status.kind, StatusKind::Warning);
    }

    #[test]
    fn upload_with_empty_path_warns() {
        let mut session = Session::new();
        let status = upload_one(&mut session, "", "dest.txt");
        assert_eq!(status.kind, StatusKind::Warning);
    }

    #[test]
    fn view_without_listing_warns() {
        let mut session = Session::new();
        session.repo = None;
        let status = view_file(&mut session);
        assert_eq!(status.kind, StatusKind::Warning);
    }

    #[test]
    fn connect_with_incomplete_config_warns() {
        let mut session = Session::new();
        let config = Config::default();
        let status = connect(&mut session, &config);
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(!session.connected());
    }

    #[test]
    fn connect_with_only_api_key_enables_chat() {
        let mut session = Session::new();
        let config = Config { openai_api_key: "sk-test".into(), ..Config::default() };
        let status = connect(&mut session, &config);
        assert_eq!(status.kind, StatusKind::Info);
        assert!(session.chat.is_some());
        assert!(session.repo.is_none());
    }

    #[test]
    fn ask_guard_needs_only_the_chat_client() {
        // With no chat client the warning points at the API key even when
        // GitHub fields are irrelevant.
        let mut session = Session::new();
        let status = ask(&mut session, "hello");
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(status.text.contains("API key"));
    }

    #[test]
    fn batch_errors_come_back_in_input_order() {
        // Input: a.txt (read ok, upload rejected), b.txt (unreadable),
        // c.txt (read ok, upload rejected). Only a and c reached the
        // batch, as files 0 and 1.
        let slots = vec![None, Some("b.txt: no such file".to_string()), None];
        let upload_errors = vec![
            (0, "a.txt".to_string(), GithubError::Api { status: 422, body: "rejected".into() }),
            (1, "c.txt".to_string(), GithubError::Api { status: 422, body: "rejected".into() }),
        ];
        let merged = merge_batch_errors(slots, &[0, 2], upload_errors);
        assert_eq!(merged.len(), 3);
        assert!(merged[0].starts_with("a.txt:"));
        assert!(merged[1].starts_with("b.txt:"));
        assert!(merged[2].starts_with("c.txt:"));
    }

    #[test]
    fn file_name_of_strips_directories() {
        assert_eq!(file_name_of("/tmp/dir/report.html"), "report.html");
        assert_eq!(file_name_of("plain.txt"), "plain.txt");
    }
}
