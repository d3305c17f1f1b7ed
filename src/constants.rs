//! Shared constants: file paths, API endpoints, timeouts, commit messages.

/// Config file, written next to the working directory.
pub const CONFIG_FILE: &str = "agent_config.json";

/// GitHub REST API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// OpenAI chat completions endpoint
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used for the chat pane
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Timeout for every remote call (seconds). Calls block the UI thread,
/// so this is the upper bound on how long a keypress can hang the form.
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// User-Agent header — the GitHub API rejects requests without one.
pub const USER_AGENT: &str = "repopilot";

/// Max bytes of a remote error body surfaced in the status line
pub const ERROR_BODY_MAX: usize = 200;

/// Max prompt/response pairs kept in the chat transcript
pub const TRANSCRIPT_CAP: usize = 100;

/// File published to GitHub Pages
pub const PAGES_INDEX: &str = "index.html";

// Commit messages per action
pub const MSG_UPLOAD: &str = "Upload from repopilot";
pub const MSG_UPDATE: &str = "Update from repopilot";
pub const MSG_BULK_UPLOAD: &str = "Bulk upload from repopilot";
pub const MSG_BULK_UPDATE: &str = "Bulk update from repopilot";
pub const MSG_DELETE: &str = "Deleted from repopilot";
pub const MSG_PUBLISH: &str = "Publish site from repopilot";

// Layout
pub const SIDEBAR_WIDTH: u16 = 38;
pub const STATUS_HEIGHT: u16 = 1;
