//! GitHub contents-API passthrough: a thin blocking client plus the
//! create-or-update reconciliation logic, split at the `ContentsApi` seam.

mod client;
pub mod error;
pub mod sync;
pub mod types;

pub use client::RepoClient;
pub use error::GithubError;
pub use sync::{ContentsApi, PutOutcome, bulk_put, delete_file, get_file, list_files, pages_url, publish_site, put_file};
