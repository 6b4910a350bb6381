//! Shell-outs to the AWS CLI for public-bucket access
//!
//! The downloader deliberately drives the `aws` binary instead of linking an
//! S3 client: the CLI already handles multipart transfers and resume, and the
//! surrounding pipeline assumes its progress output.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::info;

use crate::{FoldprepError, Result};

/// Fetches objects from storage; implemented by the AWS CLI in production.
pub trait StorageClient {
    fn fetch(&self, bucket: &str, key: &str, destination: &Path) -> Result<()>;
}

/// `aws` CLI client operating in no-credentials mode against public buckets.
pub struct AwsCli;

impl StorageClient for AwsCli {
    fn fetch(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        let uri = format!("s3://{}/{}", bucket, key);
        info!(%uri, destination = %destination.display(), "downloading");
        // Inherited stdio so the tool's own transfer progress reaches the user.
        let status = Command::new("aws")
            .args(["s3", "cp", "--no-sign-request", uri.as_str()])
            .arg(destination)
            .status()
            .map_err(|e| FoldprepError::Storage(format!("failed to launch aws: {}", e)))?;
        if !status.success() {
            return Err(FoldprepError::Storage(format!(
                "aws s3 cp {} exited with {}",
                uri, status
            )));
        }
        Ok(())
    }
}

/// One object of a `list-objects-v2` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingObject {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Size")]
    pub size: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(rename = "Contents", default)]
    pub contents: Vec<ListingObject>,
}

/// List the objects under the alignment-database prefix.
pub fn list_objects(bucket: &str, prefix: &str) -> Result<ListingResponse> {
    let prefix_arg = format!("{}/", prefix);
    let stdout = run_checked(Command::new("aws").args([
        "s3api",
        "list-objects-v2",
        "--no-sign-request",
        "--bucket",
        bucket,
        "--prefix",
        prefix_arg.as_str(),
        "--output",
        "json",
    ]))?;
    parse_listing(&stdout)
}

/// Parse the `list-objects-v2` JSON response.
pub fn parse_listing(raw: &str) -> Result<ListingResponse> {
    // aws prints nothing at all when the prefix matches no objects
    if raw.trim().is_empty() {
        return Ok(ListingResponse::default());
    }
    serde_json::from_str(raw)
        .map_err(|e| FoldprepError::Storage(format!("unexpected listing response: {}", e)))
}

/// Run a command to completion, treating non-zero exit as fatal.
///
/// Stdout is captured and returned; stderr is folded into the error.
pub fn run_checked(cmd: &mut Command) -> Result<String> {
    let rendered = render(cmd);
    let output = cmd
        .output()
        .map_err(|e| FoldprepError::Storage(format!("failed to launch `{}`: {}", rendered, e)))?;
    if !output.status.success() {
        return Err(FoldprepError::Storage(format!(
            "`{}` exited with {}: {}",
            rendered,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn render(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_reads_contents() {
        let raw = r#"{"Contents": [
            {"Key": "alignment_databases/uniref90.fasta.gz", "Size": 1234},
            {"Key": "alignment_databases/bfd.tar.gz", "Size": 5678}
        ]}"#;
        let listing = parse_listing(raw).unwrap();
        assert_eq!(listing.contents.len(), 2);
        assert_eq!(listing.contents[0].key, "alignment_databases/uniref90.fasta.gz");
        assert_eq!(listing.contents[1].size, 5678);
    }

    #[test]
    fn test_parse_listing_tolerates_empty_output() {
        assert!(parse_listing("").unwrap().contents.is_empty());
        assert!(parse_listing("{}").unwrap().contents.is_empty());
    }

    #[test]
    fn test_parse_listing_rejects_garbage() {
        let err = parse_listing("not json").unwrap_err();
        assert!(matches!(err, FoldprepError::Storage(_)));
    }

    #[test]
    fn test_run_checked_captures_stdout() {
        let out = run_checked(Command::new("echo").arg("hello")).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn test_run_checked_reports_failure_with_stderr() {
        let err = run_checked(Command::new("ls").arg("/definitely/not/here")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ls"));
        assert!(msg.contains("exited with"));
    }
}
