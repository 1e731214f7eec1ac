//! Static file serving for the browser front end

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::constants::INDEX_DOCUMENT;
use crate::error::GatewayError;

/// Serves files from a fixed public root
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a URL path onto a file below the root.
    ///
    /// Resolution is lexical: `.` is dropped, `..` pops a segment, and a path
    /// that would climb above the root is rejected with `Forbidden`.
    pub fn resolve(&self, url_path: &str) -> Result<PathBuf, GatewayError> {
        let relative = url_path.trim_start_matches('/');
        let relative = if relative.is_empty() {
            INDEX_DOCUMENT
        } else {
            relative
        };

        let mut segments: Vec<&std::ffi::OsStr> = Vec::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(segment) => segments.push(segment),
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(GatewayError::Forbidden);
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(GatewayError::Forbidden);
                }
            }
        }

        let resolved: PathBuf = segments.iter().fold(self.root.clone(), |p, s| p.join(s));
        if !resolved.starts_with(&self.root) {
            return Err(GatewayError::Forbidden);
        }
        Ok(resolved)
    }

    /// Reads the file behind `url_path` and wraps it in a response
    pub async fn serve(&self, url_path: &str) -> Result<Response, GatewayError> {
        let path = self.resolve(url_path).inspect_err(|_| {
            tracing::warn!("Rejected static path outside public root: {}", url_path);
        })?;

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(GatewayError::NotFound),
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(GatewayError::NotFound);
        }

        let contents = tokio::fs::read(&path).await?;
        tracing::debug!("Serving {} ({} bytes)", path.display(), contents.len());

        Ok(([(header::CONTENT_TYPE, content_type(&path))], contents).into_response())
    }
}

/// Picks a content type from the file extension
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "text/plain",
    }
}
