// Form descriptor loading for the `SVCR` form callback.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

/// Read a form descriptor, passing its JSON through untouched.
///
/// Never fails: a missing or unparsable file yields `None` so the host's
/// form UI still gets an answer. Not cached -- edits show up immediately.
pub async fn load_form(path: &Path) -> Option<Value> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to open form file");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(form) => {
            info!(path = %path.display(), "loaded form file");
            Some(form)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to decode form file");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_form(&dir.path().join("nope.json")).await, None);
    }

    #[tokio::test]
    async fn invalid_json_is_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert_eq!(load_form(file.path()).await, None);
    }

    #[tokio::test]
    async fn valid_json_passes_through() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"dataKey":"server","label":"Server"}]"#)
            .unwrap();
        let form = load_form(file.path()).await.unwrap();
        assert_eq!(form[0]["dataKey"], "server");
    }
}
