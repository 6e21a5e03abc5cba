use core_types::Annotation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("annotation feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the host's annotation feed: a JSON array of annotation records.
pub fn parse_feed(raw: &str) -> Result<Vec<Annotation>, FeedError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_array_in_order() {
        let feed = parse_feed(
            r#"[
                {"url": "u1", "ancestorId": "a", "anchorText": "x", "annotationText": "n1"},
                {"url": "u2", "ancestorId": "b", "anchorText": "y", "annotationText": "n2"}
            ]"#,
        )
        .unwrap();
        let urls: Vec<_> = feed.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["u1", "u2"]);
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = parse_feed(r#"[{"url": "u1"}]"#).unwrap_err();
        assert!(err.to_string().contains("ancestorId"), "got: {err}");
    }
}
