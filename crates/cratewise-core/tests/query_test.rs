use cratewise_core::query::{Query, QueryRequest, ValidationError};
use cratewise_core::types::{CrateInfo, LinkShape};

#[test]
fn query_is_trimmed() {
    let q = Query::new("  need an http client \n").unwrap();
    assert_eq!(q.as_str(), "need an http client");
}

#[test]
fn empty_query_is_rejected() {
    assert_eq!(Query::new(""), Err(ValidationError::EmptyQuery));
}

#[test]
fn whitespace_query_is_rejected() {
    assert_eq!(Query::new(" \t\n "), Err(ValidationError::EmptyQuery));
}

#[test]
fn request_carries_trimmed_context() {
    let req = QueryRequest::new(Query::new("orm").unwrap(), Some(" postgres only "));
    assert_eq!(req.query, "orm");
    assert_eq!(req.context.as_deref(), Some("postgres only"));
}

#[test]
fn link_shape_parses_case_insensitively() {
    assert_eq!("Single".parse::<LinkShape>().unwrap(), LinkShape::Single);
    assert_eq!("split".parse::<LinkShape>().unwrap(), LinkShape::Split);
    assert!("both".parse::<LinkShape>().is_err());
}

#[test]
fn links_follow_the_configured_shape() {
    let krate: CrateInfo = serde_json::from_str(
        r#"{"name": "tokio", "version": "1.0.0", "downloads": 10,
            "last_updated": "2024-01-01T00:00:00Z", "score": 0.8,
            "repository": "https://github.com/tokio-rs/tokio",
            "url": "https://tokio.rs"}"#,
    )
    .unwrap();
    assert_eq!(
        krate.links(LinkShape::Split),
        [("repository", "https://github.com/tokio-rs/tokio")]
    );
    assert_eq!(krate.links(LinkShape::Single), [("url", "https://tokio.rs")]);
}
