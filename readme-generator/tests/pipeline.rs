mod common;

use common::{metadata, mit_license, not_found, status, FakeBackend, FakeSource};
use readme_generator::{
    AnalyzeError, Analyzer, FailurePolicy, FetchError, GenerationConfig, GenerationRequest,
    Generator, InvalidUrl, SummaryFields,
};
use std::sync::Arc;

#[tokio::test]
async fn unlicensed_repository_flows_through_to_generation() {
    let mut meta = metadata("acme", "widget");
    meta.description = Some("A tiny widget".to_string());
    meta.language = Some("Rust".to_string());
    let source = Arc::new(
        FakeSource::new(meta)
            .with_file("README.md", "# widget\nOld readme.")
            .with_file("Cargo.toml", "[package]\nname = \"widget\"")
            .with_dir("src"),
    );
    let analyzer = Analyzer::new(source.clone());

    let summary = analyzer
        .analyze("https://github.com/acme/widget.git")
        .await
        .unwrap();

    assert_eq!(summary.name, "widget");
    assert_eq!(summary.owner, "acme");
    assert_eq!(summary.primary_language.as_deref(), Some("Rust"));
    assert_eq!(
        summary.file_names.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Cargo.toml", "README.md"]
    );
    assert_eq!(summary.readme_content.as_deref(), Some("# widget\nOld readme."));
    assert_eq!(summary.manifest_file.as_deref(), Some("Cargo.toml"));
    assert!(summary.dependency_list_content.is_none());
    assert!(summary.license_identifier.is_none());
    assert!(summary.license_text.is_none());
    assert!(!source.calls().contains(&"license".to_string()));

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("licenseIdentifier").is_none());
    assert!(json.get("dependencyListContent").is_none());
    assert_eq!(json["primaryLanguage"], "Rust");

    let backend = FakeBackend::replying("# widget\n\nGenerated.");
    let generator = Generator::new(backend.clone(), GenerationConfig::default());
    let document = generator
        .generate(GenerationRequest {
            summary: SummaryFields::from(summary),
            additional_instructions: Some("Mention the MSRV.".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(document.document, "# widget\n\nGenerated.");
    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("No license was detected"));
    assert!(prompts[0].contains("Contents of Cargo.toml:"));
    assert!(prompts[0].trim_end().ends_with("Mention the MSRV."));
}

#[tokio::test]
async fn fetches_only_listed_checklist_files() {
    let source = Arc::new(
        FakeSource::new(metadata("acme", "widget"))
            .with_file("readme.md", "hello")
            .with_file("LICENSE", "MIT"),
    );
    let analyzer = Analyzer::new(source.clone());

    analyzer.analyze("github.com/acme/widget").await.unwrap();

    assert_eq!(
        source.calls(),
        vec![
            "repository acme/widget".to_string(),
            "listing main".to_string(),
            "file readme.md".to_string(),
        ]
    );
}

#[tokio::test]
async fn licensed_repository_carries_identifier_and_text() {
    let mut meta = metadata("acme", "widget");
    meta.license = Some(mit_license());
    let source = Arc::new(FakeSource::new(meta).with_license_text("MIT License\n\nCopyright"));

    let summary = Analyzer::new(source.clone())
        .analyze("https://github.com/acme/widget")
        .await
        .unwrap();

    assert_eq!(summary.license_identifier.as_deref(), Some("MIT"));
    assert_eq!(
        summary.license_text.as_deref(),
        Some("MIT License\n\nCopyright")
    );
    assert!(source.calls().contains(&"license".to_string()));
}

#[tokio::test]
async fn failed_file_fetch_degrades_only_that_field() {
    let source = Arc::new(
        FakeSource::new(metadata("acme", "widget"))
            .with_file("README.md", "# widget")
            .with_broken_file("package.json", status(500, "Server Error"))
            .with_file("requirements.txt", "requests==2.32"),
    );

    let summary = Analyzer::new(source)
        .analyze("https://github.com/acme/widget")
        .await
        .unwrap();

    assert_eq!(summary.readme_content.as_deref(), Some("# widget"));
    assert!(summary.manifest_file.is_none());
    assert!(summary.manifest_content.is_none());
    assert_eq!(summary.dependency_list_file.as_deref(), Some("requirements.txt"));
    assert_eq!(
        summary.dependency_list_content.as_deref(),
        Some("requests==2.32")
    );
    assert!(summary.file_names.contains("package.json"));
}

#[tokio::test]
async fn failed_license_fetch_keeps_identifier() {
    let mut meta = metadata("acme", "widget");
    meta.license = Some(mit_license());
    let source = Arc::new(FakeSource::new(meta));

    let summary = Analyzer::new(source)
        .analyze("https://github.com/acme/widget")
        .await
        .unwrap();

    assert_eq!(summary.license_identifier.as_deref(), Some("MIT"));
    assert!(summary.license_text.is_none());
}

#[tokio::test]
async fn rate_limited_metadata_aborts_with_forwarded_status() {
    let source = Arc::new(FakeSource::failing_metadata(status(
        429,
        "API rate limit exceeded",
    )));
    let analyzer = Analyzer::new(source.clone());

    let error = analyzer
        .analyze("https://github.com/acme/widget")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        AnalyzeError::UpstreamUnavailable { status: 429, .. }
    ));
    assert_eq!(error.status_code(), 429);
    assert_eq!(source.calls(), vec!["repository acme/widget".to_string()]);
}

#[tokio::test]
async fn missing_repository_is_not_found() {
    let source = Arc::new(FakeSource::failing_metadata(not_found()));

    let error = Analyzer::new(source)
        .analyze("https://github.com/acme/ghost")
        .await
        .unwrap_err();

    assert!(matches!(error, AnalyzeError::NotFound { .. }));
    assert_eq!(error.user_message(), "Repository not found. Please check the URL.");
}

#[tokio::test]
async fn metadata_timeout_is_gateway_timeout() {
    let source = Arc::new(FakeSource::failing_metadata(FetchError::Timeout(10)));

    let error = Analyzer::new(source)
        .analyze("https://github.com/acme/widget")
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 504);
}

#[tokio::test]
async fn invalid_url_makes_no_calls() {
    let source = Arc::new(FakeSource::new(metadata("acme", "widget")));
    let analyzer = Analyzer::new(source.clone());

    for (url, expected) in [
        ("", InvalidUrl::Missing),
        ("https://gitlab.com/acme/widget", InvalidUrl::UnsupportedHost),
        ("https://github.com/acme", InvalidUrl::MissingSegments),
        ("ftp://github.com/acme/widget", InvalidUrl::UnsupportedScheme),
    ] {
        let error = analyzer.analyze(url).await.unwrap_err();
        assert!(
            matches!(error, AnalyzeError::InvalidInput(reason) if reason == expected),
            "url: {url}"
        );
    }
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn listing_failure_degrades_by_default() {
    let mut meta = metadata("acme", "empty");
    meta.description = Some("Nothing here yet".to_string());
    let source = Arc::new(FakeSource::new(meta).with_listing_error(not_found()));

    let summary = Analyzer::new(source.clone())
        .analyze("https://github.com/acme/empty")
        .await
        .unwrap();

    assert_eq!(summary.description.as_deref(), Some("Nothing here yet"));
    assert!(summary.file_names.is_empty());
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn listing_failure_aborts_when_configured() {
    let source = Arc::new(
        FakeSource::new(metadata("acme", "widget"))
            .with_listing_error(status(403, "Forbidden")),
    );
    let analyzer = Analyzer::new(source).with_listing_policy(FailurePolicy::Abort);

    let error = analyzer
        .analyze("https://github.com/acme/widget")
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 403);
}

#[tokio::test]
async fn empty_repository_listing_is_not_reported_as_missing_repository() {
    let source = Arc::new(
        FakeSource::new(metadata("acme", "empty"))
            .with_listing_error(status(404, "This repository is empty.")),
    );
    let analyzer = Analyzer::new(source).with_listing_policy(FailurePolicy::Abort);

    let error = analyzer
        .analyze("https://github.com/acme/empty")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        AnalyzeError::UpstreamUnavailable { status: 404, .. }
    ));
}
