//! End-to-end catalog browsing against an asset tree on disk

mod common;

use iconografix_core::catalog::{
    BuiltinProvider, CatalogProvider, FsSource, ProviderDescriptor, PLACEHOLDER_SVG,
};
use iconografix_core::{CatalogError, IconografixConfig, ProviderRegistry};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn feather_fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    common::write_icon_set(
        temp_dir.path(),
        "feather",
        "FEATHER",
        &["arrow-left.svg", "arrow-right.svg", "bell.svg"],
    )
    .unwrap();
    temp_dir
}

fn config_for(ids: &[BuiltinProvider], default: BuiltinProvider) -> IconografixConfig {
    IconografixConfig {
        default_provider: default.id().to_string(),
        providers: ids.iter().map(|p| p.descriptor()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_feather_search_scenario() {
    common::init_test_logging();
    let assets = feather_fixture();
    let config = config_for(&[BuiltinProvider::Feather], BuiltinProvider::Feather);
    let registry =
        ProviderRegistry::from_config(&config, Arc::new(FsSource::new(assets.path()))).unwrap();

    registry.initialize_all().await;
    let page = registry.search("arrow", 10, 0).await.unwrap();

    let names: Vec<_> = page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["arrow-left", "arrow-right"]);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(
        json["pagination"],
        serde_json::json!({ "total": 2, "count": 2, "offset": 0, "hasNext": false })
    );
    assert_eq!(json["data"][0]["displayName"], "Arrow Left");
    assert_eq!(json["data"][0]["providerId"], "FEATHER");
}

#[tokio::test]
async fn test_missing_icon_sets_degrade_independently() {
    common::init_test_logging();
    let assets = feather_fixture();
    // Only feather exists on disk
    let config = config_for(
        &[
            BuiltinProvider::Bootstrap,
            BuiltinProvider::Feather,
            BuiltinProvider::Tabler,
        ],
        BuiltinProvider::Bootstrap,
    );
    let mut registry =
        ProviderRegistry::from_config(&config, Arc::new(FsSource::new(assets.path()))).unwrap();

    let reports = registry.initialize_all().await;
    assert!(registry.is_ready());
    assert_eq!(
        reports.iter().map(|r| r.count).collect::<Vec<_>>(),
        vec![0, 3, 0]
    );
    assert!(reports[0].is_degraded());
    assert!(!reports[1].is_degraded());

    assert!(registry.search("", 10, 0).await.unwrap().items.is_empty());
    assert!(registry.set_active("FEATHER"));
    assert_eq!(registry.search("", 10, 0).await.unwrap().items.len(), 3);

    let stats = registry.get_stats();
    assert_eq!(stats[1].display_name, "Feather");
    assert_eq!(stats[1].count, 3);
}

#[tokio::test]
async fn test_random_pages_cover_only_active_catalog() {
    common::init_test_logging();
    let assets = TempDir::new().unwrap();
    common::write_icon_set(
        assets.path(),
        "a",
        "A",
        &["a1.svg", "a2.svg", "a3.svg", "a4.svg", "a5.svg"],
    )
    .unwrap();
    common::write_bare_icon_set(assets.path(), "b", &["b1.svg", "b2.svg", "b3.svg"]).unwrap();

    let source = Arc::new(FsSource::new(assets.path()));
    let mut registry = ProviderRegistry::new();
    for (id, path) in [("A", "a"), ("B", "b")] {
        registry
            .register(CatalogProvider::new(
                ProviderDescriptor::new(id, id, path),
                source.clone(),
                Duration::from_secs(60),
            ))
            .unwrap();
    }
    registry.initialize_all().await;

    assert!(matches!(
        registry.get_random(10, 0).await,
        Err(CatalogError::NoActiveProvider)
    ));

    registry.set_active("B");
    let page = registry.get_random(10, 0).await.unwrap();
    let ids: HashSet<_> = page.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["B_b1", "B_b2", "B_b3"]));
}

#[tokio::test]
async fn test_content_resolves_after_switching_provider() {
    common::init_test_logging();
    let assets = feather_fixture();
    common::write_icon_set(assets.path(), "tabler", "TABLER", &["home.svg"]).unwrap();

    let config = config_for(
        &[BuiltinProvider::Feather, BuiltinProvider::Tabler],
        BuiltinProvider::Feather,
    );
    let mut registry =
        ProviderRegistry::from_config(&config, Arc::new(FsSource::new(assets.path()))).unwrap();
    registry.initialize_all().await;

    let bell = registry.search("bell", 1, 0).await.unwrap().items.remove(0);
    assert!(registry.set_active("TABLER"));

    let content = registry.get_svg_content(&bell).await;
    assert!(content.contains("<title>bell.svg</title>"));
}

#[tokio::test]
async fn test_deleted_file_serves_placeholder() {
    common::init_test_logging();
    let assets = feather_fixture();
    let config = config_for(&[BuiltinProvider::Feather], BuiltinProvider::Feather);
    let registry =
        ProviderRegistry::from_config(&config, Arc::new(FsSource::new(assets.path()))).unwrap();

    let bell = registry.search("bell", 1, 0).await.unwrap().items.remove(0);
    std::fs::remove_file(assets.path().join("feather/bell.svg")).unwrap();

    assert_eq!(registry.get_svg_content(&bell).await, PLACEHOLDER_SVG);
}

#[tokio::test]
async fn test_cached_content_survives_file_change_within_ttl() {
    common::init_test_logging();
    let assets = feather_fixture();
    let config = config_for(&[BuiltinProvider::Feather], BuiltinProvider::Feather);
    let registry =
        ProviderRegistry::from_config(&config, Arc::new(FsSource::new(assets.path()))).unwrap();

    let bell = registry.search("bell", 1, 0).await.unwrap().items.remove(0);
    let first = registry.get_svg_content(&bell).await;

    std::fs::write(assets.path().join("feather/bell.svg"), "<svg>changed</svg>").unwrap();
    let second = registry.get_svg_content(&bell).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_zero_ttl_always_refetches() {
    common::init_test_logging();
    let assets = feather_fixture();
    let config = IconografixConfig {
        content_cache_ttl_secs: 0,
        ..config_for(&[BuiltinProvider::Feather], BuiltinProvider::Feather)
    };
    let registry =
        ProviderRegistry::from_config(&config, Arc::new(FsSource::new(assets.path()))).unwrap();

    let bell = registry.search("bell", 1, 0).await.unwrap().items.remove(0);
    registry.get_svg_content(&bell).await;

    std::fs::write(assets.path().join("feather/bell.svg"), "<svg>changed</svg>").unwrap();
    assert_eq!(registry.get_svg_content(&bell).await, "<svg>changed</svg>");
}
