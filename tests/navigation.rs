//! Navigation behaviour of the application route table.

use std::sync::Arc;

use comic_shelf::routing::{NavigationError, NavigationRequest, QueryParams, Router};
use comic_shelf::views::{app_routes, COMIC_URL};

fn router() -> Router {
    Router::new(Arc::new(app_routes().unwrap()))
}

#[tokio::test]
async fn test_every_path_resolves_to_its_view() {
    let router = router();

    for (path, name) in [("/", "home"), ("/about", "about"), ("/shelf", "shelf"), ("/reader", "reader")] {
        let resolved = router.resolve(NavigationRequest::new(path)).await.unwrap();
        assert_eq!(resolved.route, name);
        assert_eq!(resolved.view.name(), name);
        assert_eq!(router.active().unwrap().route, name);
    }

    let visited: Vec<_> = router.history().into_iter().map(|e| e.location).collect();
    assert_eq!(visited, vec!["/", "/about", "/shelf", "/reader"]);
}

#[tokio::test]
async fn test_reader_receives_comic_url() {
    let router = router();

    for value in ["https://example.com/a.cbz", "", "not a url at all"] {
        let request = NavigationRequest::new("/reader")
            .with_query(QueryParams::new().with(COMIC_URL, value));
        let resolved = router.resolve(request).await.unwrap();
        assert_eq!(resolved.props.get(COMIC_URL), Some(value));
        assert_eq!(resolved.props.len(), 1);
    }
}

#[tokio::test]
async fn test_reader_location_string() {
    let router = router();

    let resolved = router
        .push("/reader?comicUrl=https://example.com/a.cbz")
        .await
        .unwrap();
    assert_eq!(resolved.props.get(COMIC_URL), Some("https://example.com/a.cbz"));

    let active = router.active().unwrap();
    assert_eq!(active.props.get(COMIC_URL), Some("https://example.com/a.cbz"));
    assert_eq!(
        router.current_location().unwrap(),
        "/reader?comicUrl=https%3A%2F%2Fexample.com%2Fa.cbz"
    );
}

#[tokio::test]
async fn test_reader_without_query_has_no_comic_url() {
    let router = router();
    let resolved = router.resolve(NavigationRequest::new("/reader")).await.unwrap();
    assert!(!resolved.props.contains(COMIC_URL));
}

#[tokio::test]
async fn test_props_only_on_reader() {
    let router = router();
    let request = NavigationRequest::new("/shelf")
        .with_query(QueryParams::new().with(COMIC_URL, "x"));
    let resolved = router.resolve(request).await.unwrap();
    assert!(resolved.props.is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let router = router();
    let err = router
        .resolve(NavigationRequest::new("/does-not-exist"))
        .await
        .unwrap_err();

    match err {
        NavigationError::NotFound(e) => assert_eq!(e.path, "/does-not-exist"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(router.active().is_none());
    assert!(router.history().is_empty());
}

#[tokio::test]
async fn test_empty_path_is_rejected() {
    let router = router();
    let err = router.resolve(NavigationRequest::new("")).await.unwrap_err();
    assert_eq!(err, NavigationError::EmptyPath);
}

#[tokio::test]
async fn test_about_is_loaded_once() {
    let router = router();
    assert!(router.table().lookup("/about").unwrap().loader().is_lazy());

    let first = router.navigate("about", None).await.unwrap();
    router.navigate("home", None).await.unwrap();
    let second = router.navigate("about", None).await.unwrap();

    assert!(Arc::ptr_eq(&first.view, &second.view));
}

#[tokio::test]
async fn test_concurrent_first_loads_share_view() {
    let table = Arc::new(app_routes().unwrap());

    let (a, b) = tokio::join!(
        table.resolve(NavigationRequest::new("/about")),
        table.resolve(NavigationRequest::new("/about")),
    );
    assert!(Arc::ptr_eq(&a.unwrap().view, &b.unwrap().view));
}

#[tokio::test]
async fn test_navigate_by_name_with_query() {
    let router = router();
    let query = QueryParams::new().with(COMIC_URL, "a.cbz");

    assert_eq!(router.href("reader", Some(query.clone())).unwrap(), "/reader?comicUrl=a.cbz");

    let resolved = router.navigate("reader", Some(query)).await.unwrap();
    assert_eq!(resolved.request.path, "/reader");
    assert_eq!(resolved.props.get(COMIC_URL), Some("a.cbz"));

    let err = router.navigate("settings", None).await.unwrap_err();
    assert_eq!(err, NavigationError::UnknownRouteName("settings".into()));
}

#[tokio::test]
async fn test_push_does_not_normalize_paths() {
    let router = router();

    for location in ["//example.com/shelf", "/reader/../about", "/./shelf", "/shelf/"] {
        let err = router.push(location).await.unwrap_err();
        assert!(
            matches!(err, NavigationError::NotFound(_)),
            "{location} resolved unexpectedly: {err}"
        );
    }
    assert!(router.active().is_none());
}
