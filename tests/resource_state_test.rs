use catalog_client::framework::mock::{create_mock_gateway, expect_filter, expect_list};
use catalog_client::framework::{GatewayError, LoadError, MockCall, MockGateway, StateError};
use catalog_client::model::{FilterOptions, Genre, Movie, MovieSummary, Page, QueryParams};
use catalog_client::state::{LoadPhase, ResourceState};
use reqwest::StatusCode;
use serde_json::json;

const BASE: &str = "http://localhost:8000/catalog";

fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        kind: Some("Фильм".to_string()),
        title: title.to_string(),
        release_year: Some(1972),
        poster: None,
        rate: 8.1,
    }
}

fn page(count: u64, next_page: Option<u64>, titles: &[&str]) -> Page<MovieSummary> {
    Page {
        count,
        next: next_page.map(|p| format!("{BASE}/movie/?genre=Drama&page={p}")),
        previous: None,
        results: titles
            .iter()
            .enumerate()
            .map(|(i, title)| movie(i as u64 + 1, title))
            .collect(),
    }
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn movie_filters() -> FilterOptions {
    serde_json::from_value(json!({
        "genres": ["Drama", "Comedy"],
        "sort": {"title": "По названию", "-rate": "По рейтингу"}
    }))
    .unwrap()
}

fn server_error() -> GatewayError {
    GatewayError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

#[tokio::test]
async fn test_load_items_stores_page_and_filters() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list().return_ok(page(95, Some(5), &["Solaris", "Stalker"]));
    mock.expect_filter().return_ok(movie_filters());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    let mut changes = state.subscribe();

    let query = params(&[("genre", "Drama"), ("page", "4")]);
    state.load_items(query.clone()).await.unwrap();

    let view = state.snapshot();
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].title, "Solaris");
    assert_eq!(view.count, 95);
    assert_eq!(view.active_params, query);
    assert_eq!(view.filter_options.choices("genres"), vec!["Drama", "Comedy"]);
    assert!(!view.loading);
    assert!(view.error.is_none());
    assert_eq!(view.phase, LoadPhase::Ready);

    assert_eq!(view.total_pages(), 10);
    assert_eq!(view.current_page(), 4);
    assert_eq!(view.shown_items(), "31 - 40");
    assert_eq!(view.visible_pages(), vec![3, 4, 5]);

    assert!(changes.has_changed().unwrap());
    assert_eq!(mock.calls(), vec![MockCall::List(query), MockCall::Filter]);
    mock.verify();
}

#[tokio::test]
async fn test_single_page_listing() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list()
        .return_ok(page(5, None, &["a", "b", "c", "d", "e"]));
    mock.expect_filter().return_ok(FilterOptions::default());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    state.load_items(QueryParams::new()).await.unwrap();

    let view = state.snapshot();
    assert_eq!(view.current_page(), 1);
    assert_eq!(view.total_pages(), 1);
    assert_eq!(view.shown_items(), "1 - 5");
    mock.verify();
}

#[tokio::test]
async fn test_unbound_load_makes_no_call() {
    let state = ResourceState::<Movie>::new();
    let result = state.load_items(QueryParams::new()).await;

    assert!(matches!(result, Err(StateError::Unbound)));
    let view = state.snapshot();
    assert!(!view.loading);
    assert!(view.error.is_none());
    assert_eq!(view.phase, LoadPhase::Idle);
}

#[tokio::test]
async fn test_filter_failure_keeps_listing() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list().return_ok(page(12, Some(2), &["Solaris"]));
    mock.expect_filter().return_err(server_error());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    state.load_items(QueryParams::new()).await.unwrap();

    let view = state.snapshot();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.count, 12);
    assert_eq!(view.error, Some(LoadError::FilterFailed));
    assert_eq!(view.phase, LoadPhase::Errored);
    assert!(!view.loading);
    mock.verify();
}

#[tokio::test]
async fn test_list_failure_still_loads_filters() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list().return_err(server_error());
    mock.expect_filter().return_ok(movie_filters());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    state.load_items(QueryParams::new()).await.unwrap();

    let view = state.snapshot();
    assert!(view.items.is_empty());
    assert_eq!(view.error, Some(LoadError::ListFailed));
    assert_eq!(view.error.map(|e| e.to_string()).as_deref(), Some("Failed to load data"));
    assert!(!view.filter_options.is_empty());
    assert!(!view.loading);
    mock.verify();
}

#[tokio::test]
async fn test_both_failures_report_the_filter() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list().return_err(server_error());
    mock.expect_filter().return_err(GatewayError::Closed);

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    state.load_items(QueryParams::new()).await.unwrap();

    assert_eq!(state.snapshot().error, Some(LoadError::FilterFailed));
    mock.verify();
}

#[tokio::test]
async fn test_next_load_clears_previous_error() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list().return_err(server_error());
    mock.expect_filter().return_ok(FilterOptions::default());
    mock.expect_list().return_ok(page(3, None, &["a", "b", "c"]));
    mock.expect_filter().return_ok(FilterOptions::default());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    state.load_items(QueryParams::new()).await.unwrap();
    assert!(state.snapshot().error.is_some());

    state.load_items(QueryParams::new()).await.unwrap();
    let view = state.snapshot();
    assert!(view.error.is_none());
    assert_eq!(view.count, 3);
    mock.verify();
}

#[tokio::test]
async fn test_navigation_keeps_active_filters() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list().return_ok(page(95, Some(2), &["a"]));
    mock.expect_filter().return_ok(FilterOptions::default());
    mock.expect_list().return_ok(page(95, Some(4), &["b"]));
    mock.expect_filter().return_ok(FilterOptions::default());
    mock.expect_list().return_ok(page(95, Some(5), &["c"]));
    mock.expect_filter().return_ok(FilterOptions::default());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    state
        .load_items(params(&[("genre", "Drama")]))
        .await
        .unwrap();
    state.load_page(3).await.unwrap();
    assert!(state.next_page().await.unwrap());

    let lists: Vec<_> = mock
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            MockCall::List(params) => Some(params),
            _ => None,
        })
        .collect();
    assert_eq!(
        lists,
        vec![
            params(&[("genre", "Drama")]),
            params(&[("genre", "Drama"), ("page", "3")]),
            params(&[("genre", "Drama"), ("page", "4")]),
        ]
    );
    assert_eq!(state.snapshot().current_page(), 4);
    mock.verify();
}

#[tokio::test]
async fn test_previous_page_follows_cursor() {
    let mock = MockGateway::<Movie>::new();
    mock.expect_list().return_ok(Page {
        previous: Some(format!("{BASE}/movie/?genre=Drama&search=%D0%BB%D0%B5%D1%81&page=3")),
        ..page(95, Some(5), &["d"])
    });
    mock.expect_filter().return_ok(FilterOptions::default());
    mock.expect_list().return_ok(Page {
        previous: Some(format!("{BASE}/movie/?genre=Drama&search=%D0%BB%D0%B5%D1%81")),
        ..page(95, Some(4), &["c"])
    });
    mock.expect_filter().return_ok(FilterOptions::default());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    state
        .load_items(params(&[("genre", "Drama"), ("search", "лес"), ("page", "4")]))
        .await
        .unwrap();

    assert!(state.previous_page().await.unwrap());

    let view = state.snapshot();
    let expected = params(&[("genre", "Drama"), ("search", "лес"), ("page", "3")]);
    assert_eq!(view.active_params, expected);
    assert_eq!(view.current_page(), 3);
    assert_eq!(view.items[0].title, "c");
    assert_eq!(mock.calls()[2], MockCall::List(expected));
    mock.verify();
}

#[tokio::test]
async fn test_no_cursor_means_no_navigation() {
    let mock = MockGateway::<Genre>::new();
    let state = ResourceState::new();
    state.set_resource(mock.gateway());

    assert!(!state.next_page().await.unwrap());
    assert!(!state.previous_page().await.unwrap());
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_superseded_response_is_discarded() {
    let (gateway, mut receiver) = create_mock_gateway::<Movie>(10);
    let state = ResourceState::new();
    state.set_resource(gateway);

    let slow_state = state.clone();
    let slow = tokio::spawn(async move {
        slow_state
            .load_items(params(&[("genre", "Drama")]))
            .await
    });
    let (_, slow_responder) = expect_list(&mut receiver).await.expect("first list request");
    assert!(state.snapshot().loading);
    assert_eq!(state.snapshot().phase, LoadPhase::Loading);

    let fast_state = state.clone();
    let fast = tokio::spawn(async move {
        fast_state
            .load_items(params(&[("genre", "Comedy")]))
            .await
    });
    let (fast_params, fast_responder) =
        expect_list(&mut receiver).await.expect("second list request");
    assert_eq!(fast_params, params(&[("genre", "Comedy")]));

    fast_responder
        .send(Ok(page(2, None, &["Comedy 1", "Comedy 2"])))
        .unwrap();
    expect_filter(&mut receiver)
        .await
        .expect("filter request")
        .send(Ok(FilterOptions::default()))
        .unwrap();
    fast.await.unwrap().unwrap();

    slow_responder
        .send(Ok(page(40, Some(2), &["Drama 1"])))
        .unwrap();
    slow.await.unwrap().unwrap();

    let view = state.snapshot();
    assert_eq!(view.count, 2);
    assert_eq!(view.items[0].title, "Comedy 1");
    assert_eq!(view.active_params, params(&[("genre", "Comedy")]));
    assert!(!view.loading);
    // The superseded load never asked for filters.
    assert!(receiver.try_recv().is_err());
}

#[tokio::test]
async fn test_crud_passthroughs_leave_listing_alone() {
    use catalog_client::model::GenreCreate;

    let mock = MockGateway::<Genre>::new();
    let drama = Genre {
        id: 7,
        name: "Drama".to_string(),
    };
    mock.expect_create().return_ok(drama.clone());
    mock.expect_destroy().return_ok(());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());

    let created = state
        .create(&GenreCreate {
            name: "Drama".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created, drama);
    state.destroy(&7).await.unwrap();

    let view = state.snapshot();
    assert!(view.items.is_empty());
    assert_eq!(view.phase, LoadPhase::Idle);
    assert_eq!(
        mock.calls(),
        vec![MockCall::Create, MockCall::Destroy("7".to_string())]
    );
    mock.verify();
}

#[tokio::test]
async fn test_update_passthrough() {
    use catalog_client::model::GenreUpdate;

    let mock = MockGateway::<Genre>::new();
    let renamed = Genre {
        id: 7,
        name: "Melodrama".to_string(),
    };
    mock.expect_update().return_ok(renamed.clone());
    mock.expect_update().return_err(server_error());

    let state = ResourceState::new();
    state.set_resource(mock.gateway());
    let patch = GenreUpdate {
        name: Some("Melodrama".to_string()),
    };

    assert_eq!(state.update(&7, &patch).await.unwrap(), renamed);
    assert!(matches!(
        state.update(&7, &patch).await,
        Err(StateError::Gateway(GatewayError::Status { .. }))
    ));

    let view = state.snapshot();
    assert!(view.error.is_none());
    assert_eq!(view.phase, LoadPhase::Idle);
    assert_eq!(
        mock.calls(),
        vec![MockCall::Update("7".to_string()), MockCall::Update("7".to_string())]
    );
    mock.verify();
}

#[tokio::test]
async fn test_crud_on_unbound_container() {
    let state = ResourceState::<Genre>::new();
    assert!(matches!(state.destroy(&1).await, Err(StateError::Unbound)));
}
