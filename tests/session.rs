mod common;

use common::{catalog, config, Call, FakeBackend};
use shopnow::app::post::{COMMENT_ADDED, COMMENT_FIELDS_REQUIRED};
use shopnow::app::{PostLoad, SearchPhase, SubscribeStatus};
use shopnow::domain::{DraftField, PostId, Route};
use shopnow::ui::{PostPageView, SearchPanelView};
use shopnow::worker::{RecordingShell, Session};
use shopnow::{Config, Event, ShopError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn session(backend: &Arc<FakeBackend>) -> Session<RecordingShell> {
    session_with(backend, &config())
}

fn session_with(backend: &Arc<FakeBackend>, config: &Config) -> Session<RecordingShell> {
    let backend: Arc<dyn shopnow::api::Backend> = Arc::<FakeBackend>::clone(backend);
    Session::new(config, backend, RecordingShell::default())
}

fn searches(backend: &FakeBackend) -> Vec<String> {
    backend
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::ListPosts(q) => q.search,
            _ => None,
        })
        .collect()
}

fn open(id: &str) -> Event {
    Event::OpenPost(PostId::new(id))
}

fn draft(field: DraftField, value: &str) -> Event {
    Event::DraftChanged {
        field,
        value: value.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_issues_one_search() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    for text in ["s", "sh", "sho", "shoe"] {
        session.dispatch(Event::QueryChanged(text.into())).unwrap();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(100)).await;
    }
    session.run_until_idle().await.unwrap();

    assert_eq!(searches(&backend), vec!["shoe".to_string()]);
    assert_eq!(session.state().search.phase(), SearchPhase::Results);
}

#[tokio::test(start_paused = true)]
async fn search_waits_for_quiet_period() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);
    let start = Instant::now();

    session.dispatch(Event::QueryChanged("watch".into())).unwrap();
    session.run_until_idle().await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(300));
    assert_eq!(searches(&backend), vec!["watch".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn results_are_limited_and_highlighted() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(Event::QueryChanged("shoe".into())).unwrap();
    session.run_until_idle().await.unwrap();

    let SearchPanelView::Results { items, view_all } = session.viewmodel().search else {
        panic!("expected results");
    };
    assert_eq!(items.len(), 4);
    assert!(items
        .iter()
        .all(|item| item.title.iter().any(|s| s.matched && s.text.eq_ignore_ascii_case("shoe"))));
    assert_eq!(view_all, Route::Search("shoe".into()));
}

#[tokio::test(start_paused = true)]
async fn superseded_query_never_shows() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    backend.delay_search("shoe", Duration::from_secs(2));
    let mut session = session(&backend);

    session.dispatch(Event::QueryChanged("shoe".into())).unwrap();
    // Let the debounce fire so the slow request is in flight.
    let elapsed = session.next_completion().await.unwrap();
    assert!(matches!(elapsed, Event::DebounceElapsed { .. }));
    session.dispatch(elapsed).unwrap();
    tokio::task::yield_now().await;

    session.dispatch(Event::QueryChanged("watch".into())).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(searches(&backend), vec!["shoe".to_string(), "watch".to_string()]);
    let results = session.state().search.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, PostId::new("p5"));
}

#[tokio::test(start_paused = true)]
async fn blank_query_makes_no_request() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(Event::QueryChanged("   ".into())).unwrap();
    session.run_until_idle().await.unwrap();

    assert!(backend.calls().is_empty());
    assert_eq!(session.viewmodel().search, SearchPanelView::Hidden);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_query_cancels_pending_search() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(Event::QueryChanged("shoe".into())).unwrap();
    session.dispatch(Event::QueryChanged(String::new())).unwrap();
    session.run_until_idle().await.unwrap();

    assert!(backend.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_search_times_out_as_failure() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    backend.delay_search("shoe", Duration::from_secs(30));
    let mut session = session(&backend);
    let start = Instant::now();

    session.dispatch(Event::QueryChanged("shoe".into())).unwrap();
    session.run_until_idle().await.unwrap();

    assert!(start.elapsed() < Duration::from_secs(9));
    assert_eq!(session.state().search.phase(), SearchPhase::Errored);
    assert_eq!(
        session.state().search.last_error(),
        Some(&ShopError::Timeout(Duration::from_secs(8)))
    );
    assert_eq!(
        session.viewmodel().search,
        SearchPanelView::NoResults {
            message: "No results found for \"shoe\"".into()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn outside_click_then_focus_restores_results() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(Event::QueryChanged("watch".into())).unwrap();
    session.run_until_idle().await.unwrap();
    session.dispatch(Event::PointerDown { inside_search: false }).unwrap();
    assert_eq!(session.viewmodel().search, SearchPanelView::Hidden);

    session.dispatch(Event::SearchFocused).unwrap();
    session.run_until_idle().await.unwrap();
    assert!(matches!(session.viewmodel().search, SearchPanelView::Results { .. }));
    assert_eq!(searches(&backend).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn submit_navigates_to_search_page() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(Event::QueryChanged(" red shoes ".into())).unwrap();
    session.dispatch(Event::SubmitSearch).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(session.shell().routes, vec![Route::Search("red shoes".into())]);
    assert!(backend.calls().is_empty());
    assert_eq!(Route::Search("red shoes".into()).path(), "/search?q=red%20shoes");
}

#[tokio::test(start_paused = true)]
async fn opening_a_post_records_exactly_one_view() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(open("p1")).unwrap();
    session.run_until_idle().await.unwrap();
    session.dispatch(open("p1")).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(backend.views("p1"), 1);
    assert_eq!(backend.count(|c| matches!(c, Call::FetchPost(_))), 1);

    let Some(PostPageView::Loaded(body)) = session.viewmodel().post else {
        panic!("expected loaded post");
    };
    assert_eq!(body.title, "New Shoes for Spring");
    assert_eq!(body.date, "March 5, 2024");
    assert_eq!(body.related.len(), 3);
    assert!(body.related.iter().all(|r| r.id != PostId::new("p1")));
    assert_eq!(body.share.page_url, "http://localhost:3000/post/p1");
}

#[tokio::test(start_paused = true)]
async fn returning_to_a_post_counts_a_new_view() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    for id in ["p1", "p2", "p1"] {
        session.dispatch(open(id)).unwrap();
        session.run_until_idle().await.unwrap();
    }

    assert_eq!(backend.views("p1"), 2);
    assert_eq!(backend.views("p2"), 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_navigation_abandons_previous_post() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    backend.set_latency(Duration::from_millis(50));
    let mut session = session(&backend);

    session.dispatch(open("p1")).unwrap();
    tokio::task::yield_now().await;
    session.dispatch(open("p2")).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(backend.views("p1"), 0);
    assert_eq!(backend.views("p2"), 1);
    assert_eq!(session.state().post.current(), Some(&PostId::new("p2")));
    assert!(matches!(session.state().post.load(), PostLoad::Loaded(p) if p.id == PostId::new("p2")));
}

#[tokio::test(start_paused = true)]
async fn unknown_post_is_not_found() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(open("missing")).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(session.viewmodel().post, Some(PostPageView::NotFound));
    assert_eq!(backend.count(|c| matches!(c, Call::RecordView(_))), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_post_fetch_times_out() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    backend.set_latency(Duration::from_secs(20));
    let config = Config {
        request_timeout: Duration::from_secs(2),
        ..Config::default()
    };
    let mut session = session_with(&backend, &config);

    session.dispatch(open("p1")).unwrap();
    session.run_until_idle().await.unwrap();

    assert!(matches!(
        session.state().post.load(),
        PostLoad::Failed(ShopError::Timeout(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn submitted_comment_appears_once() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(open("p1")).unwrap();
    session.run_until_idle().await.unwrap();

    session.dispatch(draft(DraftField::Name, "Ada")).unwrap();
    session.dispatch(draft(DraftField::Email, "ada@example.com")).unwrap();
    session.dispatch(draft(DraftField::Body, "Great read")).unwrap();
    session.dispatch(Event::SubmitComment).unwrap();
    // Double submit while in flight is ignored.
    session.dispatch(Event::SubmitComment).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(backend.count(|c| matches!(c, Call::CreateComment(_))), 1);
    assert_eq!(session.shell().notices, vec![COMMENT_ADDED.to_string()]);

    let Some(PostPageView::Loaded(body)) = session.viewmodel().post else {
        panic!("expected loaded post");
    };
    assert_eq!(body.comments.len(), 1);
    assert_eq!(body.comment_count, body.comments.len());
    assert_eq!(body.comments[0].body, "Great read");
    assert!(body.submit_enabled);
    assert!(session.state().post.draft().name.is_empty());
}

#[tokio::test(start_paused = true)]
async fn incomplete_comment_is_not_sent() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    let mut session = session(&backend);

    session.dispatch(open("p1")).unwrap();
    session.run_until_idle().await.unwrap();
    session.dispatch(draft(DraftField::Name, "Ada")).unwrap();
    session.dispatch(Event::SubmitComment).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(backend.count(|c| matches!(c, Call::CreateComment(_))), 0);
    assert_eq!(session.shell().notices, vec![COMMENT_FIELDS_REQUIRED.to_string()]);
}

#[tokio::test(start_paused = true)]
async fn rejected_comment_keeps_draft_and_shows_server_message() {
    let backend = Arc::new(FakeBackend::with_posts(catalog()));
    backend.fail_comments_with(ShopError::Server {
        status: 400,
        message: Some("Comment is too long".into()),
    });
    let mut session = session(&backend);

    session.dispatch(open("p1")).unwrap();
    session.run_until_idle().await.unwrap();
    session.dispatch(draft(DraftField::Name, "Ada")).unwrap();
    session.dispatch(draft(DraftField::Email, "ada@example.com")).unwrap();
    session.dispatch(draft(DraftField::Body, "…")).unwrap();
    session.dispatch(Event::SubmitComment).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(session.shell().notices, vec!["Comment is too long".to_string()]);
    assert_eq!(session.state().post.draft().name, "Ada");
    assert!(!session.state().post.is_submitting());
}

#[tokio::test(start_paused = true)]
async fn invalid_newsletter_address_sends_nothing() {
    let backend = Arc::new(FakeBackend::default());
    let mut session = session(&backend);

    session.dispatch(Event::EmailChanged("not-an-email".into())).unwrap();
    session.dispatch(Event::SubmitSubscribe).unwrap();
    session.run_until_idle().await.unwrap();

    assert!(backend.calls().is_empty());
    assert_eq!(session.state().newsletter.status(), &SubscribeStatus::Invalid);
}

#[tokio::test(start_paused = true)]
async fn valid_newsletter_address_subscribes_once() {
    let backend = Arc::new(FakeBackend::default());
    let mut session = session(&backend);

    session.dispatch(Event::EmailChanged("reader@example.com".into())).unwrap();
    session.dispatch(Event::SubmitSubscribe).unwrap();
    session.dispatch(Event::SubmitSubscribe).unwrap();
    session.run_until_idle().await.unwrap();

    assert_eq!(backend.calls(), vec![Call::Subscribe("reader@example.com".into())]);
    assert_eq!(session.state().newsletter.status(), &SubscribeStatus::Subscribed);
    assert_eq!(session.state().newsletter.email(), "");
    assert_eq!(
        session.viewmodel().newsletter_status.as_deref(),
        Some("Thank you for subscribing!")
    );
}
