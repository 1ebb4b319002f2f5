use lesson_core::model::{CompletionReply, GENERIC_FAILURE_MESSAGE, ScrollMetrics};

use crate::vm::{CONFETTI_COUNT, CONFETTI_LAUNCH_DELAY, CONFETTI_LIFETIME};

use super::test_harness::{FakeReply, default_page, setup_lesson_harness};

fn awarded(message: &str, xp: u64) -> FakeReply {
    FakeReply::Reply(CompletionReply {
        success: true,
        message: message.to_string(),
        xp: Some(xp),
    })
}

const BOTTOM: ScrollMetrics = ScrollMetrics {
    viewport_height: 800.0,
    document_height: 2000.0,
    scroll_offset: 1150.0,
};

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_renders_initial_page() {
    let harness = setup_lesson_harness(default_page(), awarded("Great job!", 120));
    let html = harness.render();

    assert!(html.contains("Recycling Basics"), "missing title in {html}");
    assert!(html.contains("<strong>recycling</strong>"), "missing body in {html}");
    assert!(html.contains("width: 0%;"), "progress should start empty in {html}");
    assert!(html.contains(">40<"), "missing initial xp in {html}");
    assert!(html.contains("display: none;"), "quiz should be hidden in {html}");
    assert!(!html.contains("lesson-message"), "unexpected notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn scrolling_mid_lesson_only_moves_progress() {
    let mut harness = setup_lesson_harness(default_page(), awarded("Great job!", 120));

    harness.scroll(ScrollMetrics::new(800.0, 2000.0, 600.0));
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("width: 50%;"), "missing progress in {html}");
    assert_eq!(harness.api.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn reaching_bottom_awards_xp_and_reveals_quiz() {
    let mut harness = setup_lesson_harness(default_page(), awarded("Great job!", 120));

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    let html = harness.render();

    assert_eq!(harness.api.calls(), 1);
    assert_eq!(harness.api.last_token().as_deref(), Some("csrf-abc"));
    assert!(html.contains(">120<"), "xp not updated in {html}");
    assert!(html.contains("display: block;"), "quiz not visible in {html}");
    assert!(html.contains("Great job!"), "missing message in {html}");
    // The completion threshold sits 50px above the true end.
    assert!(html.contains("width: 95.83"), "unexpected progress in {html}");

    harness.scroll(ScrollMetrics::new(800.0, 2000.0, 1200.0));
    harness.drive_async().await;
    assert!(harness.render().contains("width: 100%;"));
    assert_eq!(harness.api.calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn repeated_bottom_scrolls_send_one_request() {
    let mut harness = setup_lesson_harness(default_page(), awarded("Great job!", 120));

    for _ in 0..5 {
        harness.scroll(BOTTOM);
    }
    harness.drive_async().await;
    harness.scroll(BOTTOM);
    harness.drive_async().await;

    assert_eq!(harness.api.calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn refusal_shows_message_without_reward() {
    let reply = FakeReply::Reply(CompletionReply {
        success: false,
        message: "Already completed".to_string(),
        xp: None,
    });
    let mut harness = setup_lesson_harness(default_page(), reply);

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Already completed"), "missing message in {html}");
    assert!(html.contains(">40<"), "xp should be unchanged in {html}");
    assert!(html.contains("display: none;"), "quiz should stay hidden in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn network_failure_shows_generic_message() {
    let mut harness = setup_lesson_harness(default_page(), FakeReply::NetworkDown);

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains(GENERIC_FAILURE_MESSAGE), "missing message in {html}");
    assert!(html.contains(">40<"), "xp should be unchanged in {html}");
    assert!(html.contains("display: none;"), "quiz should stay hidden in {html}");

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    assert_eq!(harness.api.calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn already_completed_lesson_shows_quiz_and_skips_request() {
    let page = default_page().with_already_completed(true);
    let mut harness = setup_lesson_harness(page, awarded("Great job!", 120));

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("display: block;"), "quiz should be visible in {html}");
    assert_eq!(harness.api.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_button_navigates_after_award() {
    let mut harness = setup_lesson_harness(default_page(), awarded("Great job!", 120));

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    harness.take_quiz();

    assert_eq!(
        harness.handles.navigations(),
        vec!["http://lessons.test/quiz/3".to_string()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_button_navigates_on_completed_page() {
    let page = default_page().with_already_completed(true);
    let mut harness = setup_lesson_harness(page, awarded("Great job!", 120));

    harness.take_quiz();

    assert_eq!(
        harness.handles.navigations(),
        vec!["http://lessons.test/quiz/3".to_string()]
    );
    assert_eq!(harness.api.calls(), 0);
}

fn confetti_count(html: &str) -> usize {
    html.matches(r#"class="confetti""#).count()
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn award_launches_confetti_then_clears_it() {
    let mut harness = setup_lesson_harness(default_page(), awarded("Great job!", 120));
    assert_eq!(confetti_count(&harness.render()), 0);

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    tokio::time::advance(CONFETTI_LAUNCH_DELAY).await;
    harness.drive_async().await;
    let html = harness.render();
    assert_eq!(confetti_count(&html), CONFETTI_COUNT);
    assert!(html.contains("opacity: 1;"), "particles not launched in {html}");
    assert!(!html.contains("opacity: 0;"), "particle left at origin in {html}");

    tokio::time::advance(CONFETTI_LIFETIME).await;
    harness.drive_async().await;
    assert_eq!(confetti_count(&harness.render()), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn refusal_plays_no_confetti() {
    let reply = FakeReply::Reply(CompletionReply {
        success: false,
        message: "Already completed".to_string(),
        xp: None,
    });
    let mut harness = setup_lesson_harness(default_page(), reply);

    harness.scroll(BOTTOM);
    harness.drive_async().await;
    assert_eq!(confetti_count(&harness.render()), 0);
}
