use dioxus::document::eval;
use lesson_core::model::ScrollMetrics;

const SCROLL_METRICS_SCRIPT_TEMPLATE: &str = r#"
    const el = document.getElementById("{element_id}");
    if (!el) { return null; }
    return {
        viewportHeight: el.clientHeight,
        documentHeight: el.scrollHeight,
        scrollOffset: el.scrollTop,
    };
"#;

pub(super) fn scroll_metrics_script(element_id: &str) -> String {
    SCROLL_METRICS_SCRIPT_TEMPLATE.replace("{element_id}", element_id)
}

/// Measure the scroll container. `None` when it is not mounted or no
/// document is attached.
pub(super) async fn read_scroll_metrics(element_id: &str) -> Option<ScrollMetrics> {
    let script = scroll_metrics_script(element_id);
    eval(&script).join::<Option<ScrollMetrics>>().await.ok().flatten()
}

pub(super) fn navigate_script(url: &str) -> String {
    format!("window.location.href = {url:?};")
}
