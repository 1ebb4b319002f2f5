use dioxus::document::eval;
use dioxus::prelude::*;

use lesson_core::model::ScrollMetrics;

use super::scripts::{navigate_script, read_scroll_metrics};
use crate::context::AppContext;
use crate::vm::{
    CONFETTI_LAUNCH_DELAY, CONFETTI_LIFETIME, ConfettiParticle, LessonVm, confetti_burst,
    lesson_body_html,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

pub(crate) const SCROLL_CONTAINER_ID: &str = "lesson-scroll";

#[component]
pub fn LessonView() -> Element {
    let ctx = use_context::<AppContext>();
    let completion = ctx.completion();
    let quiz_url = ctx.quiz_url().map(str::to_string);

    let mut vm = use_signal({
        let ctx = ctx.clone();
        move || LessonVm::new(ctx.lesson_page().clone(), ctx.clock())
    });
    let body_html = use_hook({
        let ctx = ctx.clone();
        move || lesson_body_html(ctx.lesson_page().body_markdown())
    });
    let mut confetti = use_signal(Vec::<ConfettiParticle>::new);
    let mut confetti_launched = use_signal(|| false);

    let celebrate = use_callback(move |()| {
        confetti.set(confetti_burst(&mut rand::rng()));
        confetti_launched.set(false);
        spawn(async move {
            tokio::time::sleep(CONFETTI_LAUNCH_DELAY).await;
            confetti_launched.set(true);
            tokio::time::sleep(CONFETTI_LIFETIME.saturating_sub(CONFETTI_LAUNCH_DELAY)).await;
            confetti.set(Vec::new());
        });
    });

    let on_metrics = use_callback(move |metrics: ScrollMetrics| {
        let update = vm.write().observe_scroll(metrics);
        if !update.should_complete {
            return;
        }

        let completion = completion.clone();
        let (lesson_id, csrf_token) = {
            let vm = vm.read();
            (vm.lesson_id(), vm.csrf_token().clone())
        };
        spawn(async move {
            let outcome = completion.complete(lesson_id, &csrf_token).await;
            let effects = vm.write().apply_outcome(outcome);
            if effects.celebrate {
                celebrate.call(());
            }
        });
    });

    // Initial measurement: a lesson that fits on screen completes without scrolling.
    use_effect(move || {
        spawn(async move {
            if let Some(metrics) = read_scroll_metrics(SCROLL_CONTAINER_ID).await {
                on_metrics.call(metrics);
            }
        });
    });

    #[cfg(test)]
    let test_handles = use_hook(try_consume_context::<LessonTestHandles>);

    let take_quiz = use_callback(move |()| {
        let Some(url) = quiz_url.as_deref() else {
            tracing::warn!("quiz url unavailable; ignoring click");
            return;
        };
        tracing::info!(url, "opening quiz");
        #[cfg(test)]
        {
            if let Some(handles) = &test_handles {
                handles.record_navigation(url);
            }
        }
        let _ = eval(&navigate_script(url));
    });

    #[cfg(test)]
    use_hook(|| {
        if let Some(handles) = try_consume_context::<LessonTestHandles>() {
            handles.register(on_metrics, take_quiz);
        }
    });

    let vm_read = vm.read();
    let title = vm_read.title().to_string();
    let progress_width = vm_read.progress().css_width();
    let xp_label = vm_read.xp().to_string();
    let quiz_style = if vm_read.quiz_visible() {
        "display: block;"
    } else {
        "display: none;"
    };
    let notice = vm_read.notice().cloned();
    drop(vm_read);
    let launched = confetti_launched();

    rsx! {
        div { class: "lesson-page",
            div { class: "progress-track",
                div { id: "progress-bar", class: "progress-bar", style: "width: {progress_width};" }
            }
            header { class: "lesson-header",
                h1 { "{title}" }
                p { class: "xp-counter",
                    "XP: "
                    span { id: "user-xp", "{xp_label}" }
                }
            }
            {notice.map(|notice| rsx! {
                div { id: "lesson-message", class: notice.kind.css_class(), role: "status",
                    span { "{notice.text}" }
                    button {
                        class: "notice-dismiss",
                        onclick: move |_| vm.write().dismiss_notice(),
                        "Dismiss"
                    }
                }
            })}
            div {
                id: SCROLL_CONTAINER_ID,
                class: "lesson-scroll",
                onscroll: move |_| {
                    spawn(async move {
                        if let Some(metrics) = read_scroll_metrics(SCROLL_CONTAINER_ID).await {
                            on_metrics.call(metrics);
                        }
                    });
                },
                div { class: "lesson-container",
                    article { class: "lesson-content", dangerous_inner_html: "{body_html}" }
                    button {
                        id: "quiz-button",
                        class: "quiz-button",
                        style: quiz_style,
                        onclick: move |_| take_quiz.call(()),
                        "Take the Quiz"
                    }
                    for (index, particle) in confetti.read().iter().enumerate() {
                        div { key: "{index}", class: "confetti", style: particle.style(launched) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LessonTestHandles {
    on_metrics: Rc<RefCell<Option<Callback<ScrollMetrics>>>>,
    take_quiz: Rc<RefCell<Option<Callback<()>>>>,
    navigations: Rc<RefCell<Vec<String>>>,
}

#[cfg(test)]
impl LessonTestHandles {
    pub(crate) fn register(&self, on_metrics: Callback<ScrollMetrics>, take_quiz: Callback<()>) {
        *self.on_metrics.borrow_mut() = Some(on_metrics);
        *self.take_quiz.borrow_mut() = Some(take_quiz);
    }

    pub(crate) fn on_metrics(&self) -> Callback<ScrollMetrics> {
        (*self.on_metrics.borrow()).expect("lesson scroll handler registered")
    }

    pub(crate) fn take_quiz(&self) -> Callback<()> {
        (*self.take_quiz.borrow()).expect("quiz click handler registered")
    }

    fn record_navigation(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }
}
