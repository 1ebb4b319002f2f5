use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use lesson_core::Clock;
use lesson_core::model::{CompletionReply, CsrfToken, LessonId, LessonPage, ScrollMetrics};
use lesson_core::time::fixed_clock;
use services::{CompletionError, CompletionService, LessonApi, ServerConfig, StatusCode};

use crate::context::{UiApp, build_app_context};
use crate::views::LessonView;
use crate::views::lesson::LessonTestHandles;

/// What the fake backend answers with.
#[derive(Clone)]
pub enum FakeReply {
    Reply(CompletionReply),
    NetworkDown,
}

pub struct FakeLessonApi {
    reply: FakeReply,
    calls: AtomicUsize,
    last_token: Mutex<Option<String>>,
}

impl FakeLessonApi {
    pub fn new(reply: FakeReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_token: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl LessonApi for FakeLessonApi {
    async fn complete_lesson(
        &self,
        _lesson_id: LessonId,
        csrf_token: &CsrfToken,
    ) -> Result<CompletionReply, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = Some(csrf_token.as_str().to_string());
        match &self.reply {
            FakeReply::Reply(reply) => Ok(reply.clone()),
            FakeReply::NetworkDown => Err(CompletionError::HttpStatus(
                StatusCode::SERVICE_UNAVAILABLE,
            )),
        }
    }
}

struct TestApp {
    page: LessonPage,
    completion: Arc<CompletionService>,
}

impl UiApp for TestApp {
    fn lesson_page(&self) -> LessonPage {
        self.page.clone()
    }

    fn server(&self) -> ServerConfig {
        ServerConfig::new("http://lessons.test/").expect("test server url")
    }

    fn completion(&self) -> Arc<CompletionService> {
        Arc::clone(&self.completion)
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }
}

#[derive(Props, Clone)]
struct LessonHarnessProps {
    app: Arc<TestApp>,
    handles: LessonTestHandles,
}

impl PartialEq for LessonHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn LessonHarnessRoot(props: LessonHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { LessonView {} }
}

pub struct LessonHarness {
    pub dom: VirtualDom,
    pub api: Arc<FakeLessonApi>,
    pub handles: LessonTestHandles,
}

impl LessonHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Feed one scroll measurement through the view's scroll handler.
    pub fn scroll(&mut self, metrics: ScrollMetrics) {
        let on_metrics = self.handles.on_metrics();
        self.dom.in_runtime(|| on_metrics.call(metrics));
        drive_dom(&mut self.dom);
    }

    /// Click the quiz button.
    pub fn take_quiz(&mut self) {
        let take_quiz = self.handles.take_quiz();
        self.dom.in_runtime(|| take_quiz.call(()));
        drive_dom(&mut self.dom);
    }

    /// Let spawned tasks (the completion request) run, then re-render.
    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn default_page() -> LessonPage {
    LessonPage::new(LessonId::new(3), CsrfToken::new("csrf-abc"))
        .with_title("Recycling Basics")
        .with_body("Learn about **recycling** processes and benefits.")
        .with_initial_xp(40)
}

pub fn setup_lesson_harness(page: LessonPage, reply: FakeReply) -> LessonHarness {
    let api = FakeLessonApi::new(reply);
    let completion = Arc::new(CompletionService::new(api.clone()));
    let handles = LessonTestHandles::default();
    let app = Arc::new(TestApp { page, completion });

    let mut harness = LessonHarness {
        dom: VirtualDom::new_with_props(
            LessonHarnessRoot,
            LessonHarnessProps {
                app,
                handles: handles.clone(),
            },
        ),
        api,
        handles,
    };
    harness.rebuild();
    harness
}
