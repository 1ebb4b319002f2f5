use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lesson_core::model::{CsrfToken, LessonId, LessonIdError, LessonPage};
use services::{CompletionService, ConfigError, HttpLessonApi, ServerConfig};
use ui::{App, UiApp, build_app_context};

mod logging;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLessonId { raw: String, source: LessonIdError },
    InvalidXp { raw: String },
    InvalidServerUrl { raw: String, source: ConfigError },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLessonId { raw, source } => {
                write!(f, "invalid --lesson-id value: {raw} ({source})")
            }
            ArgsError::InvalidXp { raw } => write!(f, "invalid --xp value: {raw}"),
            ArgsError::InvalidServerUrl { raw, source } => {
                write!(f, "invalid --server value: {raw} ({source})")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    page: LessonPage,
    server: ServerConfig,
    completion: Arc<CompletionService>,
}

impl UiApp for DesktopApp {
    fn lesson_page(&self) -> LessonPage {
        self.page.clone()
    }

    fn server(&self) -> ServerConfig {
        self.server.clone()
    }

    fn completion(&self) -> Arc<CompletionService> {
        Arc::clone(&self.completion)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [ui] [--server <url>] [--lesson-id <id>] [--csrf-token <token>]"
    );
    eprintln!("                        [--title <text>] [--content <markdown file>] [--xp <n>] [--completed]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --server {}", services::DEFAULT_SERVER_URL);
    eprintln!("  --lesson-id 1");
    eprintln!("  --xp 0");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LESSON_SERVER_URL, LESSON_ID, LESSON_CSRF_TOKEN, LESSON_TITLE, LESSON_CONTENT, LESSON_XP");
    eprintln!("  LESSON_LOG (tracing filter, default info)");
}

#[derive(Debug)]
struct Args {
    server: Option<ServerConfig>,
    lesson_id: LessonId,
    csrf_token: CsrfToken,
    title: Option<String>,
    content_path: Option<PathBuf>,
    initial_xp: u64,
    already_completed: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server" => {
                    let value = require_value(args, "--server")?;
                    parsed.server = Some(parse_server(value)?);
                }
                "--lesson-id" => {
                    let value = require_value(args, "--lesson-id")?;
                    parsed.lesson_id = parse_lesson_id(value)?;
                }
                "--csrf-token" => {
                    parsed.csrf_token = CsrfToken::new(require_value(args, "--csrf-token")?);
                }
                "--title" => {
                    parsed.title = Some(require_value(args, "--title")?);
                }
                "--content" => {
                    parsed.content_path = Some(PathBuf::from(require_value(args, "--content")?));
                }
                "--xp" => {
                    let value = require_value(args, "--xp")?;
                    parsed.initial_xp = parse_xp(value)?;
                }
                "--completed" => parsed.already_completed = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn from_env() -> Result<Self, ArgsError> {
        let lesson_id = match std::env::var("LESSON_ID") {
            Ok(value) => parse_lesson_id(value)?,
            Err(_) => LessonId::new(1),
        };
        let initial_xp = match std::env::var("LESSON_XP") {
            Ok(value) => parse_xp(value)?,
            Err(_) => 0,
        };

        Ok(Self {
            server: None,
            lesson_id,
            csrf_token: CsrfToken::new(std::env::var("LESSON_CSRF_TOKEN").unwrap_or_default()),
            title: std::env::var("LESSON_TITLE").ok(),
            content_path: std::env::var("LESSON_CONTENT").ok().map(PathBuf::from),
            initial_xp,
            already_completed: false,
        })
    }

    fn into_page(self) -> Result<(LessonPage, Option<ServerConfig>), Box<dyn std::error::Error>> {
        let body = match &self.content_path {
            Some(path) => std::fs::read_to_string(path)?,
            None => String::new(),
        };
        let mut page = LessonPage::new(self.lesson_id, self.csrf_token)
            .with_body(body)
            .with_initial_xp(self.initial_xp)
            .with_already_completed(self.already_completed);
        if let Some(title) = self.title {
            page = page.with_title(title);
        }
        Ok((page, self.server))
    }
}

fn parse_lesson_id(raw: String) -> Result<LessonId, ArgsError> {
    raw.parse()
        .map_err(|source| ArgsError::InvalidLessonId { raw, source })
}

fn parse_server(raw: String) -> Result<ServerConfig, ArgsError> {
    ServerConfig::new(&raw).map_err(|source| ArgsError::InvalidServerUrl { raw, source })
}

fn parse_xp(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidXp { raw })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // `ui` is the only subcommand and may be omitted.
    if argv.first().map(String::as_str) == Some("ui") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let (page, server) = parsed.into_page()?;
    // --server wins over LESSON_SERVER_URL.
    let server = match server {
        Some(server) => server,
        None => ServerConfig::from_env()?,
    };

    tracing::info!(
        lesson_id = %page.lesson_id(),
        server = %server.base_url(),
        already_completed = page.already_completed(),
        "starting lesson viewer"
    );

    let api = Arc::new(HttpLessonApi::new(server.clone()));
    let completion = Arc::new(CompletionService::new(api));
    let title = page.title().to_string();

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        page,
        server,
        completion,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(title)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    logging::init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
