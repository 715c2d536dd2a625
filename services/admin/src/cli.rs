//! services/admin/src/cli.rs
//!
//! Command-line surface of the admin client and the glue that wires each
//! command to the core views.

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use lesson_admin_core::auth::AuthContext;
use lesson_admin_core::domain::{ContentType, LessonId, LessonStatus, ListScope};
use lesson_admin_core::edit_session::{EditSession, LoadOutcome, SaveOutcome};
use lesson_admin_core::list_view::{LessonListView, LoadStatus, ProgramListView};
use lesson_admin_core::ports::{CredentialStore, LessonApi};
use lesson_admin_core::validation::LessonForm;
use reqwest::Client;
use tracing::info;

use crate::adapters::{FileCredentialStore, HttpLessonApi, TerminalNavigator};
use crate::config::Config;
use crate::error::AdminError;
use crate::render;

//=========================================================================================
// Arguments
//=========================================================================================

#[derive(Parser, Debug)]
#[command(
    name = "lesson-admin",
    version,
    about = "Administrative client for the lesson publishing platform",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the access token.
    Login(LoginArgs),
    /// Forget the stored access token.
    Logout,
    /// List lessons (latest by default).
    #[command(alias = "ls")]
    Lessons(LessonsArgs),
    /// List programs.
    Programs,
    /// Show a lesson's publishing metadata.
    Show { id: String },
    /// Change a lesson's publishing metadata and save it.
    Edit(EditArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct LessonsArgs {
    /// Load every lesson instead of the latest one.
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    pub id: String,

    /// DRAFT, SCHEDULED, PUBLISHED or ARCHIVED.
    #[arg(long, value_parser = parse_status)]
    pub status: Option<LessonStatus>,

    /// RFC 3339 or YYYY-MM-DDTHH:MM (UTC).
    #[arg(long, conflicts_with = "clear_publish_at")]
    pub publish_at: Option<String>,

    #[arg(long)]
    pub clear_publish_at: bool,

    #[arg(long, conflicts_with = "free")]
    pub paid: bool,

    #[arg(long)]
    pub free: bool,

    /// VIDEO or ARTICLE.
    #[arg(long, value_parser = parse_content_type)]
    pub content_type: Option<ContentType>,

    #[arg(long, allow_negative_numbers = true, conflicts_with = "clear_duration")]
    pub duration_ms: Option<i64>,

    #[arg(long)]
    pub clear_duration: bool,
}

impl EditArgs {
    /// Applies the requested changes on top of the loaded form.
    pub fn apply(&self, form: &mut LessonForm) {
        if let Some(status) = self.status {
            form.status = status;
        }
        if let Some(publish_at) = &self.publish_at {
            form.publish_at = publish_at.clone();
        }
        if self.clear_publish_at {
            form.publish_at.clear();
        }
        if self.paid {
            form.is_paid = true;
        }
        if self.free {
            form.is_paid = false;
        }
        if let Some(content_type) = self.content_type {
            form.content_type = content_type;
        }
        if let Some(duration_ms) = self.duration_ms {
            form.duration_ms = Some(duration_ms);
        }
        if self.clear_duration {
            form.duration_ms = None;
        }
    }
}

fn parse_status(raw: &str) -> Result<LessonStatus, String> {
    LessonStatus::from_name(raw).ok_or_else(|| format!("unknown status '{}'", raw))
}

fn parse_content_type(raw: &str) -> Result<ContentType, String> {
    ContentType::from_name(raw).ok_or_else(|| format!("unknown content type '{}'", raw))
}

//=========================================================================================
// Application
//=========================================================================================

/// The wired-up client: one auth context shared by every command.
pub struct App {
    auth: AuthContext,
    navigator: Arc<TerminalNavigator>,
    redirect_delay: Duration,
}

impl App {
    /// Builds the production wiring from configuration.
    pub fn from_config(config: &Config) -> Result<Self, AdminError> {
        let client = Client::builder()
            .user_agent(concat!("lesson-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_parts(
            Arc::new(HttpLessonApi::new(client, config.api_base_url.clone())),
            Arc::new(FileCredentialStore::new(config.token_path.clone())),
            config.save_redirect_delay,
        ))
    }

    pub fn with_parts(
        api: Arc<dyn LessonApi>,
        store: Arc<dyn CredentialStore>,
        redirect_delay: Duration,
    ) -> Self {
        let navigator = Arc::new(TerminalNavigator::new());
        Self {
            auth: AuthContext::new(api, store, navigator.clone()),
            navigator,
            redirect_delay,
        }
    }

    pub fn navigator(&self) -> &TerminalNavigator {
        &self.navigator
    }

    /// Runs one command and returns the text to print.
    pub async fn run(&self, command: Command) -> Result<String, AdminError> {
        match command {
            Command::Login(args) => {
                self.auth
                    .sign_in(&args.email, &args.password)
                    .await
                    .map_err(AdminError::Api)?;
                Ok("Signed in.\n".to_string())
            }
            Command::Logout => {
                self.auth.sign_out();
                Ok("Signed out.\n".to_string())
            }
            Command::Lessons(args) => {
                let scope = if args.all {
                    ListScope::All
                } else {
                    ListScope::Latest
                };
                let mut view =
                    LessonListView::enter(self.auth.clone()).ok_or(AdminError::NotSignedIn)?;
                let listing = view.load(scope).await;
                match (listing.status, &listing.error_message) {
                    (LoadStatus::Error, Some(message)) => Err(AdminError::Api(message.clone())),
                    _ => Ok(render::lessons(listing)),
                }
            }
            Command::Programs => {
                let mut view =
                    ProgramListView::enter(self.auth.clone()).ok_or(AdminError::NotSignedIn)?;
                let listing = view.load().await;
                match (listing.status, &listing.error_message) {
                    (LoadStatus::Error, Some(message)) => Err(AdminError::Api(message.clone())),
                    _ => Ok(render::programs(listing)),
                }
            }
            Command::Show { id } => {
                let session = self.open_session(&id).await?;
                Ok(render::editor(&session.view()))
            }
            Command::Edit(args) => self.edit(args).await,
        }
    }

    async fn open_session(&self, raw_id: &str) -> Result<EditSession, AdminError> {
        let id = LessonId::parse(raw_id)
            .ok_or_else(|| AdminError::InvalidInput("Missing lesson id.".to_string()))?;
        let session = EditSession::open(self.auth.clone(), id, self.redirect_delay);
        match session.load().await {
            LoadOutcome::Loaded => Ok(session),
            LoadOutcome::Failed(message) => Err(AdminError::Api(message)),
            LoadOutcome::Unauthenticated => Err(AdminError::NotSignedIn),
            LoadOutcome::Rejected | LoadOutcome::Discarded => {
                Err(AdminError::Api("The lesson could not be loaded.".to_string()))
            }
        }
    }

    async fn edit(&self, args: EditArgs) -> Result<String, AdminError> {
        let session = self.open_session(&args.id).await?;
        session.edit(|form| args.apply(form));

        match session.save().await {
            SaveOutcome::Saved(lesson) => {
                info!("Saved lesson {}; waiting for the redirect.", lesson.id);
                session.closed().await;
                let mut out = render::editor(&session.view());
                if let Some(route) = self.navigator.last_route() {
                    out.push_str(&format!("-> {}\n", route));
                }
                Ok(out)
            }
            SaveOutcome::Invalid(violation) => Err(violation.into()),
            SaveOutcome::Failed(message) => Err(AdminError::Api(message)),
            SaveOutcome::Unauthenticated => Err(AdminError::NotSignedIn),
            SaveOutcome::Rejected | SaveOutcome::Discarded => {
                Err(AdminError::Api("The save did not complete.".to_string()))
            }
        }
    }
}
