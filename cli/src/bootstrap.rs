//! Bootstrap stage: parse the global switches and derive the build
//! directories.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pdbuild_cmdline::{Context, HelpLayout, ParseOptions, Parser, Registry};
use pdbuild_format::Formatter;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BootstrapError, Result};
use crate::global_args::{self, GlobalArgs};

const HELP_FOOTER: [&str; 2] = [
    "For build dependent help run with flag '--build-help'.",
    "Note: this will checkout all required dependencies in order to render help within the context of the project to build.",
];

/// Checkout strategy for dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibrarianMode {
    /// Do not fetch dependent repositories.
    None,
    /// Fetch only missing dependencies.
    Fetch,
    /// Update repositories without local changes.
    Update,
    /// Update repositories, stashing local changes.
    Force,
    /// Keep local repositories as they are, fetch the rest.
    Asis,
}

impl LibrarianMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fetch => "fetch",
            Self::Update => "update",
            Self::Force => "force",
            Self::Asis => "asis",
        }
    }
}

impl FromStr for LibrarianMode {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "fetch" => Ok(Self::Fetch),
            "update" => Ok(Self::Update),
            "force" => Ok(Self::Force),
            "asis" => Ok(Self::Asis),
            other => Err(BootstrapError::invalid(global_args::LIBRARIAN_MODE, other)),
        }
    }
}

impl fmt::Display for LibrarianMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved global build settings. All directories are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub initial_module_dir: PathBuf,
    pub local_repos_dir: PathBuf,
    pub workspace_dir: PathBuf,
    pub buildlog_dir: PathBuf,
    pub fetched_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub librarian_mode: LibrarianMode,
    pub origins: Vec<String>,
}

/// Result of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--help` was given; the rendered help lines.
    Help(Vec<String>),
    /// Settings to continue the build with.
    Ready(Settings),
}

/// Bootstrap handle.
///
/// Construct one per process and call [`init`](Bootstrapper::init) with
/// the command line. The first successful outcome is cached and returned
/// by every later call.
///
/// # Examples
///
/// ```
/// use pdbuild_bootstrap::{Bootstrapper, LibrarianMode, Outcome};
///
/// let mut bootstrapper = Bootstrapper::new();
/// let outcome = bootstrapper
///     .init("/src/app", ["--librarian-mode", "fetch", "--target", "x"])
///     .unwrap();
///
/// let Outcome::Ready(settings) = outcome else { panic!("expected settings") };
/// assert_eq!(settings.librarian_mode, LibrarianMode::Fetch);
/// assert_eq!(settings.workspace_dir.to_str(), Some("/src/.workspace"));
/// assert_eq!(settings.cache_dir.to_str(), Some("/src/.workspace/.cache"));
/// ```
#[derive(Debug, Default)]
pub struct Bootstrapper {
    layout: HelpLayout,
    outcome: Option<Outcome>,
}

impl Bootstrapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout of the help output.
    pub fn with_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Cached outcome of an earlier successful [`init`](Self::init).
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Parses `args` against the global switches of the module in
    /// `module_dir`.
    ///
    /// Unknown switches are ignored since build modules define their own.
    /// Once an outcome exists it is returned unchanged and `module_dir`
    /// and `args` are not looked at.
    ///
    /// # Errors
    ///
    /// Returns [`CmdLine`](BootstrapError::CmdLine) for a rejected command
    /// line, [`IoError`](BootstrapError::IoError) when a relative path can
    /// not be made absolute, or
    /// [`InvalidSetting`](BootstrapError::InvalidSetting) when a resolved
    /// value does not fit its setting.
    pub fn init<I, S>(&mut self, module_dir: impl AsRef<Path>, args: I) -> Result<&Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outcome = match self.outcome.take() {
            Some(outcome) => {
                debug!("bootstrap already initialized");
                outcome
            }
            None => self.run(module_dir.as_ref(), args)?,
        };
        Ok(self.outcome.insert(outcome))
    }

    fn run<I, S>(&self, module_dir: &Path, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let module_dir = std::path::absolute(module_dir)?;
        let repos_dir = module_dir
            .parent()
            .map_or_else(|| module_dir.clone(), Path::to_path_buf);

        let mut registry = Registry::new();
        GlobalArgs::new(repos_dir.clone()).add_to_registry(&mut registry);

        let mut context = Parser::new(&registry, args)
            .with_options(ParseOptions::tolerant())
            .parse()?;

        context.overwrite(global_args::INITIAL_MODULE_DIR, display(&module_dir))?;
        context.overwrite(global_args::LOCAL_REPOS_DIR, display(&repos_dir))?;

        let workspace_dir = std::path::absolute(text(&context, global_args::WORKSPACE_DIR)?)?;
        context.overwrite(global_args::WORKSPACE_DIR, display(&workspace_dir))?;

        let buildlog_dir = derived_dir(
            &mut context,
            global_args::BUILDLOG_DIR,
            &workspace_dir,
            ".buildlog",
        )?;
        let fetched_dir = derived_dir(
            &mut context,
            global_args::FETCHED_DIR,
            &workspace_dir,
            ".fetched",
        )?;
        let cache_dir = derived_dir(&mut context, global_args::CACHE_DIR, &workspace_dir, ".cache")?;

        debug!(settings = %context.snapshot(), "resolved global settings");

        if context.resolve_flag(global_args::HELP) {
            return Ok(Outcome::Help(self.help_lines(&registry)));
        }

        let settings = Settings {
            initial_module_dir: module_dir,
            local_repos_dir: repos_dir,
            workspace_dir,
            buildlog_dir,
            fetched_dir,
            cache_dir,
            librarian_mode: text(&context, global_args::LIBRARIAN_MODE)?.parse()?,
            origins: context.resolve_list(global_args::LIBRARIAN_ORIGINS),
        };
        info!(
            workspace = %settings.workspace_dir.display(),
            mode = %settings.librarian_mode,
            "bootstrap complete"
        );
        Ok(Outcome::Ready(settings))
    }

    fn help_lines(&self, registry: &Registry) -> Vec<String> {
        let mut lines = registry.render_help(&self.layout);
        let mut footer = Formatter::new(self.layout.width);
        footer.write_line("");
        for line in HELP_FOOTER {
            footer.write_line(line);
        }
        lines.extend(footer.into_lines());
        lines
    }
}

/// Resolved text of `key`.
fn text(context: &Context<'_>, key: &str) -> Result<String> {
    context
        .resolve_text(key)
        .ok_or_else(|| BootstrapError::invalid(key, "not set"))
}

/// Absolute directory of `key`, defaulting to `workspace/name`. The result
/// is written back so later stages see the same path.
fn derived_dir(
    context: &mut Context<'_>,
    key: &str,
    workspace: &Path,
    name: &str,
) -> Result<PathBuf> {
    let dir = if context.is_set(key) {
        std::path::absolute(text(context, key)?)?
    } else {
        workspace.join(name)
    };
    context.overwrite(key, display(&dir))?;
    Ok(dir)
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
