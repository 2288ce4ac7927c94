//! Catalog of the global build switches.
//!
//! These are the switches understood before any build module is loaded.
//! Build modules register their own switches later, which is why the
//! bootstrap parse runs in tolerant mode.

use std::path::PathBuf;

use pdbuild_cmdline::{Argument, Registry, Value, ValueOption};

/// Help category of every global switch.
pub const CATEGORY: &str = "General build settings:";

pub const HELP: &str = "general.help";
pub const INITIAL_MODULE_DIR: &str = "general.initialmodule-dir";
pub const LOCAL_REPOS_DIR: &str = "general.localrepos-dir";
pub const WORKSPACE_DIR: &str = "general.workspace-dir";
pub const BUILDLOG_DIR: &str = "general.buildlog-dir";
pub const FETCHED_DIR: &str = "general.fetched-dir";
pub const CACHE_DIR: &str = "general.cache-dir";
pub const LIBRARIAN_MODE: &str = "general.librarian.mode";
pub const LIBRARIAN_ORIGINS: &str = "general.librarian.origins";

/// Origin searched when nothing else is configured.
pub const DEFAULT_ORIGIN: &str = "https://github.com/pdaudio/${module}";

const ORIGINS_DESCRIPTION: &str = "Search paths of librarian, list of URLs to search for dependencies.
A path needs to be a URL to a git repository in the format: <scheme>:<scheme-specific-part>/${module}<suffix> -> i.e. https://github.com/xyz/${module}.git
${module} will be replaced by the name of the dependent module.
When the value starts with '=' the search list will be overwritten,
when the value starts with '+' it will be prepended to the search list,
otherwise the entry will be appended to the repo search list.";

/// Global build switches for one module directory.
///
/// # Examples
///
/// ```
/// use pdbuild_bootstrap::global_args::{self, GlobalArgs};
/// use pdbuild_cmdline::Registry;
///
/// let mut registry = Registry::new();
/// GlobalArgs::new("/src").add_to_registry(&mut registry);
///
/// assert_eq!(
///     registry.resolve(global_args::WORKSPACE_DIR).unwrap().as_text(),
///     Some("/src/.workspace")
/// );
/// assert!(registry.find_argument("librarian-mode").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    workspace_parent: PathBuf,
}

impl GlobalArgs {
    /// `workspace_parent` is the directory the default workspace is
    /// created in, normally the parent of the invoking module.
    pub fn new(workspace_parent: impl Into<PathBuf>) -> Self {
        Self {
            workspace_parent: workspace_parent.into(),
        }
    }

    /// Workspace used when `--workspace-dir` is not given.
    pub fn default_workspace(&self) -> PathBuf {
        self.workspace_parent.join(".workspace")
    }

    /// Registers every global value and its switches.
    pub fn add_to_registry(&self, registry: &mut Registry) {
        registry.add_value(
            Value::new(
                HELP,
                "Show help for general command line arguments.",
                CATEGORY,
            )
            .with_default(false)
            .allow_repeat(),
        );
        registry.add_argument(Argument::flag(HELP, "help"));

        registry.add_value(Value::new(
            INITIAL_MODULE_DIR,
            "Directory of initial module where the build script was invoked.",
            CATEGORY,
        ));
        registry.add_value(Value::new(
            LOCAL_REPOS_DIR,
            "Directory where local repositories are located.",
            CATEGORY,
        ));

        registry.add_value(
            Value::new(
                WORKSPACE_DIR,
                "Set workspace path. By default the workspace is set to the parent directory \
                 of the module where the build script is invoked with /.workspace appended.",
                CATEGORY,
            )
            .with_default(self.default_workspace().to_string_lossy().into_owned()),
        );
        registry.add_argument(Argument::text(WORKSPACE_DIR, "workspace-dir", "<dir>"));

        registry.add_value(Value::new(
            BUILDLOG_DIR,
            "Set build log path. By default the build log is set to '${workspace-dir}/.buildlog'.",
            CATEGORY,
        ));
        registry.add_argument(Argument::text(BUILDLOG_DIR, "buildlog-dir", "<dir>"));

        registry.add_value(Value::new(
            FETCHED_DIR,
            "Set path to fetch dependencies. By default it is set to '${workspace-dir}/.fetched'.",
            CATEGORY,
        ));
        registry.add_argument(Argument::text(FETCHED_DIR, "fetch-dir", "<dir>"));

        registry.add_value(Value::new(
            CACHE_DIR,
            "Set path of cache. By default it is set to '${workspace-dir}/.cache'.",
            CATEGORY,
        ));
        registry.add_argument(Argument::text(CACHE_DIR, "cache-dir", "<dir>"));

        registry.add_value(
            Value::new(
                LIBRARIAN_MODE,
                "Mode of librarian, controls the check out strategy of dependencies.",
                CATEGORY,
            )
            .with_default("update")
            .with_options(vec![
                ValueOption::new("none", "do not fetch dependent repositories."),
                ValueOption::new("fetch", "fetch only missing dependencies."),
                ValueOption::new(
                    "update",
                    "update dependent repositories if no local changes are present.",
                ),
                ValueOption::new(
                    "force",
                    "update dependent repositories, stash local changes if present.",
                ),
                ValueOption::new(
                    "asis",
                    "ignore version constraints on local repositories, only fetch other dependencies.",
                ),
            ]),
        );
        registry.add_argument(Argument::text(LIBRARIAN_MODE, "librarian-mode", "<mode>"));

        registry.add_value(Value::list(
            LIBRARIAN_ORIGINS,
            ORIGINS_DESCRIPTION,
            CATEGORY,
            vec![DEFAULT_ORIGIN.to_string()],
        ));
        registry.add_argument(Argument::text(
            LIBRARIAN_ORIGINS,
            "librarian-origins",
            "<URL>",
        ));
    }
}
