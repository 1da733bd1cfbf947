use folio_api::{GithubApi, RepositorySummary, UserResponse};
use folio_config::{ExcludeSettings, ProjectMode, SanitizedConfig};
use folio_core::{FolioError, FolioResult};
use serde::Serialize;
use tracing::debug;

/// Read-only snapshot of the remote account, replaced wholesale on each load.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub avatar_url: String,
    pub name: String,
    pub bio: String,
    pub location: String,
    pub company: String,
}

impl Profile {
    fn from_response(user: &UserResponse) -> Self {
        Self {
            avatar_url: user.avatar_url.clone().unwrap_or_default(),
            // A blank display name renders as a single-space placeholder.
            name: user
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| " ".to_string()),
            bio: user.bio.clone().unwrap_or_default(),
            location: user.location.clone().unwrap_or_default(),
            company: user.company.clone().unwrap_or_default(),
        }
    }
}

/// Everything a successful load produces.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub profile: Profile,
    pub projects: Vec<RepositorySummary>,
}

/// The load phases, one at a time: no partial profile alongside an error,
/// no projects without a profile.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded {
        profile: Profile,
        projects: Vec<RepositorySummary>,
    },
    Failed {
        error: FolioError,
    },
}

/// Ties an in-flight fetch to the `begin` that started it. Completing with a
/// superseded ticket leaves the state untouched.
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    generation: u64,
}

/// Drives the one-or-two-fetch load of profile and project data and owns the
/// resulting state. `load` runs the whole flow in place; hosts that run the
/// fetch elsewhere use `begin`/`fetch`/`complete` directly, and the ticket
/// makes stale completions a no-op (last-write-wins).
#[derive(Debug)]
pub struct Synchronizer<'a> {
    api: &'a GithubApi,
    state: LoadState,
    generation: u64,
}

impl<'a> Synchronizer<'a> {
    pub fn new(api: &'a GithubApi) -> Self {
        Self {
            api,
            state: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn load(&mut self, config: &SanitizedConfig) -> &LoadState {
        if let Some(ticket) = self.begin(config) {
            let outcome = self.fetch(config);
            self.complete(ticket, outcome);
        }
        &self.state
    }

    /// Starts a load, superseding any earlier one. A config without a
    /// username cannot drive a fetch: the state goes straight to `Failed`
    /// and no ticket is issued.
    pub fn begin(&mut self, config: &SanitizedConfig) -> Option<LoadTicket> {
        self.generation += 1;

        if !config.has_username() {
            self.state = LoadState::Failed {
                error: FolioError::config(
                    "configuration is missing the required github username",
                ),
            };
            return None;
        }

        self.state = LoadState::Loading;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Applies a finished fetch. A completion whose ticket no longer matches
    /// the latest `begin` is discarded.
    pub fn complete(&mut self, ticket: LoadTicket, outcome: FolioResult<LoadOutcome>) {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding completion from a superseded load"
            );
            return;
        }

        self.state = match outcome {
            Ok(LoadOutcome { profile, projects }) => LoadState::Loaded { profile, projects },
            Err(error) => LoadState::Failed { error },
        };
    }

    pub fn fetch(&self, config: &SanitizedConfig) -> FolioResult<LoadOutcome> {
        let username = &config.github.username;
        debug!(%username, "fetching account profile");
        let user = self.api.fetch_user(username)?;
        let profile = Profile::from_response(&user);

        if !config.projects.github.display {
            return Ok(LoadOutcome {
                profile,
                projects: Vec::new(),
            });
        }

        let projects = self.fetch_projects(config, user.public_repos)?;
        Ok(LoadOutcome { profile, projects })
    }

    fn fetch_projects(
        &self,
        config: &SanitizedConfig,
        public_repos: u32,
    ) -> FolioResult<Vec<RepositorySummary>> {
        let github = &config.projects.github;

        match github.mode {
            ProjectMode::Automatic => {
                if public_repos == 0 {
                    return Ok(Vec::new());
                }

                let query = automatic_query(&config.github.username, &github.automatic.exclude);
                debug!(%query, "searching repositories (automatic)");
                self.api.search_repositories(
                    &query,
                    Some(&github.automatic.sort_by),
                    Some(github.automatic.limit),
                )
            }
            ProjectMode::Manual => {
                if github.manual.projects.is_empty() {
                    return Ok(Vec::new());
                }

                let query = manual_query(&github.manual.projects);
                debug!(%query, "searching repositories (manual)");
                self.api.search_repositories(&query, None, None)
            }
        }
    }
}

/// Automatic-mode query: ownership scoped to the account, the fork filter
/// inverted from the "exclude forks" toggle, and one negated `repo:` term per
/// excluded project.
pub fn automatic_query(username: &str, exclude: &ExcludeSettings) -> String {
    let excluded: String = exclude
        .projects
        .iter()
        .map(|project| format!("+-repo:{project}"))
        .collect();

    format!("user:{}+fork:{}{}", username, !exclude.forks, excluded)
}

/// Manual-mode query: the union of the listed repositories, forks included
/// unconditionally.
pub fn manual_query(projects: &[String]) -> String {
    let repos: String = projects
        .iter()
        .map(|project| format!("+repo:{project}"))
        .collect();

    format!("{repos}+fork:true")
}
