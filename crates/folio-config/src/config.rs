use folio_core::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_PROJECT_HEADER: &str = "Github Projects";
pub const DEFAULT_SORT_BY: &str = "stars";
pub const DEFAULT_PROJECT_LIMIT: u32 = 8;

/// Raw configuration exactly as it appears on disk. Every field is optional;
/// `sanitize` turns this into the canonical form the rest of the tool reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub github: Option<RawGithub>,
    pub projects: Option<RawProjects>,
    pub skills: Option<Vec<String>>,
    pub experiences: Option<Vec<Experience>>,
    pub educations: Option<Vec<Education>>,
    pub certifications: Option<Vec<Certification>>,
    pub publications: Option<Vec<Publication>>,
    pub testimonials: Option<Vec<Testimonial>>,
    pub social: Option<BTreeMap<String, String>>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGithub {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProjects {
    pub github: Option<RawGithubProjects>,
    pub external: Option<Vec<ExternalProject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGithubProjects {
    pub display: Option<bool>,
    pub header: Option<String>,
    pub mode: Option<String>,
    pub automatic: Option<RawAutomatic>,
    pub manual: Option<RawManual>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAutomatic {
    pub sort_by: Option<String>,
    pub limit: Option<u32>,
    pub exclude: Option<RawExclude>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExclude {
    pub forks: Option<bool>,
    pub projects: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawManual {
    pub projects: Option<Vec<String>>,
}

/// Canonical configuration with every optional field filled in. Produced once
/// per load and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub github: GithubSettings,
    pub projects: ProjectSettings,
    pub skills: Vec<String>,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub publications: Vec<Publication>,
    pub testimonials: Vec<Testimonial>,
    pub social: BTreeMap<String, String>,
    pub footer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GithubSettings {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSettings {
    pub github: GithubProjectSettings,
    pub external: Vec<ExternalProject>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GithubProjectSettings {
    pub display: bool,
    pub header: String,
    pub mode: ProjectMode,
    pub automatic: AutomaticSettings,
    pub manual: ManualSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutomaticSettings {
    pub sort_by: String,
    pub limit: u32,
    pub exclude: ExcludeSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExcludeSettings {
    pub forks: bool,
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManualSettings {
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectMode {
    Automatic,
    Manual,
}

impl ProjectMode {
    fn from_config(value: Option<&str>) -> Self {
        match value {
            Some("manual") => Self::Manual,
            _ => Self::Automatic,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalProject {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub from: String,
    pub to: String,
    pub company_link: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub from: String,
    pub to: String,
    pub summary: String,
    pub institution_link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub organization: String,
    pub year: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub conference_name: String,
    pub journal_name: String,
    pub authors: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    pub title: String,
}

/// Normalizes a raw configuration into its canonical form. Total: every
/// missing value is replaced with a type-appropriate default, nothing is
/// dropped, and no input can make it fail.
pub fn sanitize(raw: RawConfig) -> SanitizedConfig {
    let github = raw.github.unwrap_or_default();
    let projects = raw.projects.unwrap_or_default();
    let github_projects = projects.github.unwrap_or_default();
    let automatic = github_projects.automatic.unwrap_or_default();
    let exclude = automatic.exclude.unwrap_or_default();
    let manual = github_projects.manual.unwrap_or_default();

    SanitizedConfig {
        github: GithubSettings {
            username: github.username.unwrap_or_default(),
        },
        projects: ProjectSettings {
            github: GithubProjectSettings {
                display: github_projects.display.unwrap_or(true),
                header: github_projects
                    .header
                    .unwrap_or_else(|| DEFAULT_PROJECT_HEADER.to_string()),
                mode: ProjectMode::from_config(github_projects.mode.as_deref()),
                automatic: AutomaticSettings {
                    sort_by: automatic
                        .sort_by
                        .unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
                    limit: automatic.limit.unwrap_or(DEFAULT_PROJECT_LIMIT),
                    exclude: ExcludeSettings {
                        forks: exclude.forks.unwrap_or(false),
                        projects: exclude.projects.unwrap_or_default(),
                    },
                },
                manual: ManualSettings {
                    projects: manual.projects.unwrap_or_default(),
                },
            },
            external: projects.external.unwrap_or_default(),
        },
        skills: raw.skills.unwrap_or_default(),
        experiences: raw.experiences.unwrap_or_default(),
        educations: raw.educations.unwrap_or_default(),
        certifications: raw.certifications.unwrap_or_default(),
        publications: raw.publications.unwrap_or_default(),
        testimonials: raw.testimonials.unwrap_or_default(),
        social: raw.social.unwrap_or_default(),
        footer: raw.footer.unwrap_or_default(),
    }
}

impl SanitizedConfig {
    /// A config without an account username cannot drive any remote fetch;
    /// callers must treat it as structurally invalid.
    pub fn has_username(&self) -> bool {
        !self.github.username.trim().is_empty()
    }
}

pub fn load_config(path: &Path) -> FolioResult<RawConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        FolioError::io(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;

    toml::from_str(&contents).map_err(|err| {
        FolioError::config(format!(
            "failed to parse config '{}': {}",
            path.display(),
            err
        ))
    })
}

const STARTER_CONFIG: &str = r#"# folio configuration
# `github.username` is the only required value; everything else is optional
# and defaults to an empty section.

skills = []

footer = ""

[github]
username = "octocat"

[projects.github]
display = true
header = "Github Projects"
# "automatic" queries your most popular repositories; "manual" shows only
# the repositories listed under [projects.github.manual].
mode = "automatic"

[projects.github.automatic]
sort_by = "stars"
limit = 8

[projects.github.automatic.exclude]
forks = false
projects = []

[projects.github.manual]
projects = []

[social]
"#;

pub fn write_starter_config(path: &Path) -> FolioResult<()> {
    if path.exists() {
        return Err(FolioError::usage(format!(
            "config '{}' already exists",
            path.display()
        )));
    }

    fs::write(path, STARTER_CONFIG).map_err(|err| {
        FolioError::io(format!(
            "failed to write config '{}': {}",
            path.display(),
            err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_config_parses_and_sanitizes() {
        let raw: RawConfig = toml::from_str(STARTER_CONFIG).expect("starter config");
        let config = sanitize(raw);

        assert!(config.has_username());
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.projects.github.mode, ProjectMode::Automatic);
        assert_eq!(config.projects.github.automatic.limit, DEFAULT_PROJECT_LIMIT);
    }

    #[test]
    fn unknown_mode_falls_back_to_automatic() {
        assert_eq!(
            ProjectMode::from_config(Some("popular")),
            ProjectMode::Automatic
        );
        assert_eq!(ProjectMode::from_config(None), ProjectMode::Automatic);
        assert_eq!(ProjectMode::from_config(Some("manual")), ProjectMode::Manual);
    }
}
