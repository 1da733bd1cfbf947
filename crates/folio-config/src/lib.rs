mod config;
mod doctor;
mod social;

pub use config::{
    AutomaticSettings, Certification, DEFAULT_PROJECT_HEADER, DEFAULT_PROJECT_LIMIT,
    DEFAULT_SORT_BY, Education, ExcludeSettings, Experience, ExternalProject, GithubProjectSettings,
    GithubSettings, ManualSettings, ProjectMode, ProjectSettings, Publication, RawAutomatic,
    RawConfig, RawExclude, RawGithub, RawGithubProjects, RawManual, RawProjects, SanitizedConfig,
    Testimonial, load_config, sanitize, write_starter_config,
};
pub use doctor::{ConfigCheck, ConfigReport, run_config_doctor};
pub use social::{SocialLink, SocialPlatform, resolve_social_link};
