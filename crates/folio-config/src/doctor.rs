use crate::config::{ProjectMode, load_config, sanitize};
use folio_core::FolioResult;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigCheck {
    pub name: String,
    pub ok: bool,
    pub details: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub config_path: String,
    pub healthy: bool,
    pub checks: Vec<ConfigCheck>,
    pub username: Option<String>,
}

pub fn run_config_doctor(path: &Path) -> FolioResult<ConfigReport> {
    let mut checks = vec![ConfigCheck {
        name: "config_file".to_string(),
        ok: path.is_file(),
        details: path.display().to_string(),
    }];

    let mut username = None;

    if path.is_file() {
        match load_config(path) {
            Ok(raw) => {
                let config = sanitize(raw);
                checks.push(ConfigCheck {
                    name: "config_parse".to_string(),
                    ok: true,
                    details: "parsed".to_string(),
                });

                if config.has_username() {
                    username = Some(config.github.username.clone());
                }
                checks.push(ConfigCheck {
                    name: "github_username".to_string(),
                    ok: config.has_username(),
                    details: if config.has_username() {
                        config.github.username.clone()
                    } else {
                        "missing required github.username".to_string()
                    },
                });

                let github = &config.projects.github;
                checks.push(ConfigCheck {
                    name: "github_projects".to_string(),
                    ok: true,
                    details: match github.mode {
                        ProjectMode::Automatic => format!(
                            "display={} mode=automatic sort_by={} limit={}",
                            github.display, github.automatic.sort_by, github.automatic.limit
                        ),
                        ProjectMode::Manual => format!(
                            "display={} mode=manual projects={}",
                            github.display,
                            github.manual.projects.len()
                        ),
                    },
                });

                checks.push(ConfigCheck {
                    name: "content_sections".to_string(),
                    ok: true,
                    details: format!(
                        "skills={} experiences={} educations={} certifications={} publications={} testimonials={} external={} social={}",
                        config.skills.len(),
                        config.experiences.len(),
                        config.educations.len(),
                        config.certifications.len(),
                        config.publications.len(),
                        config.testimonials.len(),
                        config.projects.external.len(),
                        config.social.len()
                    ),
                });
            }
            Err(err) => checks.push(ConfigCheck {
                name: "config_parse".to_string(),
                ok: false,
                details: err.message,
            }),
        }
    }

    let healthy = checks.iter().all(|check| check.ok);

    Ok(ConfigReport {
        config_path: path.display().to_string(),
        healthy,
        checks,
        username,
    })
}
