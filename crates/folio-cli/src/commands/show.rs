use folio_api::GithubApi;
use folio_config::{load_config, sanitize};
use folio_core::{ExitCode, FolioError, FolioResult};
use folio_sync::{LoadState, Synchronizer};
use serde_json::json;

use crate::{GlobalOptions, api_url, config_target, print_json, render};

pub(crate) fn cmd_show(globals: &GlobalOptions) -> FolioResult<ExitCode> {
    let path = config_target(globals)?;
    let config = sanitize(load_config(&path)?);

    let api = GithubApi::new(api_url(globals))?;
    let mut synchronizer = Synchronizer::new(&api);

    match synchronizer.load(&config) {
        LoadState::Loaded { profile, projects } => {
            if globals.json {
                print_json(&json!({
                    "ok": true,
                    "result": {
                        "profile": profile,
                        "projects": projects,
                        "config": &config,
                    }
                }))?;
            } else {
                render::render_portfolio(&config, profile, projects);
            }

            Ok(ExitCode::Success)
        }
        LoadState::Failed { error } => Err(error.clone()),
        // load() always returns a terminal phase; a non-terminal one here
        // means the synchronizer contract was broken.
        state => Err(FolioError::api(format!(
            "load finished in a non-terminal phase: {state:?}"
        ))),
    }
}
