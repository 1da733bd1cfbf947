use folio_config::{run_config_doctor, write_starter_config};
use folio_core::{ExitCode, FolioResult};
use serde_json::json;

use crate::{GlobalOptions, config_target, print_json};

pub(crate) fn cmd_init(globals: &GlobalOptions) -> FolioResult<ExitCode> {
    let path = config_target(globals)?;
    write_starter_config(&path)?;

    if globals.json {
        print_json(&json!({"ok": true, "result": {"created": path.display().to_string()}}))?;
    } else {
        println!("Config created: {}", path.display());
        println!("Edit github.username, then run `folio show`.");
    }

    Ok(ExitCode::Success)
}

pub(crate) fn cmd_check(globals: &GlobalOptions) -> FolioResult<ExitCode> {
    let path = config_target(globals)?;
    let report = run_config_doctor(&path)?;

    if globals.json {
        print_json(&json!({
            "ok": report.healthy,
            "result": {
                "config": report.config_path,
                "healthy": report.healthy,
                "checks": report.checks,
                "username": report.username,
            }
        }))?;
    } else {
        println!("Config: {}", report.config_path);
        println!(
            "Health: {}",
            if report.healthy { "healthy" } else { "degraded" }
        );

        for check in &report.checks {
            let prefix = if check.ok { "OK" } else { "FAIL" };
            println!("[{}] {} -> {}", prefix, check.name, check.details);
        }
    }

    Ok(if report.healthy {
        ExitCode::Success
    } else {
        ExitCode::Config
    })
}
