// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rudder check`: load and validate the router configuration.

use std::path::Path;

use rudder_config::{render_errors, ConfigError, RouterConfig};

/// Run the check. Returns a process exit code.
pub fn run(config_path: Option<&Path>) -> i32 {
    let loaded = match config_path {
        Some(path) => rudder_config::load_config_from_path(path)
            .map_err(|e| vec![ConfigError::Other(e.to_string())]),
        None => rudder_config::load_config().map_err(|e| vec![ConfigError::Other(e.to_string())]),
    };

    let host = match loaded {
        Ok(host) => host,
        Err(errors) => {
            render_errors(&errors);
            return 1;
        }
    };

    match RouterConfig::from_settings(&host.router) {
        Ok(None) => {
            println!("router: disabled (wrapper will not be installed)");
            0
        }
        Ok(Some(config)) => {
            println!("router: enabled");
            println!("  preference:        {}", config.preference);
            println!("  local model:       {}", config.local_model);
            match &config.local_text_model {
                Some(reference) => println!("  local text model:  {reference}"),
                None => println!("  local text model:  (none, degrades to local)"),
            }
            match &config.cloud_model {
                Some(reference) => println!("  cloud model:       {reference}"),
                None => println!("  cloud model:       (none, cloud routing disabled)"),
            }
            println!(
                "  threshold:         {}",
                config.rules.complexity_threshold
            );
            println!(
                "  force patterns:    {} cloud, {} local",
                config.rules.force_cloud.len(),
                config.rules.force_local.len()
            );
            println!(
                "  auth profiles:     {}",
                host.auth.profiles.len()
            );
            0
        }
        Err(errors) => {
            render_errors(&errors);
            1
        }
    }
}
