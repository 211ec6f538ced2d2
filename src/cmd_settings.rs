//! Settings and sites subcommand handlers.

use tracing::warn;

use siwoti_config::redact;
use siwoti_core::Runtime;
use siwoti_protocols::Request;
use siwoti_reply::{BackendKind, ResolvedBackend};

use crate::cli::{SettingsAction, SitesAction};

/// Handle settings subcommands. Writes go through the background channel.
pub(crate) async fn handle_settings_command(
    runtime: &Runtime,
    action: SettingsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = match action {
        SettingsAction::Show => return settings_show(runtime).await,
        SettingsAction::SetKey { api_key } => Request::SaveApiKey { api_key },
        SettingsAction::SetBase { api_base } => Request::SaveApiBase { api_base },
        SettingsAction::SetModel { model } => Request::SaveModel { model },
        SettingsAction::SetTone { tone } => Request::SaveTone { tone },
        SettingsAction::DisableSite { hostname } => Request::SetSiteEnabled {
            hostname,
            enabled: false,
        },
        SettingsAction::EnableSite { hostname } => Request::SetSiteEnabled {
            hostname,
            enabled: true,
        },
    };

    let kind = request.kind();
    let ack = runtime.background().save(request).await?;
    if !ack.ok {
        return Err(format!("{} failed, see the log for details", kind).into());
    }
    println!("Saved.");
    Ok(())
}

async fn settings_show(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let settings = runtime.settings().load().await?;
    let api_base = settings.api_base();
    let kind = BackendKind::detect(&api_base);

    println!("API key:        {}", settings.api_key().map(redact).unwrap_or_else(|| "none".to_string()));
    println!("API base:       {}", api_base);
    println!("Backend:        {}", kind);
    println!("Endpoint:       {}", kind.endpoint(&api_base));
    println!("Model:          {}", settings.model().unwrap_or(kind.default_model()));
    println!("Tone:           {}", settings.tone());
    if settings.disabled_sites.is_empty() {
        println!("Disabled sites: none");
    } else {
        println!("Disabled sites: {}", settings.disabled_sites.join(", "));
    }

    if let Err(e) = ResolvedBackend::from_settings(&settings) {
        warn!("Backend not usable yet: {}", e);
        println!();
        println!("{}", e);
    }
    Ok(())
}

/// Handle sites subcommands.
pub(crate) async fn handle_sites_command(
    runtime: &Runtime,
    action: SitesAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = runtime.registry().table().await;
    match action {
        SitesAction::Resolve { hostname } => {
            let hostname = hostname.trim();
            match (table.matching_pattern(hostname), table.resolve(hostname)) {
                (Some(pattern), Some(descriptor)) => {
                    println!("Pattern: {}", pattern);
                    println!("{}", serde_json::to_string_pretty(descriptor)?);
                }
                _ => println!("{} is not supported.", hostname),
            }
        }
        SitesAction::List => {
            if table.is_empty() {
                println!("No sites configured.");
            }
            for pattern in table.patterns() {
                println!("{}", pattern);
            }
        }
    }
    Ok(())
}
