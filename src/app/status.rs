use super::dispatch::App;
use anyhow::Result;
use wardrobe_stylist::core::accounts::UserRecord;
use wardrobe_stylist::ui::style as ui;

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

pub fn render_status(app: &App) -> Result<String> {
    let config = &app.config;
    let laundry = if config.stylist.enforce_laundry {
        "enforced"
    } else {
        "advisory"
    };
    let secrets = if config.secrets.encrypt {
        "encrypted"
    } else {
        "plaintext"
    };
    let mut lines = vec![
        format!("◆ {}", ui::header("Wardrobe Stylist")),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        format!("Data        {}", config.data_dir().display()),
        String::new(),
        format!("  Model         {}", config.stylist.model),
        format!(
            "  API key       {}",
            if config.api_key.is_some() {
                ui::value("configured")
            } else {
                ui::warn("missing (set STYLIST_API_KEY)")
            }
        ),
        format!("  Temperature   {:.2}", config.stylist.temperature),
        format!("  Timeout       {}s", config.stylist.timeout_secs),
        format!("  Web search    {}", on_off(config.stylist.web_search)),
        format!("  Laundry rule  {laundry}"),
        format!("  Auto-classify {}", on_off(config.media.auto_classify)),
        format!("  Secrets       {secrets}"),
        String::new(),
    ];

    match app.sessions.load()? {
        Some(session) => match app.accounts.load(&session.email) {
            Ok(record) => lines.extend(account_lines(&record, session.suggestions.len())),
            Err(e) => {
                tracing::warn!(
                    email = %session.email,
                    error = %e,
                    "session points at an unreadable account"
                );
                lines.push(format!(
                    "Account     {}",
                    ui::warn("session is stale; sign in again")
                ));
            }
        },
        None => lines.push(format!("Account     {}", ui::dim("not signed in"))),
    }

    Ok(lines.join("\n"))
}

fn account_lines(record: &UserRecord, pending: usize) -> Vec<String> {
    vec![
        format!("Account     {} <{}>", ui::value(&record.name), record.email),
        format!("  Wardrobe      {} item(s)", record.wardrobe.len()),
        format!("  Inspiration   {} image(s)", record.inspiration.len()),
        format!("  Lookbook      {} saved look(s)", record.saved_outfits.len()),
        format!("  Planner       {} event(s)", record.calendar.len()),
        format!(
            "  Calendar      {}",
            if record.calendar_credentials.is_some() {
                "connected"
            } else {
                "not connected"
            }
        ),
        format!("  Suggestions   {pending} from the last styling run"),
    ]
}
