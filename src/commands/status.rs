use anyhow::Result;
use evdir_core::config::EvdirConfig;
use owo_colors::OwoColorize;

use super::DirectoryContext;

pub fn run(ctx: &DirectoryContext) -> Result<()> {
    let signed_in = if ctx.session.is_authenticated() {
        "logged in".green().to_string()
    } else {
        "logged out".dimmed().to_string()
    };

    println!("Session:      {signed_in}");
    println!("Events API:   {}", ctx.config.api_base_url);
    println!("Config file:  {}", EvdirConfig::config_path()?.display());
    println!("Session file: {}", ctx.config.session_path()?.display());
    println!();
    println!(
        "{}",
        "Login only shows or hides private events on this machine. It is not a security feature."
            .dimmed()
    );

    Ok(())
}
