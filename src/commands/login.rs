use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::DirectoryContext;

pub fn run(ctx: &DirectoryContext, username: Option<String>) -> Result<()> {
    if ctx.session.is_authenticated() {
        println!("{}", "Already logged in.".dimmed());
        return Ok(());
    }

    let username = match username {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("  Username")
            .interact_text()?,
    };
    let password = rpassword::prompt_password("  Password: ")?;

    if !ctx.session.login(&username, &password) {
        anyhow::bail!("Invalid username or password.");
    }

    println!("{}", "Logged in. Private events are now visible.".green());
    Ok(())
}
