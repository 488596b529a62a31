use anyhow::Result;

use super::DirectoryContext;

pub fn run(ctx: &DirectoryContext) -> Result<()> {
    ctx.session.logout();
    println!("Logged out.");
    Ok(())
}
