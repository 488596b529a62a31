use anyhow::Result;
use evdir_core::detail::{EventLink, event_link};
use evdir_core::event::EventId;
use evdir_core::filters::filter_by_permission;

use super::DirectoryContext;
use crate::render::render_detail;

pub async fn run(ctx: &DirectoryContext, id: EventId, open_page: bool) -> Result<()> {
    let (event, events) = tokio::join!(ctx.store.source().fetch_event(id), ctx.load_events());
    let events = events?;
    let is_authenticated = ctx.session.is_authenticated();

    let event = event?;

    // Private events don't exist for signed-out viewers
    if !event.is_public() && !is_authenticated {
        anyhow::bail!("Event {id} not found");
    }

    let visible = filter_by_permission(&events, is_authenticated);
    println!("{}", render_detail(&event, &visible, is_authenticated));

    if open_page {
        match event_link(&event, is_authenticated) {
            EventLink::Open(url) => open::that(url)?,
            EventLink::Locked => anyhow::bail!("Event page locked. Run `evdir login` first."),
            EventLink::None => anyhow::bail!("Event {id} has no event page"),
        }
    }

    Ok(())
}
