use super::HandlerContext;
use crate::views::ProfileView;
use anyhow::{Result, bail};
use roomflow_runtime::Roomflow;
use roomflow_types::{CalendarDate, ProfileUpdate};

pub fn show(ctx: &HandlerContext, client: &Roomflow) -> Result<()> {
    let Some(profile) = client.session().profile() else {
        bail!("Not signed in. Run `roomflow login` first.");
    };
    ctx.render(&profile, ProfileView::new(&profile))
}

pub async fn update(ctx: &HandlerContext, client: &Roomflow, update: ProfileUpdate) -> Result<()> {
    if !client.session().is_authenticated() {
        bail!("Not signed in. Run `roomflow login` first.");
    }
    let profile = client
        .auth()
        .update_profile(update, CalendarDate::today())
        .await?;
    ctx.render(
        &profile,
        format_args!("Profile updated.\n{}", ProfileView::new(&profile)),
    )
}
