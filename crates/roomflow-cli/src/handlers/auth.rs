use super::HandlerContext;
use crate::views::ProfileView;
use anyhow::Result;
use roomflow_engine::validation::RegisterForm;
use roomflow_runtime::Roomflow;
use roomflow_types::{CalendarDate, Gender};

pub async fn login(
    ctx: &HandlerContext,
    client: &Roomflow,
    email: &str,
    password: &str,
) -> Result<()> {
    let session = client.auth().login(email, password).await?;
    let profile = &session.user_profile;
    ctx.render(profile, format_args!("Signed in.\n{}", ProfileView::new(profile)))
}

pub fn logout(ctx: &HandlerContext, client: &Roomflow) -> Result<()> {
    let was_signed_in = client.session().is_authenticated();
    client.auth().logout()?;
    if was_signed_in {
        ctx.message("Signed out.")
    } else {
        ctx.message("Not signed in.")
    }
}

pub async fn register(
    ctx: &HandlerContext,
    client: &Roomflow,
    name: String,
    email: String,
    phone: String,
    date_of_birth: Option<CalendarDate>,
    gender: Option<Gender>,
) -> Result<()> {
    let form = RegisterForm {
        name,
        email,
        phone_number: phone,
        password: None,
        date_of_birth,
        gender,
    };
    let message = client
        .auth()
        .register(&form, CalendarDate::today())
        .await?;
    ctx.message(message.as_deref().unwrap_or(
        "Registration started. Enter the code sent to your phone with `roomflow verify-otp`.",
    ))
}

pub async fn verify_otp(
    ctx: &HandlerContext,
    client: &Roomflow,
    phone: &str,
    otp: &str,
) -> Result<()> {
    let message = client.auth().verify_otp(phone, otp).await?;
    ctx.message(message.as_deref().unwrap_or(
        "Phone number verified. Choose a password with `roomflow set-password`.",
    ))
}

pub async fn resend_otp(ctx: &HandlerContext, client: &Roomflow, phone: &str) -> Result<()> {
    let message = client.auth().resend_otp(phone).await?;
    ctx.message(message.as_deref().unwrap_or("A new code has been sent."))
}

pub async fn set_password(
    ctx: &HandlerContext,
    client: &Roomflow,
    phone: &str,
    password: &str,
    confirm: &str,
) -> Result<()> {
    let message = client
        .auth()
        .complete_registration(phone, password, confirm)
        .await?;
    ctx.message(
        message
            .as_deref()
            .unwrap_or("Registration complete. You can now log in."),
    )
}
