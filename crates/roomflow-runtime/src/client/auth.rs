use reqwest::{Method, StatusCode};
use roomflow_engine::validation::{
    self, LoginForm, ProfileForm, RegisterForm, SetPasswordForm, digits_only,
};
use roomflow_types::{
    AuthSession, CalendarDate, LoginPayload, ProfileUpdate, RegisterRequest, UserProfile,
    UserResponse,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::{ApiClient, backend_message, check_status};
use crate::{Error, Result};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhoneOtp<'a> {
    phone_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    otp: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhonePassword<'a> {
    phone_number: &'a str,
    password: &'a str,
}

/// Registration, OTP, login, profile and logout.
pub struct AuthOps {
    api: ApiClient,
}

impl AuthOps {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sign in and persist the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let form = LoginForm {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validation::validate_login_form(&form).into_result()?;

        let (status, body) = self
            .api
            .post_anonymous(
                "auth/login",
                &Credentials {
                    email: &form.email,
                    password: &form.password,
                },
            )
            .await?;
        if let Err(err) = check_status(status, &body) {
            let err = login_rejection(status, &body, err);
            if status.is_client_error() {
                tracing::debug!("Login rejected ({}): {}", status, err);
            } else {
                tracing::error!("Login failed ({}): {}", status, err);
            }
            return Err(err);
        }
        let payload: LoginPayload = serde_json::from_value(body)?;

        let fallback = payload.message.clone();
        let session = payload.into_session().ok_or_else(|| {
            Error::Decode(fallback.unwrap_or_else(|| "login response is missing tokens".to_string()))
        })?;
        self.api.session().begin(session.clone())?;
        tracing::info!("Signed in as {}", form.email);
        Ok(session)
    }

    /// Start registration; an OTP is sent to the phone number.
    pub async fn register(&self, form: &RegisterForm, today: CalendarDate) -> Result<Option<String>> {
        validation::validate_register_form(form, today).into_result()?;
        let (Some(date_of_birth), Some(gender)) = (form.date_of_birth, form.gender) else {
            return Err(Error::InvalidOperation(
                "date of birth and gender are required".to_string(),
            ));
        };

        let request = RegisterRequest {
            full_name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone_number: digits_only(&form.phone_number),
            date_of_birth,
            gender,
        };
        self.api
            .ack(Method::POST, "auth/register", Some(&request))
            .await
    }

    pub async fn verify_otp(&self, phone_number: &str, otp: &str) -> Result<Option<String>> {
        let check = validation::validate_otp(otp);
        if let Some(message) = check.error {
            let mut errors = validation::FormErrors::new();
            errors.insert("otp", message);
            return Err(Error::Validation(errors));
        }
        let phone = require_phone(phone_number)?;
        self.api
            .ack(
                Method::POST,
                "auth/verify-otp",
                Some(&PhoneOtp {
                    phone_number: &phone,
                    otp: Some(otp.trim()),
                }),
            )
            .await
    }

    pub async fn resend_otp(&self, phone_number: &str) -> Result<Option<String>> {
        let phone = require_phone(phone_number)?;
        self.api
            .ack(
                Method::POST,
                "auth/resend-otp",
                Some(&PhoneOtp {
                    phone_number: &phone,
                    otp: None,
                }),
            )
            .await
    }

    /// Set the password after OTP verification. The user signs in afterwards.
    pub async fn complete_registration(
        &self,
        phone_number: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Option<String>> {
        let form = SetPasswordForm {
            phone_number: phone_number.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        validation::validate_set_password_form(&form).into_result()?;
        let phone = digits_only(phone_number);
        self.api
            .ack(
                Method::POST,
                "auth/complete-registration",
                Some(&PhonePassword {
                    phone_number: &phone,
                    password,
                }),
            )
            .await
    }

    /// Update the profile and merge the server's answer into the cache.
    pub async fn update_profile(
        &self,
        update: ProfileUpdate,
        today: CalendarDate,
    ) -> Result<UserProfile> {
        if update.is_empty() {
            return Err(Error::InvalidOperation("nothing to update".to_string()));
        }
        let cached = self.api.session().profile().ok_or(Error::Unauthorized)?;

        let mut update = update;
        if let Some(phone) = update.phone_number.as_deref() {
            update.phone_number = Some(digits_only(phone));
        }
        let form = ProfileForm {
            name: update
                .full_name
                .clone()
                .or_else(|| cached.full_name.clone())
                .unwrap_or_default(),
            phone_number: update
                .phone_number
                .clone()
                .or_else(|| cached.phone.clone())
                .unwrap_or_default(),
            date_of_birth: update.date_of_birth.or(cached.date_of_birth),
        };
        validate_profile_changes(&form, &update, today)?;

        let response: UserResponse = self.api.put("auth/profile", Some(&update)).await?;
        let merged = cached.merged_with(&update, &response);
        self.api.session().update_profile(merged.clone())?;
        Ok(merged)
    }

    /// Drop the local session. No request is sent.
    pub fn logout(&self) -> Result<()> {
        self.api.session().end()?;
        tracing::info!("Signed out");
        Ok(())
    }
}

/// Only fields being changed are held to the profile rules.
fn validate_profile_changes(
    form: &ProfileForm,
    update: &ProfileUpdate,
    today: CalendarDate,
) -> Result<()> {
    let all = validation::validate_profile_form(form, today);
    let mut relevant = validation::FormErrors::new();
    for (field, message) in all.iter() {
        let changed = match field {
            "name" => update.full_name.is_some(),
            "phoneNumber" => update.phone_number.is_some(),
            "dateOfBirth" => update.date_of_birth.is_some(),
            _ => true,
        };
        if changed {
            relevant.insert(field, message);
        }
    }
    Ok(relevant.into_result()?)
}

/// A 401 from `auth/login` is a wrong password, not an expired session.
fn login_rejection(status: StatusCode, body: &Value, err: Error) -> Error {
    let fallback = match status {
        StatusCode::UNAUTHORIZED => "Invalid email or password",
        StatusCode::FORBIDDEN => {
            "Account is not activated. Please verify your phone number first."
        }
        _ => return err,
    };
    Error::Api {
        status: status.as_u16(),
        message: backend_message(body).unwrap_or_else(|| fallback.to_string()),
    }
}

fn require_phone(phone_number: &str) -> Result<String> {
    let phone = digits_only(phone_number);
    if phone.is_empty() {
        let mut errors = validation::FormErrors::new();
        errors.insert("phoneNumber", "Phone number is required");
        return Err(Error::Validation(errors));
    }
    Ok(phone)
}
