use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::date::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" | "M" => Ok(Gender::Male),
            "FEMALE" | "F" => Ok(Gender::Female),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// Cached profile of the signed-in user (persisted under `userProfile`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    #[serde(
        default,
        with = "crate::date::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl UserProfile {
    /// Overlay a profile-update response onto the cached profile.
    ///
    /// Server values win; fields the server left out keep what was submitted,
    /// and failing that what was cached.
    pub fn merged_with(&self, submitted: &ProfileUpdate, response: &UserResponse) -> Self {
        Self {
            full_name: response
                .full_name
                .clone()
                .or_else(|| submitted.full_name.clone())
                .or_else(|| self.full_name.clone()),
            email: response.email.clone().or_else(|| self.email.clone()),
            phone: response
                .phone_number
                .clone()
                .or_else(|| submitted.phone_number.clone())
                .or_else(|| self.phone.clone()),
            avatar: response
                .avatar
                .clone()
                .or_else(|| submitted.avatar.clone())
                .or_else(|| self.avatar.clone()),
            date_of_birth: response
                .date_of_birth
                .or(submitted.date_of_birth)
                .or(self.date_of_birth),
            gender: response.gender.or(submitted.gender).or(self.gender),
        }
    }
}

/// Tokens and profile held for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user_profile: UserProfile,
}

/// Body of a successful `auth/login` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[serde(alias = "accessToken")]
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(alias = "name")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "phoneNumber")]
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub message: Option<String>,
}

impl LoginPayload {
    /// Both tokens are required to open a session.
    pub fn into_session(self) -> Option<AuthSession> {
        let access_token = self.token.filter(|t| !t.is_empty())?;
        let refresh_token = self.refresh_token.filter(|t| !t.is_empty())?;
        Some(AuthSession {
            access_token,
            refresh_token,
            user_profile: UserProfile {
                full_name: self.full_name,
                email: self.email,
                phone: self.phone,
                avatar: self.avatar,
                date_of_birth: None,
                gender: None,
            },
        })
    }
}

/// `auth/register` request. The password is set later, after OTP verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: CalendarDate,
    pub gender: Gender,
}

/// `auth/profile` request; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<CalendarDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone_number.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.avatar.is_none()
    }
}

/// User record returned by profile endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Option<u64>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default, with = "crate::date::lenient")]
    pub date_of_birth: Option<CalendarDate>,
    pub gender: Option<Gender>,
    pub avatar: Option<String>,
}
