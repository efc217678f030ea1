//! Form validators.
//!
//! Field validators return a [`ValidationResult`]; form validators run every
//! field validator (no short-circuit) and collect failures into a sparse
//! [`FormErrors`] map. A missing key means the field is valid.

use once_cell::sync::Lazy;
use regex::Regex;
use roomflow_types::{CalendarDate, Gender};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 100;
pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 100;
pub const OTP_LEN: usize = 4;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Vietnamese mobile prefixes, optional +84, optional space/dot separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(0|\+84)(\s|\.)?((3[2-9])|(5[689])|(7[06-9])|(8[1-689])|(9[0-46-9]))(\d)(\s|\.)?(\d{3})(\s|\.)?(\d{3})$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub error: Option<&'static str>,
}

impl ValidationResult {
    pub const VALID: ValidationResult = ValidationResult { error: None };

    pub fn invalid(message: &'static str) -> Self {
        Self {
            error: Some(message),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Field-keyed error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, &'static str>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&mut self, field: &'static str, result: ValidationResult) {
        if let Some(message) = result.error {
            self.0.insert(field, message);
        }
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// `Ok(())` when no field failed.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::invalid("Email is required");
    }
    if !EMAIL_RE.is_match(email) {
        return ValidationResult::invalid("Invalid email format");
    }
    ValidationResult::VALID
}

pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::invalid("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::invalid("Password must be at least 6 characters");
    }
    ValidationResult::VALID
}

pub fn validate_phone_number(phone: &str) -> ValidationResult {
    let phone = phone.trim();
    if phone.is_empty() {
        return ValidationResult::invalid("Phone number is required");
    }
    if !PHONE_RE.is_match(phone) {
        return ValidationResult::invalid("Invalid phone number");
    }
    ValidationResult::VALID
}

pub fn validate_name(name: &str) -> ValidationResult {
    let len = name.trim().chars().count();
    if len == 0 {
        return ValidationResult::invalid("Full name is required");
    }
    if len < 2 {
        return ValidationResult::invalid("Name must be at least 2 characters");
    }
    if len > 50 {
        return ValidationResult::invalid("Name must not exceed 50 characters");
    }
    ValidationResult::VALID
}

/// Age is the difference in calendar years, ignoring month and day.
pub fn validate_date_of_birth(dob: Option<CalendarDate>, today: CalendarDate) -> ValidationResult {
    let Some(dob) = dob else {
        return ValidationResult::invalid("Date of birth is required");
    };
    let age = today.year() - dob.year();
    if age < MIN_AGE {
        return ValidationResult::invalid("You must be over 18");
    }
    if age > MAX_AGE {
        return ValidationResult::invalid("Invalid date of birth");
    }
    ValidationResult::VALID
}

pub fn validate_gender(gender: Option<Gender>) -> ValidationResult {
    match gender {
        Some(_) => ValidationResult::VALID,
        None => ValidationResult::invalid("Gender is required"),
    }
}

pub fn validate_otp(code: &str) -> ValidationResult {
    let code = code.trim();
    if code.is_empty() {
        return ValidationResult::invalid("OTP is required");
    }
    if code.len() != OTP_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::invalid("OTP must be 4 digits");
    }
    ValidationResult::VALID
}

pub fn validate_new_password(password: &str, confirm: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    let len = password.chars().count();
    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if len < MIN_PASSWORD_LEN {
        errors.insert("password", "Password must be at least 6 characters");
    } else if len > MAX_PASSWORD_LEN {
        errors.insert("password", "Password must not exceed 100 characters");
    }

    if confirm.is_empty() {
        errors.insert("confirmPassword", "Please confirm your password");
    } else if password != confirm {
        errors.insert("confirmPassword", "Passwords do not match");
    }
    errors
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    /// Set after OTP verification in the current flow; validated when given.
    pub password: Option<String>,
    pub date_of_birth: Option<CalendarDate>,
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetPasswordForm {
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub phone_number: String,
    pub date_of_birth: Option<CalendarDate>,
}

pub fn validate_register_form(form: &RegisterForm, today: CalendarDate) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.check("name", validate_name(&form.name));
    errors.check("email", validate_email(&form.email));
    errors.check("phoneNumber", validate_phone_number(&form.phone_number));
    if let Some(password) = &form.password {
        errors.check("password", validate_password(password));
    }
    errors.check(
        "dateOfBirth",
        validate_date_of_birth(form.date_of_birth, today),
    );
    errors.check("gender", validate_gender(form.gender));
    errors
}

pub fn validate_login_form(form: &LoginForm) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.check("email", validate_email(&form.email));
    errors.check("password", validate_password(&form.password));
    errors
}

pub fn validate_set_password_form(form: &SetPasswordForm) -> FormErrors {
    let mut errors = validate_new_password(&form.password, &form.confirm_password);
    let phone = digits_only(&form.phone_number);
    if phone.is_empty() {
        errors.insert("phoneNumber", "Phone number is required");
    } else if phone.len() != 10 || !phone.starts_with('0') {
        errors.insert("phoneNumber", "Invalid phone number");
    }
    errors
}

pub fn validate_profile_form(form: &ProfileForm, today: CalendarDate) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.check("name", validate_name(&form.name));
    errors.check("phoneNumber", validate_phone_number(&form.phone_number));
    errors.check(
        "dateOfBirth",
        validate_date_of_birth(form.date_of_birth, today),
    );
    errors
}

/// Strip everything but ASCII digits, as the backend expects for phone numbers.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
