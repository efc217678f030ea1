use std::fmt;
use std::path::Path;

use roomflow_engine::format::{NOT_AVAILABLE, display_date, format_phone};
use roomflow_runtime::Config;
use roomflow_types::UserProfile;

pub struct ProfileView<'a> {
    profile: &'a UserProfile,
}

impl<'a> ProfileView<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self { profile }
    }
}

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.profile;
        let or_na = |value: Option<&str>| value.unwrap_or(NOT_AVAILABLE).to_string();
        writeln!(f, "Name:          {}", or_na(p.full_name.as_deref()))?;
        writeln!(f, "Email:         {}", or_na(p.email.as_deref()))?;
        writeln!(
            f,
            "Phone:         {}",
            p.phone
                .as_deref()
                .map(format_phone)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        )?;
        writeln!(
            f,
            "Date of birth: {}",
            p.date_of_birth
                .map(display_date)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        )?;
        if let Some(gender) = p.gender {
            writeln!(f, "Gender:        {}", gender)?;
        }
        Ok(())
    }
}

pub struct ConfigView<'a> {
    data_dir: &'a Path,
    config: &'a Config,
}

impl<'a> ConfigView<'a> {
    pub fn new(data_dir: &'a Path, config: &'a Config) -> Self {
        Self { data_dir, config }
    }
}

impl fmt::Display for ConfigView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Data dir:     {}", self.data_dir.display())?;
        writeln!(f, "API base URL: {}", self.config.api.base_url)?;
        writeln!(f, "Timeout:      {}s", self.config.api.timeout_secs)?;
        writeln!(f, "Badge poll:   {}s", self.config.badge.poll_interval_secs)
    }
}
