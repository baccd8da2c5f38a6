//! User model

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Color;

/// Numeric user identifier as it appears in the fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A person shown in the priorities grid, profiles and timelines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Stable string id used to join timeline and film fixtures
    pub unique_user_id: String,
    pub name: String,
    pub profile_picture: String,
    pub birthday: NaiveDate,
    pub dominant_color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<UserId>,
}

impl User {
    /// First word of the display name
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Age in whole years on `today`
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.birthday).unwrap_or(0)
    }

    /// Days until the next birthday, `0` when it is today.
    ///
    /// A Feb 29 birthday is celebrated on Feb 28 in non-leap years.
    #[must_use]
    pub fn days_until_birthday(&self, today: NaiveDate) -> i64 {
        let this_year = birthday_in_year(self.birthday, today.year());
        let next = if this_year < today {
            birthday_in_year(self.birthday, today.year() + 1)
        } else {
            this_year
        };
        (next - today).num_days()
    }
}

fn birthday_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    birthday
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, birthday.month(), 28))
        .unwrap_or(birthday)
}

/// Resolve the partner record referenced by `user.partner_id`.
pub fn find_partner<'a>(user: &User, users: &'a [User]) -> Option<&'a User> {
    let partner_id = user.partner_id?;
    users.iter().find(|candidate| candidate.id == partner_id)
}
