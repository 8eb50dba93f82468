// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact and address sub-records of a card.

use serde::{Deserialize, Serialize};

/// Ways to reach the card holder. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax_number: Option<String>,
    #[serde(
        default,
        rename = "websiteURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub website_url: Option<String>,
    #[serde(
        default,
        rename = "linkedInURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub linkedin_url: Option<String>,
}

impl ContactInformation {
    /// Returns true if at least one field is set.
    pub fn has_any_information(&self) -> bool {
        self.email.is_some()
            || self.phone_number.is_some()
            || self.fax_number.is_some()
            || self.website_url.is_some()
            || self.linkedin_url.is_some()
    }
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// Returns true if at least one field is set.
    pub fn has_any_information(&self) -> bool {
        self.street.is_some()
            || self.city.is_some()
            || self.state.is_some()
            || self.postal_code.is_some()
            || self.country.is_some()
    }

    /// Multi-line display form: street, `city, state postal`, country.
    ///
    /// Blank lines are dropped; an address with no fields yields an empty string.
    pub fn formatted(&self) -> String {
        let city_line = format!(
            "{}{} {}",
            self.city.as_deref().unwrap_or(""),
            self.state
                .as_deref()
                .map(|s| format!(", {s}"))
                .unwrap_or_default(),
            self.postal_code.as_deref().unwrap_or(""),
        );

        [
            self.street.as_deref().unwrap_or(""),
            city_line.as_str(),
            self.country.as_deref().unwrap_or(""),
        ]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}
