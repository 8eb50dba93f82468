// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Business Card Module
//!
//! The document exchanged between peers. The exchange core only needs the
//! card's `id` (for dedup) and its serialization contract; everything else
//! is carried through for the surrounding application.

mod contact;
mod style;

pub use contact::{Address, ContactInformation};
pub use style::{CardStyle, DesignType, HexColor};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum name length in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum number of inline logos per card.
pub const MAX_LOGOS: usize = 8;

/// Maximum size of a single logo blob (1 MB).
pub const MAX_LOGO_SIZE: usize = 1_048_576;

/// Card errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name too long (max {} characters)", MAX_NAME_LENGTH)]
    NameTooLong,
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),
    #[error("Too many logos (max {})", MAX_LOGOS)]
    TooManyLogos,
    #[error("Logo too large (max {max} bytes, got {size} bytes)")]
    LogoTooLarge { max: usize, size: usize },
}

/// A business card.
///
/// Logos are inlined as bytes; the receiving device has no access to the
/// sender's storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: Uuid,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(default)]
    contact_information: ContactInformation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    business_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    personal_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slogan: Option<String>,
    #[serde(default, with = "logo_blobs")]
    logos: Vec<Vec<u8>>,
    #[serde(default)]
    style: CardStyle,
}

impl Card {
    /// Creates a card with a fresh random id.
    pub fn new(name: &str) -> Self {
        Card::with_id(Uuid::new_v4(), name)
    }

    /// Creates a card with a known id (e.g. one restored from storage).
    pub fn with_id(id: Uuid, name: &str) -> Self {
        Card {
            id,
            name: name.to_string(),
            title: None,
            role: None,
            company: None,
            contact_information: ContactInformation::default(),
            business_address: None,
            personal_address: None,
            slogan: None,
            logos: Vec::new(),
            style: CardStyle::default(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    pub fn with_slogan(mut self, slogan: &str) -> Self {
        self.slogan = Some(slogan.to_string());
        self
    }

    pub fn with_contact_information(mut self, info: ContactInformation) -> Self {
        self.contact_information = info;
        self
    }

    pub fn with_business_address(mut self, address: Address) -> Self {
        self.business_address = Some(address);
        self
    }

    pub fn with_personal_address(mut self, address: Address) -> Self {
        self.personal_address = Some(address);
        self
    }

    pub fn with_style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }

    /// Appends an inline logo image.
    pub fn add_logo(&mut self, bytes: Vec<u8>) -> Result<(), CardError> {
        if self.logos.len() >= MAX_LOGOS {
            return Err(CardError::TooManyLogos);
        }
        if bytes.len() > MAX_LOGO_SIZE {
            return Err(CardError::LogoTooLarge {
                max: MAX_LOGO_SIZE,
                size: bytes.len(),
            });
        }
        self.logos.push(bytes);
        Ok(())
    }

    /// Checks the limits a card must satisfy before it is sent.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.name.trim().is_empty() {
            return Err(CardError::EmptyName);
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(CardError::NameTooLong);
        }
        if self.logos.len() > MAX_LOGOS {
            return Err(CardError::TooManyLogos);
        }
        if let Some(logo) = self.logos.iter().find(|l| l.len() > MAX_LOGO_SIZE) {
            return Err(CardError::LogoTooLarge {
                max: MAX_LOGO_SIZE,
                size: logo.len(),
            });
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn slogan(&self) -> Option<&str> {
        self.slogan.as_deref()
    }

    pub fn contact_information(&self) -> &ContactInformation {
        &self.contact_information
    }

    pub fn business_address(&self) -> Option<&Address> {
        self.business_address.as_ref()
    }

    pub fn personal_address(&self) -> Option<&Address> {
        self.personal_address.as_ref()
    }

    pub fn logos(&self) -> &[Vec<u8>] {
        &self.logos
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }
}

/// Logos travel as base64 strings inside the card JSON.
mod logo_blobs {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(logos: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(logos.iter().map(|logo| STANDARD.encode(logo)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .iter()
            .map(|s| STANDARD.decode(s).map_err(D::Error::custom))
            .collect()
    }
}
