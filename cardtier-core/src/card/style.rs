// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Card Styling
//!
//! Colors travel as hex strings rather than platform color objects so the
//! wire form stays independent of any UI toolkit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CardError;

/// An RGBA color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::rgba(0xFF, 0xFF, 0xFF, 0xFF);
    pub const BLACK: HexColor = HexColor::rgba(0x00, 0x00, 0x00, 0xFF);

    /// Creates a color from its components.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        HexColor {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parses `RGB`, `RRGGBB` or `RRGGBBAA`.
    ///
    /// Surrounding punctuation such as a leading `#` is ignored.
    pub fn parse(input: &str) -> Result<Self, CardError> {
        let hex: String = input.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let invalid = || CardError::InvalidHexColor(input.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(&hex, 16).map_err(|_| invalid())?;

        match hex.len() {
            3 => {
                let nibble = |shift: u32| ((value >> shift) & 0xF) as u8 * 17;
                Ok(HexColor::rgba(nibble(8), nibble(4), nibble(0), 0xFF))
            }
            6 => Ok(HexColor::rgba(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
                0xFF,
            )),
            8 => Ok(HexColor::rgba(
                (value >> 24) as u8,
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            )),
            _ => Err(invalid()),
        }
    }

    /// Canonical `#RRGGBBAA` form.
    pub fn to_hex_string(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for HexColor {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HexColor::parse(s)
    }
}

/// Overall layout family of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignType {
    #[default]
    Modern,
    Minimal,
    Traditional,
}

/// Visual style descriptor carried with a card.
///
/// The hex strings are kept verbatim so a card re-sent by the receiver is
/// byte-for-byte what it got, even if a color string does not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    primary_color_hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_color_hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_name: Option<String>,
    #[serde(default)]
    design_style: DesignType,
}

impl Default for CardStyle {
    fn default() -> Self {
        CardStyle::new(HexColor::WHITE, DesignType::Modern)
    }
}

impl CardStyle {
    /// Creates a style with a primary color and design.
    pub fn new(primary: HexColor, design: DesignType) -> Self {
        CardStyle {
            primary_color_hex: primary.to_hex_string(),
            secondary_color_hex: None,
            font_name: None,
            design_style: design,
        }
    }

    /// Sets the secondary color.
    pub fn with_secondary_color(mut self, color: HexColor) -> Self {
        self.secondary_color_hex = Some(color.to_hex_string());
        self
    }

    /// Sets the font name.
    pub fn with_font(mut self, font_name: &str) -> Self {
        self.font_name = Some(font_name.to_string());
        self
    }

    /// Primary color, white when the stored string does not parse.
    pub fn primary_color(&self) -> HexColor {
        HexColor::parse(&self.primary_color_hex).unwrap_or(HexColor::WHITE)
    }

    /// Secondary color, if one is set and parses.
    pub fn secondary_color(&self) -> Option<HexColor> {
        self.secondary_color_hex
            .as_deref()
            .and_then(|hex| HexColor::parse(hex).ok())
    }

    pub fn primary_color_hex(&self) -> &str {
        &self.primary_color_hex
    }

    pub fn secondary_color_hex(&self) -> Option<&str> {
        self.secondary_color_hex.as_deref()
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    pub fn design_style(&self) -> DesignType {
        self.design_style
    }
}
