// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Fixtures

use cardtier_core::card::{
    Address, Card, CardStyle, ContactInformation, DesignType, HexColor,
};
use cardtier_core::mesh::PeerIdentity;
use cardtier_core::ranging::RangingToken;

/// Card with only the required fields.
pub fn minimal_card(name: &str) -> Card {
    Card::new(name)
}

/// Card with every optional field populated and two logos.
pub fn full_card(name: &str) -> Card {
    let contact = ContactInformation {
        email: Some("alice@example.com".into()),
        phone_number: Some("+41 44 000 00 00".into()),
        fax_number: None,
        website_url: Some("https://example.com".into()),
        linkedin_url: Some("https://linkedin.com/in/alice".into()),
    };
    let office = Address {
        street: Some("Bahnhofstrasse 1".into()),
        city: Some("Zurich".into()),
        state: Some("ZH".into()),
        postal_code: Some("8001".into()),
        country: Some("Switzerland".into()),
    };
    let style = CardStyle::new(HexColor::rgba(0x1E, 0x40, 0xAF, 0xFF), DesignType::Minimal)
        .with_secondary_color(HexColor::BLACK)
        .with_font("Helvetica Neue");

    let mut card = Card::new(name)
        .with_title("Engineer")
        .with_role("Platform")
        .with_company("Acme AG")
        .with_slogan("Closer is better")
        .with_contact_information(contact)
        .with_business_address(office)
        .with_style(style);
    card.add_logo(vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3]).unwrap();
    card.add_logo(vec![0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    card
}

pub fn peer(id: &str, name: &str) -> PeerIdentity {
    PeerIdentity::new(id, name)
}

/// Deterministic non-empty token.
pub fn token(seed: u8) -> RangingToken {
    RangingToken::new((0..32).map(|i| seed.wrapping_add(i)).collect())
}
