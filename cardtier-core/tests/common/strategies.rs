// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies

use cardtier_core::card::{Card, ContactInformation};
use cardtier_core::ranging::RangingToken;
use proptest::prelude::*;

/// Card holder names (non-empty, within the length limit).
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,20}( [A-Z][a-z]{1,20})?"
}

/// Distances from touching to across the room, in meters.
pub fn distance_strategy() -> impl Strategy<Value = f32> {
    0.0f32..10.0f32
}

/// Opaque ranging tokens.
pub fn token_strategy() -> impl Strategy<Value = RangingToken> {
    prop::collection::vec(any::<u8>(), 1..96).prop_map(RangingToken::new)
}

/// Distance samples keyed by peer index.
pub fn samples_strategy() -> impl Strategy<Value = Vec<(u8, f32)>> {
    prop::collection::vec((0u8..16, distance_strategy()), 0..32)
}

/// Cards with a random mix of optional fields and logos.
pub fn card_strategy() -> impl Strategy<Value = Card> {
    (
        name_strategy(),
        prop::option::of("[a-zA-Z ]{1,30}"),
        prop::option::of("[a-z]{3,10}@[a-z]{3,8}\\.com"),
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..256), 0..3),
    )
        .prop_map(|(name, company, email, logos)| {
            let mut card = Card::new(&name).with_contact_information(ContactInformation {
                email,
                ..ContactInformation::default()
            });
            if let Some(company) = company {
                card = card.with_company(&company);
            }
            for logo in logos {
                card.add_logo(logo).unwrap();
            }
            card
        })
}
