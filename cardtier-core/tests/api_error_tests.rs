// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for api::error

use cardtier_core::api::*;
use cardtier_core::*;

#[test]
fn test_error_display() {
    let err = CardtierError::from(ExchangeError::NoPeerInRange);
    assert!(err.to_string().contains("exchange error"));
    assert!(err.to_string().contains("No peer in range"));
}

#[test]
fn test_error_from_exchange() {
    let err: CardtierError = ExchangeError::NoPeerInRange.into();
    assert!(matches!(err, CardtierError::Exchange(_)));
}

#[test]
fn test_error_from_card() {
    let err: CardtierError = CardError::EmptyName.into();
    assert!(matches!(err, CardtierError::Card(_)));
}

#[test]
fn test_error_from_transport() {
    let err: CardtierError = TransportError::SendFailed("gone".into()).into();
    assert!(matches!(err, CardtierError::Transport(_)));
    assert!(err.to_string().contains("gone"));
}

#[test]
fn test_error_from_ranging() {
    let err: CardtierError = RangingError::Unavailable.into();
    assert!(matches!(err, CardtierError::Ranging(_)));
}

#[test]
fn test_error_from_protocol() {
    let err: CardtierError = ProtocolError::EmptyToken.into();
    assert!(matches!(err, CardtierError::Protocol(_)));
}

#[test]
fn test_error_from_config() {
    let err: CardtierError = ConfigError::InvalidProximityThreshold.into();
    assert!(matches!(err, CardtierError::Configuration(_)));
}

#[test]
fn test_error_from_identity() {
    let err: CardtierError = IdentityError::EmptyDeviceName.into();
    assert!(matches!(err, CardtierError::Identity(_)));
}

fn send_first_card() -> CardtierResult<PeerIdentity> {
    let identity = LocalIdentity::load_or_create(&MemoryDisplayNameStore::new(), "Desk")?;
    let coordinator =
        ExchangeCoordinator::builder(MockTransport::new(), MockRangingEngine::new()).build()?;
    let card = Card::new(identity.display_name());
    Ok(coordinator.send_card_to_closest(&card)?)
}

#[test]
fn test_operations_compose_with_question_mark() {
    let result = send_first_card();
    assert!(matches!(
        result,
        Err(CardtierError::Exchange(ExchangeError::NoPeerInRange))
    ));
}
