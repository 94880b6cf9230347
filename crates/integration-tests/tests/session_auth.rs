//! Session-level flows: the auth gate's state machine behind the session
//! root, and the cart's independence from the signed-in account.

#![allow(clippy::unwrap_used)]

use rust_decimal::dec;
use secrecy::SecretString;
use url::Url;

use kuchostore_core::{Email, ProductId, User, UserId};
use kuchostore_storefront::StoreError;
use kuchostore_storefront::audit::AuditClient;
use kuchostore_storefront::auth::{AuthClient, AuthError, AuthGate, ProfileSource, SessionState};
use kuchostore_storefront::catalog::StaticCatalog;
use kuchostore_storefront::session::StoreSession;

struct StubProfiles {
    accept: Option<User>,
}

impl ProfileSource for StubProfiles {
    async fn fetch_profile(&self, _token: &str) -> Result<User, AuthError> {
        self.accept
            .clone()
            .ok_or_else(|| AuthError::Rejected("invalid token".to_owned()))
    }
}

fn kucho() -> User {
    User {
        id: UserId::new("u-42"),
        email: Email::parse("kucho@example.com").unwrap(),
        name: Some("Kucho".to_owned()),
        phone: None,
    }
}

fn offline_session() -> StoreSession<StaticCatalog> {
    let base: Url = "https://shop.example.com/".parse().unwrap();
    let client = reqwest::Client::new();
    StoreSession::with_catalog(
        StaticCatalog::seed(),
        AuthClient::new(client.clone(), base.clone()),
        AuditClient::new(client, &base).unwrap(),
    )
}

#[tokio::test]
async fn test_stored_token_survives_a_page_load() {
    let mut gate = AuthGate::new(StubProfiles {
        accept: Some(kucho()),
    });
    gate.set_token(SecretString::from("tok-live"));

    // First resolution validates, the second answers from settled state.
    assert_eq!(gate.current_user().await.unwrap().id, UserId::new("u-42"));
    assert_eq!(gate.current_user().await.unwrap().id, UserId::new("u-42"));
    assert!(matches!(gate.state(), SessionState::Authenticated(_)));
}

#[tokio::test]
async fn test_expired_token_degrades_to_anonymous() {
    let mut gate = AuthGate::new(StubProfiles { accept: None });
    gate.set_token(SecretString::from("tok-expired"));

    assert!(gate.current_user().await.is_none());
    assert_eq!(*gate.state(), SessionState::Anonymous);
    assert!(gate.token().is_none());
}

#[tokio::test]
async fn test_sign_out_then_new_token_revalidates() {
    let mut gate = AuthGate::new(StubProfiles {
        accept: Some(kucho()),
    });
    gate.accept_sign_in(kucho(), SecretString::from("tok-1"));
    gate.sign_out();
    assert_eq!(*gate.state(), SessionState::Anonymous);

    gate.set_token(SecretString::from("tok-2"));
    assert_eq!(*gate.state(), SessionState::Unknown);
    assert!(gate.current_user().await.is_some());
}

#[tokio::test]
async fn test_anonymous_session_still_shops() {
    let mut session = offline_session();
    assert_eq!(*session.auth().state(), SessionState::Unknown);

    let shirt = session.product(&ProductId::new("1")).await.unwrap();
    session.cart_mut().add_or_set_quantity(&shirt, 2);

    assert_eq!(session.checkout().total(), dec!(49.98));
}

#[tokio::test]
async fn test_sign_out_keeps_the_session_cart() {
    let mut session = offline_session();
    let hoodie = session.product(&ProductId::new("6")).await.unwrap();
    session.cart_mut().add_or_set_quantity(&hoodie, 1);

    session.sign_out();

    assert_eq!(*session.auth().state(), SessionState::Anonymous);
    assert_eq!(session.cart().subtotal(), dec!(34.99));
}

#[tokio::test]
async fn test_unknown_product_surfaces_not_found() {
    let session = offline_session();
    let err = session.product(&ProductId::new("404")).await.unwrap_err();
    assert!(matches!(err, StoreError::ProductNotFound(id) if id == ProductId::new("404")));
}
