//! Session root tying the storefront together.
//!
//! A [`StoreSession`] is the one explicitly owned store object a UI layer
//! holds per browser session. It owns the cart, the auth gate, the catalog
//! provider, and the audit client; every cart mutation flows through
//! `&mut self`, so the cart has exactly one writer and needs no locking.

use secrecy::SecretString;
use tracing::{info, instrument, warn};

use kuchostore_core::{LogId, Product, ProductId, UserId};

use crate::audit::AuditClient;
use crate::auth::{AuthClient, AuthGate, SignInData, SignUpData};
use crate::cart::CartStore;
use crate::catalog::{CatalogProvider, RemoteCatalog};
use crate::checkout::{self, CheckoutSummary};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// User id stamped on audit records when nobody is signed in.
const ANONYMOUS_USER_ID: &str = "anonymous";

/// One browser session's worth of storefront state.
pub struct StoreSession<C> {
    catalog: C,
    cart: CartStore,
    auth_api: AuthClient,
    gate: AuthGate<AuthClient>,
    audit: AuditClient,
}

impl StoreSession<RemoteCatalog> {
    /// Build a session against the live API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the HTTP client cannot be built and
    /// [`StoreError::InvalidUrl`] if an endpoint cannot be derived from the
    /// configured base URL.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let catalog = RemoteCatalog::new(client.clone(), &config.api_base_url)?;
        let audit = AuditClient::new(client.clone(), &config.api_base_url)?;
        let auth_api = AuthClient::new(client, config.api_base_url.clone());

        info!(base_url = %config.api_base_url, "storefront session connected");
        Ok(Self::with_catalog(catalog, auth_api, audit))
    }
}

impl<C: CatalogProvider> StoreSession<C> {
    /// Build a session over an explicit catalog provider.
    #[must_use]
    pub fn with_catalog(catalog: C, auth_api: AuthClient, audit: AuditClient) -> Self {
        let gate = AuthGate::new(auth_api.clone());
        Self {
            catalog,
            cart: CartStore::new(),
            auth_api,
            gate,
            audit,
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// The full ordered product list.
    ///
    /// # Errors
    ///
    /// See [`crate::catalog::CatalogError`].
    pub async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.catalog.products().await?)
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] for an unknown id, which the
    /// product page renders as its inline not-found state.
    pub async fn product(&self, id: &ProductId) -> Result<Product> {
        self.catalog
            .product_by_id(id)
            .await?
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
    }

    // =========================================================================
    // Cart and checkout
    // =========================================================================

    /// Read access to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable access to the cart. The session is the cart's only writer.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Checkout summary over the current cart.
    #[must_use]
    pub fn checkout(&self) -> CheckoutSummary<'_> {
        CheckoutSummary::new(self.cart.items())
    }

    /// Confirm the current cart as an order.
    ///
    /// Resolves the acting user from the auth gate (falling back to
    /// `"anonymous"`), posts one audit record, and returns the assigned log
    /// id. The cart is left intact; clearing it is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Audit`] if the sink cannot be reached or
    /// rejects the record.
    #[instrument(skip(self))]
    pub async fn confirm_order(&mut self) -> Result<LogId> {
        let user_id = self.audit_user_id().await;

        let log_id = checkout::confirm_order(self.cart.items(), user_id, &self.audit)
            .await
            .inspect_err(|e| warn!(error = %e, "order confirmation not recorded"))?;

        Ok(log_id)
    }

    async fn audit_user_id(&mut self) -> UserId {
        match self.gate.current_user().await {
            Some(user) => user.id.clone(),
            None => UserId::new(ANONYMOUS_USER_ID),
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Read access to the auth gate.
    #[must_use]
    pub const fn auth(&self) -> &AuthGate<AuthClient> {
        &self.gate
    }

    /// Mutable access to the auth gate.
    pub const fn auth_mut(&mut self) -> &mut AuthGate<AuthClient> {
        &mut self.gate
    }

    /// Register a new account. Does not sign the session in.
    ///
    /// # Errors
    ///
    /// See [`crate::auth::AuthError`].
    pub async fn sign_up(&self, data: &SignUpData) -> Result<()> {
        self.auth_api.sign_up(data).await?;
        Ok(())
    }

    /// Sign in and authenticate this session with the returned token.
    ///
    /// # Errors
    ///
    /// See [`crate::auth::AuthError`].
    pub async fn sign_in(&mut self, data: &SignInData) -> Result<()> {
        let (user, token) = self.auth_api.sign_in(data).await?;
        info!(user_id = %user.id, "signed in");
        self.gate.accept_sign_in(user, SecretString::from(token));
        Ok(())
    }

    /// Sign the session out. The cart is kept; it belongs to the browser
    /// session, not the account.
    pub fn sign_out(&mut self) {
        self.gate.sign_out();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;
    use url::Url;

    use crate::auth::SessionState;
    use crate::catalog::StaticCatalog;

    use super::*;

    fn demo_session() -> StoreSession<StaticCatalog> {
        let base: Url = "https://shop.example.com/".parse().unwrap();
        let client = reqwest::Client::new();
        StoreSession::with_catalog(
            StaticCatalog::seed(),
            AuthClient::new(client.clone(), base.clone()),
            AuditClient::new(client, &base).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let session = demo_session();
        let product = session.product(&ProductId::new("1")).await.unwrap();
        assert_eq!(product.name, "Cat Print T-Shirt");
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let session = demo_session();
        let err = session.product(&ProductId::new("999")).await.unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_cart_flows_into_checkout() {
        let mut session = demo_session();
        let shirt = session.product(&ProductId::new("1")).await.unwrap();
        session.cart_mut().add_or_set_quantity(&shirt, 2);

        assert_eq!(session.cart().total_item_count(), 2);
        assert_eq!(session.checkout().total(), dec!(49.98));
    }

    #[tokio::test]
    async fn test_audit_user_id_falls_back_to_anonymous() {
        // No token stored, so the gate settles on anonymous without any
        // network round-trip.
        let mut session = demo_session();
        assert_eq!(session.audit_user_id().await, UserId::new("anonymous"));
        assert_eq!(*session.auth().state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_sign_out_keeps_cart() {
        let mut session = demo_session();
        let shirt = session.product(&ProductId::new("1")).await.unwrap();
        session.cart_mut().add_or_set_quantity(&shirt, 1);

        session.sign_out();
        assert_eq!(*session.auth().state(), SessionState::Anonymous);
        assert_eq!(session.cart().len(), 1);
    }
}
