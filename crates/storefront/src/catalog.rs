//! Product catalog providers.
//!
//! Pages render an ordered product list supplied by a [`CatalogProvider`]:
//! either the seeded [`StaticCatalog`] (tests, offline demos) or the
//! [`RemoteCatalog`] backed by `GET /api/products`. Remote responses are
//! cached with `moka` for five minutes so rapid page navigation does not
//! hammer the API.

use std::time::Duration;

use moka::future::Cache;
use rust_decimal::dec;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use kuchostore_core::{Category, Product, ProductId};

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog API returned status {0}")]
    Status(u16),
}

/// Source of the ordered product list for the session.
///
/// Implementations are read-only; products are immutable once loaded.
pub trait CatalogProvider {
    /// Fetch the full ordered product list.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>>;

    /// Look up one product by id.
    ///
    /// An unknown id is `Ok(None)`, not an error: pages render it as an
    /// inline not-found state.
    fn product_by_id(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> {
        async move {
            let products = self.products().await?;
            Ok(products.into_iter().find(|p| &p.id == id))
        }
    }
}

// =============================================================================
// StaticCatalog
// =============================================================================

/// An in-memory catalog seeded at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Create a catalog over the given products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo catalog the storefront ships with.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(vec![
            Product {
                id: ProductId::new("1"),
                name: "Cat Print T-Shirt".to_owned(),
                description: "Comfortable cotton t-shirt with cute cat design".to_owned(),
                price: dec!(24.99),
                image_url: "https://cdn.kuchostore.dev/products/cat-print-t-shirt.png".to_owned(),
                category: Category::Clothing,
                stock: 50,
            },
            Product {
                id: ProductId::new("2"),
                name: "Cat Ears Headband".to_owned(),
                description: "Adorable cat ears headband for cat lovers".to_owned(),
                price: dec!(12.99),
                image_url: "https://cdn.kuchostore.dev/products/cat-ears-headband.png".to_owned(),
                category: Category::Accessories,
                stock: 30,
            },
            Product {
                id: ProductId::new("3"),
                name: "Cat Bed Deluxe".to_owned(),
                description: "Soft and cozy bed for your feline friend".to_owned(),
                price: dec!(39.99),
                image_url: "https://cdn.kuchostore.dev/products/cat-bed-deluxe.png".to_owned(),
                category: Category::Toys,
                stock: 20,
            },
            Product {
                id: ProductId::new("4"),
                name: "Cat Toy Set".to_owned(),
                description: "Set of 5 interactive cat toys including bells and mice".to_owned(),
                price: dec!(15.99),
                image_url: "https://cdn.kuchostore.dev/products/cat-toy-set.png".to_owned(),
                category: Category::Toys,
                stock: 45,
            },
            Product {
                id: ProductId::new("5"),
                name: "Cat Bowl Set".to_owned(),
                description: "Ceramic food and water bowl set with cute paw prints".to_owned(),
                price: dec!(19.99),
                image_url: "https://cdn.kuchostore.dev/products/cat-bowl-set.png".to_owned(),
                category: Category::Accessories,
                stock: 25,
            },
            Product {
                id: ProductId::new("6"),
                name: "Cat Hoodie".to_owned(),
                description: "Warm and stylish hoodie with cat ears on the hood".to_owned(),
                price: dec!(34.99),
                image_url: "https://cdn.kuchostore.dev/products/cat-hoodie.png".to_owned(),
                category: Category::Clothing,
                stock: 35,
            },
        ])
    }
}

impl CatalogProvider for StaticCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}

// =============================================================================
// RemoteCatalog
// =============================================================================

/// Catalog backed by the remote products API, with a 5-minute cache.
#[derive(Clone)]
pub struct RemoteCatalog {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<&'static str, Vec<Product>>,
}

impl RemoteCatalog {
    /// Path of the products endpoint under the API base URL.
    const ENDPOINT_PATH: &'static str = "api/products";

    /// Cache key for the product list (there is only one list).
    const CACHE_KEY: &'static str = "products";

    /// How long a fetched product list stays fresh.
    const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Create a catalog fetching from `{base_url}/api/products`.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the base URL cannot be joined with
    /// the products path.
    pub fn new(client: reqwest::Client, base_url: &Url) -> Result<Self, url::ParseError> {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Self::CACHE_TTL)
            .build();

        Ok(Self {
            client,
            endpoint: base_url.join(Self::ENDPOINT_PATH)?,
            cache,
        })
    }

    /// Fetch the product list from the API, bypassing the cache.
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let products: Vec<Product> = response.json().await?;
        debug!(count = products.len(), "fetched catalog");
        Ok(products)
    }
}

impl CatalogProvider for RemoteCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(cached) = self.cache.get(Self::CACHE_KEY).await {
            return Ok(cached);
        }

        let products = self.fetch().await?;
        self.cache.insert(Self::CACHE_KEY, products.clone()).await;
        Ok(products)
    }
}
