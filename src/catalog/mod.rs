use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product};

/// Authoritative in-memory product collection plus the id counter.
///
/// The store owns its backing `Vec` exclusively; callers only ever see cloned
/// records. Append and counter increment happen in the same method so that a
/// single lock around the store keeps ids unique under concurrent creates.
#[derive(Debug)]
pub struct CatalogStore {
    products: Vec<Product>,
    next_id: u64,
}

impl CatalogStore {
    /// Store pre-populated with the four fixed demo records (ids 1–4);
    /// the counter starts at 5.
    pub fn seeded() -> Self {
        let seed = |id: u64, price: f64| Product {
            id,
            name: format!("Generic Item {id}"),
            description: "A generic item we sell".to_string(),
            long_description: "A longer description of the generic item we sell".to_string(),
            price,
            image: String::new(),
        };
        Self {
            products: vec![
                seed(1, 56.99),
                seed(2, 57.99),
                seed(3, 58.99),
                seed(4, 59.99),
            ],
            next_id: 5,
        }
    }

    /// All products in insertion order. The returned records are clones, so
    /// callers cannot reach back into the store's state.
    pub fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    /// Assigns the next id, appends, and returns the stored record. Never
    /// fails; any id the client tried to supply was already dropped at
    /// deserialization.
    pub fn add(&mut self, payload: NewProduct) -> Product {
        let product = Product {
            id: self.next_id,
            name: payload.name,
            description: payload.description,
            long_description: payload.long_description,
            price: payload.price,
            image: payload.image,
        };
        self.products.push(product.clone());
        self.next_id += 1;
        debug!(id = product.id, "product appended to catalog");
        product
    }

    /// Looks up a product by the raw path segment. A non-numeric segment and
    /// an unknown id both collapse to the same `NotFound`.
    pub fn get(&self, id: &str) -> AppResult<Product> {
        if let Ok(id) = id.parse::<u64>() {
            if let Some(product) = self.products.iter().find(|p| p.id == id) {
                return Ok(product.clone());
            }
        }
        Err(AppError::NotFound(
            "Could not find product with that id.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;

    fn widget() -> NewProduct {
        serde_json::from_str(
            r#"{"name":"Widget","description":"d","longdescription":"ld","price":9.99,"image":""}"#,
        )
        .unwrap()
    }

    #[test]
    fn seeded_store_holds_four_records_in_order() {
        let store = CatalogStore::seeded();
        let products = store.list();
        assert_eq!(products.len(), 4);
        let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(products[0].name, "Generic Item 1");
        assert_eq!(products[0].description, "A generic item we sell");
        assert_eq!(
            products[0].long_description,
            "A longer description of the generic item we sell"
        );
        assert!((products[0].price - 56.99).abs() < 1e-9);
        assert!((products[3].price - 59.99).abs() < 1e-9);
    }

    #[test]
    fn add_assigns_ids_from_five_strictly_increasing() {
        let mut store = CatalogStore::seeded();
        let a = store.add(widget());
        let b = store.add(widget());
        let c = store.add(widget());
        assert_eq!(a.id, 5);
        assert_eq!(b.id, 6);
        assert_eq!(c.id, 7);
        assert_eq!(store.list().len(), 7);
    }

    #[test]
    fn add_ignores_client_supplied_id() {
        let mut store = CatalogStore::seeded();
        let payload: NewProduct =
            serde_json::from_str(r#"{"id": 42, "name": "Widget"}"#).unwrap();
        let stored = store.add(payload);
        assert_eq!(stored.id, 5);
    }

    #[test]
    fn add_then_get_round_trips() {
        let mut store = CatalogStore::seeded();
        let added = store.add(widget());
        let fetched = store.get(&added.id.to_string()).unwrap();
        assert_eq!(fetched, added);
    }

    #[test]
    fn add_appends_to_the_end() {
        let mut store = CatalogStore::seeded();
        let added = store.add(widget());
        let products = store.list();
        assert_eq!(products.last().unwrap(), &added);
    }

    #[test]
    fn get_unknown_and_malformed_ids_are_not_found() {
        let store = CatalogStore::seeded();
        for id in ["0", "9999", "abc", "", "-1"] {
            let err = store.get(id).unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "id {id:?}");
        }
    }

    #[test]
    fn list_returns_detached_clones() {
        let store = CatalogStore::seeded();
        let mut products = store.list();
        products[0].name = "Mutated".to_string();
        products.clear();
        assert_eq!(store.list()[0].name, "Generic Item 1");
        assert_eq!(store.list().len(), 4);
    }

    #[tokio::test]
    async fn concurrent_adds_produce_distinct_increasing_ids() {
        const WRITERS: usize = 32;

        let store = Arc::new(RwLock::new(CatalogStore::seeded()));

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.write().await.add(widget()).id })
            })
            .collect();

        let mut ids = Vec::with_capacity(WRITERS);
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), WRITERS, "assigned ids must be pairwise distinct");
        assert_eq!(*ids.first().unwrap(), 5);
        assert_eq!(*ids.last().unwrap(), 4 + WRITERS as u64);
        assert_eq!(store.read().await.list().len(), 4 + WRITERS);
    }
}
