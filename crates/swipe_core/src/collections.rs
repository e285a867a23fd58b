//! Cart and favorites: two independent insertion-ordered sets of products.

use std::collections::HashSet;

use shared::domain::{CollectionKind, Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct Collection {
    items: Vec<Product>,
    ids: HashSet<ProductId>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `product` unless one with the same id is already present.
    pub fn add(&mut self, product: Product) -> bool {
        if !self.ids.insert(product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    pub fn remove(&mut self, product_id: ProductId) -> bool {
        if !self.ids.remove(&product_id) {
            return false;
        }
        self.items.retain(|item| item.id != product_id);
        true
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.ids.contains(&product_id)
    }

    pub fn list(&self) -> Vec<Product> {
        self.items.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Owns both collections. Trusts callers to pass only catalog products.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    cart: Collection,
    favorites: Collection,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self, kind: CollectionKind) -> &Collection {
        match kind {
            CollectionKind::Cart => &self.cart,
            CollectionKind::Favorites => &self.favorites,
        }
    }

    fn collection_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        match kind {
            CollectionKind::Cart => &mut self.cart,
            CollectionKind::Favorites => &mut self.favorites,
        }
    }

    pub fn add(&mut self, kind: CollectionKind, product: Product) -> bool {
        self.collection_mut(kind).add(product)
    }

    pub fn remove(&mut self, kind: CollectionKind, product_id: ProductId) -> bool {
        self.collection_mut(kind).remove(product_id)
    }

    pub fn contains(&self, kind: CollectionKind, product_id: ProductId) -> bool {
        self.collection(kind).contains(product_id)
    }

    pub fn list(&self, kind: CollectionKind) -> Vec<Product> {
        self.collection(kind).list()
    }
}

#[cfg(test)]
#[path = "tests/collections_tests.rs"]
mod tests;
