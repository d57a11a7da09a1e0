use std::collections::HashMap;
use storefront_backend_client::Category;

/// Fallback label for unknown category ids.
const UNKNOWN_CATEGORY: &str = "Category";

/// Read-only id → name index over the categories fetched at startup.
///
/// Preserves server-provided order. A failed categories fetch leaves the
/// index empty; lookups then fall back to a generic label and product
/// browsing continues.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    by_id: HashMap<i64, usize>,
}

impl CategoryIndex {
    pub fn new(categories: Vec<Category>) -> Self {
        let by_id = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (category.id, idx))
            .collect();
        Self { categories, by_id }
    }

    /// Display name for a category id, `"Category"` when unknown.
    pub fn name_of(&self, id: i64) -> &str {
        self.by_id
            .get(&id)
            .map_or(UNKNOWN_CATEGORY, |&idx| &self.categories[idx].name)
    }

    /// All categories in server order.
    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            image_url: None,
            description: None,
        }
    }

    #[test]
    fn preserves_server_order() {
        let index = CategoryIndex::new(vec![category(9, "Shoes"), category(1, "Bags")]);
        let names: Vec<&str> = index.list().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Shoes", "Bags"]);
    }

    #[test]
    fn unknown_id_falls_back_to_generic_label() {
        let index = CategoryIndex::new(vec![category(9, "Shoes")]);
        assert_eq!(index.name_of(9), "Shoes");
        assert_eq!(index.name_of(404), "Category");
    }

    #[test]
    fn empty_index_is_usable() {
        let index = CategoryIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.name_of(1), "Category");
    }
}
