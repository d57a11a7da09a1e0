use serde::Deserialize;
use serde::Serialize;

/// A product category as served by `GET categories/`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A catalog product. Fully replaced on every successful search; never
/// merged with a previous result set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// One page of `GET product_search/` results.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    pub results: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

/// Outgoing parameters for `GET product_search/`.
///
/// Search text takes precedence over a category filter: when `q` is
/// non-empty, `category_id` is never put on the wire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductQuery {
    pub q: Option<String>,
    pub category_id: Option<i64>,
    pub page: u32,
}

impl ProductQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        match self.q.as_deref() {
            Some(q) if !q.is_empty() => pairs.push(("q", q.to_string())),
            _ => {
                if let Some(id) = self.category_id {
                    pairs.push(("category_id", id.to_string()));
                }
            }
        }
        pairs.push(("page", self.page.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_text_suppresses_category_on_the_wire() {
        let query = ProductQuery {
            q: Some("running shoes".to_string()),
            category_id: Some(7),
            page: 2,
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("q", "running shoes".to_string()),
                ("page", "2".to_string())
            ]
        );
    }

    #[test]
    fn category_only_query() {
        let query = ProductQuery {
            q: None,
            category_id: Some(7),
            page: 1,
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("category_id", "7".to_string()),
                ("page", "1".to_string())
            ]
        );
    }

    #[test]
    fn empty_search_falls_back_to_category() {
        let query = ProductQuery {
            q: Some(String::new()),
            category_id: Some(3),
            page: 1,
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("category_id", "3".to_string()),
                ("page", "1".to_string())
            ]
        );
    }

    #[test]
    fn unfiltered_query_sends_only_the_page() {
        let query = ProductQuery {
            page: 4,
            ..Default::default()
        };
        assert_eq!(query.pairs(), vec![("page", "4".to_string())]);
    }

    #[test]
    fn product_decodes_without_optional_fields() {
        let product: Product = serde_json::from_str(
            r#"{
                "product_id": 11,
                "name": "Trail Runner",
                "description": "Lightweight trail shoe",
                "price": 129.99,
                "quantity": 4
            }"#,
        )
        .expect("product should decode");
        assert_eq!(product.image_url, None);
        assert_eq!(product.category_id, None);
    }
}
