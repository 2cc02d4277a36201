use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use quotekit_core::{DomainError, DomainResult, Entity};

use crate::product::{ProductDescriptor, ProductId};

/// A named, ordered group of products (e.g. "Clinical").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    products: Vec<ProductDescriptor>,
}

impl Category {
    pub fn new(name: impl Into<String>, products: Vec<ProductDescriptor>) -> Self {
        Self {
            name: name.into(),
            products,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn products(&self) -> &[ProductDescriptor] {
        &self.products
    }
}

/// The product catalog.
///
/// Invariants (checked by [`Catalog::new`]):
/// - at least one category, and every category has at least one product
/// - category names and product names are non-blank
/// - product ids are unique across the whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Validate and build a catalog, failing fast on the first violation.
    pub fn new(categories: Vec<Category>) -> DomainResult<Self> {
        if categories.is_empty() {
            return Err(DomainError::validation("catalog has no categories"));
        }

        let mut seen: HashSet<&ProductId> = HashSet::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(DomainError::validation("category name cannot be empty"));
            }
            if category.products.is_empty() {
                return Err(DomainError::validation(format!(
                    "category '{}' has no products",
                    category.name
                )));
            }
            for product in &category.products {
                if product.id().as_str().trim().is_empty() {
                    return Err(DomainError::invalid_id(format!(
                        "empty product id in category '{}'",
                        category.name
                    )));
                }
                if product.name().trim().is_empty() {
                    return Err(DomainError::validation(format!(
                        "product '{}' has no display name",
                        product.id()
                    )));
                }
                if !seen.insert(product.id()) {
                    return Err(DomainError::invariant(format!(
                        "duplicate product id '{}' (category '{}')",
                        product.id(),
                        category.name
                    )));
                }
            }
        }

        tracing::debug!(
            categories = categories.len(),
            products = seen.len(),
            "catalog validated"
        );

        Ok(Self { categories })
    }

    /// The catalog shipped with the quote tool.
    pub fn standard() -> Self {
        const STANDARD: &[(&str, &[(&str, &str)])] = &[
            (
                "Clinical",
                &[
                    ("gp-premier", "GP - Bp Premier"),
                    ("specialist", "Specialist - Bp VIPnet"),
                    ("allied", "Allied - Bp Allied"),
                    ("bp-omni", "Bp Omni"),
                ],
            ),
            ("Mobile", &[("mobile", "Best Practice Mobile")]),
            ("Communication", &[("comms", "Bp Comms"), ("sms", "Bp SMS")]),
            (
                "Patient Engagement",
                &[
                    ("health-app", "Best Health App"),
                    ("health-booking", "Best Health Booking"),
                ],
            ),
        ];

        let categories = STANDARD
            .iter()
            .map(|(name, products)| {
                Category::new(
                    *name,
                    products
                        .iter()
                        .map(|(id, label)| {
                            ProductDescriptor::new(ProductId(id.to_string()), *label)
                        })
                        .collect(),
                )
            })
            .collect();

        // Fixed data, known to satisfy the invariants.
        Self { categories }
    }

    /// Parse a catalog from its JSON form (an array of categories).
    ///
    /// Malformed JSON is a validation error; broken invariants keep the error
    /// [`Catalog::new`] reports.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let categories: Vec<Category> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid catalog: {e}")))?;
        Self::new(categories)
    }

    /// Categories in display order (`listCategories`).
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All products, flattened in display order.
    pub fn products(&self) -> impl Iterator<Item = &ProductDescriptor> {
        self.categories.iter().flat_map(|c| c.products.iter())
    }

    pub fn len(&self) -> usize {
        self.products().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &ProductId) -> Option<&ProductDescriptor> {
        self.products().find(|p| p.id() == id)
    }

    /// Product at 0-based position in [`Catalog::products`] order.
    pub fn nth(&self, index: usize) -> Option<&ProductDescriptor> {
        self.products().nth(index)
    }
}

impl TryFrom<Vec<Category>> for Catalog {
    type Error = DomainError;

    fn try_from(categories: Vec<Category>) -> Result<Self, Self::Error> {
        Self::new(categories)
    }
}

impl From<Catalog> for Vec<Category> {
    fn from(catalog: Catalog) -> Self {
        catalog.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[test]
    fn standard_catalog_lists_four_categories_in_order() {
        let catalog = Catalog::standard();
        let names: Vec<&str> = catalog.categories().iter().map(Category::name).collect();
        assert_eq!(
            names,
            vec!["Clinical", "Mobile", "Communication", "Patient Engagement"]
        );
        let sizes: Vec<usize> = catalog
            .categories()
            .iter()
            .map(|c| c.products().len())
            .collect();
        assert_eq!(sizes, vec![4, 1, 2, 2]);
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn standard_catalog_satisfies_invariants() {
        let catalog = Catalog::standard();
        let rebuilt = Catalog::new(catalog.categories().to_vec()).unwrap();
        assert_eq!(rebuilt, catalog);
    }

    #[test]
    fn find_and_nth_agree_with_display_order() {
        let catalog = Catalog::standard();
        let omni = catalog.find(&pid("bp-omni")).unwrap();
        assert_eq!(omni.name(), "Bp Omni");
        assert_eq!(catalog.nth(3), Some(omni));
        assert_eq!(catalog.nth(4).unwrap().name(), "Best Practice Mobile");
        assert!(catalog.nth(9).is_none());
        assert!(catalog.find(&pid("unknown")).is_none());
    }

    #[test]
    fn duplicate_ids_across_categories_fail_fast() {
        let err = Catalog::new(vec![
            Category::new("A", vec![ProductDescriptor::new(pid("x"), "X")]),
            Category::new("B", vec![ProductDescriptor::new(pid("x"), "X again")]),
        ])
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("'x'")),
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn empty_category_is_rejected() {
        let err = Catalog::new(vec![Category::new("Empty", vec![])]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(matches!(
            Catalog::new(vec![]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn json_catalog_is_validated_on_load() {
        let ok = r#"[{"name":"Clinical","products":[
            {"id":"a","name":"Alpha"},
            {"id":"b","name":"Beta"}
        ]}]"#;
        let catalog = Catalog::from_json(ok).unwrap();
        assert_eq!(catalog.len(), 2);

        let dup = r#"[{"name":"C","products":[
            {"id":"a","name":"Alpha"},
            {"id":"a","name":"Again"}
        ]}]"#;
        let err = Catalog::from_json(dup).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("duplicate product id")),
            other => panic!("expected InvariantViolation, got {other:?}"),
        }

        let malformed = r#"{"name":"not a list"}"#;
        assert!(matches!(
            Catalog::from_json(malformed),
            Err(DomainError::Validation(msg)) if msg.starts_with("invalid catalog")
        ));

        let blank = r#"[{"name":"C","products":[{"id":" ","name":"Blank"}]}]"#;
        assert!(Catalog::from_json(blank).is_err());
    }

    #[test]
    fn json_form_round_trips_through_serde() {
        let catalog = Catalog::standard();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), catalog);
    }
}
