use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::region::RunResult;

/// Maps raw product labels reported by a tool to main product classes
#[derive(Debug, Clone, Default)]
pub struct ProductMapping {
    product_to_class: HashMap<String, String>,
}

impl ProductMapping {
    /// Build a mapping from `class -> [products]` entries
    pub fn from_classes(classes: &BTreeMap<String, Vec<String>>) -> Self {
        let product_to_class = classes
            .iter()
            .flat_map(|(class, products)| {
                products
                    .iter()
                    .map(move |product| (product.clone(), class.clone()))
            })
            .collect();
        Self { product_to_class }
    }

    pub fn is_empty(&self) -> bool {
        self.product_to_class.is_empty()
    }

    /// Map labels to their classes; unmapped labels stand for themselves.
    /// The result is deduplicated and sorted.
    pub fn map_products(&self, products: &[String]) -> Vec<String> {
        products
            .iter()
            .map(|p| self.product_to_class.get(p).unwrap_or(p).clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Replace the product types of every region in `run` by their classes
    pub fn apply(&self, run: &mut RunResult) {
        if self.is_empty() {
            return;
        }
        for region in &mut run.regions {
            region.product_types = self.map_products(&region.product_types);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::Region;

    fn mapping() -> ProductMapping {
        let mut classes = BTreeMap::new();
        classes.insert(
            "NRP".to_string(),
            vec!["NRPS".to_string(), "NRPS-like".to_string()],
        );
        classes.insert("PKS".to_string(), vec!["T1PKS".to_string()]);
        ProductMapping::from_classes(&classes)
    }

    #[test]
    fn test_map_products() {
        let mapped = mapping().map_products(&[
            "NRPS-like".to_string(),
            "NRPS".to_string(),
            "terpene".to_string(),
        ]);
        assert_eq!(mapped, vec!["NRP", "terpene"]);
    }

    #[test]
    fn test_apply_to_run() {
        let mut run = RunResult::new("a.tsv", "a", "antismash").with_regions(vec![
            Region::new("r1", "chr1", 0, 10).with_product_types(["T1PKS", "NRPS"]),
        ]);
        mapping().apply(&mut run);
        assert_eq!(run.regions[0].product_types, vec!["NRP", "PKS"]);
        assert_eq!(run.regions[0].product_group(), "Hybrid");
    }
}
