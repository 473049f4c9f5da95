use std::collections::HashMap;

use crate::model::LineItem;

/// One contribution to an aggregation pass: a recipe's line items together
/// with the servings they were written for and the servings being requested.
#[derive(Debug, Clone, Copy)]
pub struct AggregationSource<'a> {
    pub items: &'a [LineItem],
    pub source_servings: f64,
    pub requested_servings: f64,
}

impl<'a> AggregationSource<'a> {
    pub fn new(items: &'a [LineItem], source_servings: f64, requested_servings: f64) -> Self {
        AggregationSource {
            items,
            source_servings,
            requested_servings,
        }
    }

    /// Scaling multiplier for this source. A zero or negative source serving
    /// count falls back to 1.0 rather than dividing by zero; the requested
    /// count is taken as-is (callers own the guard against nonpositive
    /// requests).
    fn multiplier(&self) -> f64 {
        if self.source_servings > 0.0 {
            self.requested_servings / self.source_servings
        } else {
            1.0
        }
    }
}

/// Round a quantity to 2 decimal places so accumulated floats look like
/// plausible manually-entered values.
pub fn round_quantity(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale each source's line items by its servings ratio and merge entries
/// sharing the same (item_id, unit) key. Items with the same ingredient but
/// different units are kept separate; unit conversion is out of scope.
///
/// Output order is the insertion order of each key's first occurrence, so the
/// result is deterministic for deterministic input order. Never errors:
/// unresolved ingredient ids pass through untouched (data-quality reporting
/// is the validator's job).
pub fn aggregate(sources: &[AggregationSource]) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::new();
    let mut index_by_key: HashMap<(i64, String), usize> = HashMap::new();

    for source in sources {
        let multiplier = source.multiplier();
        for item in source.items {
            let scaled = item.quantity * multiplier;
            let key = (item.item_id, item.unit.clone());
            match index_by_key.get(&key) {
                Some(&idx) => merged[idx].quantity += scaled,
                None => {
                    index_by_key.insert(key, merged.len());
                    merged.push(LineItem {
                        item_id: item.item_id,
                        quantity: scaled,
                        unit: item.unit.clone(),
                    });
                }
            }
        }
    }

    for item in &mut merged {
        item.quantity = round_quantity(item.quantity);
    }
    merged
}
