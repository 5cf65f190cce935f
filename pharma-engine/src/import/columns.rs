//! Header → field mapping for imported files
//!
//! A declarative alias table, canonicalized once. Matching is insensitive to
//! case, spaces and punctuation. Exact alias matches win; remaining headers
//! then fall back to substring matching in table order, so the more
//! specific fields (free quantity, expiry month) are claimed before the
//! generic ones (quantity, expiry).

use std::collections::HashMap;
use std::sync::LazyLock;

/// Import target of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportField {
    ProductName,
    Batch,
    /// Combined expiry text, e.g. `08/27`
    Expiry,
    ExpiryMonth,
    ExpiryYear,
    Pack,
    Quantity,
    FreeQuantity,
    Mrp,
    Rate,
    DiscountPercent,
    SchemePercent,
    DiscountAmount,
    GstPercent,
}

/// Aliases per field; order matters for substring matching
const ALIASES: &[(ImportField, &[&str])] = &[
    (
        ImportField::FreeQuantity,
        &["free", "free qty", "free quantity", "bonus", "fqty", "sch qty"],
    ),
    (
        ImportField::Quantity,
        &["qty", "quantity", "strips", "units", "nos"],
    ),
    (
        ImportField::ExpiryMonth,
        &["exp month", "expiry month", "exp mm", "month"],
    ),
    (
        ImportField::ExpiryYear,
        &["exp year", "expiry year", "exp yy", "year"],
    ),
    (
        ImportField::Expiry,
        &["exp", "expiry", "exp date", "expiry date", "expiry dt"],
    ),
    (
        ImportField::GstPercent,
        &["gst", "gst %", "gst rate", "tax", "tax %", "igst"],
    ),
    (ImportField::Mrp, &["mrp", "m.r.p", "max retail price"]),
    (
        ImportField::Rate,
        &["rate", "ptr", "price", "purchase rate", "pur rate", "cost"],
    ),
    (
        ImportField::SchemePercent,
        &["scheme", "scheme %", "sch %", "scheme disc"],
    ),
    (
        ImportField::DiscountAmount,
        &["disc amt", "discount amount", "disc amount", "disc rs"],
    ),
    (
        ImportField::DiscountPercent,
        &["disc", "disc %", "discount", "discount %", "cd %"],
    ),
    (
        ImportField::Batch,
        &["batch", "batch no", "batch number", "bno", "lot"],
    ),
    (ImportField::Pack, &["pack", "packing", "pack size", "pkg"]),
    (
        ImportField::ProductName,
        &["product", "product name", "item", "item name", "medicine", "name", "description"],
    ),
];

/// Shortest alias eligible for substring matching (keeps `nos` out of `nosal`-like noise)
const MIN_SUBSTRING_ALIAS: usize = 3;

/// Lowercase and keep only letters and digits
pub fn canonical(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

struct AliasTable {
    /// Canonical alias → field
    exact: HashMap<String, ImportField>,
    /// Canonical aliases in table order, for substring matching
    ordered: Vec<(ImportField, String)>,
}

static ALIAS_TABLE: LazyLock<AliasTable> = LazyLock::new(|| {
    let mut exact = HashMap::new();
    let mut ordered = Vec::new();
    for (field, aliases) in ALIASES {
        for alias in *aliases {
            let key = canonical(alias);
            exact.entry(key.clone()).or_insert(*field);
            ordered.push((*field, key));
        }
    }
    AliasTable { exact, ordered }
});

/// Resolved column positions of one header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: HashMap<ImportField, usize>,
}

impl ColumnMap {
    /// Map a header row. Each field takes the first column that matches it
    /// and each column maps to at most one field.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let table = &*ALIAS_TABLE;
        let canon: Vec<String> = headers.iter().map(|h| canonical(h.as_ref())).collect();
        let mut columns: HashMap<ImportField, usize> = HashMap::new();
        let mut claimed = vec![false; canon.len()];

        for (index, header) in canon.iter().enumerate() {
            if let Some(field) = table.exact.get(header)
                && !columns.contains_key(field)
            {
                columns.insert(*field, index);
                claimed[index] = true;
            }
        }

        for (field, alias) in &table.ordered {
            if columns.contains_key(field) || alias.len() < MIN_SUBSTRING_ALIAS {
                continue;
            }
            let found = canon
                .iter()
                .enumerate()
                .find(|(index, header)| !claimed[*index] && header.contains(alias.as_str()));
            if let Some((index, _)) = found {
                columns.insert(*field, index);
                claimed[index] = true;
            }
        }

        Self { columns }
    }

    pub fn get(&self, field: ImportField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: ImportField) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(" Free Qty. "), "freeqty");
        assert_eq!(canonical("GST %"), "gst");
        assert_eq!(canonical("M.R.P"), "mrp");
    }

    #[test]
    fn test_common_distributor_layout() {
        let headers = [
            "Item Name", "Packing", "Batch No", "Exp", "Qty", "Free", "MRP", "PTR", "Disc %", "GST %",
        ];
        let map = ColumnMap::from_headers(&headers);

        assert_eq!(map.get(ImportField::ProductName), Some(0));
        assert_eq!(map.get(ImportField::Pack), Some(1));
        assert_eq!(map.get(ImportField::Batch), Some(2));
        assert_eq!(map.get(ImportField::Expiry), Some(3));
        assert_eq!(map.get(ImportField::Quantity), Some(4));
        assert_eq!(map.get(ImportField::FreeQuantity), Some(5));
        assert_eq!(map.get(ImportField::Mrp), Some(6));
        assert_eq!(map.get(ImportField::Rate), Some(7));
        assert_eq!(map.get(ImportField::DiscountPercent), Some(8));
        assert_eq!(map.get(ImportField::GstPercent), Some(9));
    }

    #[test]
    fn test_substring_fallback_prefers_specific_fields() {
        let headers = ["Medicine Description", "Strips Ordered", "Free Strips", "Expiry Month", "Expiry Year"];
        let map = ColumnMap::from_headers(&headers);

        assert_eq!(map.get(ImportField::ProductName), Some(0));
        assert_eq!(map.get(ImportField::FreeQuantity), Some(2));
        assert_eq!(map.get(ImportField::Quantity), Some(1));
        assert_eq!(map.get(ImportField::ExpiryMonth), Some(3));
        assert_eq!(map.get(ImportField::ExpiryYear), Some(4));
        assert!(!map.contains(ImportField::Expiry));
    }

    #[test]
    fn test_unknown_headers_ignored() {
        let map = ColumnMap::from_headers(&["Sr", "HSN", "Remarks"]);
        assert!(map.is_empty());
    }
}
