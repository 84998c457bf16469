//! Group rows by product and collect their normalized metrics.

use crate::error::AggregationError;
use crate::metrics::{GROUPING_COLUMN, MetricName};
use crate::model::{MetricsByProduct, NormalizedValue, ProductKey, Table};
use crate::normalize::normalize;

/// Build the per-product metrics map of a table.
///
/// Products keep the order in which they first appear. For each product,
/// every recognized metric column present in the table holds the value of
/// the last row seen for that product; nothing is summed or averaged.
///
/// Any malformed percent value aborts the whole table.
pub fn aggregate(table: &Table) -> Result<MetricsByProduct, AggregationError> {
    if !table.has_column(GROUPING_COLUMN) {
        return Err(AggregationError::MissingGroupingColumn);
    }

    let present: Vec<MetricName> = MetricName::ALL
        .into_iter()
        .filter(|m| table.has_column(m.column()))
        .collect();

    let mut by_product = MetricsByProduct::new();

    for (idx, row) in table.rows().iter().enumerate() {
        let key = row
            .get(GROUPING_COLUMN)
            .map(ProductKey::from)
            .unwrap_or_else(|| ProductKey::new(""));

        let mut values = Vec::with_capacity(present.len());
        for &metric in &present {
            let value = match row.get(metric.column()) {
                Some(cell) => {
                    normalize(cell).map_err(|source| AggregationError::NumericFormat {
                        row: idx,
                        product: key.to_string(),
                        metric,
                        source,
                    })?
                }
                None => NormalizedValue::Missing,
            };
            values.push((metric, value));
        }

        // Re-inserting an existing metric keeps its position and replaces the value
        by_product.entry(key).or_default().extend(values);
    }

    tracing::debug!(
        products = by_product.len(),
        rows = table.row_count(),
        metrics = present.len(),
        "Aggregated product metrics"
    );

    Ok(by_product)
}
