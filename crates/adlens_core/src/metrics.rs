//! Recognized metric columns.

use std::fmt;

use serde::Serialize;

/// Column whose value identifies the product a row belongs to.
pub const GROUPING_COLUMN: &str = "Nome do Produto";

/// A metric column the aggregator extracts.
///
/// Declaration order is the canonical order used for iteration and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MetricName {
    #[serde(rename = "Nome do Produto Anúncio")]
    AdProductName,
    #[serde(rename = "Localização / Palavra-Chave")]
    PlacementKeyword,
    #[serde(rename = "Impressão")]
    Impressions,
    #[serde(rename = "Cliques")]
    Clicks,
    #[serde(rename = "CTR")]
    Ctr,
    #[serde(rename = "Conversões")]
    Conversions,
    #[serde(rename = "Conversões Diretas")]
    DirectConversions,
    #[serde(rename = "Taxa de Conversão")]
    ConversionRate,
    #[serde(rename = "Taxa de Conversão Direta")]
    DirectConversionRate,
    #[serde(rename = "VBM")]
    Vbm,
    #[serde(rename = "Receita direta")]
    DirectRevenue,
    #[serde(rename = "Despesas")]
    Spend,
    #[serde(rename = "ROAS")]
    Roas,
    #[serde(rename = "ROAS Direto")]
    DirectRoas,
    #[serde(rename = "ACOS")]
    Acos,
    #[serde(rename = "ACOS Direto")]
    DirectAcos,
}

impl MetricName {
    pub const ALL: [MetricName; 16] = [
        MetricName::AdProductName,
        MetricName::PlacementKeyword,
        MetricName::Impressions,
        MetricName::Clicks,
        MetricName::Ctr,
        MetricName::Conversions,
        MetricName::DirectConversions,
        MetricName::ConversionRate,
        MetricName::DirectConversionRate,
        MetricName::Vbm,
        MetricName::DirectRevenue,
        MetricName::Spend,
        MetricName::Roas,
        MetricName::DirectRoas,
        MetricName::Acos,
        MetricName::DirectAcos,
    ];

    /// Ratio metrics kept out of the bar chart so they don't share an axis
    /// with absolute counts.
    pub const RATIO: [MetricName; 4] = [
        MetricName::Roas,
        MetricName::DirectRoas,
        MetricName::Acos,
        MetricName::DirectAcos,
    ];

    /// Exact column header for this metric.
    pub fn column(&self) -> &'static str {
        match self {
            MetricName::AdProductName => "Nome do Produto Anúncio",
            MetricName::PlacementKeyword => "Localização / Palavra-Chave",
            MetricName::Impressions => "Impressão",
            MetricName::Clicks => "Cliques",
            MetricName::Ctr => "CTR",
            MetricName::Conversions => "Conversões",
            MetricName::DirectConversions => "Conversões Diretas",
            MetricName::ConversionRate => "Taxa de Conversão",
            MetricName::DirectConversionRate => "Taxa de Conversão Direta",
            MetricName::Vbm => "VBM",
            MetricName::DirectRevenue => "Receita direta",
            MetricName::Spend => "Despesas",
            MetricName::Roas => "ROAS",
            MetricName::DirectRoas => "ROAS Direto",
            MetricName::Acos => "ACOS",
            MetricName::DirectAcos => "ACOS Direto",
        }
    }

    /// Look up a metric by its exact column header (case and accent sensitive).
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column() == column)
    }

    pub fn is_ratio(&self) -> bool {
        Self::RATIO.contains(self)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (idx, metric) in MetricName::ALL.iter().enumerate() {
            assert_eq!(metric.index(), idx);
        }
    }

    #[test]
    fn test_column_round_trip() {
        for metric in MetricName::ALL {
            assert_eq!(MetricName::from_column(metric.column()), Some(metric));
        }
    }

    #[test]
    fn test_from_column_is_exact() {
        assert_eq!(MetricName::from_column("Impressão"), Some(MetricName::Impressions));
        assert_eq!(MetricName::from_column("Impressao"), None);
        assert_eq!(MetricName::from_column("cliques"), None);
        assert_eq!(MetricName::from_column(" CTR"), None);
    }

    #[test]
    fn test_grouping_column_is_not_a_metric() {
        assert_eq!(MetricName::from_column(GROUPING_COLUMN), None);
    }

    #[test]
    fn test_ratio_metrics() {
        let ratios: Vec<_> = MetricName::ALL.iter().filter(|m| m.is_ratio()).collect();
        assert_eq!(ratios.len(), 4);
        assert!(MetricName::Acos.is_ratio());
        assert!(!MetricName::Ctr.is_ratio());
    }

    #[test]
    fn test_serializes_as_column_header() {
        let json = serde_json::to_string(&MetricName::DirectConversionRate).unwrap();
        assert_eq!(json, "\"Taxa de Conversão Direta\"");
    }
}
