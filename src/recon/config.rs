//! Tunable tolerances for the detection pipeline.
//!
//! Grounded in the teacher's own config builders
//! (`text::structured::types::StructuredDataConfig`,
//! `text::table_detection::TableDetectionConfig`): a plain struct with a
//! `Default` matching the spec's literal constants, plus `with_*` builder
//! methods so callers can tune without touching engine internals.

/// Configuration for [`crate::recon::detect_tables`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReconConfig {
    /// Minimum grid positions required on each axis to attempt detection
    /// (spec.md §4.2: "declared a candidate table only if both axes yield
    /// at least 3 positions").
    pub min_dividers_per_axis: usize,

    /// Minimum W and H after simplification; below this the candidate is
    /// discarded (spec.md §4.6 termination rule).
    pub min_grid_dimension: usize,

    /// Distance, in page units, within which two vector blocks' abutting
    /// edges are considered touching for the harvester's merge-and-retry
    /// heuristic (spec.md §4.4: "within one unit").
    pub rule_merge_tolerance: f64,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            min_dividers_per_axis: 3,
            min_grid_dimension: 3,
            rule_merge_tolerance: 1.0,
        }
    }
}

impl ReconConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_dividers_per_axis(mut self, n: usize) -> Self {
        self.min_dividers_per_axis = n;
        self
    }

    pub fn with_min_grid_dimension(mut self, n: usize) -> Self {
        self.min_grid_dimension = n;
        self
    }

    pub fn with_rule_merge_tolerance(mut self, tol: f64) -> Self {
        self.rule_merge_tolerance = tol;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_constants() {
        let cfg = ReconConfig::default();
        assert_eq!(cfg.min_dividers_per_axis, 3);
        assert_eq!(cfg.min_grid_dimension, 3);
        assert_eq!(cfg.rule_merge_tolerance, 1.0);
    }

    #[test]
    fn builder_methods_override_fields() {
        let cfg = ReconConfig::new()
            .with_min_dividers_per_axis(4)
            .with_min_grid_dimension(2)
            .with_rule_merge_tolerance(2.5);
        assert_eq!(cfg.min_dividers_per_axis, 4);
        assert_eq!(cfg.min_grid_dimension, 2);
        assert_eq!(cfg.rule_merge_tolerance, 2.5);
    }
}
