//! Behaviour switches for gradient table writes.

/// Index assignment used by [`crate::DwiValidator::set_gradient_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableOrder {
    /// Entry `i` of the input is stored at gradient index `i`.
    #[default]
    Forward,
    /// Entry `i` is stored at index `len - 1 - i`, matching writers that drain
    /// the table from its tail.
    Reversed,
}

/// How leftover gradient keys are removed after a table write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleCleanup {
    /// Erase every gradient key whose index is at or beyond the new length,
    /// including non-canonical keys.
    #[default]
    FullRescan,
    /// Erase indices `len, len + 1, ...` and stop at the first absent one.
    Contiguous,
}

/// Configuration for a [`crate::DwiValidator`].
///
/// ```
/// use dwimeta::{StaleCleanup, TableOrder, ValidatorConfig};
///
/// let config = ValidatorConfig::new()
///     .table_order(TableOrder::Reversed)
///     .stale_cleanup(StaleCleanup::Contiguous);
/// assert_eq!(config.table_order, TableOrder::Reversed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorConfig {
    /// Index assignment for table writes.
    pub table_order: TableOrder,
    /// Stale-key removal after table writes.
    pub stale_cleanup: StaleCleanup,
}

impl ValidatorConfig {
    /// Default configuration: forward order, full rescan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table write order.
    pub fn table_order(mut self, order: TableOrder) -> Self {
        self.table_order = order;
        self
    }

    /// Set the stale-key cleanup mode.
    pub fn stale_cleanup(mut self, cleanup: StaleCleanup) -> Self {
        self.stale_cleanup = cleanup;
        self
    }

    /// Configuration reproducing legacy writers: reversed order and
    /// contiguous cleanup.
    pub fn legacy() -> Self {
        Self {
            table_order: TableOrder::Reversed,
            stale_cleanup: StaleCleanup::Contiguous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.table_order, TableOrder::Forward);
        assert_eq!(config.stale_cleanup, StaleCleanup::FullRescan);
        assert_eq!(config, ValidatorConfig::new());
    }

    #[test]
    fn test_builder() {
        let config = ValidatorConfig::new().stale_cleanup(StaleCleanup::Contiguous);
        assert_eq!(config.table_order, TableOrder::Forward);
        assert_eq!(config.stale_cleanup, StaleCleanup::Contiguous);

        let legacy = ValidatorConfig::legacy();
        assert_eq!(
            legacy,
            ValidatorConfig::new()
                .table_order(TableOrder::Reversed)
                .stale_cleanup(StaleCleanup::Contiguous)
        );
    }
}
