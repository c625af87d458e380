/// Counters from one enrichment run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichStats {
    /// Records in the loaded collection.
    pub total: usize,
    /// Records that needed enrichment (after `limit`).
    pub selected: usize,
    /// Records a fetch was attempted for.
    pub processed: usize,
    pub enriched: usize,
    pub not_found: usize,
    /// Still rate limited after the last retry.
    pub rate_limited: usize,
    /// Transient or malformed.
    pub failed: usize,
    /// Selected but without a usable external id.
    pub skipped_missing_id: usize,
    /// Saves written, including the final one.
    pub checkpoints: usize,
}

impl EnrichStats {
    /// Processed records that were left unchanged.
    pub fn unresolved(&self) -> usize {
        self.not_found + self.rate_limited + self.failed
    }

    /// Records already complete when the run started.
    pub fn already_complete(&self) -> usize {
        self.total.saturating_sub(self.selected)
    }
}

impl std::fmt::Display for EnrichStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} enriched, {} not found, {} rate limited, {} failed, {} skipped (of {} selected, {} total)",
            self.enriched,
            self.not_found,
            self.rate_limited,
            self.failed,
            self.skipped_missing_id,
            self.selected,
            self.total
        )
    }
}
