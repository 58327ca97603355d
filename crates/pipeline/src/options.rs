use rangesync_core::filter::DEFAULT_DATE_COLUMN;
use rangesync_core::location::{ValueInputMode, ValueRenderMode};
use rangesync_core::normalize::NormalizeStrategy;

/// Default destination range wiped before each write.
pub const DEFAULT_CLEAR_RANGE: &str = "A2:Z";

/// Default top-left cell of the written block (first row below the header).
pub const DEFAULT_ANCHOR_CELL: &str = "A2";

/// Per-deployment pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub normalize: NormalizeStrategy,
    pub render: ValueRenderMode,
    /// Requested write mode; see [`PipelineOptions::input_mode`].
    pub write_input: ValueInputMode,
    /// Zero-based column holding the filter date.
    pub date_column: usize,
    pub clear_range: String,
    pub anchor_cell: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeStrategy::default(),
            render: ValueRenderMode::default(),
            write_input: ValueInputMode::default(),
            date_column: DEFAULT_DATE_COLUMN,
            clear_range: DEFAULT_CLEAR_RANGE.to_string(),
            anchor_cell: DEFAULT_ANCHOR_CELL.to_string(),
        }
    }
}

impl PipelineOptions {
    /// Write mode actually used.
    ///
    /// `ForceText` always writes `USER_ENTERED`: under `RAW` the store would
    /// keep the `'` marker as a literal character instead of honouring it.
    pub fn input_mode(&self) -> ValueInputMode {
        match self.normalize {
            NormalizeStrategy::ForceText => ValueInputMode::UserEntered,
            _ => self.write_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_destination_layout() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.date_column, 8);
        assert_eq!(opts.clear_range, "A2:Z");
        assert_eq!(opts.anchor_cell, "A2");
        assert_eq!(opts.input_mode(), ValueInputMode::Raw);
    }

    #[test]
    fn force_text_overrides_raw_input() {
        let opts = PipelineOptions {
            normalize: NormalizeStrategy::ForceText,
            write_input: ValueInputMode::Raw,
            ..PipelineOptions::default()
        };
        assert_eq!(opts.input_mode(), ValueInputMode::UserEntered);
    }

    #[test]
    fn strip_marker_keeps_configured_input() {
        let opts = PipelineOptions {
            normalize: NormalizeStrategy::StripMarker,
            write_input: ValueInputMode::UserEntered,
            ..PipelineOptions::default()
        };
        assert_eq!(opts.input_mode(), ValueInputMode::UserEntered);
    }
}
