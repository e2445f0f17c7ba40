use compact_str::CompactString;

/// Identity of one collection call: the run being processed and, for
/// turn-scoped collections, the turn within it.
///
/// A context is created fresh per call and never mutated. `turn_number` is
/// present iff the collection is turn-scoped, which the two constructors
/// guarantee by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricContext {
    run_id: CompactString,
    turn_number: Option<u32>,
}

impl MetricContext {
    #[must_use]
    pub fn for_turn(run_id: impl Into<CompactString>, turn_number: u32) -> Self {
        Self {
            run_id: run_id.into(),
            turn_number: Some(turn_number),
        }
    }

    #[must_use]
    pub fn for_run(run_id: impl Into<CompactString>) -> Self {
        Self {
            run_id: run_id.into(),
            turn_number: None,
        }
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    #[must_use]
    pub const fn turn_number(&self) -> Option<u32> {
        self.turn_number
    }
}
