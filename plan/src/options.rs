//! Plan-build options: knobs that affect how a plan behaves, fixed at
//! build time rather than varying per call (per the concurrency model,
//! published plans are immutable).

/// Options threaded through plan construction and, for the few that are
/// runtime rather than build-time in nature (`stream_chunk_size`,
/// `strict_trailing`), into the parse/write calls themselves.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Emit `null` for an absent optional field rather than omitting the
    /// key entirely.
    pub emit_null_for_absent: bool,
    /// Starting capacity for a growable output buffer.
    pub initial_output_capacity: usize,
    /// Chunk size used when pulling more bytes in streaming parse mode.
    pub stream_chunk_size: usize,
    /// Fail on non-whitespace bytes trailing the root value in one-shot
    /// parse mode, rather than silently ignoring them.
    pub strict_trailing: bool,
    /// Fail with `DuplicateField` when an object or map sees the same key
    /// twice, rather than the default last-write-wins.
    pub strict_duplicates: bool,
    /// Fail with `UnknownField` when an object sees a key its shape does
    /// not declare, rather than the default silent discard.
    pub strict_unknown_fields: bool,
    /// Maximum nesting depth before the stack guard fails with
    /// `UnexpectedToken`.
    pub max_nesting_depth: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        PlanOptions {
            emit_null_for_absent: true,
            initial_output_capacity: 1024,
            stream_chunk_size: jcodec_core::DEFAULT_STREAM_CHUNK_SIZE,
            strict_trailing: true,
            strict_duplicates: false,
            strict_unknown_fields: false,
            max_nesting_depth: jcodec_core::DEFAULT_MAX_DEPTH,
        }
    }
}
