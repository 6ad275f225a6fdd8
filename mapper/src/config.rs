//! Process-level configuration for a [`crate::Mapper`]: the knobs that are
//! the same for every plan it builds, as opposed to [`jcodec_plan::PlanOptions`]
//! which a caller could in principle vary per shape (this crate always
//! threads one `PlanOptions` through every plan a given mapper builds).

use jcodec_plan::PlanOptions;

/// Construction options for a [`crate::Mapper`].
#[derive(Debug, Clone, Default)]
pub struct MapperConfig {
    /// Plan-build and parse/write options shared by every plan this
    /// mapper builds.
    pub plan_options: PlanOptions,
}
