//! The mapper facade: a shape-keyed cache of compiled parser/writer plans,
//! sitting on top of `jcodec-plan`'s one-shot plan builder, plus the
//! top-level read/write entry points a host binding layer actually calls.
//!
//! Building a plan is comparatively expensive (it walks the whole shape);
//! [`Mapper`] makes that cost one-time per distinct shape per process,
//! while keeping every read/write call itself plan-lookup-then-invoke.

mod config;
mod global;
mod mapper;

pub use config::MapperConfig;
pub use global::{default_mapper, init_default_mapper, teardown_default_mapper};
pub use mapper::Mapper;

pub use jcodec_plan::PlanOptions;
