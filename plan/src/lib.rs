//! Compiles a [`Shape`](jcodec_shape::Shape) into a cacheable parser plan
//! and writer plan: the type-directed half of the codec, sitting on top
//! of `jcodec-states`'s generic, shape-agnostic state machines.
//!
//! Plan building is memoized and cycle-safe within a single call to
//! [`build_parser_plan`]/[`build_writer_plan`] -- a self-referential
//! shape (via [`jcodec_shape::Shape::named`]) compiles to a finite plan
//! even though the values it parses or writes can recurse arbitrarily
//! deep (bounded only by `PlanOptions::max_nesting_depth`). Building the
//! *same* shape twice, across two calls, does independent work; caching
//! plans across calls so that identical shapes share one compiled plan
//! is `jcodec-mapper`'s job, not this crate's.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod builder;
mod options;
mod parser_plan;
mod scalar_plan;
mod writer_plan;

pub use builder::{build_parser_plan, build_writer_plan};
pub use options::PlanOptions;
pub use parser_plan::ParserPlan;
pub use writer_plan::WriterPlan;
