//! The mapper facade: two shape-keyed plan caches plus the convenience
//! read/write surface built on top of them.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use jcodec_core::Result;
use jcodec_plan::{build_parser_plan, build_writer_plan, ParserPlan, PlanOptions, WriterPlan};
use jcodec_shape::{canonical_key, Shape};

use crate::config::MapperConfig;

/// Caches compiled parser/writer plans by canonical type key and serves
/// them out, guaranteeing at most one plan is ever built per key even
/// under concurrent requests for that key.
///
/// The two caches are the only shared mutable state: lookup goes through
/// a read lock first; on miss, a write lock is taken and the key is
/// re-checked before building, so two threads racing to request the same
/// previously-unseen shape still only build it once. Plans, once
/// published, are immutable and safe to use concurrently.
#[derive(Debug)]
pub struct Mapper {
    config: MapperConfig,
    parser_cache: RwLock<HashMap<String, Arc<ParserPlan>>>,
    writer_cache: RwLock<HashMap<String, Arc<WriterPlan>>>,
}

impl Mapper {
    #[must_use]
    pub fn new(config: MapperConfig) -> Self {
        Mapper { config, parser_cache: RwLock::new(HashMap::new()), writer_cache: RwLock::new(HashMap::new()) }
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Returns the cached parser plan for `shape`'s canonical key,
    /// building and publishing it first if this is the first request for
    /// that key.
    ///
    /// # Errors
    /// `PlanBuildFailure` if the shape contains a construct the plan
    /// builder cannot compile.
    pub fn parser_for(&self, shape: Shape) -> Result<Arc<ParserPlan>> {
        let key = canonical_key(&shape);
        if let Some(plan) = self.parser_cache.read().get(&key) {
            trace!(key = %key, "parser plan cache hit");
            return Ok(plan.clone());
        }
        let mut cache = self.parser_cache.write();
        if let Some(plan) = cache.get(&key) {
            trace!(key = %key, "parser plan cache hit after lock");
            return Ok(plan.clone());
        }
        debug!(key = %key, "building parser plan");
        let plan = Arc::new(build_parser_plan(shape, &self.config.plan_options)?);
        cache.insert(key, plan.clone());
        Ok(plan)
    }

    /// Returns the cached writer plan for `shape`'s canonical key, same
    /// at-most-once-build contract as [`Self::parser_for`].
    ///
    /// # Errors
    /// Same as [`Self::parser_for`].
    pub fn writer_for(&self, shape: Shape) -> Result<Arc<WriterPlan>> {
        let key = canonical_key(&shape);
        if let Some(plan) = self.writer_cache.read().get(&key) {
            trace!(key = %key, "writer plan cache hit");
            return Ok(plan.clone());
        }
        let mut cache = self.writer_cache.write();
        if let Some(plan) = cache.get(&key) {
            trace!(key = %key, "writer plan cache hit after lock");
            return Ok(plan.clone());
        }
        debug!(key = %key, "building writer plan");
        let plan = Arc::new(build_writer_plan(shape, &self.config.plan_options)?);
        cache.insert(key, plan.clone());
        Ok(plan)
    }

    /// Lookup-only: returns the parser plan already cached under
    /// `type_key`, or `None` if nothing has preregistered or requested it
    /// yet. Never builds.
    #[must_use]
    pub fn get_parser(&self, type_key: &str) -> Option<Arc<ParserPlan>> {
        self.parser_cache.read().get(type_key).cloned()
    }

    /// Lookup-only counterpart to [`Self::get_parser`].
    #[must_use]
    pub fn get_writer(&self, type_key: &str) -> Option<Arc<WriterPlan>> {
        self.writer_cache.read().get(type_key).cloned()
    }

    /// Eagerly builds and caches both the parser and writer plan for a
    /// shape, ahead of first use. `make_shape` is called twice since a
    /// built `Shape` is consumed by whichever plan it feeds -- the same
    /// reason [`jcodec_shape::Shape::named`] takes a `fn() -> Shape`
    /// rather than a `Shape` value.
    ///
    /// # Errors
    /// Same as [`Self::parser_for`]/[`Self::writer_for`].
    pub fn preregister(&self, make_shape: fn() -> Shape) -> Result<()> {
        self.parser_for(make_shape())?;
        self.writer_for(make_shape())?;
        Ok(())
    }

    /// Parses a complete in-memory byte slice, building the parser plan
    /// for `shape` first if needed.
    ///
    /// # Errors
    /// Same as [`Self::parser_for`], plus any parse failure.
    pub fn read_bytes(&self, shape: Shape, bytes: &[u8]) -> Result<Box<dyn Any>> {
        let plan = self.parser_for(shape)?;
        plan.parse_bytes(bytes, &self.config.plan_options)
    }

    /// `str` convenience over [`Self::read_bytes`].
    ///
    /// # Errors
    /// Same as [`Self::read_bytes`].
    pub fn read_str(&self, shape: Shape, text: &str) -> Result<Box<dyn Any>> {
        let plan = self.parser_for(shape)?;
        plan.parse_str(text, &self.config.plan_options)
    }

    /// Parses by pulling chunks from `reader` until the value completes.
    ///
    /// # Errors
    /// Same as [`Self::read_bytes`], plus I/O errors from `reader`.
    pub fn read_stream<R: embedded_io::Read>(&self, shape: Shape, reader: &mut R) -> Result<Box<dyn Any>> {
        let plan = self.parser_for(shape)?;
        plan.parse_stream(reader, &self.config.plan_options)
    }

    /// Parses one value from the front of `bytes`, reporting how many
    /// bytes it consumed; trailing bytes are left unexamined.
    ///
    /// # Errors
    /// Same as [`Self::read_bytes`].
    pub fn read_prefix(&self, shape: Shape, bytes: &[u8]) -> Result<(Box<dyn Any>, usize)> {
        let plan = self.parser_for(shape)?;
        plan.parse_prefix(bytes, &self.config.plan_options)
    }

    /// Writes `value` into a freshly allocated buffer, building the
    /// writer plan for `shape` first if needed.
    ///
    /// # Errors
    /// Same as [`Self::writer_for`], plus any write failure.
    pub fn write_bytes(&self, shape: Shape, value: &dyn Any) -> Result<Vec<u8>> {
        let plan = self.writer_for(shape)?;
        plan.write_bytes(value, &self.config.plan_options)
    }

    /// `String` convenience over [`Self::write_bytes`].
    ///
    /// # Errors
    /// Same as [`Self::write_bytes`].
    pub fn write_string(&self, shape: Shape, value: &dyn Any) -> Result<String> {
        let plan = self.writer_for(shape)?;
        plan.write_string(value, &self.config.plan_options)
    }

    /// Writes through a buffered stream sink into `writer`.
    ///
    /// # Errors
    /// Same as [`Self::write_bytes`], plus I/O errors from `writer`.
    pub fn write_stream<W: embedded_io::Write>(
        &self,
        shape: Shape,
        value: &dyn Any,
        writer: &mut W,
    ) -> Result<()> {
        let plan = self.writer_for(shape)?;
        plan.write_stream(value, writer, &self.config.plan_options)
    }
}
