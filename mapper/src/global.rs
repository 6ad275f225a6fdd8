//! A single, optional, process-wide default [`Mapper`], for callers that
//! would otherwise have to thread a mapper instance through code that has
//! no natural place to hold one (e.g. a generated binding layer). Nothing
//! in this crate requires using it -- an explicitly constructed `Mapper`
//! is always available and is the better choice when a single owner can
//! hold it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::MapperConfig;
use crate::mapper::Mapper;

static DEFAULT_MAPPER: RwLock<Option<Arc<Mapper>>> = RwLock::new(None);

/// Creates the process-wide default mapper, replacing any previous one.
/// Returns the new instance for convenience; callers that only need the
/// global need not hold onto it themselves.
pub fn init_default_mapper(config: MapperConfig) -> Arc<Mapper> {
    let mapper = Arc::new(Mapper::new(config));
    *DEFAULT_MAPPER.write() = Some(mapper.clone());
    mapper
}

/// Returns the process-wide default mapper, or `None` if
/// [`init_default_mapper`] has not been called (or
/// [`teardown_default_mapper`] has since cleared it).
#[must_use]
pub fn default_mapper() -> Option<Arc<Mapper>> {
    DEFAULT_MAPPER.read().clone()
}

/// Clears the process-wide default mapper. Existing `Arc<Mapper>` handles
/// obtained before teardown remain valid; only the global slot is reset.
pub fn teardown_default_mapper() {
    *DEFAULT_MAPPER.write() = None;
}
