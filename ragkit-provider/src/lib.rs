mod frame;
mod loader;
mod registry;
mod splitter;
mod stt_engine;

pub use frame::{Frame, FrameKind, FrameProcessor};
pub use loader::{Loader, Transformer};
pub use registry::{Factory, RegistrationPolicy, Registry};
pub use splitter::Splitter;
pub use stt_engine::{SttEngine, TranscribeOptions};

/// Process-wide registry of named document loaders. Later registrations
/// overwrite earlier ones for the same name, per spec.md §4.1.
pub type LoaderRegistry = Registry<dyn Loader>;

/// Process-wide registry of named text splitters. Overwrite semantics, same
/// as [`LoaderRegistry`].
pub type SplitterRegistry = Registry<dyn Splitter>;

/// Process-wide registry of named STT engines. Duplicate registration fails
/// fast, per spec.md §4.1/§7.
pub type SttRegistry = Registry<dyn SttEngine>;

use std::sync::OnceLock;

static LOADERS: OnceLock<LoaderRegistry> = OnceLock::new();
static SPLITTERS: OnceLock<SplitterRegistry> = OnceLock::new();
static STT_ENGINES: OnceLock<SttRegistry> = OnceLock::new();

/// The shared, process-wide loader registry. `ragkit-loader-fs` and
/// `ragkit-loader-remote` register their implementations into this instance
/// at construction time rather than each crate owning its own registry.
pub fn loaders() -> &'static LoaderRegistry {
    LOADERS.get_or_init(|| Registry::new("loader", RegistrationPolicy::Overwrite))
}

/// The shared, process-wide splitter registry.
pub fn splitters() -> &'static SplitterRegistry {
    SPLITTERS.get_or_init(|| Registry::new("splitter", RegistrationPolicy::Overwrite))
}

/// The shared, process-wide STT engine registry. Unlike the other two, a
/// name collision here is a programming error (spec.md §4.1/§7): engines are
/// typically registered once at startup and a duplicate almost always means
/// two providers claimed the same name by mistake.
pub fn stt_engines() -> &'static SttRegistry {
    STT_ENGINES.get_or_init(|| Registry::new("stt", RegistrationPolicy::Fail))
}
