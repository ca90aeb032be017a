// crates/autovid-media/src/lib.rs
//
// No egui dependency. Talks to autovid-ui via channels and plain
// RGBA buffers only.
//
//   runner     single-flight compile worker + ordered event channel
//   compiler   the external compiler seam (in-process or subprocess)
//   thumbnail  per-path memoized first-frame previews
//   decode     the FFmpeg first-frame decoder behind the thumbnail cache

pub mod compiler;
pub mod decode;
pub mod runner;
pub mod thumbnail;

// Re-export the main public API so autovid-ui imports are simple.
pub use compiler::{locate_compiler, ExternalCompiler, InProcessCompiler, OutputSink, SubprocessCompiler};
pub use decode::FfmpegDecoder;
pub use runner::{CompileRunner, Dispatched, RunError};
pub use thumbnail::{FrameDecoder, Thumbnail, ThumbnailCache};
pub use autovid_core::compile::{CompileEvent, RunOutcome};
