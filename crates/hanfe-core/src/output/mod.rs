// Hanfe Output Layer
// The emitter seam and the uinput-backed implementation

mod emitter;
mod tty;

pub use emitter::{Emitter, EmitterError, FallbackEmitter};
pub use tty::TtyMirror;
