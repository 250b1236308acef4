//! Platform-independent readiness core: device classification, the one-shot
//! gate, stylesheet and bounded asset settlement, the playback state machine and the
//! viewport watcher. Browser bindings live in `crate::browser`.

mod assets;
mod device;
mod gate;
mod playback;
mod session;
mod stylesheet;
mod viewport;

pub use assets::*;
pub use device::*;
pub use gate::*;
pub use playback::*;
pub use session::*;
pub use stylesheet::*;
pub use viewport::*;
