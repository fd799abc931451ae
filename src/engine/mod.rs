pub mod cache;
pub mod clock;
pub mod events;
pub mod session;
pub mod watcher;

pub use cache::{TimingCache, TimingSource};
pub use clock::{Clock, SystemClock};
pub use events::Intervals;
pub use session::Session;
pub use watcher::Watcher;
