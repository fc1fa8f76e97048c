//! Engine Telemetry Simulator
//!
//! Replays a loaded C-MAPSS run-to-failure dataset one cycle at a time to
//! simulate live sensor arrival. The dataset is loaded once and shared;
//! every streaming connection owns its own [`EngineSession`] cursor.

mod session;

pub use session::{EngineDataset, EngineSession, DEFAULT_UNIT};
