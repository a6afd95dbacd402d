//! GeoSketch App - Controller for map annotation front-ends
//!
//! The `Annotator` owns the whole application state and is driven by map
//! clicks, key presses and UI commands. Front-ends redraw from the pure
//! `ViewModel` projection and deliver exports through an `ExportSink`.

pub mod annotator;
pub mod commands;
pub mod export;
pub mod keys;
pub mod state;
pub mod telemetry;
pub mod view;

pub use annotator::Annotator;
pub use commands::{Command, Outcome};
pub use state::AppState;
pub use view::{render, ViewModel};
