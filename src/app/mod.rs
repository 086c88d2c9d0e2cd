//! Desktop panel built on egui/eframe.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`profiler_app`]  | [`ProfilerApp`]: per-tick drain, calibrate action, eframe integration |
//! | [`layout`]        | Readout, calibrate button, depth chart and status bar widgets |
//! | [`run`]           | [`run_profiler()`] entry points: spawn the reader, open the window |

mod layout;
mod profiler_app;
mod run;

pub use profiler_app::ProfilerApp;
pub use run::{run_profiler, run_profiler_with_source};
