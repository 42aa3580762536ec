mod headless;
mod loop_handler;

pub use headless::{build_report, run_headless, HeadlessReport, HeadlessSlot};
pub use loop_handler::run;
