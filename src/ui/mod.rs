pub mod app;
pub mod context;
pub mod month_pane;
pub mod picker_window;
pub mod util;

pub use app::App;
pub use context::{Context, Theme};
