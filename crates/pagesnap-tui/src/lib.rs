pub mod app;
pub mod event;
pub mod host;
pub mod input;
pub mod keymap;
pub mod text;
pub mod theme;
pub mod transition;
pub mod widgets;

pub use app::App;
pub use host::TerminalHost;
pub use theme::Theme;
