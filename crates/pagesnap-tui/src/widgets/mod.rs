mod indicator;
mod section_view;
mod status_bar;

pub use indicator::{dot_at, dot_cells, IndicatorWidget};
pub use section_view::{visible_rows, SectionViewWidget};
pub use status_bar::StatusBarWidget;
