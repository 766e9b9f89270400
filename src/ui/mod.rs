pub mod reporter;
pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use reporter::ConsoleReporter;
pub use icons::Icons;
pub use output::{error, header, info, section, status, success, summary_row, warn};
pub use progress::TaskProgress;
pub use table::{dependencies_table, findings_table, stats_table};
pub use theme::{theme, Theme};
