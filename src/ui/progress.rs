use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use crate::ui::theme;

const TEMPLATE: &str = "{msg} {wide_bar} {pos}/{len} {percent:>3}%";

/// Single progress bar for a crawl or probe pass
///
/// Hidden when stdout is not a terminal; lines printed through it then go
/// straight to stdout instead of being dropped.
pub struct TaskProgress {
    pb: ProgressBar,
    label: String,
    visible: bool,
}

impl TaskProgress {
    pub fn new(label: &str, total: usize) -> Self {
        let visible = console::Term::stdout().is_term();
        let pb = if visible {
            let pb = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
                pb.set_style(style);
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        let progress = Self {
            pb,
            label: label.to_string(),
            visible,
        };
        progress.set_position_message(0, total);
        progress
    }

    /// Advance by one item and show `[done/total]` next to the label
    pub fn advance(&self, done: usize, total: usize) {
        self.pb.inc(1);
        self.set_position_message(done, total);
    }

    fn set_position_message(&self, done: usize, total: usize) {
        self.pb.set_message(format!(
            "{}",
            format!("{} [{}/{}]", self.label, done, total).style(theme().header.clone())
        ));
    }

    /// Print a line above the bar
    pub fn println(&self, line: impl AsRef<str>) {
        if self.visible {
            self.pb.println(line);
        } else {
            println!("{}", line.as_ref());
        }
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
