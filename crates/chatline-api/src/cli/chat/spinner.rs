//! indicatif spinner backing the busy indicator.

use indicatif::{ProgressBar, ProgressStyle};

use chatline_core::indicator::{IndicatorFrame, IndicatorSurface};

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Draws the busy indicator as a spinner on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinnerSurface;

impl IndicatorSurface for SpinnerSurface {
    fn acquire(&self, label: &str) -> Box<dyn IndicatorFrame> {
        let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(label.to_string());
        Box::new(SpinnerFrame { bar })
    }
}

struct SpinnerFrame {
    bar: ProgressBar,
}

impl IndicatorFrame for SpinnerFrame {
    fn tick(&mut self) {
        self.bar.tick();
    }

    fn release(self: Box<Self>) {
        self.bar.finish_and_clear();
    }
}

impl Drop for SpinnerFrame {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
