use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// One progress bar per search length, stacked in a single terminal region.
pub struct LengthProgress {
    multi_progress: MultiProgress,
    bars: Vec<(usize, ProgressBar)>,
}

impl LengthProgress {
    /// `lengths` pairs each length with the number of candidates it will check.
    pub fn new(lengths: &[(usize, u64)]) -> Self {
        let multi_progress = MultiProgress::new();

        // Colors cycle so adjacent bars are distinguishable
        let colors = ["cyan/blue", "green/yellow", "magenta/red", "yellow/blue"];

        let bars = lengths
            .iter()
            .enumerate()
            .map(|(i, &(length, total))| {
                let color = colors[i % colors.len()];
                let template = format!(
                    "[len {length:>2}] [{{elapsed_precise}}] {{bar:40.{color}}} {{percent:>3}}% {{human_pos}}/{{human_len}} {{msg}}"
                );
                let style = ProgressStyle::with_template(&template)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▉▊▋▌▍▎▏  ");

                let bar = multi_progress.add(ProgressBar::new(total));
                bar.set_style(style);
                (length, bar)
            })
            .collect();

        Self {
            multi_progress,
            bars,
        }
    }

    fn bar(&self, length: usize) -> Option<&ProgressBar> {
        self.bars
            .iter()
            .find(|(bar_length, _)| *bar_length == length)
            .map(|(_, bar)| bar)
    }

    pub fn set_checked(&self, length: usize, checked: u64) {
        if let Some(bar) = self.bar(length) {
            bar.set_position(checked);
        }
    }

    pub fn finish_length(&self, length: usize, matches: usize) {
        if let Some(bar) = self.bar(length) {
            bar.finish_with_message(format!("{matches} matches"));
        }
    }

    /// Print a line above the bars without tearing them.
    pub fn suspend<F: FnOnce()>(&self, print: F) {
        self.multi_progress.suspend(print);
    }

    pub fn finish(&self) {
        for (_, bar) in &self.bars {
            if !bar.is_finished() {
                bar.finish();
            }
        }
        let _ = self.multi_progress.clear();
    }
}
