// src/presenter.rs
use std::io::Write;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::drivers::PipelineError;
use crate::types::{BandPowers, MoodLabel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    Continue,
    Closed,
}

/// Output side of the cycle loop. The engine stops on `RenderStatus::Closed`
/// and calls `shutdown` exactly once on every exit path.
pub trait Presenter {
    fn render(
        &mut self,
        label: MoodLabel,
        features: &BandPowers,
        window_secs: f64,
    ) -> Result<RenderStatus, PipelineError>;
    fn shutdown(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    mood: MoodLabel,
    features: &'a BandPowers,
    window_secs: f64,
}

// 控制台输出 (无图形环境时使用)
pub struct ConsolePresenter<W: Write> {
    out: W,
    format: ConsoleFormat,
    min_interval: Duration,
    last_print: Instant,
}

impl ConsolePresenter<std::io::Stdout> {
    pub fn stdout(format: ConsoleFormat) -> Self {
        ConsolePresenter::new(std::io::stdout(), format, Duration::from_millis(500))
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, format: ConsoleFormat, min_interval: Duration) -> Self {
        Self {
            out,
            format,
            min_interval,
            last_print: Instant::now(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(
        &mut self,
        label: MoodLabel,
        features: &BandPowers,
        window_secs: f64,
    ) -> Result<(), PipelineError> {
        match self.format {
            ConsoleFormat::Text => writeln!(
                self.out,
                "[console] Mood={} alpha={:.2} beta={:.2} gamma={:.2}",
                label, features.alpha, features.beta, features.gamma
            )?,
            ConsoleFormat::Json => {
                let line = serde_json::to_string(&JsonLine {
                    mood: label,
                    features,
                    window_secs,
                })?;
                writeln!(self.out, "{line}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render(
        &mut self,
        label: MoodLabel,
        features: &BandPowers,
        window_secs: f64,
    ) -> Result<RenderStatus, PipelineError> {
        if self.last_print.elapsed() >= self.min_interval {
            self.write_line(label, features, window_secs)?;
            self.last_print = Instant::now();
        }
        Ok(RenderStatus::Continue)
    }

    fn shutdown(&mut self) {
        writeln!(self.out, "Console visualizer closed").ok();
        self.out.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn text_lines_use_two_decimals() {
        let mut presenter = ConsolePresenter::new(Vec::new(), ConsoleFormat::Text, Duration::ZERO);
        let status = presenter
            .render(MoodLabel::Calm, &BandPowers::new(0.614, 0.2, 0.186), 1.0)
            .unwrap();
        assert_eq!(status, RenderStatus::Continue);
        presenter.shutdown();
        assert_eq!(
            output(presenter),
            "[console] Mood=CALM alpha=0.61 beta=0.20 gamma=0.19\nConsole visualizer closed\n"
        );
    }

    #[test]
    fn json_lines_are_parseable() {
        let mut presenter = ConsolePresenter::new(Vec::new(), ConsoleFormat::Json, Duration::ZERO);
        presenter
            .render(MoodLabel::Focus, &BandPowers::new(0.1, 0.7, 0.2), 1.0)
            .unwrap();
        let text = output(presenter);
        let value: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(value["mood"], "FOCUS");
        assert_eq!(value["features"]["beta"], 0.7);
        assert_eq!(value["window_secs"], 1.0);
    }

    #[test]
    fn throttles_between_prints() {
        let mut presenter =
            ConsolePresenter::new(Vec::new(), ConsoleFormat::Text, Duration::from_secs(3600));
        for _ in 0..5 {
            presenter
                .render(MoodLabel::Unknown, &BandPowers::ZERO, 1.0)
                .unwrap();
        }
        assert!(output(presenter).is_empty());
    }

    struct BrokenPipe;
    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let mut presenter = ConsolePresenter::new(BrokenPipe, ConsoleFormat::Text, Duration::ZERO);
        let err = presenter
            .render(MoodLabel::Stress, &BandPowers::ZERO, 1.0)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Presenter(_)));
        presenter.shutdown();
    }
}
