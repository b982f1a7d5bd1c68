// src/engine.rs
use crate::drivers::{MoodPipeline, PipelineError, SignalSource};
use crate::presenter::{Presenter, RenderStatus};
use crate::types::EngineCommand;
use log::{debug, info};
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub struct LoopSettings {
    pub cycle_delay: Duration,
    pub max_cycles: Option<u64>,
    pub artifact_every: Option<u64>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            cycle_delay: Duration::from_millis(50),
            max_cycles: None,
            artifact_every: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    PresenterClosed,
    StopRequested,
    CycleLimit,
    SourceExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineReport {
    pub cycles: u64,
    pub artifacts: u64,
    pub stop_reason: StopReason,
}

/// Drive generate → analyze → smooth → classify → render until something
/// stops the loop. `presenter.shutdown()` runs on every exit path.
pub fn run_cycles<S, P>(
    pipeline: &mut MoodPipeline<S>,
    presenter: &mut P,
    commands: &Receiver<EngineCommand>,
    settings: LoopSettings,
) -> Result<EngineReport, PipelineError>
where
    S: SignalSource,
    P: Presenter + ?Sized,
{
    let result = cycle_loop(pipeline, presenter, commands, settings);
    presenter.shutdown();
    match &result {
        Ok(report) => info!(
            "engine stopped after {} cycles ({:?})",
            report.cycles, report.stop_reason
        ),
        Err(err) => info!("engine aborted: {err}"),
    }
    result
}

fn cycle_loop<S, P>(
    pipeline: &mut MoodPipeline<S>,
    presenter: &mut P,
    commands: &Receiver<EngineCommand>,
    settings: LoopSettings,
) -> Result<EngineReport, PipelineError>
where
    S: SignalSource,
    P: Presenter + ?Sized,
{
    let mut cycles = 0u64;
    let mut artifacts = 0u64;
    let stop_reason = loop {
        if settings.max_cycles.is_some_and(|max| cycles >= max) {
            break StopReason::CycleLimit;
        }

        // 1. 处理外部命令 (发送端断开不代表停止)
        let mut stop_requested = false;
        while let Ok(cmd) = commands.try_recv() {
            match cmd {
                EngineCommand::TriggerArtifact => pipeline.trigger_artifact(),
                EngineCommand::Stop => stop_requested = true,
            }
        }
        if stop_requested {
            break StopReason::StopRequested;
        }
        if let Some(every) = settings.artifact_every.filter(|n| *n > 0) {
            if cycles > 0 && cycles % every == 0 {
                pipeline.trigger_artifact();
            }
        }

        // 2. 计算一帧
        let Some(frame) = pipeline.step()? else {
            break StopReason::SourceExhausted;
        };
        cycles += 1;
        if frame.has_artifact {
            artifacts += 1;
        }

        // 3. 输出
        let status = presenter.render(frame.label, &frame.smoothed, frame.window_secs)?;
        if status == RenderStatus::Closed {
            debug!("presenter closed after cycle {cycles}");
            break StopReason::PresenterClosed;
        }

        if !settings.cycle_delay.is_zero() {
            thread::sleep(settings.cycle_delay);
        }
    };
    Ok(EngineReport {
        cycles,
        artifacts,
        stop_reason,
    })
}

/// Run the cycle loop on a worker thread (used by the graphical mode).
pub fn spawn_thread<S, P>(
    mut pipeline: MoodPipeline<S>,
    mut presenter: P,
    rx_cmd: Receiver<EngineCommand>,
    settings: LoopSettings,
) -> JoinHandle<Result<EngineReport, PipelineError>>
where
    S: SignalSource + Send + 'static,
    P: Presenter + Send + 'static,
{
    thread::spawn(move || {
        info!("mood engine ready ({:.2}s windows)", pipeline.window_secs());
        run_cycles(&mut pipeline, &mut presenter, &rx_cmd, settings)
    })
}
