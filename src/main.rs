// src/main.rs
mod cli;
mod config;
mod drivers;
mod engine;
mod gui;
mod interrupt;
mod presenter;
mod types;
use anyhow::{anyhow, Result};
use clap::Parser;
use cli::Args;
use config::PipelineConfig;
use drivers::{EegSimulator, MoodPipeline};
use eframe::egui;
use drivers::PipelineError;
use engine::{EngineReport, LoopSettings};
use interrupt::StopRelay;
use log::{info, warn};
use presenter::{ConsoleFormat, ConsolePresenter};
use std::sync::mpsc::channel;
use types::EngineCommand;
// 图形环境探测
fn display_available() -> bool {
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| std::env::var_os(key).is_some_and(|v| !v.is_empty()))
}
fn build_pipeline(config: &PipelineConfig) -> Result<MoodPipeline<EegSimulator>> {
    let simulator = EegSimulator::new(config.sample_rate_hz, config.seed)?;
    Ok(MoodPipeline::new(simulator, config)?)
}
fn describe_outcome(outcome: &Result<EngineReport, PipelineError>) -> String {
    match outcome {
        Ok(report) => format!(
            "{} cycles, {} artifacts, stopped by {:?}",
            report.cycles, report.artifacts, report.stop_reason
        ),
        Err(err) => format!("engine failed: {err}"),
    }
}
/// Returns `Ok(false)` when no window could be opened.
fn run_graphical(
    config: &PipelineConfig,
    settings: LoopSettings,
    relay: &StopRelay,
) -> Result<bool> {
    let (tx, rx) = channel();
    let (tx_cmd, rx_cmd) = channel();
    let stop_tx = tx_cmd.clone();
    relay.attach(tx_cmd.clone());
    // 启动后台引擎
    let engine = engine::spawn_thread(
        build_pipeline(config)?,
        gui::ChannelPresenter::new(tx),
        rx_cmd,
        settings,
    );
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 400.0])
            .with_title("Mood Visualizer"),
        ..Default::default()
    };
    let window = eframe::run_native(
        "Mood Visualizer",
        options,
        Box::new(move |_cc| Box::new(gui::MoodApp::new(rx, tx_cmd))),
    );
    stop_tx.send(EngineCommand::Stop).ok();
    let report = engine
        .join()
        .map_err(|_| anyhow!("engine thread panicked"))?;
    if let Err(err) = window {
        warn!("could not open window ({err}); falling back to console output");
        warn!("{}", describe_outcome(&report));
        return Ok(false);
    }
    info!("{}", describe_outcome(&report));
    report?;
    Ok(true)
}
fn run_console(
    config: &PipelineConfig,
    settings: LoopSettings,
    format: ConsoleFormat,
    relay: &StopRelay,
) -> Result<()> {
    let mut pipeline = build_pipeline(config)?;
    let mut presenter = ConsolePresenter::stdout(format);
    // 控制台模式的命令只来自 Ctrl-C
    let (tx_cmd, rx_cmd) = channel();
    relay.attach(tx_cmd);
    let report = engine::run_cycles(&mut pipeline, &mut presenter, &rx_cmd, settings);
    info!("{}", describe_outcome(&report));
    report?;
    Ok(())
}
// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.pipeline_config()?;
    let settings = args.loop_settings(&config);
    info!(
        "sampling at {} Hz, {} sample windows, smoothing {}",
        config.sample_rate_hz, config.window_samples, config.smoothing
    );
    let relay = StopRelay::install()?;
    if !args.console && display_available() && run_graphical(&config, settings, &relay)? {
        return Ok(());
    }
    run_console(&config, settings, args.console_format(), &relay)
}
