// src/gui.rs
use crate::drivers::PipelineError;
use crate::presenter::{Presenter, RenderStatus};
use crate::types::*;
use eframe::egui;
use egui::{Color32, Pos2, Rect};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

const HISTORY_LEN: usize = 200;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

// 后台线程一侧: 把每帧结果转发给窗口
pub struct ChannelPresenter {
    tx: Sender<MoodMessage>,
}

impl ChannelPresenter {
    pub fn new(tx: Sender<MoodMessage>) -> Self {
        Self { tx }
    }
}

impl Presenter for ChannelPresenter {
    fn render(
        &mut self,
        label: MoodLabel,
        features: &BandPowers,
        window_secs: f64,
    ) -> Result<RenderStatus, PipelineError> {
        let msg = MoodMessage::Update {
            label,
            features: *features,
            window_secs,
        };
        // 接收端已释放 = 窗口已关闭
        match self.tx.send(msg) {
            Ok(()) => Ok(RenderStatus::Continue),
            Err(_) => Ok(RenderStatus::Closed),
        }
    }

    fn shutdown(&mut self) {
        self.tx.send(MoodMessage::Stopped).ok();
    }
}

fn mood_color(label: MoodLabel) -> Color32 {
    let (r, g, b) = label.rgb();
    Color32::from_rgb(r, g, b)
}

/// Orb radius in points, driven by the alpha ratio.
pub fn orb_radius(alpha: f64) -> f32 {
    (40.0 + 140.0 * alpha as f32).max(8.0)
}

pub fn caption(label: MoodLabel, features: &BandPowers, window_secs: f64) -> String {
    format!(
        "Mood: {} | Alpha:{:.2} Beta:{:.2} Gamma:{:.2} | dt:{:.2}s",
        label, features.alpha, features.beta, features.gamma, window_secs
    )
}

pub struct MoodApp {
    // 最新状态
    label: MoodLabel,
    features: Option<BandPowers>,
    window_secs: f64,
    engine_running: bool,

    // 频带历史 (绘图用)
    frame_index: u64,
    history: VecDeque<(u64, BandPowers)>,

    // 通讯管道
    rx: Receiver<MoodMessage>,
    tx_cmd: Sender<EngineCommand>,
}

impl MoodApp {
    pub fn new(rx: Receiver<MoodMessage>, tx_cmd: Sender<EngineCommand>) -> Self {
        Self {
            label: MoodLabel::Unknown,
            features: None,
            window_secs: 0.0,
            engine_running: true,
            frame_index: 0,
            history: VecDeque::with_capacity(HISTORY_LEN),
            rx,
            tx_cmd,
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                MoodMessage::Update {
                    label,
                    features,
                    window_secs,
                } => {
                    self.label = label;
                    self.features = Some(features);
                    self.window_secs = window_secs;
                    self.frame_index += 1;
                    if self.history.len() == HISTORY_LEN {
                        self.history.pop_front();
                    }
                    self.history.push_back((self.frame_index, features));
                }
                MoodMessage::Stopped => self.engine_running = false,
            }
        }
    }

    fn trigger_blink(&self) {
        self.tx_cmd.send(EngineCommand::TriggerArtifact).ok();
    }

    /// Orb centred on the panel; the radius is not clipped to any sub-area.
    fn orb_shape(&self, area: Rect) -> (Pos2, f32) {
        let alpha = self.features.map(|f| f.alpha).unwrap_or(0.33);
        (area.center(), orb_radius(alpha))
    }

    fn draw_orb(&self, ui: &egui::Ui) {
        let (center, radius) = self.orb_shape(ui.max_rect());
        ui.painter()
            .circle_filled(center, radius, mood_color(self.label));
    }

    fn draw_history(&self, ui: &mut egui::Ui) {
        let series = |pick: fn(&BandPowers) -> f64| -> PlotPoints {
            PlotPoints::new(
                self.history
                    .iter()
                    .map(|(i, f)| [*i as f64, pick(f)])
                    .collect(),
            )
        };
        Plot::new("band_history")
            .height(90.0)
            .include_y(0.0)
            .include_y(1.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show_background(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(series(|f| f.alpha))
                        .name("alpha")
                        .color(mood_color(MoodLabel::Calm)),
                );
                plot_ui.line(
                    Line::new(series(|f| f.beta))
                        .name("beta")
                        .color(mood_color(MoodLabel::Focus)),
                );
                plot_ui.line(
                    Line::new(series(|f| f.gamma))
                        .name("gamma")
                        .color(mood_color(MoodLabel::Stress)),
                );
            });
    }
}

impl eframe::App for MoodApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 消息处理 (引擎停止后关闭窗口)
        self.drain_messages();
        if !self.engine_running {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // 2. 键盘: B = 眨眼伪迹
        if ctx.input(|i| i.key_pressed(egui::Key::B)) {
            self.trigger_blink();
        }

        // 3. UI 绘制
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = Color32::BLACK;
        ctx.set_visuals(visuals);

        egui::CentralPanel::default().show(ctx, |ui| {
            // 光球在最底层, 文字和曲线叠在上面
            self.draw_orb(ui);

            let text = match &self.features {
                Some(f) => caption(self.label, f, self.window_secs),
                None => format!("Mood: {}", self.label),
            };
            ui.label(egui::RichText::new(text).color(Color32::WHITE));

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                if ui
                    .add_enabled(self.engine_running, egui::Button::new("Blink"))
                    .clicked()
                {
                    self.trigger_blink();
                }
                self.draw_history(ui);
            });
        });

        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

impl Drop for MoodApp {
    fn drop(&mut self) {
        self.tx_cmd.send(EngineCommand::Stop).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn orb_radius_scales_with_alpha() {
        assert_eq!(orb_radius(0.0), 40.0);
        assert_eq!(orb_radius(1.0), 180.0);
        assert_eq!(orb_radius(-1.0), 8.0);
    }

    #[test]
    fn orb_is_not_clipped_in_reference_window() {
        let (_tx, rx) = channel::<MoodMessage>();
        let (tx_cmd, _rx_cmd) = channel();
        let mut app = MoodApp::new(rx, tx_cmd);
        let panel = Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 400.0));
        app.features = Some(BandPowers::new(1.0, 0.0, 0.0));
        let (center, radius) = app.orb_shape(panel);
        assert_eq!(center, Pos2::new(200.0, 200.0));
        assert_eq!(radius, 180.0);
        app.features = Some(BandPowers::new(0.5, 0.25, 0.25));
        assert_eq!(app.orb_shape(panel).1, 110.0);
    }

    #[test]
    fn caption_matches_display_format() {
        let text = caption(MoodLabel::Focus, &BandPowers::new(0.1, 0.75, 0.15), 1.0);
        assert_eq!(
            text,
            "Mood: FOCUS | Alpha:0.10 Beta:0.75 Gamma:0.15 | dt:1.00s"
        );
    }

    #[test]
    fn channel_presenter_detects_closed_window() {
        let (tx, rx) = channel();
        let mut presenter = ChannelPresenter::new(tx);
        let status = presenter
            .render(MoodLabel::Calm, &BandPowers::new(0.7, 0.2, 0.1), 1.0)
            .unwrap();
        assert_eq!(status, RenderStatus::Continue);
        assert!(matches!(
            rx.try_recv(),
            Ok(MoodMessage::Update {
                label: MoodLabel::Calm,
                ..
            })
        ));
        drop(rx);
        let status = presenter
            .render(MoodLabel::Calm, &BandPowers::ZERO, 1.0)
            .unwrap();
        assert_eq!(status, RenderStatus::Closed);
        presenter.shutdown();
    }

    #[test]
    fn app_tracks_updates_and_requests_stop_on_drop() {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        let mut app = MoodApp::new(rx, tx_cmd);
        let mut presenter = ChannelPresenter::new(tx);
        for _ in 0..3 {
            presenter
                .render(MoodLabel::Stress, &BandPowers::new(0.2, 0.2, 0.6), 1.0)
                .unwrap();
        }
        presenter.shutdown();
        app.drain_messages();
        assert_eq!(app.label, MoodLabel::Stress);
        assert_eq!(app.history.len(), 3);
        assert!(!app.engine_running);

        app.trigger_blink();
        drop(app);
        assert_eq!(rx_cmd.try_recv().ok(), Some(EngineCommand::TriggerArtifact));
        assert_eq!(rx_cmd.try_recv().ok(), Some(EngineCommand::Stop));
    }
}
