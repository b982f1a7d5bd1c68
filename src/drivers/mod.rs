// src/drivers/mod.rs
// 信号生成 → 频带分析 → 平滑 → 分类
pub mod classifier;
pub mod error;
pub mod fft;
pub mod pipeline;
pub mod simulator;
pub mod smoother;
pub mod source;
// 公开导出这些模块里的结构体，方便外部调用
pub use classifier::MoodClassifier;
pub use error::PipelineError;
pub use pipeline::MoodPipeline;
pub use simulator::EegSimulator;
pub use smoother::EmaSmoother;
pub use source::SignalSource;
#[cfg(test)]
pub use source::ManualSource;
