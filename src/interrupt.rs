// src/interrupt.rs
// Ctrl-C → EngineCommand::Stop
use crate::types::EngineCommand;
use anyhow::{Context, Result};
use log::info;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

/// Forwards a stop request to whichever engine is currently attached.
/// The process-wide handler can only be installed once, while the window
/// and console modes each own their own command channel.
#[derive(Clone, Default)]
pub struct StopRelay {
    target: Arc<Mutex<Option<Sender<EngineCommand>>>>,
}

impl StopRelay {
    /// Install the Ctrl-C handler. Call once per process.
    pub fn install() -> Result<Self> {
        let relay = StopRelay::default();
        let handler = relay.clone();
        ctrlc::set_handler(move || {
            info!("Exiting...");
            handler.request_stop();
        })
        .context("failed to install Ctrl-C handler")?;
        Ok(relay)
    }

    pub fn attach(&self, tx: Sender<EngineCommand>) {
        if let Ok(mut target) = self.target.lock() {
            *target = Some(tx);
        }
    }

    /// Returns whether an engine received the request.
    pub fn request_stop(&self) -> bool {
        match self.target.lock() {
            Ok(target) => target
                .as_ref()
                .is_some_and(|tx| tx.send(EngineCommand::Stop).is_ok()),
            Err(_) => false,
        }
    }
}
