//! CLI progress callback with styled output

use crate::cli::style::Stylize;
use anstream::println;
use async_trait::async_trait;
use forkstep::patcher::{ProgressCallback, Step};
use std::sync::Mutex;

/// Prints each step as it starts and remembers the one in flight
#[derive(Default)]
pub struct CliProgress {
    current: Mutex<Option<Step>>,
}

impl CliProgress {
    /// Create a progress printer with no step started
    pub fn new() -> Self {
        Self::default()
    }

    /// Last step announced, if any
    pub fn current_step(&self) -> Option<Step> {
        self.current.lock().ok().and_then(|s| *s)
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_step(&self, step: Step) {
        if let Ok(mut current) = self.current.lock() {
            *current = Some(step);
        }
        let counter = format!("[{}/{}]", step.number(), Step::ALL.len());
        println!("{} {}...", counter.muted(), step.to_string().emphasis());
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
