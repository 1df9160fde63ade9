//! Top-level render supervision.
//!
//! [`Supervisor`] wraps the root render and swaps the whole view for a reload
//! prompt after the first failure. Faults raised outside a render (panics on
//! other tasks, explicit [`report`] calls) travel through a process-wide
//! channel opened once with [`install`].

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::Cell;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use thiserror::Error;

const UNKNOWN_FAULT: &str = "Unexpected runtime error";

static REPORTER: Mutex<Option<Sender<Fault>>> = Mutex::new(None);

thread_local! {
    // Set while `Supervisor::render` runs its view; the panic hook leaves
    // those panics to `catch_unwind`.
    static RENDERING: Cell<bool> = const { Cell::new(false) };
}

struct RenderScope {
    outer: bool,
}

impl RenderScope {
    fn enter() -> Self {
        Self {
            outer: RENDERING.with(|r| r.replace(true)),
        }
    }
}

impl Drop for RenderScope {
    fn drop(&mut self) {
        RENDERING.with(|r| r.set(self.outer));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultOrigin {
    Render,
    Panic,
    Report,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub origin: FaultOrigin,
    pub message: String,
}

impl Fault {
    pub fn new(origin: FaultOrigin, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_FAULT.to_string()
        } else {
            message
        };
        Self { origin, message }
    }
}

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("error reporting channel is already installed")]
    AlreadyInstalled,
    #[error("error reporting channel lock was poisoned")]
    Poisoned,
}

pub struct FallbackCopy {
    pub title: &'static str,
    pub body: &'static str,
    pub action: &'static str,
}

pub const FALLBACK: FallbackCopy = FallbackCopy {
    title: "Oops! Something went wrong",
    body: "We encountered an unexpected error. Don't worry, your data is safe.",
    action: "Reload Page",
};

#[derive(Debug, Default)]
pub struct Supervisor {
    fault: Option<Fault>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Runs `view` unless a fault is already recorded. An `Err` or a panic
    /// records a fault and the fallback is rendered instead.
    pub fn render<T, E: Display>(
        &mut self,
        view: impl FnOnce() -> Result<T, E>,
        fallback: impl FnOnce(&Fault) -> T,
    ) -> T {
        if let Some(fault) = &self.fault {
            return fallback(fault);
        }

        let outcome = {
            let _scope = RenderScope::enter();
            panic::catch_unwind(AssertUnwindSafe(view))
        };
        let fault = match outcome {
            Ok(Ok(rendered)) => return rendered,
            Ok(Err(e)) => Fault::new(FaultOrigin::Render, e.to_string()),
            Err(payload) => Fault::new(FaultOrigin::Panic, describe_panic(payload.as_ref())),
        };
        tracing::error!(origin = ?fault.origin, message = %fault.message, "render failed");
        let rendered = fallback(&fault);
        self.fault = Some(fault);
        rendered
    }

    /// Records `fault` if nothing is recorded yet. Returns whether it was taken.
    pub fn capture(&mut self, fault: Fault) -> bool {
        if self.fault.is_some() {
            tracing::debug!(message = %fault.message, "ignoring fault, already showing fallback");
            return false;
        }
        tracing::error!(origin = ?fault.origin, message = %fault.message, "runtime fault captured");
        self.fault = Some(fault);
        true
    }

    pub fn absorb(&mut self, channel: &ErrorChannel) -> bool {
        let mut taken = false;
        for fault in channel.drain() {
            taken |= self.capture(fault);
        }
        taken
    }

    pub fn reset(&mut self) {
        self.fault = None;
    }
}

pub fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        UNKNOWN_FAULT.to_string()
    }
}

/// Receiving end of the process-wide reporting channel. Dropping it closes
/// the channel and puts the default panic hook back.
pub struct ErrorChannel {
    rx: Mutex<Receiver<Fault>>,
}

impl ErrorChannel {
    pub fn drain(&self) -> Vec<Fault> {
        match self.rx.lock() {
            Ok(rx) => rx.try_iter().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Drop for ErrorChannel {
    fn drop(&mut self) {
        if let Ok(mut slot) = REPORTER.lock() {
            *slot = None;
        }
        if !std::thread::panicking() {
            drop(panic::take_hook());
        }
    }
}

pub fn install() -> Result<ErrorChannel, SupervisorError> {
    let (tx, rx) = mpsc::channel();
    {
        let mut slot = REPORTER.lock().map_err(|_| SupervisorError::Poisoned)?;
        if slot.is_some() {
            return Err(SupervisorError::AlreadyInstalled);
        }
        *slot = Some(tx);
    }

    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if !RENDERING.with(Cell::get) {
            let mut message = describe_panic(info.payload());
            if let Some(loc) = info.location() {
                message = format!("{message} ({}:{})", loc.file(), loc.line());
            }
            forward(Fault::new(FaultOrigin::Panic, message));
        }
        previous(info);
    }));

    Ok(ErrorChannel { rx: Mutex::new(rx) })
}

/// Queues a fault for whoever holds the [`ErrorChannel`]. Returns false when
/// no channel is installed.
pub fn report(message: impl Into<String>) -> bool {
    forward(Fault::new(FaultOrigin::Report, message))
}

fn forward(fault: Fault) -> bool {
    let Ok(slot) = REPORTER.lock() else {
        return false;
    };
    match slot.as_ref() {
        Some(tx) => tx.send(fault).is_ok(),
        None => false,
    }
}
