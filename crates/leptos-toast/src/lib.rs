//! Leptos Toast Notifications
//!
//! Transient status messages in a fixed corner stack.
//! Queue bookkeeping is plain data; the signals wrapper adds timers.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Notification kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// Errors stay up longer
    pub fn duration(self) -> Duration {
        match self {
            ToastKind::Error => Duration::from_secs(5),
            ToastKind::Success | ToastKind::Info => Duration::from_secs(3),
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success bg-green-500 text-white",
            ToastKind::Error => "toast toast-error bg-red-500 text-white",
            ToastKind::Info => "toast toast-info bg-blue-500 text-white",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Ordered toasts, oldest first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast and return its id
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Remove by id. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Toast state signals
#[derive(Clone, Copy)]
pub struct ToastSignals {
    pub queue_read: ReadSignal<ToastQueue>,
    pub queue_write: WriteSignal<ToastQueue>,
}

pub fn create_toast_signals() -> ToastSignals {
    let (queue_read, queue_write) = signal(ToastQueue::new());
    ToastSignals { queue_read, queue_write }
}

impl ToastSignals {
    /// Show a toast and schedule its removal
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let mut id = 0;
        let message = message.into();
        self.queue_write.update(|q| id = q.push(kind, message));

        let write = self.queue_write;
        let millis = kind.duration().as_millis() as u32;
        Timeout::new(millis, move || {
            // the host may be gone by now
            let _ = write.try_update(|q| q.dismiss(id));
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue_write.update(|q| {
            q.dismiss(id);
        });
    }
}

/// Renders the toast stack; mount once near the root
#[component]
pub fn ToastHost(toasts: ToastSignals) -> impl IntoView {
    view! {
        <div class="toast-host fixed top-4 right-4 z-50 space-y-2">
            <For
                each=move || toasts.queue_read.get().toasts().to_vec()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("{} px-4 py-3 rounded shadow flex items-center gap-3", toast.kind.class())>
                            <span class="toast-message">{toast.message.clone()}</span>
                            <button
                                class="toast-close"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
