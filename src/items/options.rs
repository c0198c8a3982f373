//! # Type-specific item payload.
//!
//! [`FeedbackOptions`] bundles everything a caller can attach to an item:
//! message text, severity [`Variant`], auto-dismiss duration, a numeric
//! priority offset for admission, and confirm/cancel callbacks.
//!
//! A partial update travels as an [`OptionsPatch`]; fields left `None` keep
//! their current value.
//!
//! ## Rules
//! - `duration: None` inherits the coordinator's default duration.
//! - `duration: Some(Duration::ZERO)` means "never auto-remove".
//! - The admission priority is `variant.base_priority() + priority offset`,
//!   computed once when the item is offered to the queue.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// User-action callback stored in an item's options.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Coarse severity classification.
///
/// Drives the base admission priority and, in rendering layers, the default
/// presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Informational message (base priority 0).
    #[default]
    Info,
    /// Operation completed successfully (base priority 10).
    Success,
    /// Non-blocking warning (base priority 20).
    Warning,
    /// Error requiring attention (base priority 30).
    Error,
}

impl Variant {
    /// Base admission priority for this severity.
    pub fn base_priority(&self) -> i32 {
        match self {
            Variant::Info => 0,
            Variant::Success => 10,
            Variant::Warning => 20,
            Variant::Error => 30,
        }
    }

    /// Short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Variant::Info => "info",
            Variant::Success => "success",
            Variant::Warning => "warning",
            Variant::Error => "error",
        }
    }
}

/// Payload attached to a feedback item.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use notivisor::{FeedbackOptions, Variant};
///
/// let opts = FeedbackOptions::new()
///     .with_message("disk almost full")
///     .with_variant(Variant::Warning)
///     .with_duration(Duration::from_secs(8))
///     .with_priority(5);
///
/// assert_eq!(opts.variant(), Variant::Warning);
/// assert_eq!(opts.priority(), Some(5));
/// ```
#[derive(Clone, Default)]
pub struct FeedbackOptions {
    id: Option<String>,
    message: Option<String>,
    variant: Variant,
    duration: Option<Duration>,
    priority: Option<i32>,
    on_confirm: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl FeedbackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caller-supplied identifier; generated from the kind when absent.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Message text shown by the rendering layer.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Severity variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Auto-dismiss duration; `Duration::ZERO` disables auto-removal.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Additive priority offset on top of the variant's base priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Callback invoked by `Coordinator::confirm`.
    #[must_use]
    pub fn with_on_confirm(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_confirm = Some(Arc::new(f));
        self
    }

    /// Callback invoked by `Coordinator::cancel`.
    #[must_use]
    pub fn with_on_cancel(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Arc::new(f));
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    pub fn on_confirm(&self) -> Option<Callback> {
        self.on_confirm.clone()
    }

    pub fn on_cancel(&self) -> Option<Callback> {
        self.on_cancel.clone()
    }
}

impl fmt::Debug for FeedbackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackOptions")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("variant", &self.variant)
            .field("duration", &self.duration)
            .field("priority", &self.priority)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Partial options update merged by `Coordinator::update`.
///
/// Fields left `None` keep the item's current value. Merging never touches
/// the item's status, and never recomputes an already-enqueued priority.
#[derive(Clone, Default)]
pub struct OptionsPatch {
    message: Option<String>,
    variant: Option<Variant>,
    duration: Option<Duration>,
    priority: Option<i32>,
    on_confirm: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_on_confirm(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_confirm = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn with_on_cancel(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Arc::new(f));
        self
    }

    /// Merges the set fields into `options`.
    pub(crate) fn apply_to(&self, options: &mut FeedbackOptions) {
        if let Some(message) = &self.message {
            options.message = Some(message.clone());
        }
        if let Some(variant) = self.variant {
            options.variant = variant;
        }
        if let Some(duration) = self.duration {
            options.duration = Some(duration);
        }
        if let Some(priority) = self.priority {
            options.priority = Some(priority);
        }
        if let Some(cb) = &self.on_confirm {
            options.on_confirm = Some(cb.clone());
        }
        if let Some(cb) = &self.on_cancel {
            options.on_cancel = Some(cb.clone());
        }
    }
}

impl fmt::Debug for OptionsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("message", &self.message)
            .field("variant", &self.variant)
            .field("duration", &self.duration)
            .field("priority", &self.priority)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}
