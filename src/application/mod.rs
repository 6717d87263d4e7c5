//! Application layer - the widget and the flows it drives.
//!
//! This layer orchestrates domain state and coordinates between ports.
//! Front ends only talk to [`ChatWidget`] and the events it publishes.

mod dispatcher;
mod error;
mod escalation_timer;
mod evaluation_flow;
mod events;
mod shared;
mod stream_renderer;
mod widget;

pub use dispatcher::{DialogueDispatcher, DispatchOutcome, DispatcherSettings};
pub use error::WidgetError;
pub use evaluation_flow::EvaluationFlow;
pub use events::WidgetEvent;
pub use stream_renderer::{RevealOutcome, RevealSink, StreamRenderer};
pub use widget::{ChatWidget, WidgetDeps};
