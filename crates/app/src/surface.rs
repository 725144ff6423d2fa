//! Mount target for the terminal front end.

use meridian_application::ClientContext;
use meridian_application::ports::MountTarget;
use parking_lot::Mutex;

/// Holds the context of the client attached to the terminal.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    context: Mutex<Option<ClientContext>>,
}

impl TerminalSurface {
    /// An empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a client is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.context.lock().is_some()
    }
}

impl MountTarget for TerminalSurface {
    fn id(&self) -> &str {
        "terminal"
    }

    fn attach(&self, context: ClientContext) {
        tracing::debug!(layout = ?context.layout, "client attached to terminal");
        *self.context.lock() = Some(context);
    }
}
