//! Mount target port.

use crate::client::ClientContext;

/// A host surface the client application can be attached to.
///
/// The target receives the shared client context and is responsible for
/// rendering from it.
pub trait MountTarget: Send + Sync {
    /// Stable identifier of the target, used in diagnostics.
    fn id(&self) -> &str;

    /// Attaches the application.
    ///
    /// Attaching twice is not guarded against; targets that care must
    /// handle repeated calls themselves.
    fn attach(&self, context: ClientContext);
}
