//! Navigation collaborator.

/// The routing collaborator notifications navigate through.
///
/// The notification center never owns routing: it only asks for navigation
/// by target path, and only when the user is not already there.
pub trait Navigator: Send + Sync {
    /// The path the user is currently on.
    fn current_path(&self) -> String;

    /// Request navigation to `path`.
    fn navigate(&self, path: &str);
}
