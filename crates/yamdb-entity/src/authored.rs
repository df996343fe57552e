//! Ownership marker for resources that carry an author.

/// A resource created by, and owned by, a single identity.
///
/// The author is set once from the authenticated caller at creation time
/// and is never changed afterwards. Ownership is decided by the identity
/// id; the username is a display copy that follows renames.
pub trait Authored {
    /// Id of the identity that created the resource.
    fn author_id(&self) -> i64;

    /// Current username of that identity.
    fn author(&self) -> &str;
}
