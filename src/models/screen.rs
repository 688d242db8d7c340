/// Which screen the session is currently on.
///
/// Every controller operation guards on this tag; input that does not
/// belong to the current screen is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Main menu, before a session starts.
    Menu,
    /// A question is being answered and its timer is running.
    Question,
    /// Score summary and per-question breakdown.
    Results,
}
