/// Load state of a screen that fetches its event on mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Loading,
    Ready,
    NotFound,
}
