//! labnotes TUI — ratatui viewer for a notebook timeline that can be
//! refreshed in place.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, Loader};

use labnotes_core::{config::Config, Snapshot};

/// Open the interactive viewer and block until the user quits.
///
/// `loader` runs once before the first frame and again on every refresh.
pub fn run<F>(loader: F, config: Config) -> anyhow::Result<()>
where
    F: FnMut() -> anyhow::Result<Snapshot> + 'static,
{
    let theme = theme::Theme::load_default();
    App::new(Box::new(loader), config, theme).run()
}
