//! UI-Komponenten: Toolbar, Status-Bar, Zeichenfläche, Dialoge.

pub mod canvas;
pub mod dialogs;
pub mod status;
pub mod toolbar;

pub use canvas::render_canvas;
pub use dialogs::RfdPrompt;
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
