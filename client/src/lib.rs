mod app;
mod dom;
mod net;
mod overlay;
mod palette;
mod render;
mod state;

pub use app::run;
