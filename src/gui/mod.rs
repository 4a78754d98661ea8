//! GUI module
//!
//! Provides the Slint-based graphical user interface: the main window plus
//! the glue that translates widget callbacks into controller actions and
//! mirrors session state back into the widgets.

pub mod gui_controller;

pub use gui_controller::GuiController;
