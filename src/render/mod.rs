//! Renderers turn a [`Page`] into something a person can look at.

pub mod html;
pub mod terminal;

pub use html::HtmlRenderer;
pub use terminal::TerminalRenderer;

use crate::page::Page;

pub trait PageRenderer {
    fn render(&self, page: &Page) -> String;
}
