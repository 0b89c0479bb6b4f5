//! Terminal rendering. The simulation core never draws; it exposes drawable
//! state and this module paints it with ratatui.

pub mod scene;
