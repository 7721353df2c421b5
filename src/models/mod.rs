pub mod panel_spec;

pub use panel_spec::PanelSpec;
