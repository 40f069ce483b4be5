pub mod widget_model;
