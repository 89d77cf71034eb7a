//! HTTP request handlers.

pub mod edit_form;
pub mod forms;
pub mod views;
