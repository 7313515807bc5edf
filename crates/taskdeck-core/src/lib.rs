//! Core taskdeck library (session, forms, submission flows, layout, config).

pub mod api;
pub mod config;
pub mod flows;
pub mod forms;
pub mod layout;
pub mod routes;
pub mod session;
pub mod theme;
