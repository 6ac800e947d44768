//! contenthub: a terminal content-management dashboard.
//!
//! The library core is [`controller::ViewController`], which owns the filter
//! state of the resource library and the subset-switching state machine.
//! Everything under [`tui`] renders that state with ratatui.

pub mod cli;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod notify;
pub mod resource;
pub mod source;
pub mod timers;
pub mod tui;
pub mod utils;
pub mod workflow;
