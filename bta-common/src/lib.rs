//! Core library for BtAssist: a notification-driven test orchestration
//! harness for a short-range wireless link controller.
//!
//! The harness drives scripted operations (open/close/discover/pair/
//! unpair/rename) through the privileged [`link::LinkOps`] surface and
//! decides pass/fail purely from the platform's asynchronous state-change
//! notifications, routed through [`dispatch::Harness`]. Pairing automation
//! comes in two mutually exclusive flavors: the dispatcher's foreground
//! auto-confirmation and the background [`watcher::PassivePairingWatcher`],
//! with [`bot::ScreenBot`] as the unprivileged fallback.

#![forbid(unsafe_code)]

pub mod bot;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod feed;
pub mod link;
pub mod notify;
pub mod registry;
pub mod report;
pub mod sim;
pub mod testcase;
pub mod types;
pub mod ui_tree;
pub mod watcher;
