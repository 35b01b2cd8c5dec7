//! # Integration Flows
//!
//! Both apps driven through `DappContext` against the in-memory ledger:
//! builder → coordinator → gateway → confirmation handler → reconciler.

pub mod failure_modes;
pub mod locator_flow;
pub mod pizza_flow;
pub mod reputation_flow;
