//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`]. A staff back-office transport would sit
//! alongside it, driving `StaffOrdersCommand`.

pub mod http;
