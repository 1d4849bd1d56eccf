//! `gtc-peer` - EAP-GTC peer method and operational settings loader
//!
//! [`gtc`] implements the peer side of EAP Generic Token Card, including
//! the EAP-FAST tunnel framing and vendor error codes that drive password
//! changes. [`settings`] loads the bounded key-value settings file that
//! tunes supplicant timing on embedded radios.

pub mod cli;
pub mod error;
pub mod gtc;
pub mod observability;
pub mod settings;
