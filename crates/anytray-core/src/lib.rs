//! AnyTray Core Library
//!
//! UDP command ingestion for a tray status indicator: pick a free port,
//! receive one-datagram text commands, queue them, and resolve them into
//! indicator states for a presentation layer to render.
//!
//! # Example
//!
//! ```no_run
//! use anytray_core::{
//!     CommandChannel, CommandDispatcher, CoreResult, DatagramListener, IndicatorRenderer,
//!     IndicatorState, PortAllocator, PortRange, RecognizedStates,
//! };
//!
//! use std::{convert::Infallible, net::Ipv4Addr};
//!
//! struct Stdout;
//!
//! impl IndicatorRenderer for Stdout {
//!     type Error = Infallible;
//!
//!     fn render(&mut self, state: &IndicatorState) -> Result<(), Infallible> {
//!         println!("indicator: {}", state);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let port = PortAllocator::system().allocate(PortRange::default())?;
//!     let channel = CommandChannel::new();
//!     let listener = DatagramListener::start(Ipv4Addr::LOCALHOST.into(), port, channel.clone()).await?;
//!
//!     let mut dispatcher = CommandDispatcher::new(
//!         channel,
//!         RecognizedStates::default(),
//!         Stdout,
//!         IndicatorState::new("blue"),
//!     );
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     dispatcher.drain();
//!
//!     listener.stop().await
//! }
//! ```

mod channel;
mod dispatch;
mod error;
mod listener;
mod port;

pub use {
    channel::{ChannelEvent, CommandChannel},
    dispatch::{
        CommandDispatcher, DEFAULT_STATE_NAMES, DrainSummary, IndicatorRenderer, IndicatorState,
        RecognizedStates,
    },
    error::{CoreError, Result as CoreResult},
    listener::{DatagramListener, MAX_DATAGRAM_SIZE},
    port::{
        ActiveListeners, DEFAULT_RANGE_SIZE, DEFAULT_RANGE_START, PortAllocator, PortRange,
        SystemListeners, first_free,
    },
};

#[cfg(test)]
mod tests;
