#[allow(clippy::module_inception)]
mod config;
mod indicator_config;
mod listener_config;
mod state_style;

pub(crate) use {
    config::Config,
    indicator_config::IndicatorConfig,
    listener_config::ListenerConfig,
    state_style::{Glyph, StateStyle},
};

#[cfg(test)]
pub(crate) use state_style::parse_hex_color;

use anytray_core::{DEFAULT_RANGE_SIZE, DEFAULT_RANGE_START};

use std::net::{IpAddr, Ipv4Addr};

pub(crate) const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub(crate) const DEFAULT_INITIAL_STATE: &str = "blue";

pub(crate) fn default_bind_address() -> IpAddr {
    DEFAULT_BIND_ADDRESS
}

pub(crate) fn default_range_start() -> u16 {
    DEFAULT_RANGE_START
}

pub(crate) fn default_range_size() -> u16 {
    DEFAULT_RANGE_SIZE
}

pub(crate) fn default_initial_state() -> String {
    DEFAULT_INITIAL_STATE.to_string()
}
