mod channel_event;
mod command_channel;

pub use {channel_event::ChannelEvent, command_channel::CommandChannel};
