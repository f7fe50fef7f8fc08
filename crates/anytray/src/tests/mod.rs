mod icon_renderer;
mod notifier;
