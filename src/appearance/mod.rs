use std::sync::mpsc::Sender;

use anyhow::Result;

use crate::theme::Theme;

cfg_if::cfg_if!(
    if #[cfg(target_os = "linux")] {
        mod linux;
        use crate::appearance::linux::PortalSource;
        pub fn create_source() -> PortalSource {
            PortalSource::new()
        }
        pub fn set(theme: Theme) {
            linux::set(theme)
        }
        pub fn toggle() {
            linux::toggle()
        }
    } else if #[cfg(target_os = "macos")] {
        mod macos;
        use crate::appearance::macos::DefaultsSource;
        pub fn create_source() -> DefaultsSource {
            DefaultsSource::new()
        }
        pub fn set(theme: Theme) {
            macos::set(theme)
        }
        pub fn toggle() {
            macos::toggle()
        }
    }
);

/**
 * One OS appearance backend: a live read plus a blocking notification
 * subscription.
 */
pub trait AppearanceSource {
    /**
     * The current appearance, read fresh from the OS on every call. Never
     * fails; anything the OS reports outside the recognized dark marker
     * counts as light.
     */
    fn current(&self) -> Theme;

    /**
     * Subscribe to appearance-change notifications, sending one unit event
     * per delivered notification. The notification payload is ignored, only
     * its arrival matters. Blocks the calling thread indefinitely.
     */
    fn watch(&self, events: Sender<()>) -> Result<()>;
}
