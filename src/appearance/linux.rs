use super::AppearanceSource;

use std::process::Command;
use std::sync::mpsc::Sender;
use std::time::Duration;

// DBus
use dbus::arg::{RefArg, Variant};
use dbus::blocking::{Connection, Proxy};
use dbus::{arg, Message};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::theme::Theme;

struct OrgFreeDesktopPortalDesktop {
    pub sender: String,
    pub key: String,
    pub value: Variant<Box<dyn RefArg>>,
}

impl arg::AppendAll for OrgFreeDesktopPortalDesktop {
    fn append(&self, i: &mut arg::IterAppend) {
        RefArg::append(&self.sender, i);
    }
}

impl arg::ReadAll for OrgFreeDesktopPortalDesktop {
    fn read(i: &mut arg::Iter) -> Result<Self, arg::TypeMismatchError> {
        Ok(OrgFreeDesktopPortalDesktop {
            sender: i.read()?,
            key: i.read()?,
            value: i.read()?,
        })
    }
}

impl dbus::message::SignalArgs for OrgFreeDesktopPortalDesktop {
    const NAME: &'static str = "SettingChanged";
    const INTERFACE: &'static str = "org.freedesktop.portal.Settings";
}

fn read_color_scheme() -> Result<i64> {
    let conn = Connection::new_session()?;
    let proxy = Proxy::new(
        "org.freedesktop.portal.Desktop",
        "/org/freedesktop/portal/desktop",
        Duration::from_millis(5000),
        &conn,
    );
    let result: (Variant<Box<dyn RefArg>>,) = proxy.method_call(
        "org.freedesktop.portal.Settings",
        "Read",
        ("org.freedesktop.appearance", "color-scheme"),
    )?;
    result
        .0
         .0
        .as_i64()
        .ok_or_else(|| anyhow!("color-scheme is not an integer"))
}

#[derive(Copy, Clone)]
pub struct PortalSource;

impl PortalSource {
    pub fn new() -> PortalSource {
        PortalSource {}
    }
}

impl AppearanceSource for PortalSource {
    fn current(&self) -> Theme {
        match read_color_scheme() {
            Ok(value) => Theme::from_color_scheme(value),
            Err(err) => {
                debug!(%err, "portal read failed, assuming light");
                Theme::Light
            }
        }
    }

    fn watch(&self, events: Sender<()>) -> Result<()> {
        let connection = Connection::new_session().context("connecting to the session bus")?;
        let proxy = connection.with_proxy(
            "org.freedesktop.portal.Desktop",
            "/org/freedesktop/portal/desktop",
            Duration::from_millis(5000),
        );

        proxy
            .match_signal(
                move |h: OrgFreeDesktopPortalDesktop, _: &Connection, _: &Message| {
                    if h.sender == "org.freedesktop.appearance" && h.key == "color-scheme" {
                        debug!(scheme = h.value.as_i64(), "appearance change notification");
                        let _ = events.send(());
                    }
                    true
                },
            )
            .context("subscribing to portal setting changes")?;

        loop {
            connection
                .process(Duration::from_millis(1000))
                .context("processing session bus messages")?;
        }
    }
}

/// Write the preference through gsettings. Fire and forget; a failure
/// leaves the preference as it was.
pub fn set(theme: Theme) {
    let scheme = match theme {
        Theme::Dark => "prefer-dark",
        Theme::Light => "default",
    };
    let _ = Command::new("gsettings")
        .args(["set", "org.gnome.desktop.interface", "color-scheme", scheme])
        .output();
}

/// The portal has no write interface, so toggling reads the current state
/// and writes the opposite.
pub fn toggle() {
    set(PortalSource::new().current().opposite());
}
