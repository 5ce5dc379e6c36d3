use super::AppearanceSource;

use std::process::Command;
use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use tracing::debug;

use objc2::rc::Retained;
use objc2::{define_class, msg_send, sel, AllocAnyThread, DefinedClass};
use objc2_app_kit::NSApplication;
use objc2_foundation::{
    ns_string, MainThreadMarker, NSDistributedNotificationCenter, NSNotification, NSObject,
    NSObjectProtocol, NSUserDefaults,
};

use crate::theme::Theme;

/// The AppleScript statement the mutator completes with "true", "false" or
/// "not dark mode".
const SET_PREFIX: &str =
    "tell application \"System Events\" to tell appearance preferences to set dark mode to";

struct AppearanceObserverIvars {
    events: Sender<()>,
}

define_class!(
    #[unsafe(super(NSObject))]
    #[name = "AppearanceObserver"]
    #[ivars = AppearanceObserverIvars]
    struct AppearanceObserver;

    impl AppearanceObserver {
        #[unsafe(method(appearanceDidChange:))]
        fn _appearance_did_change(&self, _notification: &NSNotification) {
            debug!("appearance change notification");
            let _ = self.ivars().events.send(());
        }
    }

    unsafe impl NSObjectProtocol for AppearanceObserver {}
);

impl AppearanceObserver {
    fn new(events: Sender<()>) -> Retained<Self> {
        let observer = Self::alloc().set_ivars(AppearanceObserverIvars { events });
        unsafe { msg_send![super(observer), init] }
    }
}

#[derive(Copy, Clone)]
pub struct DefaultsSource;

impl DefaultsSource {
    pub fn new() -> DefaultsSource {
        DefaultsSource {}
    }
}

impl AppearanceSource for DefaultsSource {
    fn current(&self) -> Theme {
        let style = unsafe {
            NSUserDefaults::standardUserDefaults().stringForKey(ns_string!("AppleInterfaceStyle"))
        };
        let style = style.map(|value| value.to_string());
        Theme::from_interface_style(style.as_deref())
    }

    fn watch(&self, events: Sender<()>) -> Result<()> {
        let mtm =
            MainThreadMarker::new().context("the appearance watcher must run on the main thread")?;
        let app = NSApplication::sharedApplication(mtm);
        let observer = AppearanceObserver::new(events);

        unsafe {
            let center = NSDistributedNotificationCenter::defaultCenter();
            center.addObserver_selector_name_object(
                &observer,
                sel!(appearanceDidChange:),
                Some(ns_string!("AppleInterfaceThemeChangedNotification")),
                None,
            );
        }
        app.run();
        Ok(())
    }
}

/// Run an appearance statement through the scripting bridge. Fire and
/// forget; a failure leaves the preference as it was.
fn run_applescript(value: &str) {
    let _ = Command::new("osascript")
        .arg("-e")
        .arg(format!("{SET_PREFIX} {value}"))
        .output();
}

pub fn set(theme: Theme) {
    match theme {
        Theme::Dark => run_applescript("true"),
        Theme::Light => run_applescript("false"),
    }
}

pub fn toggle() {
    run_applescript("not dark mode");
}
