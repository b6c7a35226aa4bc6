//! In-process method-call channel
//!
//! Channels are addressed by name. Application logic sends a method call and
//! receives exactly one terminal outcome; the shell pushes one-way
//! notifications the other direction. Everything runs synchronously on the
//! message-loop thread, so handlers must not call back into the messenger.

use std::collections::HashMap;

use serde_json::Value;

/// A transient request: method name plus a JSON-style argument value.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub args: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// A call carrying no arguments.
    pub fn without_args(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }
}

/// The single terminal outcome of a method call.
#[derive(Clone, Debug, PartialEq)]
pub enum MethodResult {
    /// Success; `Value::Null` means success-with-no-value
    Success(Value),
    /// A named error the caller must treat as programmer error
    Error { code: String, message: String },
    /// The channel does not support the requested method
    NotImplemented,
}

impl MethodResult {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        MethodResult::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Handles inbound calls on a channel.
pub type MethodHandler = Box<dyn FnMut(&MethodCall) -> MethodResult>;

/// Observes outbound one-way notifications on a channel.
pub type NotificationHandler = Box<dyn FnMut(&MethodCall)>;

/// Routes calls and notifications between the shell and application logic.
#[derive(Default)]
pub struct Messenger {
    handlers: HashMap<String, MethodHandler>,
    listeners: HashMap<String, NotificationHandler>,
}

impl Messenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the inbound handler for a channel, replacing any previous one.
    pub fn set_method_handler(&mut self, channel: impl Into<String>, handler: MethodHandler) {
        self.handlers.insert(channel.into(), handler);
    }

    pub fn remove_method_handler(&mut self, channel: &str) {
        self.handlers.remove(channel);
    }

    /// Deliver a call to a channel's handler.
    ///
    /// A channel nobody handles reports not-implemented, the same outcome an
    /// unknown method gets from a live handler.
    pub fn send(&mut self, channel: &str, call: &MethodCall) -> MethodResult {
        match self.handlers.get_mut(channel) {
            Some(handler) => handler(call),
            None => MethodResult::NotImplemented,
        }
    }

    /// Install the outbound notification observer for a channel.
    pub fn set_notification_handler(
        &mut self,
        channel: impl Into<String>,
        handler: NotificationHandler,
    ) {
        self.listeners.insert(channel.into(), handler);
    }

    /// Push a one-way notification. No response is expected; a channel with
    /// no observer drops the notification.
    pub fn notify(&mut self, channel: &str, method: &str) {
        if let Some(listener) = self.listeners.get_mut(channel) {
            listener(&MethodCall::without_args(method));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_send_routes_to_handler() {
        let mut messenger = Messenger::new();
        messenger.set_method_handler(
            "test/echo",
            Box::new(|call| MethodResult::Success(call.args.clone())),
        );

        let call = MethodCall::new("echo", serde_json::json!({"n": 7}));
        let result = messenger.send("test/echo", &call);
        assert_eq!(result, MethodResult::Success(serde_json::json!({"n": 7})));
    }

    #[test]
    fn test_unknown_channel_is_not_implemented() {
        let mut messenger = Messenger::new();
        let result = messenger.send("nobody/home", &MethodCall::without_args("ping"));
        assert_eq!(result, MethodResult::NotImplemented);
    }

    #[test]
    fn test_notify_reaches_listener() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut messenger = Messenger::new();
        messenger.set_notification_handler(
            "test/events",
            Box::new(move |call| sink.borrow_mut().push(call.method.clone())),
        );

        messenger.notify("test/events", "onSomething");
        messenger.notify("test/other", "dropped");

        assert_eq!(*seen.borrow(), vec!["onSomething".to_string()]);
    }

    #[test]
    fn test_replacing_handler_wins() {
        let mut messenger = Messenger::new();
        messenger.set_method_handler("c", Box::new(|_| MethodResult::error("OLD", "")));
        messenger.set_method_handler("c", Box::new(|_| MethodResult::Success(Value::Null)));

        let result = messenger.send("c", &MethodCall::without_args("m"));
        assert_eq!(result, MethodResult::Success(Value::Null));
    }

    #[test]
    fn test_removed_handler_is_not_implemented() {
        let mut messenger = Messenger::new();
        messenger.set_method_handler("c", Box::new(|_| MethodResult::Success(Value::Null)));
        messenger.remove_method_handler("c");

        let result = messenger.send("c", &MethodCall::without_args("m"));
        assert_eq!(result, MethodResult::NotImplemented);
    }
}
