//! Bridge-managed global hotkey registration
//!
//! Application logic drives a single OS-level hotkey through the
//! `specter/hotkey` channel. At most one bridge-managed registration is live
//! at any time; the OS side is reached through [`HotkeyBackend`] so the state
//! machine is testable without a window.

use serde_json::{json, Value};

use super::messenger::{MethodCall, MethodResult};

/// Channel identifier for the hotkey bridge.
pub const HOTKEY_CHANNEL: &str = "specter/hotkey";

/// Inbound method names.
pub const METHOD_REGISTER: &str = "registerHotkey";
pub const METHOD_UNREGISTER: &str = "unregisterHotkey";
pub const METHOD_GET_CURRENT: &str = "getCurrentHotkey";

/// Outbound notification pushed when the registered hotkey fires.
pub const NOTIFY_PRESSED: &str = "onHotkeyPressed";

/// Error code for malformed register calls.
pub const ERROR_INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";

/// OS-facing side of hotkey registration.
///
/// Both operations report acceptance as a boolean; an OS rejection (the
/// combination is taken, nothing to release) is an expected outcome, not an
/// error.
pub trait HotkeyBackend {
    fn register(&mut self, id: i32, modifiers: u32, key_code: u32) -> bool;
    fn unregister(&mut self, id: i32) -> bool;
}

/// A live hotkey registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    pub id: i32,
    pub modifiers: u32,
    pub key_code: u32,
}

/// State machine behind the hotkey bridge channel.
pub struct HotkeyService<B> {
    backend: B,
    // Ids are handed out monotonically from 1 and never reused while the
    // process runs; a rejected registration still consumes its id.
    last_id: i32,
    current: Option<Registration>,
}

impl<B: HotkeyBackend> HotkeyService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            last_id: 0,
            current: None,
        }
    }

    /// The live registration, if any.
    pub fn current(&self) -> Option<Registration> {
        self.current
    }

    /// Id of the live registration, used to match incoming hotkey messages.
    pub fn current_id(&self) -> Option<i32> {
        self.current.map(|reg| reg.id)
    }

    /// Replace any existing registration with a new one.
    ///
    /// The previous registration is always released first, so a rejected
    /// request leaves nothing registered. Returns whether the OS accepted.
    pub fn register(&mut self, modifiers: u32, key_code: u32) -> bool {
        if let Some(prev) = self.current.take() {
            let _ = self.backend.unregister(prev.id);
        }

        self.last_id += 1;
        let id = self.last_id;

        if self.backend.register(id, modifiers, key_code) {
            self.current = Some(Registration {
                id,
                modifiers,
                key_code,
            });
            true
        } else {
            false
        }
    }

    /// Release the current registration.
    ///
    /// Returns false when nothing is registered or the OS refuses the
    /// release; in the latter case the registration stays current.
    pub fn unregister(&mut self) -> bool {
        let Some(reg) = self.current else {
            return false;
        };
        if self.backend.unregister(reg.id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Dispatch an inbound bridge call.
    pub fn handle_call(&mut self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            METHOD_REGISTER => self.handle_register(&call.args),
            METHOD_UNREGISTER => MethodResult::Success(Value::Bool(self.unregister())),
            METHOD_GET_CURRENT => self.handle_get_current(),
            _ => MethodResult::NotImplemented,
        }
    }

    fn handle_register(&mut self, args: &Value) -> MethodResult {
        let Some(map) = args.as_object() else {
            return MethodResult::error(ERROR_INVALID_ARGUMENTS, "arguments must be a map");
        };

        let modifiers = map.get("modifiers").and_then(Value::as_i64);
        let key_code = map.get("keyCode").and_then(Value::as_i64);

        // Validate before touching the live registration
        let (Some(modifiers), Some(key_code)) = (modifiers, key_code) else {
            return MethodResult::error(ERROR_INVALID_ARGUMENTS, "missing modifiers or keyCode");
        };

        let accepted = self.register(modifiers as u32, key_code as u32);
        MethodResult::Success(Value::Bool(accepted))
    }

    fn handle_get_current(&self) -> MethodResult {
        match self.current {
            Some(reg) => MethodResult::Success(json!({
                "modifiers": reg.modifiers,
                "keyCode": reg.key_code,
            })),
            None => MethodResult::Success(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeState {
        /// Registrations the fake OS currently considers live
        active: Vec<(i32, u32, u32)>,
        reject_register: bool,
        fail_release: bool,
    }

    #[derive(Clone, Default)]
    struct FakeBackend(Rc<RefCell<FakeState>>);

    impl HotkeyBackend for FakeBackend {
        fn register(&mut self, id: i32, modifiers: u32, key_code: u32) -> bool {
            let mut state = self.0.borrow_mut();
            if state.reject_register {
                return false;
            }
            state.active.push((id, modifiers, key_code));
            true
        }

        fn unregister(&mut self, id: i32) -> bool {
            let mut state = self.0.borrow_mut();
            if state.fail_release {
                return false;
            }
            state.active.retain(|&(live, _, _)| live != id);
            true
        }
    }

    fn service() -> (HotkeyService<FakeBackend>, FakeBackend) {
        let backend = FakeBackend::default();
        (HotkeyService::new(backend.clone()), backend)
    }

    fn register_call(args: Value) -> MethodCall {
        MethodCall::new(METHOD_REGISTER, args)
    }

    #[test]
    fn test_second_register_replaces_first() {
        let (mut service, backend) = service();

        assert!(service.register(2, 0x41));
        assert!(service.register(3, 0xBF));

        // Only the second pair is still live at the OS level
        assert_eq!(backend.0.borrow().active, vec![(2, 3, 0xBF)]);
        assert_eq!(
            service.current(),
            Some(Registration {
                id: 2,
                modifiers: 3,
                key_code: 0xBF
            })
        );
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let (mut service, backend) = service();

        assert!(service.register(1, 0x41));
        assert_eq!(service.current_id(), Some(1));

        backend.0.borrow_mut().reject_register = true;
        assert!(!service.register(1, 0x42)); // consumes id 2
        assert_eq!(service.current(), None);

        backend.0.borrow_mut().reject_register = false;
        assert!(service.register(1, 0x43));
        assert_eq!(service.current_id(), Some(3));
    }

    #[test]
    fn test_rejected_register_leaves_nothing_current() {
        let (mut service, backend) = service();
        assert!(service.register(2, 0x41));

        backend.0.borrow_mut().reject_register = true;
        assert!(!service.register(4, 0x42));

        // The previous registration was released before the failed attempt
        assert_eq!(service.current(), None);
        assert!(backend.0.borrow().active.is_empty());
        assert_eq!(service.handle_get_current(), MethodResult::Success(Value::Null));
    }

    #[test]
    fn test_unregister_without_registration_is_false() {
        let (mut service, _backend) = service();
        assert!(!service.unregister());
        assert_eq!(service.current(), None);
    }

    #[test]
    fn test_unregister_after_register() {
        let (mut service, backend) = service();
        assert!(service.register(3, 0xBF));

        assert!(service.unregister());
        assert_eq!(service.current(), None);
        assert!(backend.0.borrow().active.is_empty());
    }

    #[test]
    fn test_failed_release_keeps_registration() {
        let (mut service, backend) = service();
        assert!(service.register(3, 0xBF));

        backend.0.borrow_mut().fail_release = true;
        assert!(!service.unregister());
        assert_eq!(
            service.current(),
            Some(Registration {
                id: 1,
                modifiers: 3,
                key_code: 0xBF
            })
        );
    }

    #[test]
    fn test_register_call_missing_key_code() {
        let (mut service, _backend) = service();
        assert!(service.register(3, 0xBF));

        let result = service.handle_call(&register_call(json!({"modifiers": 1})));
        assert_eq!(
            result,
            MethodResult::error(ERROR_INVALID_ARGUMENTS, "missing modifiers or keyCode")
        );
        // Existing registration untouched
        assert_eq!(service.current_id(), Some(1));
    }

    #[test]
    fn test_register_call_args_not_a_map() {
        let (mut service, _backend) = service();

        let result = service.handle_call(&register_call(Value::Null));
        assert_eq!(
            result,
            MethodResult::error(ERROR_INVALID_ARGUMENTS, "arguments must be a map")
        );

        let result = service.handle_call(&register_call(json!([1, 2])));
        assert_eq!(
            result,
            MethodResult::error(ERROR_INVALID_ARGUMENTS, "arguments must be a map")
        );
    }

    #[test]
    fn test_get_current_before_any_register() {
        let (mut service, _backend) = service();
        let result = service.handle_call(&MethodCall::without_args(METHOD_GET_CURRENT));
        assert_eq!(result, MethodResult::Success(Value::Null));
    }

    #[test]
    fn test_unknown_method_is_not_implemented() {
        let (mut service, _backend) = service();
        let result = service.handle_call(&MethodCall::without_args("setHotkeyColor"));
        assert_eq!(result, MethodResult::NotImplemented);
    }

    #[test]
    fn test_full_register_query_unregister_scenario() {
        let (mut service, _backend) = service();

        let result =
            service.handle_call(&register_call(json!({"modifiers": 3, "keyCode": 191})));
        assert_eq!(result, MethodResult::Success(Value::Bool(true)));

        let result = service.handle_call(&MethodCall::without_args(METHOD_GET_CURRENT));
        assert_eq!(
            result,
            MethodResult::Success(json!({"modifiers": 3, "keyCode": 191}))
        );

        let result = service.handle_call(&MethodCall::without_args(METHOD_UNREGISTER));
        assert_eq!(result, MethodResult::Success(Value::Bool(true)));

        let result = service.handle_call(&MethodCall::without_args(METHOD_GET_CURRENT));
        assert_eq!(result, MethodResult::Success(Value::Null));

        let result = service.handle_call(&MethodCall::without_args(METHOD_UNREGISTER));
        assert_eq!(result, MethodResult::Success(Value::Bool(false)));
    }
}
