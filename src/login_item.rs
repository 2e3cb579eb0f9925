/// Host service that persists "start this at login" entries.
pub trait LoginItemService {
    /// Enable or disable the login item named `identifier`. Returns `false`
    /// when the host refused; callers log and carry on.
    fn set_enabled(&mut self, identifier: &str, enabled: bool) -> bool;
}

/// The auto-launcher's login item as last confirmed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginItemRegistration {
    identifier: String,
    enabled: bool,
}

impl LoginItemRegistration {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            enabled: false,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable<L: LoginItemService + ?Sized>(&mut self, service: &mut L) -> bool {
        self.apply(service, true)
    }

    pub fn disable<L: LoginItemService + ?Sized>(&mut self, service: &mut L) -> bool {
        self.apply(service, false)
    }

    fn apply<L: LoginItemService + ?Sized>(&mut self, service: &mut L, enabled: bool) -> bool {
        let verb = if enabled { "enable" } else { "disable" };
        if service.set_enabled(&self.identifier, enabled) {
            self.enabled = enabled;
            log::info!("login item: {} -> {verb}d", self.identifier);
            true
        } else {
            log::warn!("login item: failed to {verb} {}", self.identifier);
            false
        }
    }
}
