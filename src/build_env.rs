/// Build type that marks a production image.
pub const PRODUCTION_BUILD_TYPE: &str = "user";
/// Device-name prefix shared by emulators and generic system images.
pub const GENERIC_DEVICE_PREFIX: &str = "generic";

/// Environment variable overriding the detected build type off-device.
pub const BUILD_TYPE_VAR: &str = "LOGCAT_BUILD_TYPE";
/// Environment variable overriding the detected device name off-device.
pub const DEVICE_VAR: &str = "LOGCAT_DEVICE";

/// Build and device signals supplied by the host platform.
///
/// Read once at startup and treated as immutable afterwards; the facade only
/// consults them to seed its debug override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnvironment {
    build_type: String,
    device: String,
}

impl BuildEnvironment {
    pub fn new(build_type: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            build_type: build_type.into(),
            device: device.into(),
        }
    }

    /// A `user` build on real hardware: the only combination that hides
    /// verbose output by default.
    #[must_use]
    pub fn production() -> Self {
        Self::new(PRODUCTION_BUILD_TYPE, "device")
    }

    /// An engineering build, as produced for local development.
    #[must_use]
    pub fn development() -> Self {
        Self::new("eng", "device")
    }

    /// Detects the running platform's signals.
    ///
    /// On Android these are `ro.build.type` and `ro.product.device`. Elsewhere
    /// they come from [`BUILD_TYPE_VAR`] and [`DEVICE_VAR`], falling back to
    /// `eng` for debug builds of this crate and `user` for release builds.
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(target_os = "android")]
        {
            Self::from_lookup(|key| match key {
                BUILD_TYPE_VAR => crate::android::system_property("ro.build.type"),
                DEVICE_VAR => crate::android::system_property("ro.product.device"),
                _ => None,
            })
        }
        #[cfg(not(target_os = "android"))]
        {
            Self::from_lookup(|key| std::env::var(key).ok())
        }
    }

    /// Builds the environment from a key lookup over [`BUILD_TYPE_VAR`] and
    /// [`DEVICE_VAR`]. Missing or empty values fall back to host defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let build_type = non_empty(BUILD_TYPE_VAR).unwrap_or_else(|| {
            if cfg!(debug_assertions) {
                "eng".to_string()
            } else {
                PRODUCTION_BUILD_TYPE.to_string()
            }
        });
        let device = non_empty(DEVICE_VAR).unwrap_or_else(|| "host".to_string());
        Self::new(build_type.trim(), device.trim())
    }

    #[must_use]
    pub fn build_type(&self) -> &str {
        &self.build_type
    }

    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        self.build_type == PRODUCTION_BUILD_TYPE
    }

    #[must_use]
    pub fn is_generic_device(&self) -> bool {
        self.device.starts_with(GENERIC_DEVICE_PREFIX)
    }

    /// Initial value of the debug override: everything is shown unless this
    /// is a production build on non-generic hardware.
    #[must_use]
    pub fn default_debuggable(&self) -> bool {
        !self.is_production() || self.is_generic_device()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_hardware_is_not_debuggable() {
        let env = BuildEnvironment::new("user", "walleye");
        assert!(env.is_production());
        assert!(!env.is_generic_device());
        assert!(!env.default_debuggable());
    }

    #[test]
    fn generic_device_is_debuggable_even_on_user_builds() {
        let env = BuildEnvironment::new("user", "generic_x86_64");
        assert!(env.default_debuggable());
    }

    #[test]
    fn non_user_builds_are_debuggable() {
        assert!(BuildEnvironment::new("userdebug", "walleye").default_debuggable());
        assert!(BuildEnvironment::development().default_debuggable());
        assert!(!BuildEnvironment::production().default_debuggable());
    }

    #[test]
    fn lookup_values_win_over_defaults() {
        let env = BuildEnvironment::from_lookup(|key| match key {
            BUILD_TYPE_VAR => Some(" user ".into()),
            DEVICE_VAR => Some("generic".into()),
            _ => None,
        });
        assert_eq!(env.build_type(), "user");
        assert_eq!(env.device(), "generic");
    }

    #[test]
    fn empty_lookup_falls_back_to_host_defaults() {
        let env = BuildEnvironment::from_lookup(|_| Some(String::new()));
        assert_eq!(env.device(), "host");
        let expected = if cfg!(debug_assertions) { "eng" } else { "user" };
        assert_eq!(env.build_type(), expected);
    }
}
