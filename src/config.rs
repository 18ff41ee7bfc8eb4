use std::time::Duration;

pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";

/// Process settings, read once at startup from `ATTENDANCED_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_latency: Duration,
    pub attendance_latency: Duration,
    pub admin_user: String,
    pub admin_password: String,
    /// Fill default in/out times with 09:00/16:00 instead of random draws.
    pub fixed_times: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_latency: Duration::from_millis(200),
            attendance_latency: Duration::from_millis(500),
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            fixed_times: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };
        Self {
            store_latency: millis("ATTENDANCED_STORE_LATENCY_MS", defaults.store_latency),
            attendance_latency: millis(
                "ATTENDANCED_ATTENDANCE_LATENCY_MS",
                defaults.attendance_latency,
            ),
            admin_user: lookup("ATTENDANCED_ADMIN_USER")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.admin_user),
            admin_password: lookup("ATTENDANCED_ADMIN_PASSWORD")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.admin_password),
            fixed_times: lookup("ATTENDANCED_FIXED_TIMES")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
