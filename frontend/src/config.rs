pub struct Config;

impl Config {
    pub fn api_base_url() -> String {
        // Relative URLs: Trunk proxies /api/ in development and nginx does in
        // production, so the client never needs to know the backend host.
        "".to_string()
    }

    /// Quiet period before the username availability check fires
    pub fn username_check_delay_ms() -> u32 {
        400
    }

    /// Upper bound for every remote call made by the profile screen
    pub fn request_timeout_ms() -> u32 {
        15_000
    }

    pub fn success_toast_ms() -> u32 {
        4_000
    }

    pub fn error_toast_ms() -> u32 {
        8_000
    }
}
