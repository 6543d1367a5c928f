#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Row cap used when a request carries no `limit`.
    pub default_limit: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}
