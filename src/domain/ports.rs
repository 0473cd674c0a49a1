/// Source of converter settings, implemented by the TOML config and the CLI flags.
pub trait ConfigProvider: Send + Sync {
    fn registration_base(&self) -> &str;
}
