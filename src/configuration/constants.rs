pub mod cargo_env {
    pub const CARGO_PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
}

pub mod common {
    pub const SETTINGS_FILE_STEM: &'static str = "runner-cogu";
    pub const ENV_PREFIX: &'static str = "COGU";
    pub const ENV_SEPARATOR: &'static str = "__";
    pub const SIGINT_EXIT_CODE: i32 = 130;
}

pub mod layout {
    pub const HEADER_WIDTH: usize = 93;
    pub const SEPARATOR_WIDTH: usize = 90;
    pub const TELEMETRY_COLUMN_WIDTH: usize = 50;
    pub const METRIC_COLUMN_WIDTH: usize = 23;
    pub const STATUS_COLUMN_WIDTH: usize = 10;
    pub const SUITE_COLUMN_WIDTH: usize = 38;
    pub const NAME_COLUMN_WIDTH: usize = 48;
    pub const QUALITY_BAR_WIDTH: usize = 40;
    pub const VERDICT_ART_WIDTH: usize = 190;
    pub const ELLIPSIS: &'static str = "...";
}
